// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

mod actuator;
mod enums;
mod error;

use itertools::Itertools;
use log::{debug, trace, warn};

use crate::ast::*;
use crate::config::{Config, UnknownCodes};

pub use self::actuator::*;
pub use self::enums::*;
pub use self::error::*;

/// G codes that only select a mode.  They are accepted, but have no effect
/// on the actuator.
const MODAL_GCODES: &[u32] = &[17, 18, 19, 20, 21, 40, 49, 54, 80, 90, 91, 94];

/// The Evaluator replays blocks against an actuator, carrying the selected
/// tool and the current position from one block to the next.
///
/// Words within a block are executed in the priority order established by
/// the parser, so e.g. a feed rate is set before the move on the same line.
pub struct Evaluator<'a, A: Actuator + ?Sized> {
    actuator: &'a mut A,
    config: Config,
    state: State,
}

impl<'a, A: Actuator + ?Sized> Evaluator<'a, A> {
    /// Create an evaluator with fresh machine state.
    pub fn new(actuator: &'a mut A, config: &Config) -> Self {
        Evaluator {
            actuator,
            config: *config,
            state: State::default(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn into_state(self) -> State {
        self.state
    }

    /// Execute all blocks of the program in order.
    pub fn eval(&mut self, program: &Program) -> Result<(), EvalError> {
        for block in &program.blocks {
            self.eval_block(block)?;
        }
        Ok(())
    }

    pub fn eval_block(&mut self, block: &Block) -> Result<(), EvalError> {
        debug!("line {}: {}", block.lineno, block);
        let mut moved = false;
        for word in &block.words {
            match &word.instr {
                Instr::Feed(value) => self.actuator.set_feed_rate(*value),
                Instr::Spindle(value) => self.actuator.set_spindle_speed(*value),
                // staged until the next M6
                Instr::Tool(name) => self.state.tool = name.clone(),
                Instr::Mcode(6) => self.actuator.change_tool(&self.state.tool),
                Instr::Mcode(3) => self.actuator.spindle_on(SpindleDir::Cw),
                Instr::Mcode(4) => self.actuator.spindle_on(SpindleDir::Ccw),
                Instr::Mcode(5) => self.actuator.spindle_off(),
                Instr::Mcode(7) | Instr::Mcode(8) => self.actuator.coolant_on(),
                Instr::Mcode(9) => self.actuator.coolant_off(),
                Instr::Mcode(30) => debug!("line {}: end of program", block.lineno),
                Instr::Gcode(28) => {
                    self.state.position = Position::default();
                    self.actuator.home();
                }
                // one move per block, even with both G0 and G1
                Instr::Gcode(0) | Instr::Gcode(1) if moved => (),
                Instr::Gcode(0) | Instr::Gcode(1) => {
                    self.eval_motion(block);
                    moved = true;
                }
                Instr::Gcode(n) if MODAL_GCODES.contains(n) => (),
                Instr::Gcode(n) => self.unknown_code(block, Letter::G, *n)?,
                Instr::Mcode(n) => self.unknown_code(block, Letter::M, *n)?,
                // consumed by G0/G1
                Instr::Axis(..) => (),
            }
        }
        Ok(())
    }

    // -- private API --

    /// Move to the axis words given anywhere on the block.  Axes without a
    /// word keep their current value.
    fn eval_motion(&mut self, block: &Block) {
        let targets = block.words.iter().filter_map(|word| match word.instr {
            Instr::Axis(axis, value) => Some((axis, value)),
            _ => None
        }).collect_vec();

        let mut target = self.state.position;
        for &(axis, value) in &targets {
            target.set(axis, value);
        }
        match targets.iter().map(|&(axis, _)| axis).unique().collect_vec().as_slice() {
            [] => return,
            [axis] => self.actuator.move_axis(*axis, target.get(*axis)),
            _ => self.actuator.move_to(target.x, target.y, target.z),
        }
        self.state.position = target;
    }

    fn unknown_code(&self, block: &Block, letter: Letter, code: u32) -> Result<(), EvalError> {
        match self.config.unknown_codes {
            UnknownCodes::Ignore => trace!("line {}: ignoring {}{}", block.lineno, letter, code),
            UnknownCodes::Warn => warn!("line {}: ignoring unsupported code {}{}",
                                        block.lineno, letter, code),
            UnknownCodes::Reject => return Err(EvalError {
                lineno: block.lineno,
                kind: ErrKind::UnrecognizedCode(letter, code),
            }),
        }
        Ok(())
    }
}

/// Run a program from start to end with fresh machine state, returning the
/// state after the last block.
pub fn run<A: Actuator + ?Sized>(program: &Program, actuator: &mut A,
                                 config: &Config) -> Result<State, EvalError> {
    let mut evaluator = Evaluator::new(actuator, config);
    evaluator.eval(program)?;
    Ok(evaluator.into_state())
}
