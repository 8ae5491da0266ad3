// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt::{self, Formatter};
use itertools::Itertools;
use strum_macros::{Display, EnumString};

use crate::parse::WordError;

/// A parsed program: the blocks between the `%` markers.
#[derive(Debug, Default)]
pub struct Program {
    /// Program number from the `O` directive, `None` if absent or malformed.
    pub number: Option<u32>,
    pub blocks: Vec<Block>,
    /// Non-fatal problems found while parsing, in source order.
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Block {
    /// 1-based line in the source text.
    pub lineno: usize,
    /// Block number from the `N` word, for reference only.
    pub number: Option<u32>,
    /// Words in execution order.
    pub words: Vec<Word>,
}

/// The letters that start a word.  Every other character continues the
/// literal of the current word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumString)]
pub enum Letter {
    N, G, T, S, M,
    X, Y, Z,
    F,
}

/// A linear machine axis.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum Axis {
    X, Y, Z,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    Feed(f64),
    Spindle(u32),
    /// Tool names are opaque, they need not be numeric.
    Tool(String),
    Gcode(u32),
    Mcode(u32),
    Axis(Axis, f64),
}

impl Instr {
    pub fn letter(&self) -> Letter {
        match self {
            Instr::Feed(_) => Letter::F,
            Instr::Spindle(_) => Letter::S,
            Instr::Tool(_) => Letter::T,
            Instr::Gcode(_) => Letter::G,
            Instr::Mcode(_) => Letter::M,
            Instr::Axis(Axis::X, _) => Letter::X,
            Instr::Axis(Axis::Y, _) => Letter::Y,
            Instr::Axis(Axis::Z, _) => Letter::Z,
        }
    }

    /// The numeric code of G and M words.
    pub fn code(&self) -> Option<u32> {
        match self {
            Instr::Gcode(n) | Instr::Mcode(n) => Some(*n),
            _ => None
        }
    }
}

/// Execution tiers of the words on one line, lowest first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
pub enum Priority {
    FeedRate = 1,
    SpindleSpeed,
    ToolSelect,
    ToolChange,
    Spindle,
    Coolant,
    Home,
    Motion,
    ProgramEnd,
    Other,
}

/// Machine-defined execution order, keyed on letter and (for G and M words)
/// the numeric code.  An entry without a code matches every word with that
/// letter.  Anything not listed runs last.
static PRIORITIES: &[(Letter, Option<u32>, Priority)] = &[
    (Letter::F, None,     Priority::FeedRate),
    (Letter::S, None,     Priority::SpindleSpeed),
    (Letter::T, None,     Priority::ToolSelect),
    (Letter::M, Some(6),  Priority::ToolChange),
    (Letter::M, Some(3),  Priority::Spindle),
    (Letter::M, Some(4),  Priority::Spindle),
    (Letter::M, Some(5),  Priority::Spindle),
    (Letter::M, Some(7),  Priority::Coolant),
    (Letter::M, Some(8),  Priority::Coolant),
    (Letter::M, Some(9),  Priority::Coolant),
    (Letter::G, Some(28), Priority::Home),
    (Letter::G, Some(0),  Priority::Motion),
    (Letter::G, Some(1),  Priority::Motion),
    (Letter::M, Some(30), Priority::ProgramEnd),
];

impl Priority {
    pub fn of(letter: Letter, code: Option<u32>) -> Self {
        PRIORITIES.iter()
                  .find(|(l, c, _)| *l == letter && (c.is_none() || *c == code))
                  .map_or(Priority::Other, |&(_, _, prio)| prio)
    }

    /// Numeric tier, 1 for feed rate up to 10 for everything else.
    pub fn rank(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub instr: Instr,
    pub priority: Priority,
}

impl Word {
    pub fn new(instr: Instr) -> Self {
        let priority = Priority::of(instr.letter(), instr.code());
        Word { instr, priority }
    }

    pub fn letter(&self) -> Letter {
        self.instr.letter()
    }
}

/// A non-fatal problem found while parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    MalformedBlockNumber { lineno: usize, literal: String },
    MalformedProgramNumber { lineno: usize, literal: String },
    SkippedWord { lineno: usize, error: WordError },
    UnterminatedProgram,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Warning::MalformedBlockNumber { lineno, literal } =>
                write!(f, "line {}: invalid block number N{:?}, leaving it unset", lineno, literal),
            Warning::MalformedProgramNumber { lineno, literal } =>
                write!(f, "line {}: invalid program number O{:?}, leaving it unset", lineno, literal),
            Warning::SkippedWord { lineno, error } =>
                write!(f, "line {}: skipping word: {}", lineno, error),
            Warning::UnterminatedProgram =>
                write!(f, "program body is not closed by a `%` line"),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "%")?;
        if let Some(n) = self.number {
            writeln!(f, "O{}", n)?;
        }
        for block in &self.blocks {
            writeln!(f, "{}", block)?;
        }
        writeln!(f, "%")
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if let Some(n) = self.number {
            write!(f, "N{}", n)?;
            if !self.words.is_empty() {
                write!(f, " ")?;
            }
        }
        write!(f, "{}", self.words.iter().join(" "))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.instr)
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Instr::Feed(n) => write!(f, "F{}", n),
            Instr::Spindle(n) => write!(f, "S{}", n),
            Instr::Tool(name) => write!(f, "T{}", name),
            Instr::Gcode(n) => write!(f, "G{}", n),
            Instr::Mcode(n) => write!(f, "M{}", n),
            Instr::Axis(a, n) => write!(f, "{}{}", a, n),
        }
    }
}
