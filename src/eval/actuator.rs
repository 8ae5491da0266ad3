// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use crate::ast::Axis;
use super::enums::*;

/// The machine driver that the evaluator sends commands to.
///
/// All coordinates are absolute, in millimeters.  Calls are fire-and-forget:
/// an actuator that can fail is responsible for reporting that itself.
pub trait Actuator {
    /// Move to the machine home position.
    fn home(&mut self);

    /// Linear move to the given coordinates.
    fn move_to(&mut self, x: f64, y: f64, z: f64);

    /// Move a single axis, keeping the others where they are.
    fn move_axis(&mut self, axis: Axis, value: f64);

    /// Feed rate in mm/s.
    fn set_feed_rate(&mut self, value: f64);

    /// Spindle speed in rpm.
    fn set_spindle_speed(&mut self, value: u32);

    fn change_tool(&mut self, name: &str);

    fn coolant_on(&mut self);

    fn coolant_off(&mut self);

    /// Start the spindle.  Does nothing unless the machine supports it.
    fn spindle_on(&mut self, _dir: SpindleDir) {}

    /// Stop the spindle.  Does nothing unless the machine supports it.
    fn spindle_off(&mut self) {}
}

/// An actuator that describes every command on stdout.
#[derive(Debug, Default)]
pub struct Console;

impl Actuator for Console {
    fn home(&mut self) {
        println!("Moving to home.");
    }

    fn move_to(&mut self, x: f64, y: f64, z: f64) {
        println!("Moving to {} [mm].", Position::new(x, y, z));
    }

    fn move_axis(&mut self, axis: Axis, value: f64) {
        println!("Moving {} to {:.3} [mm].", axis, value);
    }

    fn set_feed_rate(&mut self, value: f64) {
        println!("Using feed rate {} [mm/s].", value);
    }

    fn set_spindle_speed(&mut self, value: u32) {
        println!("Using spindle speed {} [rpm].", value);
    }

    fn change_tool(&mut self, name: &str) {
        println!("Changing tool '{}'.", name);
    }

    fn coolant_on(&mut self) {
        println!("Coolant turned on.");
    }

    fn coolant_off(&mut self) {
        println!("Coolant turned off.");
    }
}

/// One actuator command, as seen by a `Recorder`.
#[derive(Clone, PartialEq, Debug)]
pub enum Call {
    Home,
    MoveTo(f64, f64, f64),
    MoveAxis(Axis, f64),
    FeedRate(f64),
    SpindleSpeed(u32),
    ChangeTool(String),
    CoolantOn,
    CoolantOff,
    SpindleOn(SpindleDir),
    SpindleOff,
}

/// An actuator that only records the commands it receives.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Actuator for Recorder {
    fn home(&mut self) { self.calls.push(Call::Home); }

    fn move_to(&mut self, x: f64, y: f64, z: f64) { self.calls.push(Call::MoveTo(x, y, z)); }

    fn move_axis(&mut self, axis: Axis, value: f64) { self.calls.push(Call::MoveAxis(axis, value)); }

    fn set_feed_rate(&mut self, value: f64) { self.calls.push(Call::FeedRate(value)); }

    fn set_spindle_speed(&mut self, value: u32) { self.calls.push(Call::SpindleSpeed(value)); }

    fn change_tool(&mut self, name: &str) { self.calls.push(Call::ChangeTool(name.into())); }

    fn coolant_on(&mut self) { self.calls.push(Call::CoolantOn); }

    fn coolant_off(&mut self) { self.calls.push(Call::CoolantOff); }

    fn spindle_on(&mut self, dir: SpindleDir) { self.calls.push(Call::SpindleOn(dir)); }

    fn spindle_off(&mut self) { self.calls.push(Call::SpindleOff); }
}
