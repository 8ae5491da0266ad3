// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt;
use strum_macros::Display;

use crate::ast::Axis;

/// Absolute spindle position.
///
/// All length measures are in millimeters.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "X={:.3} Y={:.3} Z={:.3}", self.x, self.y, self.z)
    }
}

/// Spindle rotation, as switched by M3 and M4.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum SpindleDir {
    Cw, Ccw,
}

/// Machine state carried from block to block during one program run.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct State {
    /// Tool selected by the last T word.  Only applied by M6.
    pub tool: String,
    pub position: Position,
}
