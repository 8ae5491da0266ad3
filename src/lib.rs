// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! A small G-code interpreter: it parses programs into blocks of words and
//! replays them against a machine [`Actuator`](eval::Actuator).
//!
//! The dialect is deliberately simple.  A program body sits between two `%`
//! lines, may carry an `O` program number, and every other line is a block
//! of words such as `N10 G1 X10 Y20 F200`.  Comments are given in
//! parentheses or after a `;`.
//!
//! ## Basic usage
//!
//! Use `gcrun::parse::parse` to get a `Program`, then hand it to
//! `gcrun::eval::run` together with an actuator.  Within a block, words are
//! executed in a fixed machine order (feed and speed first, then tool
//! selection and change, spindle, coolant, homing, motion, and program end)
//! regardless of how they were written.
//!
//! ```rust
//! use gcrun::{Config, parse::parse, eval::{run, Call, Recorder}};
//!
//! let config = Config::default();
//! let prog = parse("%\nO1\nN10 G1 X10 Y20 F200\n%\n", &config).unwrap();
//! let mut machine = Recorder::new();
//! run(&prog, &mut machine, &config).unwrap();
//! assert_eq!(machine.calls, [Call::FeedRate(200.), Call::MoveTo(10., 20., 0.)]);
//! ```
//!
//! ## Unsupported features
//!
//! Expressions, parameters, arcs, canned cycles and relative distance mode
//! are not supported.  All coordinates are absolute millimeters.

pub mod ast;
pub mod config;
pub mod eval;
pub mod files;
pub mod parse;

pub use crate::config::Config;

// internal helpers
pub(crate) mod util;
