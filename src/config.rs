// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Policies for input the parser and evaluator cannot fully make sense of.

use strum_macros::{Display, EnumString};

/// What to do with a word whose literal does not parse.
///
/// A malformed block number (`N`) is never fatal: it only produces a warning
/// and leaves the block number unset.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MalformedWords {
    /// Fail parsing of the whole program.
    Abort,
    /// Drop the word, record a warning and keep the rest of the block.
    Skip,
}

impl Default for MalformedWords {
    fn default() -> Self { MalformedWords::Abort }
}

/// What to do with a G or M code the evaluator does not model.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum UnknownCodes {
    Ignore,
    Warn,
    Reject,
}

impl Default for UnknownCodes {
    fn default() -> Self { UnknownCodes::Ignore }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Config {
    pub malformed_words: MalformedWords,
    pub unknown_codes: UnknownCodes,
}
