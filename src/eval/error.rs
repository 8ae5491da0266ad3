// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use thiserror::Error;

use crate::ast::Letter;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("error in line {lineno}: {kind}")]
pub struct EvalError {
    pub lineno: usize,
    pub kind: ErrKind,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrKind {
    #[error("the code {0}{1} is not supported")]
    UnrecognizedCode(Letter, u32),
}
