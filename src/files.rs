// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Loading and running program files one after another.

use std::{fs, io, path::{Path, PathBuf}};
use log::debug;
use thiserror::Error;

use crate::ast::Program;
use crate::config::Config;
use crate::eval::{self, Actuator, EvalError, State};
use crate::parse::{self, ParseError};

/// A file that could not be read, parsed or run.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("failed to read {}", .path.display())]
    Io { path: PathBuf, #[source] source: io::Error },
    #[error("failed to parse {}", .path.display())]
    Parse { path: PathBuf, #[source] source: ParseError },
    #[error("failed to run {}", .path.display())]
    Eval { path: PathBuf, #[source] source: EvalError },
}

impl FileError {
    pub fn path(&self) -> &Path {
        match self {
            FileError::Io { path, .. } |
            FileError::Parse { path, .. } |
            FileError::Eval { path, .. } => path,
        }
    }
}

/// Read and parse a program file.
pub fn load(path: &Path, config: &Config) -> Result<Program, FileError> {
    let text = fs::read_to_string(path)
        .map_err(|source| FileError::Io { path: path.into(), source })?;
    parse::parse(&text, config)
        .map_err(|source| FileError::Parse { path: path.into(), source })
}

/// Load a program file and run it on the given actuator.
pub fn run_file<A: Actuator + ?Sized>(path: &Path, actuator: &mut A,
                                      config: &Config) -> Result<State, FileError> {
    let prog = load(path, config)?;
    eval::run(&prog, actuator, config)
        .map_err(|source| FileError::Eval { path: path.into(), source })
}

/// Run each file on a fresh actuator from `new_actuator`.
///
/// A failing file does not stop the others.  Results are returned in the
/// order of `paths`, successful ones with the actuator that ran the file.
pub fn run_files<P, A, F>(paths: &[P], config: &Config, mut new_actuator: F)
                          -> Vec<Result<A, FileError>>
where P: AsRef<Path>, A: Actuator, F: FnMut() -> A
{
    paths.iter().map(|path| -> Result<A, FileError> {
        let path = path.as_ref();
        debug!("running {}", path.display());
        let mut actuator = new_actuator();
        run_file(path, &mut actuator, config)?;
        Ok(actuator)
    }).collect()
}

/// Process exit code for a batch: 0 if every file ran, 1 otherwise.
pub fn exit_code<T>(results: &[Result<T, FileError>]) -> i32 {
    if results.iter().all(Result::is_ok) { 0 } else { 1 }
}
