// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::str::FromStr;
use itertools::Itertools;
use log::{debug, warn};
use pest_derive::Parser;
use pest::{Parser, iterators::Pair};
use thiserror::Error;

use crate::ast::*;
use crate::config::{Config, MalformedWords};
use crate::util::strip_comments;

#[derive(Parser)]
#[grammar = "gcode.pest"]
pub struct GcodeParser;

/// A problem with a single word.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WordError {
    #[error("malformed number {literal:?} for word {letter}")]
    MalformedNumber { letter: Letter, literal: String },
    #[error("word {0} has no value")]
    MissingValue(Letter),
    #[error("{0:?} does not start with a word letter")]
    StrayText(String),
}

/// A word problem that aborted parsing of a program.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("error in line {lineno}: {error}")]
pub struct ParseError {
    pub lineno: usize,
    pub error: WordError,
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Result of classifying one token.  Block numbers are kept apart because
/// they never become words.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    BlockNumber(u32),
    Word(Word),
}

fn parse_number<T: FromStr>(rule: Rule, letter: Letter, literal: &str) -> Result<T, WordError> {
    let malformed = || WordError::MalformedNumber { letter, literal: literal.into() };
    GcodeParser::parse(rule, literal).map_err(|_| malformed())?;
    literal.parse().map_err(|_| malformed())
}

fn make_token(letter: Letter, literal: &str) -> Result<Token, WordError> {
    if literal.is_empty() {
        return Err(WordError::MissingValue(letter));
    }
    let real = || parse_number::<f64>(Rule::real, letter, literal);
    let int = || parse_number::<u32>(Rule::integer, letter, literal);
    let instr = match letter {
        Letter::N => return Ok(Token::BlockNumber(int()?)),
        Letter::T => Instr::Tool(literal.into()),
        Letter::F => Instr::Feed(real()?),
        Letter::S => Instr::Spindle(int()?),
        Letter::G => Instr::Gcode(int()?),
        Letter::M => Instr::Mcode(int()?),
        Letter::X => Instr::Axis(Axis::X, real()?),
        Letter::Y => Instr::Axis(Axis::Y, real()?),
        Letter::Z => Instr::Axis(Axis::Z, real()?),
    };
    Ok(Token::Word(Word::new(instr)))
}

/// Classify a single token such as `G1`, `X-10.5` or `Tdrill`.
pub fn parse_word(token: &str) -> Result<Token, WordError> {
    let letter = token.get(..1)
                      .and_then(|s| Letter::from_str(s).ok())
                      .ok_or_else(|| WordError::StrayText(token.into()))?;
    make_token(letter, &token[1..])
}

fn make_letter(pair: &Pair<Rule>) -> Letter {
    match pair.as_str() {
        "N" => Letter::N,
        "G" => Letter::G,
        "T" => Letter::T,
        "S" => Letter::S,
        "M" => Letter::M,
        "X" => Letter::X,
        "Y" => Letter::Y,
        "Z" => Letter::Z,
        "F" => Letter::F,
        _ => unreachable!()
    }
}

fn note(warnings: &mut Vec<Warning>, warning: Warning) {
    warn!("{}", warning);
    warnings.push(warning);
}

/// Assemble a block from a line that has already been cleaned of comments
/// and whitespace.
fn make_block(lineno: usize, text: &str, config: &Config,
              warnings: &mut Vec<Warning>) -> ParseResult<Option<Block>> {
    if text.is_empty() {
        return Ok(None);
    }
    let pairs = GcodeParser::parse(Rule::line, text).map_err(
        |_| ParseError { lineno, error: WordError::StrayText(text.into()) })?;

    let mut block = Block { lineno, ..Block::default() };
    for pair in pairs.flat_map(|line| line.into_inner()) {
        let (letter, literal, result) = match pair.as_rule() {
            Rule::word => {
                let (letter, literal) = pair.into_inner().collect_tuple().expect("children");
                let letter = make_letter(&letter);
                (Some(letter), literal.as_str(), make_token(letter, literal.as_str()))
            }
            Rule::stray => (None, pair.as_str(), Err(WordError::StrayText(pair.as_str().into()))),
            _ => continue,  // end of input
        };
        match result {
            Ok(Token::BlockNumber(n)) => block.number = Some(n),
            Ok(Token::Word(word)) => block.words.push(word),
            Err(_) if letter == Some(Letter::N) => note(warnings, Warning::MalformedBlockNumber {
                lineno, literal: literal.into()
            }),
            Err(error) => match config.malformed_words {
                MalformedWords::Abort => return Err(ParseError { lineno, error }),
                MalformedWords::Skip => note(warnings, Warning::SkippedWord { lineno, error }),
            }
        }
    }
    // nothing left to execute or print
    if block.words.is_empty() && block.number.is_none() {
        return Ok(None);
    }
    // stable, so words of equal priority keep their source order
    block.words.sort_by_key(|word| word.priority);
    Ok(Some(block))
}

/// Parse one source line into a block.
///
/// Returns `None` for lines that are empty once comments and whitespace are
/// removed, and for lines where neither a block number nor any word
/// survived.  Non-fatal problems are appended to `warnings`.
pub fn parse_block(lineno: usize, line: &str, config: &Config,
                   warnings: &mut Vec<Warning>) -> ParseResult<Option<Block>> {
    make_block(lineno, &strip_comments(line), config, warnings)
}

/// Parse a complete program text.
///
/// Only lines between `%` markers are considered; each `%` line toggles
/// whether we are inside the program body.
pub fn parse(input: &str, config: &Config) -> ParseResult<Program> {
    let mut prog = Program::default();
    let mut in_body = false;
    for (n, line) in input.lines().enumerate() {
        let lineno = n + 1;
        let line = line.trim();
        if line.starts_with('%') {
            in_body = !in_body;
            continue;
        }
        if !in_body {
            continue;
        }
        let text = strip_comments(line);
        if let Some(rest) = text.strip_prefix('O') {
            match parse_number(Rule::integer, Letter::N, rest) {
                Ok(n) => prog.number = Some(n),
                // an earlier valid number stays in place
                Err(_) => note(&mut prog.warnings, Warning::MalformedProgramNumber {
                    lineno, literal: rest.into()
                }),
            }
        } else if let Some(block) = make_block(lineno, &text, config, &mut prog.warnings)? {
            prog.blocks.push(block);
        }
    }
    if in_body {
        note(&mut prog.warnings, Warning::UnterminatedProgram);
    }
    debug!("parsed program {:?} with {} blocks", prog.number, prog.blocks.len());
    Ok(prog)
}
