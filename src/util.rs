// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


/// Remove parenthesized comments, `;` line comments and all whitespace.
///
/// Comments are dropped character by character, so they may even split a
/// word: `X1(a)0` becomes `X10`.  An unclosed `(` runs to the end of line.
pub fn strip_comments(input: &str) -> String {
    let mut new = String::with_capacity(input.len());
    let mut in_comment = false;
    for ch in input.chars() {
        match ch {
            ')' if in_comment => in_comment = false,
            _ if in_comment => (),
            '(' => in_comment = true,
            ';' => break,
            _ if ch.is_whitespace() => (),
            _ => new.push(ch),
        }
    }
    new
}
