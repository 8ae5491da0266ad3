// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::{path::PathBuf, process};
use clap::Parser;
use gcrun::{Config, eval::Console, files};
use gcrun::config::{MalformedWords, UnknownCodes};

/// Parse G-code programs and replay them on a console machine.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Drop malformed words instead of rejecting the program
    #[clap(long)]
    skip_malformed: bool,

    /// Handling of unsupported G and M codes: ignore, warn or reject
    #[clap(long, value_parser, default_value = "ignore")]
    unknown_codes: UnknownCodes,

    /// Print the parsed program instead of running it
    #[clap(long)]
    dump: bool,

    /// Verbose
    #[clap(short, long)]
    verbose: bool,

    /// Program files
    #[clap(value_parser)]
    files: Vec<PathBuf>,
}

fn report(err: files::FileError) {
    // the alternate form includes the underlying cause
    eprintln!("Error: {:#}", anyhow::Error::new(err));
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = Config {
        malformed_words: if args.skip_malformed { MalformedWords::Skip } else { MalformedWords::Abort },
        unknown_codes: args.unknown_codes,
    };

    let code = if args.dump {
        let results = args.files.iter().map(|path| files::load(path, &config)).collect::<Vec<_>>();
        let code = files::exit_code(&results);
        for result in results {
            match result {
                Ok(prog) => print!("{}", prog),
                Err(e) => report(e),
            }
        }
        code
    } else {
        let results = files::run_files(&args.files[..], &config, || Console);
        let code = files::exit_code(&results);
        results.into_iter().filter_map(Result::err).for_each(report);
        code
    };
    process::exit(code);
}
