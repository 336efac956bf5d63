/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 *
 * Command-line driver (spec.md §6 "Command-line driver"): reads a
 * script file (or inline `--execute` sources), strips a leading
 * shebang line, builds the default ambient context, and runs the
 * evaluator, printing uncaught diagnostics and propagating the exit
 * code.
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * Github:   https://github.com/samwilcox/pawx
 *
 * License:
 * This file is part of the PAWX programming language project.
 *
 * PAWX is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 * Full license text available at:
 *    https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::process::ExitCode;

use clap::Parser;

use wisp::error::TopLevelError;
use wisp::{ambient, interpret_source};

/// A tree-walking evaluator for a C-family dynamic scripting language
/// subset.
#[derive(Parser, Debug)]
#[command(name = "wisp", version, about)]
struct Cli {
    /// Evaluate SOURCE directly instead of (or before) a script file.
    /// May be given more than once; each runs in its own top-level
    /// evaluation against a fresh ambient context.
    #[arg(short = 'e', long = "execute", value_name = "SOURCE")]
    execute: Vec<String>,

    /// Path to a source file to run. A leading `#!` line is stripped
    /// before parsing.
    script: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut ran_anything = false;
    let mut failed = false;

    for source in &cli.execute {
        ran_anything = true;
        if !run(source, "<execute>") {
            failed = true;
        }
    }

    if let Some(path) = &cli.script {
        ran_anything = true;
        match std::fs::read_to_string(path) {
            Ok(source) => {
                if !run(&strip_shebang(&source), path) {
                    failed = true;
                }
            }
            Err(e) => {
                eprintln!("error: could not read '{path}': {e}");
                failed = true;
            }
        }
    }

    if !ran_anything {
        eprintln!("usage: wisp [--execute SOURCE]... [script]");
        return ExitCode::FAILURE;
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Runs one source unit against a fresh ambient context, printing a
/// diagnostic on failure. Returns whether the run succeeded.
fn run(source: &str, file_name: &str) -> bool {
    match interpret_source(source, ambient::default_context()) {
        Ok(value) => {
            println!("{}", wisp::interpreter::display::display_result(&value));
            true
        }
        Err(err) => {
            print_error(&err, source, file_name);
            false
        }
    }
}

fn print_error(err: &TopLevelError, source: &str, file_name: &str) {
    match err {
        TopLevelError::Uncaught(value) => {
            eprintln!("error: uncaught exception: {}", value.describe_for_throw());
        }
        TopLevelError::Parse(e) => {
            wisp::diagnostics::DiagnosticPrinter::new(file_name, source).print(e);
        }
        TopLevelError::MalformedControlFlow(e) => {
            wisp::diagnostics::DiagnosticPrinter::new(file_name, source).print(e);
        }
    }
}

/// Strips a leading `#!...` line so scripts can be made directly
/// executable (spec.md §6 "interpreter strips a shebang line if
/// present").
fn strip_shebang(source: &str) -> String {
    if let Some(rest) = source.strip_prefix("#!") {
        match rest.find('\n') {
            Some(idx) => rest[idx + 1..].to_string(),
            None => String::new(),
        }
    } else {
        source.to_string()
    }
}
