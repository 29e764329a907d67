/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::env;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use xmlnode::Document;
use xmlnode::DocumentParser;
use xmlnode::Location;
use xmlnode::ParseError;
use xmlnode::PrintOptions;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    println!("xmlfmt (xmlnode) v{}", VERSION);
}

fn print_usage() {
    println!(concat!(
        "Usage: xmlfmt [OPTIONS] [FILE.xml...]\n",
        "This tool parses XML documents and prints them back formatted.\n",
        "Options:\n",
        "  -c, --compact        No indentation or newlines\n",
        "  -i, --indent <UNIT>  Text used for each indentation level (default: tab)\n",
        "  -s, --spaces <N>     Indent with N spaces\n",
        "  -q, --check          Only check the syntax, do not print\n",
        "  -h, --help           Display this help message and exit\n",
        "  -v, --version        Display the version and exit\n",
        "Set RUST_LOG=debug to see the parser events."
    ));
}

enum FormatterError {
    IoError(std::io::Error),
    ParseError(ParseError, Location),
}

impl From<std::io::Error> for FormatterError {
    fn from(err: std::io::Error) -> Self {
        FormatterError::IoError(err)
    }
}

struct Formatter {
    options: PrintOptions,
    check_only: bool,
    document: Document,
}

impl Formatter {
    fn new(options: PrintOptions, check_only: bool) -> Self {
        Formatter {
            options,
            check_only,
            document: Document::new(),
        }
    }

    fn format_file(&mut self, file: &str, is_stream: bool) -> Result<(), FormatterError> {
        let mut f: Box<dyn Read> = if is_stream {
            Box::new(stdin())
        } else {
            Box::new(File::open(file)?)
        };
        let mut text = String::new();
        f.read_to_string(&mut text)?;

        let mut parser = DocumentParser::new(&text);
        if let Err(err) = parser.parse_into(&mut self.document) {
            return Err(FormatterError::ParseError(err, parser.location()));
        }
        debug!(file, stats = %self.document.arena_stats(), "document parsed");

        if !self.check_only {
            let xml = self.document.render(&self.options);
            let mut out = stdout().lock();
            out.write_all(xml.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }

    fn process_file(&mut self, file: &str, is_stream: bool) -> bool {
        match self.format_file(file, is_stream) {
            Ok(()) => true,
            Err(FormatterError::IoError(e)) => {
                eprintln!("Error reading file '{}': {}", file, e);
                false
            }
            Err(FormatterError::ParseError(err, location)) => {
                eprintln!(
                    "Syntax error in file '{}' at line {} column {}: {}",
                    file, location.lines, location.column, err
                );
                false
            }
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = env::args();

    let mut files = Vec::new();
    let mut options = PrintOptions::default();
    let mut check_only = false;

    // Skip the first argument (program name)
    args.next();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--compact" => {
                options = options.with_indent(false);
            }
            "-i" | "--indent" => {
                if let Some(unit) = args.next() {
                    options = options.with_indent(true).with_indent_unit(unit);
                } else {
                    eprintln!("Missing indentation text");
                    return ExitCode::FAILURE;
                }
            }
            "-s" | "--spaces" => {
                if let Some(count) = args.next() {
                    if let Ok(count) = count.parse::<usize>() {
                        options = options.with_indent(true).with_indent_unit(" ".repeat(count));
                    } else {
                        eprintln!("Invalid number of spaces");
                        return ExitCode::FAILURE;
                    }
                } else {
                    eprintln!("Missing number of spaces");
                    return ExitCode::FAILURE;
                }
            }
            "-q" | "--check" => {
                check_only = true;
            }
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                print_version();
                return ExitCode::SUCCESS;
            }
            _ => {
                files.push(arg);
            }
        }
    }

    let mut formatter = Formatter::new(options, check_only);
    if files.is_empty() {
        if !formatter.process_file("stdin", true) {
            return ExitCode::FAILURE;
        }
    } else {
        for file in files {
            if !formatter.process_file(&file, false) {
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
