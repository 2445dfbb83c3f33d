//! CLI tool to evaluate, check, and format arithmetic expressions.

use std::io::{self, BufRead};
use std::process::ExitCode;

use arithc::{Diagnostics, TokenKind};

fn usage() -> ExitCode {
    eprintln!("Usage: arithc <command> [expressions...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  eval    Compile and print the value of each expression");
    eprintln!("  check   Report whether each expression is valid");
    eprintln!("  fmt     Print each expression in canonical form");
    eprintln!("  tokens  Print the token stream of each expression");
    eprintln!();
    eprintln!("Pass - to read expressions from stdin, one per line.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  arithc eval \"(2+3)*4^2\"");
    eprintln!("  arithc fmt \"2^3^2\"");
    eprintln!("  echo 10/4 | arithc eval -");
    ExitCode::from(2)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        return usage();
    }

    let command = args[1].as_str();
    if !matches!(command, "eval" | "check" | "fmt" | "tokens") {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
    }

    let expressions = match collect_expressions(&args[2..]) {
        Ok(expressions) => expressions,
        Err(e) => {
            eprintln!("stdin: {e}");
            return ExitCode::FAILURE;
        }
    };

    if expressions.is_empty() {
        eprintln!("Error: no expressions specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for input in &expressions {
        let ok = match command {
            "eval" => eval(input),
            "check" => check(input),
            "fmt" => fmt(input),
            _ => tokens(input),
        };
        had_error |= !ok;
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Expand `-` into the non-blank lines of stdin.
fn collect_expressions(args: &[String]) -> io::Result<Vec<String>> {
    let mut expressions = Vec::new();
    for arg in args {
        if arg == "-" {
            for line in io::stdin().lock().lines() {
                let line = line?;
                if !line.trim().is_empty() {
                    expressions.push(line);
                }
            }
        } else {
            expressions.push(arg.clone());
        }
    }
    Ok(expressions)
}

fn eval(input: &str) -> bool {
    match arithc::compile_str(input) {
        Ok(function) => {
            println!("{}", function.call());
            true
        }
        Err(e) => {
            report(input, &e);
            false
        }
    }
}

fn check(input: &str) -> bool {
    match arithc::compile_str(input) {
        Ok(_) => {
            eprintln!("{input}: valid");
            true
        }
        Err(e) => {
            report(input, &e);
            false
        }
    }
}

fn fmt(input: &str) -> bool {
    let mut diagnostics = Diagnostics::new();
    let expression = arithc::parse(input, &mut diagnostics);
    if diagnostics.is_empty() {
        println!("{expression}");
        true
    } else {
        report(input, &arithc::Error::Diagnostics(diagnostics));
        false
    }
}

fn tokens(input: &str) -> bool {
    let mut diagnostics = Diagnostics::new();
    for token in arithc::tokenize(input, &mut diagnostics) {
        if token.kind == TokenKind::EndOfFile {
            break;
        }
        println!(
            "{}:{}\t{:?}\t{:?}",
            token.line, token.column, token.kind, token.text
        );
    }
    for diagnostic in &diagnostics {
        eprintln!("{input}: {diagnostic}");
    }
    diagnostics.is_empty()
}

fn report(input: &str, error: &arithc::Error) {
    match error {
        arithc::Error::Diagnostics(diagnostics) => {
            for diagnostic in diagnostics {
                eprintln!("{input}: {diagnostic}");
            }
        }
        arithc::Error::Codegen(e) => eprintln!("{input}: internal error: {e}"),
    }
}
