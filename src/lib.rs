//! Arithmetic expression compiler.
//!
//! Turns an expression string into a reusable zero-argument function.
//! The pipeline pulls characters into a [`Lexer`], tokens into a
//! precedence-climbing [`Parser`], and walks the resulting [`Expression`]
//! tree to emit stack-machine code wrapped in a [`CompiledFunction`].
//!
//! # Quick start
//!
//! ```
//! let function = arithc::compile_str("(2+3)*4^2").unwrap();
//! assert_eq!(function.call(), 80.0);
//! ```
//!
//! ## Stage by stage
//!
//! ```
//! use arithc::{Diagnostics, compile, parse};
//!
//! let mut diagnostics = Diagnostics::new();
//! let tree = parse("2^3^2", &mut diagnostics);
//! assert!(diagnostics.is_empty());
//!
//! let function = compile(&tree).unwrap();
//! assert_eq!(function.call(), 512.0);
//! ```
//!
//! ## Diagnostics
//!
//! Lexical and syntax errors never stop the pipeline early. They are
//! collected and returned instead of a function:
//!
//! ```
//! let err = arithc::compile_str("1 @ 2").unwrap_err();
//! assert!(err.to_string().contains("invalid token '@'"));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod builder;
pub mod codegen;
pub mod diagnostics;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod token;

pub use ast::{BinaryOperator, Expression, UnaryOperator};
pub use codegen::{CodegenError, CompiledFunction, OperatorPosition, compile};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Diagnostics};
pub use formatter::format;
pub use lexer::{Lexer, TAB_WIDTH, tokenize};
pub use parser::{MAX_NESTING, Parser, parse, parse_all};
pub use source::CharSource;
pub use token::{Position, Span, Token, TokenKind};

/// Unified error type covering the whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Lexical or syntax errors; no code was generated.
    #[error("{0}")]
    Diagnostics(Diagnostics),
    /// The tree held an operator the generator does not know.
    #[error("{0}")]
    Codegen(#[from] CodegenError),
}

/// Parse and compile an expression string in one step.
///
/// Code is only generated when parsing produced no diagnostics.
pub fn compile_str(input: &str) -> Result<CompiledFunction, Error> {
    let mut diagnostics = Diagnostics::new();
    let expression = parse(input, &mut diagnostics);
    if !diagnostics.is_empty() {
        return Err(Error::Diagnostics(diagnostics));
    }
    Ok(compile(&expression)?)
}
