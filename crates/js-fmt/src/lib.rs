//! A streaming JavaScript beautifier.
//!
//! The engine is a single-pass tokenizer ([`lexer::Lexer`]) pulled by a
//! stateful emitter ([`emitter::Emitter`]) that tracks a small stack of
//! parser modes and a handful of contextual flags to decide, for every
//! adjacent token pair, whether to insert a space, a newline, an indent
//! change, or nothing. See `spec.md` for the full behavioral contract.
#![allow(clippy::module_name_repetitions)]

mod emitter;
mod lexer;
mod mode;
pub mod options;
mod script_tag;
mod token;

pub use options::Options;

use emitter::Emitter;
use lexer::Lexer;
use token::TokenType;

/// Constructs a formatted copy of `source` and holds onto it.
///
/// The result accessor ([`Beautifier::result`]) is idempotent: it may be
/// called any number of times and always returns the same string, since the
/// formatting pass runs once, eagerly, in [`Beautifier::new`].
pub struct Beautifier {
    output: String,
}

impl Beautifier {
    #[must_use]
    pub fn new(source: &str, options: Options) -> Self {
        tracing::debug!(len = source.len(), ?options, "beautifying source");

        let (stripped, add_script_tags) = script_tag::strip(source);

        let mut lexer = Lexer::new(&stripped);
        let mut emitter = Emitter::new(options);

        loop {
            let token = lexer.next_token(&mut emitter);
            if token.kind == TokenType::Eof {
                break;
            }
            emitter.handle_token(token);
        }

        let formatted = emitter.into_output();
        let output = if add_script_tags {
            script_tag::restore(&formatted)
        } else {
            formatted
        };

        Self { output }
    }

    /// Returns the formatted output. Idempotent — repeated calls return an
    /// identical string.
    #[must_use]
    pub fn result(&self) -> String {
        self.output.clone()
    }
}

/// One-shot convenience entry point equivalent to
/// `Beautifier::new(source, options).result()`.
#[must_use]
pub fn format_source(source: &str, options: Options) -> String {
    Beautifier::new(source, options).result()
}

/// One-shot entry point accepting a loosely typed options map, for callers
/// embedding this crate behind a dynamic config surface (editor settings,
/// a JSON request body) instead of constructing [`Options`] directly.
/// Unrecognized keys and non-conforming values fall back silently, per
/// `spec.md` §4.1/§6.
#[must_use]
pub fn format_source_with_map(
    source: &str,
    raw_options: &serde_json::Map<String, serde_json::Value>,
) -> String {
    format_source(source, Options::from_map(raw_options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idempotent() {
        let src = "if(true){var x=1;}else{var y=2;}";
        let once = format_source(src, Options::default());
        let twice = format_source(&once, Options::default());
        assert_eq!(once, twice);
    }

    #[test]
    fn whitespace_only_input_is_empty() {
        assert_eq!(format_source("   \n\t  ", Options::default()), "");
    }

    #[test]
    fn single_semicolon() {
        assert_eq!(format_source(";", Options::default()), ";");
    }

    #[test]
    fn result_is_idempotent_accessor() {
        let b = Beautifier::new("var x=1;", Options::default());
        assert_eq!(b.result(), b.result());
    }
}
