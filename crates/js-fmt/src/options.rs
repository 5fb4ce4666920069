//! Formatting options and their loose-typed coercion rules.
//!
//! Every option has a hard fallback (see the table in `spec.md` §4.1);
//! coercion never fails outward — a bad value is logged and replaced with
//! the default instead of surfacing an error, keeping the formatter total.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Formatting options recognized by the beautifier.
///
/// Unrecognized keys passed to [`Options::from_map`] or [`Options::update`]
/// are ignored silently, matching the "public, loosely typed config map"
/// contract described in `spec.md` §6.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub indent_size: usize,
    pub indent_char: String,
    pub indent_level: usize,
    pub preserve_newlines: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indent_size: 4,
            indent_char: String::from(" "),
            indent_level: 0,
            preserve_newlines: false,
        }
    }
}

impl Options {
    /// Builds options from a loosely typed JSON-like map, falling back to
    /// defaults for any key that is missing or whose value doesn't coerce.
    #[must_use]
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut opts = Self::default();
        opts.update(map);
        opts
    }

    /// Applies a partial override from a loosely typed map in place.
    /// Unknown keys are ignored; non-conforming values keep the prior
    /// (already-defaulted) field untouched and emit a `tracing::warn!`.
    pub fn update(&mut self, map: &Map<String, Value>) {
        if let Some(v) = map.get("indent_size") {
            match coerce_uint(v) {
                Some(n) => self.indent_size = n,
                None => tracing::warn!(value = ?v, "invalid indent_size, keeping default"),
            }
        }

        if let Some(v) = map.get("indent_char") {
            match coerce_single_char_string(v) {
                Some(s) => self.indent_char = s,
                None => tracing::warn!(value = ?v, "invalid indent_char, keeping default"),
            }
        }

        if let Some(v) = map.get("indent_level") {
            match coerce_uint(v) {
                Some(n) => self.indent_level = n,
                None => tracing::warn!(value = ?v, "invalid indent_level, keeping default"),
            }
        }

        if let Some(v) = map.get("preserve_newlines") {
            match v.as_bool() {
                Some(b) => self.preserve_newlines = b,
                None => tracing::warn!(value = ?v, "invalid preserve_newlines, keeping default"),
            }
        }
    }

    /// The single indentation unit: `indent_char` repeated `indent_size`
    /// times.
    #[must_use]
    pub fn indent_string(&self) -> String {
        self.indent_char.repeat(self.indent_size)
    }
}

fn coerce_uint(value: &Value) -> Option<usize> {
    if let Some(n) = value.as_u64() {
        return Some(n as usize);
    }
    if let Some(s) = value.as_str() {
        return s.trim().parse::<usize>().ok();
    }
    None
}

fn coerce_single_char_string(value: &Value) -> Option<String> {
    let s = value.as_str()?;
    if s.chars().count() == 1 {
        Some(s.to_owned())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_four_space() {
        let opts = Options::default();
        assert_eq!(opts.indent_size, 4);
        assert_eq!(opts.indent_char, " ");
        assert_eq!(opts.indent_level, 0);
        assert!(!opts.preserve_newlines);
        assert_eq!(opts.indent_string(), "    ");
    }

    #[test]
    fn numeric_string_indent_size_coerces() {
        let map = json!({ "indent_size": "2" }).as_object().unwrap().clone();
        let opts = Options::from_map(&map);
        assert_eq!(opts.indent_size, 2);
    }

    #[test]
    fn bad_indent_size_falls_back_silently() {
        let map = json!({ "indent_size": "bad" }).as_object().unwrap().clone();
        let opts = Options::from_map(&map);
        assert_eq!(opts.indent_size, 4);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let map = json!({ "wat": true }).as_object().unwrap().clone();
        let opts = Options::from_map(&map);
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn tab_indent_char() {
        let map = json!({ "indent_char": "\t", "indent_size": 1 })
            .as_object()
            .unwrap()
            .clone();
        let opts = Options::from_map(&map);
        assert_eq!(opts.indent_string(), "\t");
    }
}
