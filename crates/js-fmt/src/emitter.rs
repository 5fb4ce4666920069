//! The emitter (a.k.a. printer/formatter): owns the output buffer,
//! indentation, mode stack, and the handful of spacing flags described in
//! `spec.md` §3, and decides — per incoming token — whether to insert a
//! space, a newline, an indent change, or nothing at all.

use crate::mode::{Mode, ModeStack};
use crate::options::Options;
use crate::token::{Token, TokenType};

const LINE_STARTERS: &[&str] = &[
    "continue", "try", "throw", "return", "var", "if", "switch", "case", "default", "for",
    "while", "break",
];

fn is_line_starter(word: &str) -> bool {
    LINE_STARTERS.contains(&word)
}

pub struct Emitter {
    output: String,
    indent_string: String,
    indent_level: usize,
    preserve_newlines: bool,
    modes: ModeStack,

    last_type: TokenType,
    last_text: String,
    last_word: String,

    if_line_flag: bool,
    var_line: bool,
    var_line_tainted: bool,
    in_case: bool,
    do_block_just_closed: bool,
}

impl Emitter {
    pub fn new(options: Options) -> Self {
        Self {
            output: String::new(),
            indent_string: options.indent_string(),
            indent_level: options.indent_level,
            preserve_newlines: options.preserve_newlines,
            modes: ModeStack::new(),
            last_type: TokenType::StartExpr,
            last_text: String::new(),
            last_word: String::new(),
            if_line_flag: false,
            var_line: false,
            var_line_tainted: false,
            in_case: false,
            do_block_just_closed: false,
        }
    }

    pub fn preserve_newlines(&self) -> bool {
        self.preserve_newlines
    }

    pub fn last_type(&self) -> TokenType {
        self.last_type
    }

    pub fn last_text(&self) -> &str {
        &self.last_text
    }

    pub fn if_line_flag(&self) -> bool {
        self.if_line_flag
    }

    pub fn into_output(self) -> String {
        self.output
    }

    /// Dispatches one token, updating spacing, indentation, and the mode
    /// stack, then records it as the new "last" token.
    pub fn handle_token(&mut self, token: Token) {
        tracing::trace!(kind = ?token.kind, text = %token.text, "handle_token");

        match token.kind {
            TokenType::StartExpr => self.handle_start_expr(&token),
            TokenType::EndExpr => self.handle_end_expr(&token),
            TokenType::StartBlock => self.handle_start_block(&token),
            TokenType::EndBlock => self.handle_end_block(&token),
            TokenType::Word => self.handle_word(&token),
            TokenType::Semicolon => self.handle_semicolon(&token),
            TokenType::String => self.handle_string(&token),
            TokenType::Operator => self.handle_operator(&token),
            TokenType::BlockComment => self.handle_block_comment(&token),
            TokenType::Comment => self.handle_comment(&token),
            TokenType::Unknown => self.handle_unknown(&token),
            TokenType::Eof => {}
        }

        if token.kind != TokenType::Eof {
            self.last_type = token.kind;
            self.last_text = token.text;
        }
    }

    fn handle_start_expr(&mut self, token: &Token) {
        self.modes.push(Mode::Expression);

        if self.last_text == ";" || self.last_type == TokenType::StartBlock {
            self.print_newline(true);
        }
        if matches!(self.last_type, TokenType::EndExpr | TokenType::StartExpr) {
            self.print_newline(true);
        }
        if !matches!(self.last_type, TokenType::Word | TokenType::Operator) {
            self.print_space();
        }
        if is_line_starter(&self.last_word) {
            self.print_space();
        }

        self.print_token(&token.text);
    }

    fn handle_end_expr(&mut self, token: &Token) {
        self.print_token(&token.text);
        self.modes.pop();
    }

    fn handle_start_block(&mut self, token: &Token) {
        let mode = if self.last_word == "do" {
            Mode::DoBlock
        } else {
            Mode::Block
        };

        if !matches!(self.last_type, TokenType::Operator | TokenType::StartExpr) {
            if self.last_type == TokenType::StartBlock {
                self.print_newline(true);
            } else {
                self.print_space();
            }
        }

        self.print_token(&token.text);
        self.modes.push(mode);
        self.indent_level += 1;
    }

    fn handle_end_block(&mut self, token: &Token) {
        if self.last_type == TokenType::StartBlock {
            self.trim_output();
            self.indent_level = self.indent_level.saturating_sub(1);
        } else {
            self.indent_level = self.indent_level.saturating_sub(1);
            self.print_newline(true);
        }

        self.print_token(&token.text);
        let popped = self.modes.pop();
        self.do_block_just_closed = popped == Mode::DoBlock;
    }

    fn handle_word(&mut self, token: &Token) {
        let text = token.text.as_str();

        if self.do_block_just_closed {
            self.print_space();
            self.print_token(text);
            self.print_space();
            self.do_block_just_closed = false;
        } else if text == "case" || text == "default" {
            if self.last_text == ":" {
                self.remove_indent();
            } else {
                self.unindent();
                self.print_newline(true);
                self.indent();
            }
            self.print_token(text);
            self.in_case = true;
        } else {
            self.apply_word_prefix(text);
            self.print_token(text);
        }

        self.last_word = text.to_owned();
        if text == "var" {
            self.var_line = true;
            self.var_line_tainted = false;
        }
        if text == "if" || text == "else" {
            self.if_line_flag = true;
        }
    }

    fn apply_word_prefix(&mut self, text: &str) {
        #[derive(PartialEq)]
        enum Prefix {
            None,
            Newline,
            Space,
        }

        let mut prefix = Prefix::None;

        match self.last_type {
            TokenType::EndBlock => {
                if matches!(text, "else" | "catch" | "finally") {
                    prefix = Prefix::Space;
                    self.print_space();
                } else {
                    prefix = Prefix::Newline;
                }
            }
            TokenType::Semicolon => {
                prefix = if self.modes.current() == Mode::Block {
                    Prefix::Newline
                } else {
                    Prefix::Space
                };
            }
            TokenType::String => prefix = Prefix::Newline,
            TokenType::Word => prefix = Prefix::Space,
            TokenType::StartBlock => prefix = Prefix::Newline,
            TokenType::EndExpr => {
                self.print_space();
                prefix = Prefix::Newline;
            }
            _ => {}
        }

        if self.last_type != TokenType::EndBlock && matches!(text, "else" | "catch" | "finally") {
            self.print_newline(true);
        } else if is_line_starter(text) || prefix == Prefix::Newline {
            if self.last_text == "else" {
                self.print_space();
            } else if (self.last_type == TokenType::StartExpr
                || self.last_text == "="
                || self.last_text == ",")
                && text == "function"
            {
                // nothing: inline function expression
            } else if self.last_type == TokenType::Word
                && matches!(self.last_text.as_str(), "return" | "throw")
            {
                self.print_space();
            } else if self.last_type != TokenType::EndExpr {
                if (self.last_type == TokenType::StartExpr && text == "var")
                    || self.last_text == ":"
                {
                    // nothing
                } else if text == "if" && self.last_word == "else" {
                    self.print_space();
                } else {
                    self.print_newline(true);
                }
            } else if is_line_starter(text) && self.last_text != ")" {
                self.print_newline(true);
            }
        } else if prefix == Prefix::Space {
            self.print_space();
        }
    }

    fn handle_semicolon(&mut self, token: &Token) {
        self.print_token(&token.text);
        self.var_line = false;
    }

    fn handle_string(&mut self, token: &Token) {
        if matches!(
            self.last_type,
            TokenType::StartBlock | TokenType::EndBlock | TokenType::Semicolon
        ) {
            self.print_newline(true);
        } else if self.last_type == TokenType::Word {
            self.print_space();
        }
        self.print_token(&token.text);
    }

    fn handle_operator(&mut self, token: &Token) {
        let text = token.text.as_str();
        let mut start_delim = true;
        let mut end_delim = true;

        if self.var_line && text != "," {
            self.var_line_tainted = true;
            if text == ":" {
                self.var_line = false;
            }
        }
        if self.var_line && text == "," && self.modes.current() == Mode::Expression {
            self.var_line_tainted = false;
        }

        if text == ":" && self.in_case {
            self.print_token(text);
            self.print_newline(true);
            self.in_case = false;
            return;
        }

        if text == "::" {
            self.print_token(text);
            return;
        }

        if text == "," {
            if self.var_line {
                if self.var_line_tainted {
                    self.print_token(text);
                    self.print_newline(true);
                    self.var_line_tainted = false;
                } else {
                    self.print_token(text);
                    self.print_space();
                }
            } else if self.last_type == TokenType::EndBlock {
                self.print_token(text);
                self.print_newline(true);
            } else if self.modes.current() == Mode::Block {
                self.print_token(text);
                self.print_newline(true);
            } else {
                self.print_token(text);
                self.print_space();
            }
            return;
        }

        if matches!(text, "++" | "--") {
            if self.last_text == ";" {
                if self.modes.current() == Mode::Block {
                    self.print_newline(true);
                }
                start_delim = true;
                end_delim = false;
            } else {
                if self.last_text == "{" {
                    self.print_newline(true);
                }
                start_delim = false;
                end_delim = false;
            }
        } else if matches!(text, "!" | "+" | "-")
            && matches!(self.last_text.as_str(), "return" | "case")
        {
            start_delim = true;
            end_delim = false;
        } else if matches!(text, "!" | "+" | "-") && self.last_type == TokenType::StartExpr {
            start_delim = false;
            end_delim = false;
        } else if self.last_type == TokenType::Operator {
            start_delim = false;
            end_delim = false;
        } else if self.last_type == TokenType::EndExpr {
            start_delim = true;
            end_delim = true;
        } else if text == "." {
            start_delim = false;
            end_delim = false;
        } else if text == ":" {
            start_delim = self.is_ternary_op();
        }

        if start_delim {
            self.print_space();
        }
        self.print_token(text);
        if end_delim {
            self.print_space();
        }
    }

    fn handle_block_comment(&mut self, token: &Token) {
        self.print_newline(true);
        self.print_token(&token.text);
        self.print_newline(true);
    }

    fn handle_comment(&mut self, token: &Token) {
        self.print_space();
        self.print_token(&token.text);
        self.print_newline(true);
    }

    fn handle_unknown(&mut self, token: &Token) {
        if self.last_text != token.text
            && matches!(self.last_type, TokenType::Semicolon | TokenType::StartBlock)
        {
            self.print_newline(true);
        }
        self.print_token(&token.text);
    }

    /// Backward scan deciding whether a trailing `:` closes a ternary
    /// (`cond ? a : b`, leading space) or is an object-literal/label colon
    /// (no leading space). See `spec.md` §4.4.
    fn is_ternary_op(&self) -> bool {
        let mut level: i32 = 0;
        let mut colon_count: i32 = 0;

        for ch in self.output.chars().rev() {
            match ch {
                ':' if level == 0 => colon_count += 1,
                '?' if level == 0 => {
                    if colon_count == 0 {
                        return true;
                    }
                    colon_count -= 1;
                }
                '{' => {
                    if level == 0 {
                        return false;
                    }
                    level -= 1;
                }
                '(' | '[' => level -= 1,
                ')' | ']' | '}' => level += 1,
                _ => {}
            }
        }

        false
    }

    fn print_space(&mut self) {
        match self.output.chars().last() {
            Some(c) if c == ' ' || c == '\n' || c == '\t' => {}
            None => {}
            _ => self.output.push(' '),
        }
    }

    pub(crate) fn print_newline(&mut self, ignore_repeat: bool) {
        self.trim_trailing_indent_ws();

        let is_empty = self.output.is_empty();
        let last_is_newline = self.output.ends_with('\n');
        if !is_empty && !(ignore_repeat && last_is_newline) {
            self.output.push('\n');
        }

        for _ in 0..self.indent_level {
            self.output.push_str(&self.indent_string);
        }
    }

    fn print_token(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn trim_output(&mut self) {
        self.trim_trailing_indent_ws();
    }

    fn trim_trailing_indent_ws(&mut self) {
        while matches!(self.output.chars().last(), Some(' ') | Some('\t')) {
            self.output.pop();
        }
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn unindent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn remove_indent(&mut self) {
        if !self.indent_string.is_empty() && self.output.ends_with(self.indent_string.as_str()) {
            let new_len = self.output.len() - self.indent_string.len();
            self.output.truncate(new_len);
        }
    }
}
