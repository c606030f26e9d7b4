//! Literal-aware character scanner
//!
//! A single forward pass that knows whether the cursor sits inside a
//! single- or double-quoted literal. It is a heuristic, not a lexer:
//! - a quote toggles its own literal unless it is preceded by an odd run of
//!   backslashes;
//! - a quote of the other kind is inert while a literal is open;
//! - nothing else (raw strings, template nesting, lifetimes) is modeled.

/// How the scanner classified one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Outside every literal; structural characters count
    Code,
    /// An opening or closing quote
    Quote,
    /// Inside a literal
    Literal,
}

impl CharClass {
    /// Braces only matter for this class
    pub fn is_code(self) -> bool {
        self == CharClass::Code
    }
}

#[derive(Debug, Default, Clone)]
pub struct LiteralScanner {
    in_single: bool,
    in_double: bool,
    backslash_run: usize,
}

impl LiteralScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a `'...'` literal is open
    pub fn in_single(&self) -> bool {
        self.in_single
    }

    /// True while a `"..."` literal is open
    pub fn in_double(&self) -> bool {
        self.in_double
    }

    pub fn in_literal(&self) -> bool {
        self.in_single || self.in_double
    }

    /// Consume one character and classify it.
    pub fn step(&mut self, ch: char) -> CharClass {
        let escaped = self.backslash_run % 2 == 1;
        self.backslash_run = if ch == '\\' { self.backslash_run + 1 } else { 0 };

        match ch {
            '"' if !escaped && !self.in_single => {
                self.in_double = !self.in_double;
                CharClass::Quote
            }
            '\'' if !escaped && !self.in_double => {
                self.in_single = !self.in_single;
                CharClass::Quote
            }
            _ if self.in_literal() => CharClass::Literal,
            _ => CharClass::Code,
        }
    }

    /// Classify every character of `text` in one pass
    pub fn classify(text: &str) -> Vec<(char, CharClass)> {
        let mut scanner = Self::new();
        text.chars().map(|ch| (ch, scanner.step(ch))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_chars(text: &str) -> String {
        LiteralScanner::classify(text)
            .into_iter()
            .filter(|(_, class)| class.is_code())
            .map(|(ch, _)| ch)
            .collect()
    }

    #[test]
    fn test_quote_at_start_toggles() {
        let mut s = LiteralScanner::new();
        assert_eq!(s.step('"'), CharClass::Quote);
        assert!(s.in_double());
    }

    #[test]
    fn test_braces_inside_strings_are_literal() {
        assert_eq!(code_chars(r#"a "{ }" b"#), "a  b");
        assert_eq!(code_chars("x = '{';"), "x = ;");
    }

    #[test]
    fn test_escaped_quote_does_not_toggle() {
        // "a\"{" keeps the literal open across the escaped quote
        let classes = LiteralScanner::classify(r#""a\"{"x"#);
        assert_eq!(classes[3], ('"', CharClass::Literal));
        assert_eq!(classes[4], ('{', CharClass::Literal));
        assert_eq!(classes[5], ('"', CharClass::Quote));
        assert_eq!(classes[6], ('x', CharClass::Code));
    }

    #[test]
    fn test_escaped_backslash_then_quote_closes() {
        let mut s = LiteralScanner::new();
        for ch in r#""a\\""#.chars() {
            s.step(ch);
        }
        assert!(!s.in_literal());
    }

    #[test]
    fn test_other_quote_kind_is_inert_inside_literal() {
        assert_eq!(code_chars(r#""it's {" {"#), " {");
        assert_eq!(code_chars(r#"'"' {"#), " {");
    }
}
