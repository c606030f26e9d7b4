//! Brace-body hollowing
//!
//! Keeps everything at brace depth 0 and replaces the whole content of each
//! top-level `{ ... }` body with a single placeholder. Braces inside string
//! or character literals are ignored (see [`LiteralScanner`]).

use super::scanner::LiteralScanner;

/// Inserted once per hollowed body
pub const BODY_PLACEHOLDER: &str = " /* ... */ ";

/// Replace every depth-1 body with [`BODY_PLACEHOLDER`].
///
/// Never fails: a stray `}` at depth 0 is kept as ordinary text and an
/// unterminated body simply runs to the end of the input. The transform is
/// idempotent.
pub fn hollow_out_bodies(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut scanner = LiteralScanner::new();
    let mut depth: usize = 0;
    let mut placeholder_written = false;

    for ch in content.chars() {
        let is_code = scanner.step(ch).is_code();

        if is_code && ch == '{' {
            if depth == 0 {
                out.push('{');
                placeholder_written = false;
            }
            depth += 1;
            continue;
        }

        if is_code && ch == '}' {
            if depth == 0 {
                out.push('}');
                continue;
            }
            depth -= 1;
            if depth == 0 {
                out.push('}');
            }
            continue;
        }

        if depth == 0 {
            out.push(ch);
        } else if !placeholder_written {
            out.push_str(BODY_PLACEHOLDER);
            placeholder_written = true;
        }
    }

    out
}
