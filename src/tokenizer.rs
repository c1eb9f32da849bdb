//! Shell-like splitting of a raw command line into word tokens

use crate::error::SyntaxError;

/// Split a raw command line into tokens.
///
/// Unquoted spaces separate tokens and runs of them fold together. A `"`
/// opens a quoted span in which spaces are literal; `""` and `\"` inside a
/// span produce a literal quote. Adjacent quoted segments concatenate into
/// one token (`abc""def` is `abcdef`). Tokens are trimmed when flushed, so
/// leading/trailing whitespace inside quotes is dropped; tokens that trim to
/// nothing are dropped entirely.
pub fn split(command_line: &str) -> Result<Vec<String>, SyntaxError> {
    let chars: Vec<char> = command_line.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];

        if c == ' ' {
            flush(&mut tokens, &mut current);
        } else if c == '"' {
            let opening_quote = pos;
            pos += 1;

            while pos < chars.len() {
                if chars[pos] == '"' {
                    // A doubled quote is an escaped literal quote
                    if pos + 1 < chars.len() && chars[pos + 1] == '"' {
                        pos += 1;
                    } else {
                        break;
                    }
                }

                // Backslash-escaped quote
                if chars[pos] == '\\' && pos + 1 < chars.len() && chars[pos + 1] == '"' {
                    pos += 1;
                }

                current.push(chars[pos]);
                pos += 1;
            }

            if pos >= chars.len() {
                return Err(SyntaxError::UnmatchedQuote {
                    position: opening_quote,
                });
            }
        } else {
            current.push(c);
        }

        pos += 1;
    }

    flush(&mut tokens, &mut current);

    Ok(tokens)
}

/// Tokens are trimmed on flush, not mid-scan
fn flush(tokens: &mut Vec<String>, current: &mut String) {
    let token = current.trim();
    if !token.is_empty() {
        tokens.push(token.to_string());
    }
    current.clear();
}
