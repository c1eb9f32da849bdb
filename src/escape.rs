//! Re-serializing argument values into a single shell-safe string
//!
//! The inverse of [`tokenizer::split`](crate::tokenizer::split): joining
//! escaped arguments and splitting the result recovers the original values.

/// Quote `text` when needed so that splitting yields it back verbatim.
///
/// Wrapping happens iff the text contains a space or a double quote, or ends
/// with a backslash. Quotes inside are doubled; a trailing backslash gets a
/// space appended so it cannot be read as escaping the closing quote.
pub fn escape_argument(text: &str) -> String {
    if !needs_escaping(text) {
        return text.to_string();
    }

    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('"');

    for c in text.chars() {
        if c == '"' {
            escaped.push('"');
        }
        escaped.push(c);
    }

    if escaped.ends_with('\\') {
        escaped.push(' ');
    }

    escaped.push('"');
    escaped
}

/// Space-join the escaped forms of `arguments`
pub fn join_arguments<I, S>(arguments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    arguments
        .into_iter()
        .map(|argument| escape_argument(argument.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn needs_escaping(text: &str) -> bool {
    text.chars().any(|c| c == '"' || c == ' ') || text.ends_with('\\')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::split;

    #[test]
    fn test_escapes_spaces() {
        assert_eq!(
            escape_argument("/opt/program files"),
            "\"/opt/program files\""
        );
    }

    #[test]
    fn test_escapes_quotes() {
        assert_eq!(
            escape_argument("a \"quoted\" value"),
            "\"a \"\"quoted\"\" value\""
        );
    }

    #[test]
    fn test_escapes_trailing_backslash() {
        assert_eq!(escape_argument("path\\to\\"), "\"path\\to\\ \"");
    }

    #[test]
    fn test_leaves_simple_text_alone() {
        assert_eq!(escape_argument("file.txt"), "file.txt");
    }

    #[test]
    fn test_join_escapes_each_argument() {
        let joined = join_arguments(["file.txt", "program files", "-f"]);
        assert_eq!(joined, "file.txt \"program files\" -f");
    }

    #[test]
    fn test_escape_then_split_round_trips() {
        for original in [
            "plain",
            "with space",
            "with \"quote\"",
            "trailing\\",
            "mixed \"q\" and space\\",
        ] {
            let tokens = split(&escape_argument(original)).unwrap();
            assert_eq!(tokens, vec![original], "escaping {original:?}");
        }
    }
}
