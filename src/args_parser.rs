/// Bytes that separate arguments: space, tab, carriage return, newline, bell.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

/// Initial capacity of the argument vector, and the step it grows by.
pub const TOKEN_BLOCK: usize = 64;

/// Splits a line into its arguments.
///
/// A token is a maximal run of non-delimiter characters; runs of
/// delimiters never yield empty tokens. There is no quoting or escaping.
/// The returned slices borrow from `line`.
pub fn split_line (line: &str) -> Vec<&str> {
    let mut tokens = Vec::with_capacity(TOKEN_BLOCK);

    for token in line.split(&DELIMITERS[..]).filter(|t| !t.is_empty()) {
        if tokens.len() == tokens.capacity() {
            tokens.reserve_exact(TOKEN_BLOCK);
        }
        tokens.push(token);
    }

    tracing::trace!(?tokens, "split line");
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        assert_eq!(split_line("echo hello world"), vec!["echo", "hello", "world"]);
    }

    #[test]
    fn test_mixed_delimiters() {
        assert_eq!(split_line("  a   b\tc\n"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_bell_and_carriage_return() {
        assert_eq!(split_line("ls\x07-l\r"), vec!["ls", "-l"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_line("").is_empty());
    }

    #[test]
    fn test_only_delimiters() {
        assert!(split_line(" \t \r\n  ").is_empty());
    }

    #[test]
    fn test_quotes_are_literal() {
        assert_eq!(
            split_line("echo 'hello world' \"a\\ b\""),
            vec!["echo", "'hello", "world'", "\"a\\", "b\""]
        );
    }

    #[test]
    fn test_many_tokens() {
        let line = (0..TOKEN_BLOCK * 3).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let tokens = split_line(&line);

        assert_eq!(tokens.len(), TOKEN_BLOCK * 3);
        assert_eq!(tokens[0], "0");
        assert_eq!(tokens[TOKEN_BLOCK * 3 - 1], (TOKEN_BLOCK * 3 - 1).to_string());
    }

    #[test]
    fn test_no_variable_expansion() {
        assert_eq!(split_line("echo $HOME *.rs"), vec!["echo", "$HOME", "*.rs"]);
    }
}
