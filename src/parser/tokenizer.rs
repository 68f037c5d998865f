//! Line normalization.
//!
//! Splits raw text on `\n` / `\r\n`, trims each line, collapses internal
//! whitespace runs to a single space and drops lines left empty. Blank
//! lines carry no meaning in the format, so paragraph breaks inside a body
//! are not preserved.

/// A normalized, non-empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based position in the original text, blank lines included.
    pub number: usize,
    pub text: String,
}

/// Normalize `input` into its meaningful lines. Never fails.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Line> {
    input
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let text = normalize(raw);
            (!text.is_empty()).then(|| Line {
                number: idx + 1,
                text,
            })
        })
        .collect()
}

/// Trim and collapse whitespace runs.
fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|l| l.text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\n\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_trims_and_collapses() {
        assert_eq!(
            texts("   # My   Project  \n\tsome\t\ttext "),
            vec!["# My Project", "some text"]
        );
    }

    #[test]
    fn test_mixed_line_endings() {
        assert_eq!(texts("a\r\nb\nc\r\n"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let lines = tokenize("first\n\n  \nfourth\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[1].number, 4);
    }

    #[test]
    fn test_last_line_without_newline() {
        assert_eq!(texts("a\nb"), vec!["a", "b"]);
    }
}
