//! Line wrapping for fixed-width report columns

/// Greedy word wrap to at most `width` characters per line.
///
/// Runs of whitespace collapse to a single space, words longer than the
/// column are hard-split, and blank input yields no lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        if word.is_empty() {
            continue;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };

        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_short_line_unchanged() {
        assert_eq!(wrap("Deposit ok", 95), vec!["Deposit ok"]);
    }

    #[test]
    fn test_wraps_at_word_boundary() {
        assert_eq!(
            wrap("late fee exceeds the limit", 12),
            vec!["late fee", "exceeds the", "limit"]
        );
    }

    #[test]
    fn test_blank_input_has_no_lines() {
        assert!(wrap("   ", 95).is_empty());
        assert!(wrap("", 95).is_empty());
    }

    #[test]
    fn test_long_word_is_split() {
        assert_eq!(
            wrap("https://www.nj.gov/dca", 10),
            vec!["https://ww", "w.nj.gov/d", "ca"]
        );
    }

    proptest! {
        #[test]
        fn lines_never_exceed_width(text in "[a-zA-Z ]{0,300}", width in 5usize..100) {
            for line in wrap(&text, width) {
                prop_assert!(line.chars().count() <= width);
                prop_assert!(!line.is_empty());
            }
        }

        #[test]
        fn wrapping_keeps_every_word(text in "[a-z]{1,8}( [a-z]{1,8}){0,30}") {
            let rejoined = wrap(&text, 20).join(" ");
            prop_assert_eq!(rejoined, text);
        }
    }
}
