//! Display normalization for OCR and translation output.
//!
//! Tesseract output is full of hard line breaks and column gaps that make a
//! one-line overlay unreadable. [`normalize`] folds it into a single line
//! while keeping short gaps (up to three spaces) so table-ish layouts stay
//! recognisable.

/// Longest run of consecutive spaces kept in normalized text.
pub const MAX_SPACE_RUN: usize = 3;

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Collapse line breaks and long space runs, then trim.
///
/// * every line-break character becomes one space;
/// * runs longer than [`MAX_SPACE_RUN`] are cut to exactly that length;
/// * shorter runs pass through unchanged;
/// * leading/trailing whitespace is removed.
///
/// Applying it twice gives the same result as applying it once.
///
/// ```
/// use screen_translate::text::normalize;
///
/// assert_eq!(normalize("Hello\nWorld"), "Hello World");
/// assert_eq!(normalize("a      b"), "a   b");
/// assert_eq!(normalize("Hello   World"), "Hello   World");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;

    for ch in text.chars() {
        let ch = if is_line_break(ch) { ' ' } else { ch };
        if ch == ' ' {
            run += 1;
            if run > MAX_SPACE_RUN {
                continue;
            }
        } else {
            run = 0;
        }
        out.push(ch);
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        " ",
        "\n",
        "plain",
        "Hello   World",
        "Hello    World",
        "line one\nline two\r\nline three",
        "  padded  \n",
        "a\n\n\n\nb",
        "x \n y",
        "tab\tkept",
        "many                spaces",
        "\r\r\r",
        "ünïcödé\u{2028}wörds",
    ];

    fn longest_space_run(s: &str) -> usize {
        s.split(|c| c != ' ').map(str::len).max().unwrap_or(0)
    }

    #[test]
    fn newlines_become_spaces() {
        assert_eq!(normalize("one\ntwo"), "one two");
        assert_eq!(normalize("one\r\ntwo"), "one  two");
    }

    #[test]
    fn runs_of_four_or_more_become_three() {
        assert_eq!(normalize("a    b"), "a   b");
        assert_eq!(normalize("a          b"), "a   b");
    }

    #[test]
    fn runs_up_to_three_pass_through() {
        assert_eq!(normalize("a b"), "a b");
        assert_eq!(normalize("a  b"), "a  b");
        assert_eq!(normalize("a   b"), "a   b");
    }

    #[test]
    fn trims_both_ends() {
        assert_eq!(normalize("   word \n"), "word");
        assert_eq!(normalize("\n\n"), "");
    }

    #[test]
    fn empty_is_unchanged() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn idempotent_on_samples() {
        for s in SAMPLES {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input: {s:?}");
        }
    }

    #[test]
    fn output_has_no_line_breaks_and_short_runs() {
        for s in SAMPLES {
            let out = normalize(s);
            assert!(!out.chars().any(is_line_break), "input: {s:?}");
            assert!(longest_space_run(&out) <= MAX_SPACE_RUN, "input: {s:?}");
        }
    }

    #[test]
    fn line_breaks_next_to_spaces_still_cap_at_three() {
        assert_eq!(normalize("a \n\n \nb"), "a   b");
    }
}
