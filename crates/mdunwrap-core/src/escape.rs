//! Backslash-escaping of literal text runs

/// Sequences that must not survive unescaped in emitted text, or the
/// output would re-parse with different structure.
///
/// Checked in order, longest sequence first (`![` before `[`), so the
/// winning match at any position is deterministic rather than dependent
/// on container iteration order.
const MUST_ESCAPE: &[&str] = &["![", "#", "&", "[", "*", "_", "|", "\\", "<", "`"];

/// Escape a literal text run for embedding in rendered Markdown.
///
/// Scans left to right; every character of a matched sequence is
/// individually prefixed with a backslash and the scan resumes after the
/// match. Unmatched characters pass through unchanged. All candidate
/// sequences are ASCII, so any byte position that starts a match is a
/// character boundary.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut flushed = 0;
    let mut pos = 0;
    while pos < text.len() {
        if let Some(&seq) = MUST_ESCAPE.iter().find(|&&seq| text[pos..].starts_with(seq)) {
            escaped.push_str(&text[flushed..pos]);
            for c in seq.chars() {
                escaped.push('\\');
                escaped.push(c);
            }
            pos += seq.len();
            flushed = pos;
        } else {
            pos += text[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }
    escaped.push_str(&text[flushed..]);
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(escape_text("plain text, no specials."), "plain text, no specials.");
    }

    #[test]
    fn test_empty() {
        assert_eq!(escape_text(""), "");
    }

    #[test]
    fn test_asterisks() {
        assert_eq!(escape_text("*bold*"), "\\*bold\\*");
    }

    #[test]
    fn test_single_characters() {
        assert_eq!(escape_text("# heading"), "\\# heading");
        assert_eq!(escape_text("a & b"), "a \\& b");
        assert_eq!(escape_text("a | b"), "a \\| b");
        assert_eq!(escape_text("_under_"), "\\_under\\_");
        assert_eq!(escape_text("`tick`"), "\\`tick\\`");
        assert_eq!(escape_text("<tag>"), "\\<tag>");
        assert_eq!(escape_text("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_image_opener_escapes_both_characters() {
        // `![` wins over `[`, and each character of the pair gets its own
        // backslash.
        assert_eq!(escape_text("![alt"), "\\!\\[alt");
    }

    #[test]
    fn test_bare_bracket() {
        assert_eq!(escape_text("[link]"), "\\[link]");
    }

    #[test]
    fn test_bang_without_bracket_is_untouched() {
        assert_eq!(escape_text("hello!"), "hello!");
    }

    #[test]
    fn test_scan_resumes_after_match() {
        assert_eq!(escape_text("![a![b"), "\\!\\[a\\!\\[b");
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        assert_eq!(escape_text("héllo *wörld*"), "héllo \\*wörld\\*");
    }
}
