//! Path segment naming.
//!
//! Every directory or file name derived from free text goes through
//! [`sanitize_segment`], one segment at a time. Joined paths are never
//! sanitized as a whole.

/// Replacement for characters that are illegal on common filesystems.
pub const REPLACEMENT: char = '_';

/// Check whether a character may not appear in a path segment.
pub fn is_forbidden(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || (c as u32) < 0x20
}

/// Replace every forbidden character in a single path segment.
///
/// The mapping is one character for one character: nothing is trimmed or
/// truncated, so the result is stable across runs.
pub fn sanitize_segment(name: &str) -> String {
    name.chars()
        .map(|c| if is_forbidden(c) { REPLACEMENT } else { c })
        .collect()
}

/// Whether `name` would refer to the current or parent directory.
pub fn is_dot_name(name: &str) -> bool {
    matches!(name.trim(), "." | "..")
}

/// Build the segment for a node at `index` labelled `label`: `"{index}_{label}"`.
pub fn segment(index: usize, label: &str) -> String {
    sanitize_segment(&format!("{}_{}", index, label))
}

/// Name a file from a payload-supplied name, falling back when it is blank.
pub fn file_name_or(name: &str, fallback: impl FnOnce() -> String) -> String {
    if name.trim().is_empty() || is_dot_name(name) {
        sanitize_segment(&fallback())
    } else {
        sanitize_segment(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

    #[test]
    fn test_segment_format() {
        assert_eq!(segment(0, "Intro"), "0_Intro");
        assert_eq!(segment(12, "Color theory"), "12_Color theory");
    }

    #[test]
    fn test_sanitize_replaces_each_forbidden_char() {
        assert_eq!(sanitize_segment("a<b>c:d\"e"), "a_b_c_d_e");
        assert_eq!(sanitize_segment("path/to\\file"), "path_to_file");
        assert_eq!(sanitize_segment("what?|*"), "what___");
        assert_eq!(sanitize_segment("tab\there\nnl\0"), "tab_here_nl_");
    }

    #[test]
    fn test_sanitize_keeps_length_and_unicode() {
        let input = "Módulo 1: Introdução?";
        let out = sanitize_segment(input);
        assert_eq!(out.chars().count(), input.chars().count());
        assert_eq!(out, "Módulo 1_ Introdução_");
    }

    #[test]
    fn test_segment_never_contains_forbidden() {
        let labels = [
            "plain",
            "<<>>",
            "a/b/c",
            "C:\\Windows\\system32",
            "\u{1}\u{1f}control",
            "",
            "  spaced  ",
        ];
        for (i, label) in labels.iter().enumerate() {
            let out = segment(i, label);
            assert!(!out.chars().any(|c| FORBIDDEN.contains(&c) || (c as u32) < 0x20));
        }
    }

    #[test]
    fn test_segment_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(segment(3, "Aula: \"final\""), segment(3, "Aula: \"final\""));
        }
        assert_eq!(segment(3, "Aula: \"final\""), "3_Aula_ _final_");
    }

    #[test]
    fn test_del_is_not_replaced() {
        // only 0-31 are control characters for naming purposes
        assert_eq!(sanitize_segment("a\u{7f}b"), "a\u{7f}b");
    }

    #[test]
    fn test_dot_names_use_fallback() {
        assert_eq!(file_name_or("..", || "file_0".into()), "file_0");
        assert_eq!(file_name_or(" . ", || "file_1".into()), "file_1");
        assert_eq!(file_name_or("...", || "x".into()), "...");
    }

    #[test]
    fn test_file_name_or() {
        assert_eq!(file_name_or("video.mp4", || "x".into()), "video.mp4");
        assert_eq!(file_name_or("  ", || "0_Intro.mp4".into()), "0_Intro.mp4");
        assert_eq!(file_name_or("a:b.pdf", || "x".into()), "a_b.pdf");
    }
}
