//! Render ranked matches as a plain-text context block for prompt assembly.

use std::fmt::Write;

use stratum_core::models::Match;

/// One block per match, in ranked order:
///
/// ```text
/// Paper: <title or id>
/// Source: <link>        (only when present)
/// Text: <passage text>
/// ```
///
/// Blocks are separated by a blank line. No matches yields an empty string.
pub fn format_context(matches: &[Match]) -> String {
    let mut out = String::new();
    for m in matches {
        let _ = writeln!(out, "Paper: {}", m.metadata.display_title(&m.id));
        if let Some(link) = m.metadata.link.as_deref().filter(|l| !l.is_empty()) {
            let _ = writeln!(out, "Source: {link}");
        }
        let _ = writeln!(out, "Text: {}", m.metadata.text.trim());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_core::models::{PassageMetadata, Tier};

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(format_context(&[]), "");
    }

    #[test]
    fn renders_title_link_and_text() {
        let m = Match::new("Paper3Chunk1", 0.8, Tier::FIRST).with_metadata(PassageMetadata {
            text: " Sleep restores memory. ".into(),
            title: Some("Sleep and memory".into()),
            link: Some("https://pubmed.ncbi.nlm.nih.gov/3/".into()),
            ..Default::default()
        });
        assert_eq!(
            format_context(&[m]),
            "Paper: Sleep and memory\nSource: https://pubmed.ncbi.nlm.nih.gov/3/\nText: Sleep restores memory.\n\n"
        );
    }

    #[test]
    fn falls_back_to_id_without_title() {
        let a = Match::new("a", 0.9, Tier::FIRST).with_metadata(PassageMetadata::with_text("one"));
        let b = Match::new("b", 0.8, Tier::FIRST).with_metadata(PassageMetadata::with_text("two"));
        assert_eq!(
            format_context(&[a, b]),
            "Paper: a\nText: one\n\nPaper: b\nText: two\n\n"
        );
    }
}
