use std::fmt;

use crate::glyphs::GlyphTable;
use crate::message::Message;

/// How readable a message stays on the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Excellent,
    Good,
    Fair,
    Challenging,
}

impl Visibility {
    pub const fn as_str(self) -> &'static str {
        match self {
            Visibility::Excellent => "excellent",
            Visibility::Good => "good",
            Visibility::Fair => "fair",
            Visibility::Challenging => "challenging",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A curated message known to render well
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendedVersion {
    pub message: &'static str,
    pub visibility: Visibility,
    pub description: &'static str,
}

impl RecommendedVersion {
    /// Width in weeks, computed from the glyph table
    pub fn width(&self) -> usize {
        GlyphTable::standard().message_width(&Message::new(self.message))
    }
}

const fn version(
    message: &'static str,
    visibility: Visibility,
    description: &'static str,
) -> RecommendedVersion {
    RecommendedVersion {
        message,
        visibility,
        description,
    }
}

pub const RECOMMENDED_VERSIONS: &[RecommendedVersion] = &[
    version("AI", Visibility::Excellent, "Ultra clean and professional"),
    version("ML", Visibility::Excellent, "Machine Learning focus"),
    version("DL", Visibility::Excellent, "Deep Learning specialist"),
    version("LLM", Visibility::Good, "Large Language Model expert"),
    version("GPT", Visibility::Good, "Generative AI specialist"),
    version("NLP", Visibility::Good, "Natural Language Processing"),
    version("AIE", Visibility::Good, "AI Engineer abbreviated"),
    version("AIDEV", Visibility::Fair, "AI Developer, more descriptive"),
    version("NEURAL", Visibility::Fair, "Neural networks specialist"),
    version("BRAIN", Visibility::Fair, "Creative AI reference"),
    version("PROMPT", Visibility::Fair, "Prompt engineering focus"),
    version("AWS", Visibility::Good, "Amazon Web Services"),
    version("HERO", Visibility::Good, "Hero designation"),
    version("AWS HERO", Visibility::Challenging, "AWS Hero, nearly fills the window"),
];

pub fn lookup_recommended(message: &str) -> Option<&'static RecommendedVersion> {
    let normalized = Message::new(message);
    RECOMMENDED_VERSIONS
        .iter()
        .find(|v| v.message == normalized.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WINDOW_WEEKS;

    #[test]
    fn widths_match_the_documented_table() {
        let widths: Vec<_> = RECOMMENDED_VERSIONS
            .iter()
            .map(|v| (v.message, v.width()))
            .collect();
        assert!(widths.contains(&("AI", 11)));
        assert!(widths.contains(&("LLM", 17)));
        assert!(widths.contains(&("AIDEV", 29)));
        assert!(widths.contains(&("NEURAL", 35)));
        assert!(widths.contains(&("HERO", 23)));
        assert!(widths.contains(&("AWS HERO", 45)));
    }

    #[test]
    fn every_recommendation_fits_the_window() {
        assert!(RECOMMENDED_VERSIONS
            .iter()
            .all(|v| v.width() <= WINDOW_WEEKS));
    }

    #[test]
    fn lookup_normalizes_case() {
        let found = lookup_recommended("aws hero").unwrap();
        assert_eq!(found.visibility, Visibility::Challenging);
        assert!(lookup_recommended("ZZZ").is_none());
    }
}
