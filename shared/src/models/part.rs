//! Part Model

use serde::{Deserialize, Serialize};

/// Maximum description length shown in part lists before truncation
pub const SUMMARY_DESCRIPTION_LEN: usize = 50;

/// Part entity
///
/// Content is never validated and never edited in place: changing a part
/// means deleting it and adding it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub part_number: String,
    pub description: String,
}

impl Part {
    pub fn new(part_number: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            part_number: part_number.into(),
            description: description.into(),
        }
    }

    /// Description cut to [`SUMMARY_DESCRIPTION_LEN`] characters, with `...`
    /// appended when something was cut
    pub fn truncated_description(&self) -> String {
        if self.description.chars().count() > SUMMARY_DESCRIPTION_LEN {
            let head: String = self
                .description
                .chars()
                .take(SUMMARY_DESCRIPTION_LEN)
                .collect();
            format!("{}...", head)
        } else {
            self.description.clone()
        }
    }
}

/// Part row for selection lists (`"{part_number} - {truncated description}"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartSummary {
    /// Key of the part inside its kit
    pub id: String,
    pub part_number: String,
    pub description: String,
    pub label: String,
}

impl PartSummary {
    pub fn from_part(id: &str, part: &Part) -> Self {
        let description = part.truncated_description();
        Self {
            id: id.to_string(),
            part_number: part.part_number.clone(),
            label: format!("{} - {}", part.part_number, description),
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_description_untouched() {
        let part = Part::new("P1", "Widget");
        assert_eq!(part.truncated_description(), "Widget");
    }

    #[test]
    fn test_long_description_truncated() {
        let part = Part::new("P1", "x".repeat(60));
        let desc = part.truncated_description();
        assert_eq!(desc, format!("{}...", "x".repeat(50)));
    }

    #[test]
    fn test_exactly_fifty_chars_not_truncated() {
        let part = Part::new("P1", "é".repeat(50));
        assert_eq!(part.truncated_description(), "é".repeat(50));
    }

    #[test]
    fn test_summary_label() {
        let summary = PartSummary::from_part("P2", &Part::new("P2", "Gadget"));
        assert_eq!(summary.id, "P2");
        assert_eq!(summary.label, "P2 - Gadget");
    }
}
