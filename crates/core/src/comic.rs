//! Normalized comic record.

use serde::{Deserialize, Serialize};

/// A single comic issue as served by the proxy.
///
/// Built only by normalizing an upstream record and never mutated afterwards.
/// The serialized field names match the public API (`img`, `alt`, `safe_title`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comic {
    pub id: u64,
    pub title: String,
    #[serde(rename = "img")]
    pub image_url: String,
    #[serde(rename = "alt")]
    pub alt_text: String,
    /// Empty when upstream has no transcript.
    pub transcript: String,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub safe_title: String,
}

impl Comic {
    /// Case-sensitive substring match against the title or the transcript.
    ///
    /// An empty query matches every comic.
    pub fn matches(&self, query: &str) -> bool {
        self.title.contains(query) || self.transcript.contains(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comic(title: &str, transcript: &str) -> Comic {
        Comic {
            id: 1,
            title: title.into(),
            image_url: "https://imgs.xkcd.com/comics/barrel_cropped_(1).jpg".into(),
            alt_text: "Don't we all.".into(),
            transcript: transcript.into(),
            year: 2006,
            month: 1,
            day: 1,
            safe_title: title.into(),
        }
    }

    #[test]
    fn test_matches_title() {
        assert!(comic("Barrel - Part 1", "").matches("Barrel"));
    }

    #[test]
    fn test_matches_transcript() {
        assert!(comic("Untitled", "[[A robot walks in]]").matches("robot"));
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        let c = comic("Robots", "A ROBOT appears");
        assert!(!c.matches("robot"));
        assert!(c.matches("Robot"));
    }

    #[test]
    fn test_empty_query_matches_empty_transcript() {
        assert!(comic("", "").matches(""));
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(comic("Barrel - Part 1", "")).unwrap();
        assert_eq!(json["img"], "https://imgs.xkcd.com/comics/barrel_cropped_(1).jpg");
        assert_eq!(json["alt"], "Don't we all.");
        assert_eq!(json["safe_title"], "Barrel - Part 1");
        assert_eq!(json["transcript"], "");
        assert!(json.get("image_url").is_none());
    }
}
