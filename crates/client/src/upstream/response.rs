//! Upstream comic record and normalization.

use std::fmt::Display;
use std::str::FromStr;

use comicproxy_core::Comic;
use serde::{Deserialize, Deserializer, de};

/// Raw record returned by the upstream JSON endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawComic {
    pub num: u64,
    pub title: String,
    pub img: String,
    pub alt: String,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(deserialize_with = "published_number")]
    pub year: u16,
    #[serde(deserialize_with = "published_number")]
    pub month: u8,
    #[serde(deserialize_with = "published_number")]
    pub day: u8,
    pub safe_title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub news: String,
}

/// Upstream publishes dates as strings ("2024"), but numbers are accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum Published {
    Number(u64),
    Text(String),
}

fn published_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64>,
    <T as FromStr>::Err: Display,
{
    match Published::deserialize(deserializer)? {
        Published::Number(n) => T::try_from(n).map_err(|_| de::Error::custom(format!("number out of range: {n}"))),
        Published::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

impl From<RawComic> for Comic {
    /// Map an upstream record onto the served shape, defaulting a missing transcript to "".
    fn from(raw: RawComic) -> Self {
        Comic {
            id: raw.num,
            title: raw.title,
            image_url: raw.img,
            alt_text: raw.alt,
            transcript: raw.transcript.unwrap_or_default(),
            year: raw.year,
            month: raw.month,
            day: raw.day,
            safe_title: raw.safe_title,
        }
    }
}
