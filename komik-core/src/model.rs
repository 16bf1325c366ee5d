use std::fmt;

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComicType {
    Manga,
    Manhwa,
    Manhua,
    #[default]
    Unknown,
}

impl ComicType {
    /// Case-insensitive, anything unexpected becomes `Unknown`.
    #[must_use]
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "manga" => Self::Manga,
            "manhwa" => Self::Manhwa,
            "manhua" => Self::Manhua,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manga => "manga",
            Self::Manhwa => "manhwa",
            Self::Manhua => "manhua",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ComicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Manga => "Manga",
            Self::Manhwa => "Manhwa",
            Self::Manhua => "Manhua",
            Self::Unknown => "-",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for ComicType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map_or(Self::Unknown, |value| Self::parse_lossy(&value)))
    }
}

/// One card of a listing (latest feed or search results).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComicSummary {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub cover: String,
    #[serde(rename = "type", default)]
    pub comic_type: ComicType,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: Option<f32>,
    #[serde(default, deserialize_with = "non_empty")]
    pub chapter: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct GenreRef {
    #[serde(default)]
    pub slug: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ChapterRef {
    pub slug: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComicDetail {
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub cover: String,
    #[serde(rename = "type", default)]
    pub comic_type: ComicType,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: Option<f32>,
    #[serde(rename = "otherTitle", default, deserialize_with = "non_empty")]
    pub other_title: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub release: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub reader: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub synopsis: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub genres: Vec<GenreRef>,
    /// Newest first.
    #[serde(default, deserialize_with = "null_default")]
    pub chapters: Vec<ChapterRef>,
}

impl ComicDetail {
    /// Display number of `chapters[index]`, counting from the oldest chapter.
    #[must_use]
    pub fn chapter_number(&self, index: usize) -> Option<usize> {
        (index < self.chapters.len()).then(|| self.chapters.len() - index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct ChapterNavigation {
    #[serde(default, deserialize_with = "non_empty")]
    pub prev: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ChapterContent {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub navigation: ChapterNavigation,
}

fn non_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.trim().is_empty()))
}

fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f32>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Rating {
        Number(f32),
        Text(String),
    }

    Ok(match Option::<Rating>::deserialize(deserializer)? {
        Some(Rating::Number(rating)) => Some(rating),
        Some(Rating::Text(rating)) => rating.trim().parse().ok(),
        None => None,
    })
}
