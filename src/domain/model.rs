use serde::{Deserialize, Serialize};
use std::fmt;

/// 數字開頭的片名都放在 "numbers" 這一頁
pub const NUMBERS_BUCKET: &str = "numbers";

/// One list page bucket on the body-count site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListIdentifier(String);

impl ListIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// `numbers` followed by `A`..`Z`. The site names the V and X pages in
    /// lowercase, every other letter is uppercase.
    pub fn all() -> Vec<ListIdentifier> {
        std::iter::once(NUMBERS_BUCKET.to_string())
            .chain(('A'..='Z').map(|c| match c {
                'V' | 'X' => c.to_ascii_lowercase().to_string(),
                _ => c.to_string(),
            }))
            .map(ListIdentifier)
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Page name of a film detail page, as found on a list page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DetailReference(String);

impl DetailReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DetailReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DetailReference {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// 詳細頁抽取結果，找不到的欄位保持空字串
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilmRecord {
    pub title: String,
    pub year: String,
    pub count: String,
    pub imdb_url: String,
}

/// One row of the enrichment input CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseRow {
    pub film: Option<String>,
    pub imdb_url: String,
    pub body_count: String,
}

/// Movie database answer. Every field is optional on the wire; which ones
/// are required is decided when the enriched row is assembled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieInfo {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub mpaa: Option<String>,
    pub genres: Option<Vec<String>>,
    pub director: Option<Vec<String>>,
    pub cast: Option<Vec<String>>,
    pub runtime: Option<Vec<String>>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub title: String,
    pub year: String,
    pub body_count: String,
    pub mpaa_rating: String,
    pub genres: String,
    pub directors: String,
    pub actors: String,
    pub length_minutes: u32,
    pub imdb_rating: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipStage {
    ListPage,
    DetailPage,
    Lookup,
}

/// An item dropped from the run, kept for the run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    pub stage: SkipStage,
    pub item: String,
    pub reason: String,
}

impl SkippedItem {
    pub fn new(stage: SkipStage, item: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            stage,
            item: item.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Extracted<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedItem>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub csv_output: String,
    pub emitted: usize,
    pub skipped: Vec<SkippedItem>,
}
