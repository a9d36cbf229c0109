use crate::domain::model::{EnrichedRecord, FilmRecord};
use crate::utils::error::{EtlError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const SCRAPE_HEADER: [&str; 4] = ["Film", "Year", "Kill_Count", "IMDB_url"];

pub const ENRICHED_HEADER: [&str; 9] = [
    "Film",
    "Year",
    "Body_Count",
    "MPAA_Rating",
    "Genre",
    "Director",
    "Actors",
    "Length_Minutes",
    "IMDB_Rating",
];

pub trait CsvRow {
    fn fields(&self) -> Vec<String>;
}

impl CsvRow for FilmRecord {
    fn fields(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.year.clone(),
            self.count.clone(),
            self.imdb_url.clone(),
        ]
    }
}

impl CsvRow for EnrichedRecord {
    fn fields(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.year.clone(),
            self.body_count.clone(),
            self.mpaa_rating.clone(),
            self.genres.clone(),
            self.directors.clone(),
            self.actors.clone(),
            self.length_minutes.to_string(),
            format_score(self.imdb_rating),
        ]
    }
}

/// 分數至少保留一位小數 (8.0 而不是 8)
pub fn format_score(score: f64) -> String {
    format!("{:?}", score)
}

/// Fixed header plus one comma-joined line per row. Fields are never quoted,
/// callers strip delimiters from values that may contain them.
#[derive(Debug, Clone, Copy)]
pub struct CsvEmitter {
    header: &'static [&'static str],
}

impl CsvEmitter {
    pub fn new(header: &'static [&'static str]) -> Self {
        Self { header }
    }

    pub fn scrape() -> Self {
        Self::new(&SCRAPE_HEADER)
    }

    pub fn enriched() -> Self {
        Self::new(&ENRICHED_HEADER)
    }

    pub fn render<R: CsvRow>(&self, rows: &[R]) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record(self.header)?;
        for row in rows {
            writer.write_record(row.fields())?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| EtlError::IoError(e.into_error()))?;

        String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
            message: format!("CSV output is not UTF-8: {}", e),
        })
    }
}
