use crate::domain::model::{BaseRow, EnrichedRecord, MovieInfo};
use crate::utils::error::{EtlError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

const IMDB_COLUMNS: [&str; 1] = ["imdb_url"];
const BODY_COUNT_COLUMNS: [&str; 2] = ["body_count", "kill_count"];
const FILM_COLUMNS: [&str; 1] = ["film"];

fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|name| h.eq_ignore_ascii_case(name)))
}

/// Reads the base CSV. Header names are matched case-insensitively and a raw
/// scrape output (`IMDB_url`, `Kill_Count`) is accepted as well.
pub fn read_base_rows(data: &[u8]) -> Result<Vec<BaseRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let imdb_idx = find_column(&headers, &IMDB_COLUMNS).ok_or_else(|| EtlError::MissingField {
        field: "IMDB_URL".to_string(),
        context: "input CSV header".to_string(),
    })?;
    let count_idx =
        find_column(&headers, &BODY_COUNT_COLUMNS).ok_or_else(|| EtlError::MissingField {
            field: "Body_Count".to_string(),
            context: "input CSV header".to_string(),
        })?;
    let film_idx = find_column(&headers, &FILM_COLUMNS);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(BaseRow {
            film: film_idx.and_then(|i| record.get(i)).map(str::to_string),
            imdb_url: record.get(imdb_idx).unwrap_or("").to_string(),
            body_count: record.get(count_idx).unwrap_or("").to_string(),
        });
    }

    Ok(rows)
}

/// 只取網址裡的數字 (例如 tt0088247 -> 0088247)
pub fn movie_id_from_url(url: &str) -> String {
    url.chars().filter(char::is_ascii_digit).collect()
}

/// Non-ASCII characters become `?`, commas are dropped.
pub fn ascii_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| *c != ',')
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}

/// "Rated R for strong violence" -> "R". Empty when the movie has no rating text.
pub fn mpaa_code(mpaa: Option<&str>) -> String {
    mpaa.and_then(|text| text.split(' ').nth(1))
        .unwrap_or("")
        .to_string()
}

/// Minutes from the first runtime entry, which may carry a country prefix ("USA:113").
pub fn runtime_minutes(runtime: &[String]) -> Result<u32> {
    let first = runtime.first().ok_or_else(|| EtlError::MissingField {
        field: "runtime".to_string(),
        context: "movie lookup".to_string(),
    })?;
    let minutes = first.rsplit(':').next().unwrap_or(first).trim();

    minutes.parse::<u32>().map_err(|e| EtlError::ProcessingError {
        message: format!("Cannot parse runtime '{}': {}", first, e),
    })
}

fn required<'a, T>(value: &'a Option<T>, field: &str) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| EtlError::MissingField {
        field: field.to_string(),
        context: "movie lookup".to_string(),
    })
}

/// Builds the output row. Any missing required field fails the whole row;
/// only the MPAA rating may be absent.
pub fn enrich_row(row: &BaseRow, movie: &MovieInfo) -> Result<EnrichedRecord> {
    let title = required(&movie.title, "title")?;
    let year = required(&movie.year, "year")?;
    let genres = required(&movie.genres, "genres")?;
    let directors = required(&movie.director, "director")?;
    let cast = required(&movie.cast, "cast")?;
    let runtime = required(&movie.runtime, "runtime")?;
    let rating = required(&movie.rating, "rating")?;

    Ok(EnrichedRecord {
        title: ascii_title(title),
        year: year.to_string(),
        body_count: row.body_count.clone(),
        mpaa_rating: mpaa_code(movie.mpaa.as_deref()),
        genres: genres.join("|"),
        directors: directors.join("|"),
        actors: cast.join("|"),
        length_minutes: runtime_minutes(runtime)?,
        imdb_rating: *rating,
    })
}
