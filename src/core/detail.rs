use crate::core::markup::{html_to_lines, page_url};
use crate::domain::model::{DetailReference, FilmRecord};
use crate::domain::ports::PageFetcher;
use crate::utils::error::Result;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmField {
    Title,
    Year,
    Count,
    ImdbUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// 第一個符合的行決定欄位值，之後的行忽略
    FirstMatchWins,
    /// 每個符合的行都覆蓋前一次的值
    LastMatchWins,
}

/// A named line heuristic. `trigger` decides whether a line is relevant,
/// `extract` pulls the value out of it. An extract returning `None` leaves
/// the field untouched.
#[derive(Clone, Copy)]
pub struct ExtractionRule {
    pub name: &'static str,
    pub field: FilmField,
    pub policy: MatchPolicy,
    trigger: fn(&str) -> bool,
    extract: fn(&str) -> Option<String>,
}

impl ExtractionRule {
    pub fn matches(&self, line: &str) -> bool {
        (self.trigger)(line)
    }

    pub fn extract(&self, line: &str) -> Option<String> {
        (self.extract)(line)
    }
}

impl std::fmt::Debug for ExtractionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionRule")
            .field("name", &self.name)
            .field("field", &self.field)
            .field("policy", &self.policy)
            .finish()
    }
}

fn is_title_line(line: &str) -> bool {
    !line.trim().is_empty() && !line.contains(['!', '(', '['])
}

fn title_value(line: &str) -> Option<String> {
    Some(line.replace(',', "").trim().trim_matches(':').trim().to_string())
}

fn is_count_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    ["film:", "kills:", "count:"]
        .iter()
        .any(|marker| lower.contains(marker))
}

fn count_value(line: &str) -> Option<String> {
    let after_colon = line.split(':').nth(1).unwrap_or("");
    let before_paren = after_colon.split('(').next().unwrap_or("");
    Some(before_paren.chars().filter(char::is_ascii_digit).collect())
}

fn is_year_line(line: &str) -> bool {
    line.contains("charts-year")
}

fn year_value(line: &str) -> Option<String> {
    let (_, rest) = line.split_once('[')?;
    Some(rest.split(']').next().unwrap_or(rest).to_string())
}

fn is_imdb_line(line: &str) -> bool {
    line.to_lowercase().contains("[imdb]")
}

fn imdb_value(line: &str) -> Option<String> {
    let lower = line.to_lowercase();
    let (_, rest) = lower.split_once("[imdb](")?;
    Some(rest.split(')').next().unwrap_or(rest).to_string())
}

pub const TITLE_RULE: ExtractionRule = ExtractionRule {
    name: "title",
    field: FilmField::Title,
    policy: MatchPolicy::FirstMatchWins,
    trigger: is_title_line,
    extract: title_value,
};

pub const COUNT_RULE: ExtractionRule = ExtractionRule {
    name: "count",
    field: FilmField::Count,
    policy: MatchPolicy::LastMatchWins,
    trigger: is_count_line,
    extract: count_value,
};

pub const YEAR_RULE: ExtractionRule = ExtractionRule {
    name: "year",
    field: FilmField::Year,
    policy: MatchPolicy::LastMatchWins,
    trigger: is_year_line,
    extract: year_value,
};

pub const IMDB_RULE: ExtractionRule = ExtractionRule {
    name: "imdb_url",
    field: FilmField::ImdbUrl,
    policy: MatchPolicy::LastMatchWins,
    trigger: is_imdb_line,
    extract: imdb_value,
};

pub const DEFAULT_RULES: [ExtractionRule; 4] = [TITLE_RULE, COUNT_RULE, YEAR_RULE, IMDB_RULE];

fn set_field(record: &mut FilmRecord, field: FilmField, value: String) {
    match field {
        FilmField::Title => record.title = value,
        FilmField::Year => record.year = value,
        FilmField::Count => record.count = value,
        FilmField::ImdbUrl => record.imdb_url = value,
    }
}

/// Runs every rule over every line, independently of each other.
pub fn extract_with_rules<S: AsRef<str>>(lines: &[S], rules: &[ExtractionRule]) -> FilmRecord {
    let mut record = FilmRecord::default();
    let mut resolved: Vec<FilmField> = Vec::new();

    for line in lines.iter().map(|l| l.as_ref()) {
        for rule in rules {
            if rule.policy == MatchPolicy::FirstMatchWins && resolved.contains(&rule.field) {
                continue;
            }
            if !rule.matches(line) {
                continue;
            }
            if let Some(value) = rule.extract(line) {
                set_field(&mut record, rule.field, value);
                resolved.push(rule.field);
            }
        }
    }

    record
}

pub fn extract_record<S: AsRef<str>>(lines: &[S]) -> FilmRecord {
    extract_with_rules(lines, &DEFAULT_RULES)
}

pub struct DetailExtractor<'a, F: PageFetcher> {
    fetcher: &'a F,
    base_url: &'a Url,
}

impl<'a, F: PageFetcher> DetailExtractor<'a, F> {
    pub fn new(fetcher: &'a F, base_url: &'a Url) -> Self {
        Self { fetcher, base_url }
    }

    pub async fn extract(&self, reference: &DetailReference) -> Result<FilmRecord> {
        let url = page_url(self.base_url, reference.as_str())?;
        let html = self.fetcher.fetch(url.as_str()).await?;
        let lines = html_to_lines(&html)?;
        Ok(extract_record(&lines[..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TERMINATOR_PAGE: [&str; 9] = [
        "",
        "![logo](images/logo.gif)",
        "The Terminator",
        "[1984](charts-year-1984.htm)",
        "Entire Film: 38 (including 17 cops)",
        "Director: James Cameron",
        "[IMDB](http://www.imdb.com/title/tt0088247/)",
        "Some review text, with commas",
        "",
    ];

    #[test]
    fn test_extract_full_record() {
        let record = extract_record(&TERMINATOR_PAGE[..]);

        assert_eq!(record.title, "The Terminator");
        assert_eq!(record.year, "1984");
        assert_eq!(record.count, "38");
        assert_eq!(record.imdb_url, "http://www.imdb.com/title/tt0088247/");
    }

    #[test]
    fn test_kills_line_keeps_digits_only() {
        let lines = ["Rambo", "Kills: 1,2 3"];
        let record = extract_record(&lines[..]);
        assert_eq!(record.title, "Rambo");
        assert_eq!(record.count, "123");
    }

    #[test]
    fn test_title_is_first_match_and_strips_commas() {
        let lines = ["Hello, Dolly:", "Another Title"];
        let record = extract_record(&lines[..]);
        assert_eq!(record.title, "Hello Dolly");
    }

    #[test]
    fn test_count_is_last_match() {
        let lines = ["Title", "Film: 10", "Body Count: 25"];
        let record = extract_record(&lines[..]);
        assert_eq!(record.count, "25");
    }

    #[test]
    fn test_missing_imdb_line_leaves_field_empty() {
        let lines = ["Commando", "Kills: 81"];
        let record = extract_record(&lines[..]);
        assert_eq!(record.imdb_url, "");
        assert_eq!(record.title, "Commando");
    }

    #[test]
    fn test_no_title_line_still_produces_record() {
        let lines = ["[link](a.htm)", "![img](b.jpg)", "Kills: 5 (approx)"];
        let record = extract_record(&lines[..]);
        assert_eq!(record.title, "");
        assert_eq!(record.count, "5");
    }

    #[test]
    fn test_year_line_without_brackets_keeps_previous_value() {
        let lines = ["[1990](charts-year-1990.htm)", "see charts-year page"];
        let record = extract_record(&lines[..]);
        assert_eq!(record.year, "1990");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract_record(&TERMINATOR_PAGE[..]);
        let second = extract_record(&TERMINATOR_PAGE[..]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_rule_set() {
        let record = extract_with_rules(&TERMINATOR_PAGE[..], &[COUNT_RULE]);
        assert_eq!(record.count, "38");
        assert_eq!(record.title, "");
    }
}
