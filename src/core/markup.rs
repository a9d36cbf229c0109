use crate::utils::error::{EtlError, Result};
use url::Url;

/// 不會出現在頁面正文的標籤，連同內容一起略過
const SKIPPED_TAGS: [&str; 4] = ["head", "script", "style", "noscript"];

/// HTML 轉 Markdown 後逐行處理，比直接剖析 DOM 容易對付格式不一的頁面
pub fn html_to_lines(html: &str) -> Result<Vec<String>> {
    let converter = htmd::HtmlToMarkdown::builder()
        .skip_tags(SKIPPED_TAGS.to_vec())
        .build();
    let markdown = converter.convert(html).map_err(|e| EtlError::ProcessingError {
        message: format!("HTML to Markdown conversion failed: {}", e),
    })?;

    Ok(markdown.split('\n').map(str::to_string).collect())
}

/// Parses the site root and makes sure it ends with `/`, so page names join
/// as siblings instead of replacing the last path segment.
pub fn normalize_base_url(base_url: &str) -> Result<Url> {
    let with_slash = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };

    Url::parse(&with_slash).map_err(|e| EtlError::InvalidConfigValueError {
        field: "base_url".to_string(),
        value: base_url.to_string(),
        reason: e.to_string(),
    })
}

pub fn page_url(base: &Url, page: &str) -> Result<Url> {
    base.join(page).map_err(|e| EtlError::ProcessingError {
        message: format!("Cannot build URL for page '{}': {}", page, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_lines_keeps_links() {
        let html = r#"<html><body><p><a href="movie-one.htm">Movie One</a></p><p>Kills: 12</p></body></html>"#;
        let lines = html_to_lines(html).unwrap();

        assert!(lines.iter().any(|l| l.contains("[Movie One](movie-one.htm)")));
        assert!(lines.iter().any(|l| l.contains("Kills: 12")));
    }

    #[test]
    fn test_html_to_lines_drops_head_and_scripts() {
        let html = r#"<html><head><title>Movie Body Counts</title>
<style>body { color: red; }</style></head>
<body><script>var hits = 1;</script><noscript>Enable JavaScript</noscript>
<p>The Terminator</p></body></html>"#;
        let lines = html_to_lines(html).unwrap();

        assert!(lines.iter().any(|l| l.contains("The Terminator")));
        assert!(!lines.iter().any(|l| l.contains("Movie Body Counts")));
        assert!(!lines.iter().any(|l| l.contains("color: red")));
        assert!(!lines.iter().any(|l| l.contains("hits")));
        assert!(!lines.iter().any(|l| l.contains("Enable JavaScript")));
    }

    #[test]
    fn test_normalize_base_url_adds_slash() {
        let base = normalize_base_url("http://www.moviebodycounts.com").unwrap();
        assert_eq!(base.as_str(), "http://www.moviebodycounts.com/");

        let nested = normalize_base_url("http://localhost:8080/site").unwrap();
        assert_eq!(
            page_url(&nested, "movies-A.htm").unwrap().as_str(),
            "http://localhost:8080/site/movies-A.htm"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects_garbage() {
        assert!(normalize_base_url("not a url").is_err());
    }
}
