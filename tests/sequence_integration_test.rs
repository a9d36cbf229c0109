use bodycount_etl::config::toml_config::TomlConfig;
use bodycount_etl::run_sequence;
use httpmock::prelude::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_scrape_output_feeds_enrichment() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let site = MockServer::start();
    site.mock(|when, then| {
        when.method(GET).path("/movies-P.htm");
        then.status(200).body(
            r#"<html><body>
<p><a href="predator.htm">Predator</a></p>
<p><a href="contact.htm">Contact</a></p>
</body></html>"#,
        );
    });
    site.mock(|when, then| {
        when.method(GET).path("/predator.htm");
        then.status(200).body(
            r#"<html><body>
<p>Predator</p>
<p><a href="charts-year-1987.htm">1987</a></p>
<p>Entire Film: 59</p>
<p><a href="http://www.imdb.com/title/tt0093773/">IMDB</a></p>
</body></html>"#,
        );
    });

    let movie_db = MockServer::start();
    let lookup = movie_db.mock(|when, then| {
        when.method(GET).path("/movies/0093773");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "title": "Predator",
                "year": 1987,
                "mpaa": "Rated R for strong violence",
                "genres": ["Action", "Adventure"],
                "director": ["John McTiernan"],
                "cast": ["Arnold Schwarzenegger", "Carl Weathers"],
                "runtime": ["107"],
                "rating": 7.8
            }));
    });

    let toml_content = format!(
        r#"
[pipeline]
name = "deadliest-movies"

[source]
base_url = "{site}"
lists = ["P"]

[lookup]
endpoint = "{movie_db}"

[load]
output_path = "{output_path}"
write_reports = true

[performance]
concurrent_requests = 2
timeout_seconds = 5
"#,
        site = site.base_url(),
        movie_db = movie_db.url("/movies"),
        output_path = output_path.replace('\\', "/"),
    );

    let config = TomlConfig::from_toml_str(&toml_content)?;
    let outputs = run_sequence(&config, false).await?;

    lookup.assert();
    assert_eq!(outputs.len(), 2);
    assert!(outputs[0].ends_with("film-death-counts.csv"));
    assert!(outputs[1].ends_with("film-death-counts-Python.csv"));

    let scraped = std::fs::read_to_string(temp_dir.path().join("film-death-counts.csv"))?;
    assert_eq!(
        scraped,
        "Film,Year,Kill_Count,IMDB_url\nPredator,1987,59,http://www.imdb.com/title/tt0093773/\n"
    );

    let enriched = std::fs::read_to_string(temp_dir.path().join("film-death-counts-Python.csv"))?;
    assert_eq!(
        enriched,
        "Film,Year,Body_Count,MPAA_Rating,Genre,Director,Actors,Length_Minutes,IMDB_Rating\n\
         Predator,1987,59,R,Action|Adventure,John McTiernan,Arnold Schwarzenegger|Carl Weathers,107,7.8\n"
    );

    assert!(temp_dir.path().join("scrape-report.json").exists());
    assert!(temp_dir.path().join("enrich-report.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_sequence_without_stages_is_rejected() {
    let config = TomlConfig::from_toml_str(
        r#"
[pipeline]
name = "empty"

[load]
output_path = "./output"
"#,
    )
    .unwrap();

    let err = run_sequence(&config, false).await.unwrap_err();
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_env_substitution_in_lookup_endpoint() {
    std::env::set_var("BODYCOUNT_TEST_MOVIE_DB", "http://movies.internal:9000");

    let config = TomlConfig::from_toml_str(
        r#"
[pipeline]
name = "env"

[lookup]
endpoint = "${BODYCOUNT_TEST_MOVIE_DB}/v1"

[load]
output_path = "./output"
"#,
    )
    .unwrap();

    let enrich = config.enrich_config().unwrap();
    assert_eq!(enrich.lookup_endpoint, "http://movies.internal:9000/v1");
}
