use bodycount_etl::{
    CliConfig, EnrichCliConfig, EnrichPipeline, EtlEngine, LocalStorage, ScrapePipeline,
};
use httpmock::prelude::*;
use tempfile::TempDir;

fn movie_json(title: &str, year: i32, rating: f64) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "year": year,
        "mpaa": "Rated R for strong violence",
        "genres": ["Action", "Sci-Fi"],
        "director": ["James Cameron"],
        "cast": ["Arnold Schwarzenegger", "Michael Biehn"],
        "runtime": ["USA:107"],
        "rating": rating
    })
}

#[tokio::test]
async fn test_end_to_end_scrape_with_real_http() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let list_mock = server.mock(|when, then| {
        when.method(GET).path("/movies-T.htm");
        then.status(200).body(
            r#"<html><body>
<p><a href="terminator.htm">The Terminator</a></p>
<p><a href="movies.htm">Back</a></p>
<p><img src="poster.jpg"></p>
</body></html>"#,
        );
    });
    let missing_list = server.mock(|when, then| {
        when.method(GET).path("/movies-Q.htm");
        then.status(404);
    });
    let detail_mock = server.mock(|when, then| {
        when.method(GET).path("/terminator.htm");
        then.status(200).body(
            r#"<html><body>
<p>The Terminator</p>
<p><a href="charts-year-1984.htm">1984</a></p>
<p>Film: 38 (including 5 off-screen)</p>
<p><a href="http://www.imdb.com/title/tt0088247/">IMDB</a></p>
</body></html>"#,
        );
    });

    let config = CliConfig {
        base_url: server.base_url(),
        output_path: output_path.clone(),
        lists: vec!["T".to_string(), "Q".to_string()],
        report_file: Some("scrape-report.json".to_string()),
        ..CliConfig::default()
    };

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = ScrapePipeline::new(storage, config).unwrap();
    let engine = EtlEngine::new_with_monitoring(pipeline, false);

    let result = engine.run().await;
    assert!(result.is_ok(), "scrape failed: {:?}", result.err());

    list_mock.assert();
    missing_list.assert();
    detail_mock.assert();

    let output_file = result.unwrap();
    assert!(output_file.ends_with("film-death-counts.csv"));

    let csv = std::fs::read_to_string(temp_dir.path().join("film-death-counts.csv")).unwrap();
    assert_eq!(
        csv,
        "Film,Year,Kill_Count,IMDB_url\n\
         The Terminator,1984,38,http://www.imdb.com/title/tt0088247/\n"
    );

    let report = std::fs::read(temp_dir.path().join("scrape-report.json")).unwrap();
    let report: serde_json::Value = serde_json::from_slice(&report).unwrap();
    assert_eq!(report["emitted"], 1);
    assert_eq!(report["skipped_count"], 1);
    assert_eq!(report["skipped"][0]["stage"], "list_page");
    assert_eq!(report["skipped"][0]["item"], "Q");
}

#[tokio::test]
async fn test_end_to_end_enrichment_skips_failed_lookups() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    std::fs::write(
        temp_dir.path().join("movies.csv"),
        "Film,Year,Body_Count,IMDB_URL\n\
         The Terminator,1984,38,http://www.imdb.com/title/tt0088247/\n\
         Broken,1990,12,http://www.imdb.com/title/tt0000001/\n\
         Aliens,1986,83,http://www.imdb.com/title/tt0090605/\n",
    )?;

    let server = MockServer::start();
    let terminator = server.mock(|when, then| {
        when.method(GET).path("/movies/0088247");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(movie_json("The Terminator", 1984, 8.0));
    });
    let broken = server.mock(|when, then| {
        when.method(GET).path("/movies/0000001");
        then.status(500);
    });
    let aliens = server.mock(|when, then| {
        when.method(GET).path("/movies/0090605");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(movie_json("Aliens", 1986, 8.4));
    });

    let mut config = EnrichCliConfig::new(server.url("/movies"));
    config.output_path = output_path.clone();
    config.report_file = Some("enrich-report.json".to_string());

    let storage = LocalStorage::new(output_path);
    let pipeline = EnrichPipeline::new(storage, config)?;
    let engine = EtlEngine::new(pipeline);
    engine.run().await?;

    terminator.assert();
    broken.assert();
    aliens.assert();

    let csv = std::fs::read_to_string(temp_dir.path().join("film-death-counts-Python.csv"))?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Film,Year,Body_Count,MPAA_Rating,Genre,Director,Actors,Length_Minutes,IMDB_Rating"
    );
    assert_eq!(
        lines[1],
        "The Terminator,1984,38,R,Action|Sci-Fi,James Cameron,Arnold Schwarzenegger|Michael Biehn,107,8.0"
    );
    assert!(lines[2].starts_with("Aliens,1986,83,R,"));
    assert!(lines[2].ends_with(",107,8.4"));

    let report = std::fs::read(temp_dir.path().join("enrich-report.json"))?;
    let report: serde_json::Value = serde_json::from_slice(&report)?;
    assert_eq!(report["skipped_count"], 1);
    assert_eq!(report["skipped"][0]["stage"], "lookup");

    Ok(())
}

#[tokio::test]
async fn test_enrichment_missing_input_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut config = EnrichCliConfig::new("http://127.0.0.1:1/movies");
    config.output_path = output_path.clone();

    let pipeline = EnrichPipeline::new(LocalStorage::new(output_path), config).unwrap();
    let err = EtlEngine::new(pipeline).run().await.unwrap_err();

    assert_eq!(err.exit_code(), 3);
    assert!(!temp_dir.path().join("film-death-counts-Python.csv").exists());
}

#[test]
fn test_scrape_over_unreachable_site_still_writes_header() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = CliConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        output_path: output_path.clone(),
        lists: vec!["A".to_string()],
        timeout_seconds: 2,
        ..CliConfig::default()
    };

    let pipeline = ScrapePipeline::new(LocalStorage::new(output_path), config).unwrap();
    let result = tokio_test::block_on(EtlEngine::new(pipeline).run());
    assert!(result.is_ok());

    let csv = std::fs::read_to_string(temp_dir.path().join("film-death-counts.csv")).unwrap();
    assert_eq!(csv, "Film,Year,Kill_Count,IMDB_url\n");
}
