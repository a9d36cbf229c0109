use crate::domain::model::{SkippedItem, TransformResult};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport<'a> {
    pub pipeline: &'a str,
    pub generated_at: String,
    pub output_file: &'a str,
    pub emitted: usize,
    pub skipped_count: usize,
    pub skipped: &'a [SkippedItem],
}

/// 寫出 CSV，若有設定 report_file 再寫一份 JSON 執行報告
pub async fn write_outputs<S: Storage, C: ConfigProvider>(
    storage: &S,
    config: &C,
    pipeline: &str,
    result: &TransformResult,
) -> Result<String> {
    let output_file = config.output_file();

    tracing::debug!(
        "Writing {} ({} bytes) to storage",
        output_file,
        result.csv_output.len()
    );
    storage
        .write_file(output_file, result.csv_output.as_bytes())
        .await?;

    if let Some(report_file) = config.report_file() {
        let report = RunReport {
            pipeline,
            generated_at: chrono::Utc::now().to_rfc3339(),
            output_file,
            emitted: result.emitted,
            skipped_count: result.skipped.len(),
            skipped: &result.skipped,
        };
        let json = serde_json::to_string_pretty(&report)?;
        storage.write_file(report_file, json.as_bytes()).await?;
        tracing::info!("📝 Run report saved to: {}/{}", config.output_path(), report_file);
    }

    Ok(format!("{}/{}", config.output_path(), output_file))
}
