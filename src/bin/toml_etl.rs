use bodycount_etl::config::toml_config::TomlConfig;
use bodycount_etl::domain::model::ListIdentifier;
use bodycount_etl::run_sequence;
use bodycount_etl::utils::{logger, validation::Validate};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Run the scrape and enrichment stages from a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "etl-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based ETL tool");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    match run_sequence(&config, monitor_enabled).await {
        Ok(outputs) => {
            println!("✅ ETL sequence completed successfully!");
            for output in outputs {
                println!("📁 Output saved to: {}", output);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ ETL sequence failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        println!("  Description: {}", description);
    }
    println!("  Output: {}", config.load.output_path);
    println!("  Concurrent Requests: {}", config.concurrent_requests());
    println!("  Timeout: {}s", config.timeout_seconds());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    if let Some(scrape) = config.scrape_config() {
        let lists = if scrape.lists.is_empty() {
            ListIdentifier::all()
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
        } else {
            scrape.lists.clone()
        };

        println!("📡 Scrape stage:");
        println!("  Site: {}", scrape.base_url);
        println!("  List pages ({}): {}", lists.len(), lists.join(", "));
        println!("  Output: {}/{}", scrape.output_path, scrape.output_file);
        println!();
    }

    if let Some(enrich) = config.enrich_config() {
        println!("🎬 Enrichment stage:");
        println!("  Lookup endpoint: {}", enrich.lookup_endpoint);
        println!("  Input: {}/{}", enrich.output_path, enrich.input_file);
        println!("  Output: {}/{}", enrich.output_path, enrich.output_file);
        println!();
    }

    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
