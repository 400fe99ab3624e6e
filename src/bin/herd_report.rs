use clap::Parser;
use herd_cycle::utils::{logger, validation::Validate};
use herd_cycle::{LocalStorage, ReportConfig, ReportEngine, ReportPipeline};

#[derive(Parser)]
#[command(name = "herd-report")]
#[command(about = "Batch reproductive cycle report for a herd")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "herd-report.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the reference date from config (YYYY-MM-DD)
    #[arg(long)]
    reference_date: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Dry run - validate and summarize the configuration without writing a report
    #[arg(long)]
    dry_run: bool,
}

fn display_config_summary(config: &ReportConfig) {
    tracing::info!("📋 Report: {}", config.report.name);
    tracing::info!("   Input: {}", config.report.input_path);
    tracing::info!("   Output: {} ({})", config.report.output_path, config.report.output_formats.join(", "));
    tracing::info!(
        "   Reference date: {}",
        config.report.reference_date.as_deref().unwrap_or("today")
    );
    tracing::info!("   Upcoming window: {} days", config.upcoming_window_days());
    for (name, profile) in &config.profiles {
        tracing::info!(
            "   Profile {}: {} gestation / {} confirmation days",
            name,
            profile.gestation_days,
            profile.confirmation_days
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match ReportConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger_with_level(args.verbose, config.log_level());
    }
    tracing::info!("🚀 Starting herd report tool");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(reference) = args.reference_date {
        tracing::info!("🔧 Reference date overridden to: {}", reference);
        config.report.reference_date = Some(reference);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no report will be written");
        return Ok(());
    }

    let pipeline = match ReportPipeline::new(LocalStorage::new("."), config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };
    tracing::info!("📅 Evaluating herd as of {}", pipeline.reference_date());
    let engine = ReportEngine::new(pipeline);

    match engine.run().await {
        Ok(outputs) => {
            for output in &outputs {
                println!("📁 Report saved to: {}", output);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Herd report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
