use clap::Parser;
use herd_cycle::utils::{logger, validation::Validate};
use herd_cycle::{format_iso_date, CliConfig, CycleStatus};

fn print_text(config: &CliConfig, status: &CycleStatus) {
    println!("🐄 Species:            {}", config.profile().species);
    println!("📅 Mating date:        {}", format_iso_date(status.dates.mating_date));
    println!(
        "🔍 Confirmation date:  {} ({} days)",
        format_iso_date(status.dates.confirmation_date),
        status.days_until_confirmation
    );
    println!(
        "🍼 Estimated birth:    {} ({} days, {})",
        format_iso_date(status.dates.estimated_birth_date),
        status.days_until_birth,
        status.birth_urgency
    );
    println!("📌 Phase:              {}", status.phase);
    println!("   {}", status.description);
}

fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Input validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let status = match config.evaluate() {
        Ok(status) => status,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    tracing::debug!("Evaluated phase {} for {}", status.phase, config.mating_date);

    if config.json {
        match serde_json::to_string_pretty(&status) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("❌ Failed to serialize result: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_text(&config, &status);
    }
}
