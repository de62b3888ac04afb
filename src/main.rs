use clap::Parser;
use reef_chain::utils::error::{EcoError, ErrorSeverity};
use reef_chain::utils::{logger, validation::Validate};
use reef_chain::{CliConfig, LocalStorage, SelectionService, ValidationRequest, Verdict};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting reef-chain CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(config).await {
        Ok(valid) => {
            if !valid {
                std::process::exit(4);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Validation run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

/// Prints the verdict (or catalog) as JSON on stdout and returns whether
/// the selection was valid.
async fn run(config: CliConfig) -> Result<bool, EcoError> {
    let storage = LocalStorage::new(".".to_string());

    if let Some(request_path) = config.request.clone() {
        let raw = std::fs::read(&request_path)?;
        let request: ValidationRequest = serde_json::from_slice(&raw)?;
        tracing::info!(
            "📁 Validating {} species from {}",
            request.species.len(),
            request_path
        );
        let service = SelectionService::new(storage, config);
        let verdict = service.validate(&request.species, &request.location).await;
        return print_verdict(&verdict);
    }

    let service = SelectionService::new(storage, config.clone());
    if config.list {
        let catalog = service.load_catalog().await?;
        println!("{}", serde_json::to_string_pretty(&catalog.listing())?);
        return Ok(true);
    }

    let location = config.location()?;
    let verdict = service.validate_names(&config.species, &location).await?;
    print_verdict(&verdict)
}

fn print_verdict(verdict: &Verdict) -> Result<bool, EcoError> {
    if verdict.valid {
        tracing::info!("✅ Sustainable food chain");
    } else if let Some(reason) = &verdict.reason {
        tracing::info!("❌ {}", reason);
    }
    println!("{}", serde_json::to_string_pretty(verdict)?);
    Ok(verdict.valid)
}
