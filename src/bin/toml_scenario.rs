use clap::Parser;
use reef_chain::core::environment::check_environment;
use reef_chain::utils::{logger, validation::Validate};
use reef_chain::{LocalStorage, ScenarioConfig, SelectionService};

#[derive(Parser)]
#[command(name = "toml-scenario")]
#[command(about = "Validates a species selection described in a TOML scenario file")]
struct Args {
    /// Path to TOML scenario file
    #[arg(short, long, default_value = "scenario.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the scenario's location depth
    #[arg(long, allow_hyphen_values = true)]
    depth: Option<i64>,

    /// Override the scenario's location temperature
    #[arg(long, allow_hyphen_values = true)]
    temperature: Option<f64>,

    /// Show each species' habitat against the location without solving
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match ScenarioConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load scenario file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose || config.verbose());
    }
    tracing::info!("🚀 Loaded scenario '{}' from {}", config.scenario.name, args.config);

    if let Some(depth) = args.depth {
        config.location.depth = depth;
        tracing::info!("🔧 Depth overridden to: {}", depth);
    }
    if let Some(temperature) = args.temperature {
        config.location.temperature = temperature;
        tracing::info!("🔧 Temperature overridden to: {}", temperature);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Scenario validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_scenario_summary(&config);

    let service = SelectionService::new(LocalStorage::new(".".to_string()), config.clone());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - food chain will not be solved");
        return perform_dry_run(&service, &config).await;
    }

    match service
        .validate_names(&config.selection.species, &config.location)
        .await
    {
        Ok(verdict) => {
            println!("{}", serde_json::to_string_pretty(&verdict)?);
            if !verdict.valid {
                std::process::exit(4);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Scenario failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}

fn display_scenario_summary(config: &ScenarioConfig) {
    println!("📋 Scenario Summary:");
    println!("  Name: {}", config.scenario.name);
    if let Some(description) = &config.scenario.description {
        println!("  Description: {}", description);
    }
    println!("  Catalog: {}", config.catalog.path);
    println!("  Species: {}", config.selection.species.join(", "));
    println!(
        "  Location: depth {}m, {}°C, salinity {}",
        config.location.depth, config.location.temperature, config.location.salinity
    );
    println!();
}

async fn perform_dry_run(
    service: &SelectionService<LocalStorage, ScenarioConfig>,
    config: &ScenarioConfig,
) -> anyhow::Result<()> {
    let catalog = service.load_catalog().await?;
    let species = catalog.select(&config.selection.species)?;

    println!("🔍 Habitat Check:");
    for s in &species {
        let habitat = check_environment(s, &config.location);
        println!(
            "  {} {:<20} depth {:<12} temperature {:<12} eats: {}",
            if habitat.is_ok() { "✅" } else { "❌" },
            s.name,
            s.depth_range,
            s.temperature_range,
            if s.food_sources.is_empty() {
                "-".to_string()
            } else {
                s.food_sources.join(", ")
            }
        );
        if let Err(mismatch) = habitat {
            println!("     {}", mismatch);
        }
    }

    println!();
    println!("✅ Dry run complete.");
    Ok(())
}
