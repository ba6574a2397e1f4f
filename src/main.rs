// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use mongo_init::utils::logging::{format_error, format_step, format_success, format_warning};
use mongo_init::{
    CollectionStore, Config, EnsureOutcome, HealthReport, HealthStatus, Maintenance, MongoStore,
    OperationTimer, SchemaManager, SeedOutcome, Seeder, SystemPrompt,
};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "mongo_init")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Ensure the MongoDB collections of the summarization stack exist", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = mongo_init::config::DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the database and create the documents and summaries collections if absent
    Init {
        /// Also insert the default system prompts
        #[arg(long)]
        seed: bool,

        #[arg(long)]
        json: bool,
    },

    /// Report required collections that do not exist
    Verify {
        #[arg(long)]
        create_missing: bool,
    },

    /// Document counts per required collection
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Delete every document from the required collections
    Clean {
        #[arg(long)]
        confirm: bool,
    },

    /// Connectivity and collection presence
    Health {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    mongo_init::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using defaults and environment",
            cli.config.display()
        );
        Config::load(None).context("Failed to load configuration")?
    };

    match cli.command {
        Commands::Init { seed, json } => {
            cmd_init(&config, seed || config.seed.enabled, json).await?;
        }
        Commands::Verify { create_missing } => {
            cmd_verify(&config, create_missing).await?;
        }
        Commands::Stats { json } => {
            cmd_stats(&config, json).await?;
        }
        Commands::Clean { confirm } => {
            cmd_clean(&config, confirm).await?;
        }
        Commands::Health { json } => {
            cmd_health(&config, json).await?;
        }
    }

    Ok(())
}

async fn connect(config: &Config) -> Result<MongoStore> {
    let store = MongoStore::connect(config.database.clone())
        .await
        .context("Failed to create MongoDB client")?;

    if let Err(e) = store.ping().await {
        error!("Cannot connect to MongoDB");
        return Err(e).context("Database connection failed");
    }

    Ok(store)
}

async fn cmd_init(config: &Config, seed: bool, json: bool) -> Result<()> {
    let timer = OperationTimer::start("init");
    if seed {
        config.validate_seed().context("Invalid seed configuration")?;
    }

    let store = connect(config).await?;

    let mut report = SchemaManager::new(&store, &config.collections)
        .initialize()
        .await
        .context("Failed to initialize collections")?;

    if seed {
        let outcome = Seeder::new(&store, &config.seed.collection)
            .seed(&SystemPrompt::defaults())
            .await
            .context("Failed to seed system prompts")?;

        match outcome {
            SeedOutcome::Inserted(n) => info!("Inserted {} system prompts", n),
            SeedOutcome::SkippedNonEmpty(n) => {
                info!("System prompts already present ({} documents)", n)
            }
        }
        report.seed = Some(outcome);
    }

    timer.finish(store.timeout());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let total = report.outcomes.len();
    for (idx, entry) in report.outcomes.iter().enumerate() {
        let line = format!("{}.{}: {}", report.database, entry.collection, entry.outcome);
        let line = match entry.outcome {
            EnsureOutcome::Created => format_success(&line),
            EnsureOutcome::AlreadyPresent => line,
        };
        println!("{}", format_step(idx + 1, total, &line));
    }

    match report.seed {
        Some(SeedOutcome::Inserted(n)) => {
            println!("{}", format_success(&format!("{} system prompts seeded", n)))
        }
        Some(SeedOutcome::SkippedNonEmpty(n)) => {
            println!("system prompts already present ({} documents)", n)
        }
        None => {}
    }

    Ok(())
}

async fn cmd_verify(config: &Config, create_missing: bool) -> Result<()> {
    info!("Verifying collections");

    let store = connect(config).await?;
    let manager = SchemaManager::new(&store, &config.collections);

    if manager.verify_schema().await? {
        println!("{}", format_success("All required collections exist"));
        return Ok(());
    }

    let missing = manager.missing_collections().await?;
    println!(
        "{}",
        format_warning(&format!("Missing collections: {}", missing.join(", ")))
    );

    if create_missing {
        manager
            .initialize()
            .await
            .context("Failed to create missing collections")?;
        println!("{}", format_success("Missing collections created"));
        Ok(())
    } else {
        info!("Use --create-missing or `init` to create them");
        Err(anyhow::anyhow!(
            "{} required collection(s) missing",
            missing.len()
        ))
    }
}

async fn cmd_stats(config: &Config, json: bool) -> Result<()> {
    info!("Gathering statistics");

    let store = connect(config).await?;
    let counts = Maintenance::new(&store, &config.collections)
        .stats()
        .await
        .context("Failed to count documents")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    for count in &counts {
        if count.exists {
            println!("{}: {} documents", count.collection, count.documents);
        } else {
            println!("{}", format_warning(&format!("{}: missing", count.collection)));
        }
    }

    Ok(())
}

async fn cmd_clean(config: &Config, confirm: bool) -> Result<()> {
    if !confirm {
        println!(
            "{}",
            format_error("This will delete all documents and summaries. Use --confirm to proceed")
        );
        return Ok(());
    }

    let store = connect(config).await?;
    let deleted = Maintenance::new(&store, &config.collections)
        .clean()
        .await
        .context("Failed to clean collections")?;

    println!(
        "{}",
        format_success(&format!("Collections cleaned ({} documents deleted)", deleted))
    );
    Ok(())
}

async fn cmd_health(config: &Config, json: bool) -> Result<()> {
    let store = MongoStore::connect(config.database.clone())
        .await
        .context("Failed to create MongoDB client")?;

    let report = HealthReport::collect(&store, &config.collections).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.format());
    }

    if report.status == HealthStatus::Unhealthy {
        return Err(anyhow::anyhow!("MongoDB health check failed"));
    }

    Ok(())
}
