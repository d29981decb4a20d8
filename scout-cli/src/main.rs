//! SCOUT command-line host.
//!
//! Owns everything the library crates leave to the host: configuration from
//! the environment, tracing setup, loading the school dataset, and wiring
//! the service together exactly once.

use clap::{Parser, Subcommand};
use scout_core::{School, ScoutConfig};
use scout_intel::{InMemoryDirectory, SchoolIntelligence};
use scout_llm::{
    FinancialStarterGenerator, GeneratorRegistry, OfstedStarterGenerator, OpenAiChatProvider,
    SendStarterGenerator, StarterGenerator, UnconfiguredChatProvider,
};
use scout_storage::FsStarterCache;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "scout", version, about = "Sales intelligence for UK schools")]
struct Cli {
    /// JSON file holding the school dataset
    #[arg(long, env = "SCOUT_DATA_FILE")]
    data: PathBuf,

    /// API key for the OpenAI-compatible chat backend
    #[arg(long, env = "SCOUT_OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Chat model to request
    #[arg(long, env = "SCOUT_OPENAI_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up a school and generate conversation starters
    Lookup {
        name: String,
        /// Regenerate even when a fresh cache entry exists
        #[arg(long)]
        refresh: bool,
        /// How many starters to request
        #[arg(long)]
        count: Option<usize>,
        /// Fold Ofsted findings in ahead of financial starters
        #[arg(long)]
        with_ofsted: bool,
    },
    /// Generate SEND starters for a school
    Send { name: String },
    /// Show the highest-priority schools
    Top {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// List every school name in the dataset
    Names,
    /// Dataset statistics
    Stats,
    /// Drop cached starters, for one school or all of them
    ClearCache { name: Option<String> },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let config = ScoutConfig::from_env();
    config.validate()?;

    let schools = load_schools(&cli.data)?;
    tracing::info!(count = schools.len(), data = %cli.data.display(), "dataset loaded");

    let service = build_service(&cli, config, schools);

    match cli.command {
        Command::Lookup {
            name,
            refresh,
            count,
            with_ofsted,
        } => {
            let school = if with_ofsted {
                service.get_school_intelligence_with_ofsted(&name, refresh, count)
            } else {
                service.get_school_intelligence(&name, refresh, count)
            };
            match school {
                Some(school) => print_school(&school),
                None => {
                    eprintln!("school not found: {name}");
                    process::exit(1);
                }
            }
        }
        Command::Send { name } => match service.get_send_intelligence(&name, None) {
            Some(school) => print_school(&school),
            None => {
                eprintln!("school not found: {name}");
                process::exit(1);
            }
        },
        Command::Top { limit } => {
            for school in service.get_high_priority(limit) {
                println!(
                    "{:<8} {:<45} {}",
                    school.combined_priority(),
                    school.name,
                    school.la_name.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Names => {
            for name in service.school_names() {
                println!("{name}");
            }
        }
        Command::Stats => {
            let stats = service.statistics();
            println!("Schools:            {}", stats.total_schools);
            println!("High priority:      {}", stats.high_priority);
            println!("With contacts:      {}", stats.with_contacts);
            println!("Local authorities:  {}", stats.local_authorities);
        }
        Command::ClearCache { name } => {
            let removed = service.clear_cache(name.as_deref());
            println!("removed {removed} cache entries");
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scout=info,warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_schools(path: &Path) -> Result<Vec<School>, Box<dyn std::error::Error>> {
    let file = File::open(path)
        .map_err(|e| format!("cannot open dataset {}: {}", path.display(), e))?;
    let schools: Vec<School> = serde_json::from_reader(file)
        .map_err(|e| format!("cannot parse dataset {}: {}", path.display(), e))?;
    Ok(schools)
}

fn build_service(cli: &Cli, config: ScoutConfig, schools: Vec<School>) -> SchoolIntelligence {
    let financial: Arc<dyn StarterGenerator> = match &cli.api_key {
        Some(key) => {
            let mut provider = OpenAiChatProvider::new(key);
            if let Some(model) = &cli.model {
                provider = provider.with_model(model);
            }
            Arc::new(FinancialStarterGenerator::new(provider))
        }
        None => {
            tracing::warn!("no API key configured; financial starters will be unavailable");
            Arc::new(FinancialStarterGenerator::new(UnconfiguredChatProvider))
        }
    };

    let registry = GeneratorRegistry::new(
        financial,
        Some(Arc::new(OfstedStarterGenerator::new())),
        Arc::new(SendStarterGenerator::new()),
    );

    let cache = Arc::new(FsStarterCache::from_config(&config));
    let directory = Arc::new(InMemoryDirectory::new(schools));
    SchoolIntelligence::new(directory, cache, registry, config)
}

fn print_school(school: &School) {
    println!("{} (URN {})", school.name, school.urn);
    if let Some(la) = &school.la_name {
        println!("Local authority: {la}");
    }
    println!("Priority: {}", school.combined_priority());
    if let Some(head) = &school.headteacher {
        println!("Headteacher: {}", head.full_name);
    }

    if school.conversation_starters.is_empty() {
        println!("\nNo conversation starters.");
        return;
    }
    println!();
    for (i, starter) in school.conversation_starters.iter().enumerate() {
        println!(
            "{}. [{}] {} (relevance {:.2})",
            i + 1,
            starter.source,
            starter.topic,
            starter.relevance_score
        );
        println!("   {}", starter.detail);
    }
}
