use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::civil::Date;
use tracing_subscriber::EnvFilter;

use tbstudy_cli::commands;
use tbstudy_cli::config::{load_config, resolve_config_path, save_config, StudyConfig};
use tbstudy_core::models::participant::{generate_participant_id, ParticipantRecord};
use tbstudy_core::pathway::SequencePolicy;
use tbstudy_instruments::InstrumentKind;

#[derive(Parser)]
#[command(name = "tbstudy")]
#[command(about = "TB care-pathway delays and health literacy scoring")]
struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show derived delays and literacy score for one intake form
    Score { intake: PathBuf },
    /// Render the verification summary for one intake form
    Review { intake: PathBuf },
    /// Write one CSV row per intake form
    Export {
        #[arg(required = true)]
        intakes: Vec<PathBuf>,
        /// Output file (defaults to a timestamped name in the export dir)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Data collection date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        collection_date: Option<Date>,
    },
    /// Descriptive statistics across intake forms
    Stats {
        #[arg(required = true)]
        intakes: Vec<PathBuf>,
    },
    /// List instruments, or show one instrument's items
    Instruments { id: Option<String> },
    /// Generate a new participant ID
    NewId,
    /// Inspect or create the study config
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the active config
    Show,
    /// Write a new config file
    Init {
        #[arg(long, default_value_t = InstrumentKind::Dhli)]
        instrument: InstrumentKind,
        #[arg(long, default_value_t = SequencePolicy::AdjacentPresent)]
        sequence_policy: SequencePolicy,
        #[arg(long, default_value = "")]
        site_name: String,
        #[arg(long)]
        export_dir: Option<PathBuf>,
        /// Replace an existing config
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn into_records(intakes: Vec<tbstudy_cli::intake::Intake>) -> Vec<ParticipantRecord> {
    intakes.into_iter().map(|i| i.record).collect()
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config_path = resolve_config_path(cli.config.as_deref())?;

    match cli.command {
        Commands::Score { intake } => {
            let config = load_config(&config_path)?;
            let loaded = commands::load_intakes(&[intake], &config)?;
            for intake in &loaded {
                println!("{}", commands::score(intake, cli.json)?);
            }
        }
        Commands::Review { intake } => {
            let config = load_config(&config_path)?;
            let loaded = commands::load_intakes(&[intake], &config)?;
            for intake in &loaded {
                print!("{}", commands::review(intake)?);
            }
        }
        Commands::Export {
            intakes,
            out,
            collection_date,
        } => {
            let config = load_config(&config_path)?;
            let records = into_records(commands::load_intakes(&intakes, &config)?);
            let now = jiff::Zoned::now();
            let collection_date = collection_date.unwrap_or_else(|| now.date());
            let out = out.unwrap_or_else(|| {
                commands::default_export_path(&config, &records, now.datetime())
            });
            let count = commands::export(&records, collection_date, &out)?;
            tracing::info!(rows = count, path = %out.display(), "export complete");
            println!("{}", out.display());
        }
        Commands::Stats { intakes } => {
            let config = load_config(&config_path)?;
            let records = into_records(commands::load_intakes(&intakes, &config)?);
            print!("{}", commands::stats(&records, cli.json)?);
        }
        Commands::Instruments { id } => {
            print!("{}", commands::instruments(id.as_deref(), cli.json)?);
        }
        Commands::NewId => {
            println!("{}", generate_participant_id());
        }
        Commands::Config { command } => match command {
            ConfigCommand::Show => {
                let config = load_config(&config_path)?;
                print!("{}", commands::show_config(&config_path, &config, cli.json)?);
            }
            ConfigCommand::Init {
                instrument,
                sequence_policy,
                site_name,
                export_dir,
                force,
            } => {
                if config_path.exists() && !force {
                    return Err(eyre::eyre!(
                        "config already exists at {} (use --force to replace it)",
                        config_path.display()
                    ));
                }
                let config = StudyConfig {
                    instrument,
                    sequence_policy,
                    site_name,
                    export_dir,
                    ..StudyConfig::default()
                };
                save_config(&config_path, &config)?;
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}
