use clap::{Parser, Subcommand};
use hms_core::constants::{FACILITY_NAME_ENV, HISTORY_TIMESTAMPS_ENV};
use hms_core::{config, CoreConfig, Registry, Script, Step};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "hms")]
#[command(about = "Hospital registry command-script runner")]
struct Cli {
    /// Facility name shown in patient and doctor information
    #[arg(long, global = true, env = FACILITY_NAME_ENV)]
    facility_name: Option<String>,
    /// Prefix rendered history lines with their timestamps
    #[arg(long, global = true)]
    history_timestamps: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command script against a fresh registry
    Run {
        /// Path to the script
        file: PathBuf,
        /// Print the steps as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse a command script without running it
    Check {
        /// Path to the script
        file: PathBuf,
    },
    /// Run the built-in default workflow
    Demo {
        /// Print the steps as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let history_timestamps = if cli.history_timestamps {
        Some("true".to_string())
    } else {
        std::env::var(HISTORY_TIMESTAMPS_ENV).ok()
    };
    let cfg = Arc::new(CoreConfig::from_env_values(
        Some(config::facility_name_from_env_value(cli.facility_name)),
        history_timestamps,
    )?);

    match cli.command {
        Some(Commands::Run { file, json }) => {
            let script = Script::load(&file)?;
            let steps = Registry::new(cfg).run_script(&script);
            print_steps(&steps, json)?;
        }
        Some(Commands::Check { file }) => match Script::load(&file) {
            Ok(script) => println!("{}: {} command(s) OK", file.display(), script.len()),
            Err(e) => {
                eprintln!("Error checking {}: {}", file.display(), e);
                return Err(e.into());
            }
        },
        Some(Commands::Demo { json }) => {
            let script = Script::default_workflow()?;
            let steps = Registry::new(cfg).run_script(&script);
            print_steps(&steps, json)?;
        }
        None => {
            println!("Use 'hms --help' for commands");
        }
    }

    Ok(())
}

fn print_steps(steps: &[Step], json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(steps)?);
    } else {
        for step in steps {
            println!("{step}");
        }
    }
    Ok(())
}
