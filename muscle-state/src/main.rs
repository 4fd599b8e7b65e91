//! muscle-state - Record muscle strength assessments
//!
//! Unix-style tool for editing the persisted muscle strength map.

use chrono::Utc;
use clap::{Parser, Subcommand};
use libmusclemap::error::StateError;
use libmusclemap::store::{FileStatePersistence, StatePersistence, StoreState};
use libmusclemap::{Catalog, Config, Language, MuscleMapError, Result, Session, StrengthLevel, ViewSide};
use std::io::Read;

#[derive(Parser, Debug)]
#[command(name = "muscle-state")]
#[command(version)]
#[command(about = "Record muscle strength assessments")]
#[command(long_about = "\
muscle-state - Record muscle strength assessments

DESCRIPTION:
    muscle-state edits the saved muscle strength map that posture-analyze
    reads. Every change is written to the state file immediately.

COMMANDS:
    set         Set the strength level of a muscle
    clear       Remove the strength entry of a muscle
    select      Select a muscle (or clear the selection)
    side        Switch the body diagram side
    reset       Clear all strength entries
    show        Show the saved state
    export      Write an export document
    import      Replace the strength map from an export document

STRENGTH LEVELS:
    very_weak, weak, normal, strong, very_strong

USAGE EXAMPLES:
    # Mark an imbalance
    muscle-state set neck weak
    muscle-state set upper_trapezius very_strong

    # Inspect what is saved
    muscle-state show
    muscle-state show --format json

    # Move assessments between machines
    muscle-state export --output assessment.json
    muscle-state import assessment.json
    cat assessment.json | muscle-state import -

CONFIGURATION:
    Configuration file: ~/.config/musclemap/config.toml
    State location: ~/.local/share/musclemap/state.json

    Override with environment variables:
        MUSCLEMAP_CONFIG      - Path to config file
        MUSCLEMAP_STATE_FILE  - Path to state file

EXIT CODES:
    0 - Success
    1 - Configuration or storage error
    2 - Catalog error
    3 - Invalid input (unknown muscle, bad level, malformed import)
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    #[arg(help = "Enable verbose logging to stderr (useful for debugging)")]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Set the strength level of a muscle
    Set {
        /// Muscle id (see `muscle-catalog muscles`)
        muscle: String,

        /// very_weak, weak, normal, strong or very_strong
        level: String,
    },

    /// Remove the strength entry of a muscle
    Clear {
        /// Muscle id
        muscle: String,
    },

    /// Select a muscle for editing
    Select {
        /// Muscle id
        #[arg(required_unless_present = "none", conflicts_with = "none")]
        muscle: Option<String>,

        /// Clear the selection
        #[arg(long)]
        none: bool,
    },

    /// Switch the body diagram side
    Side {
        /// front or back
        side: String,
    },

    /// Clear all strength entries and the selection
    Reset,

    /// Show the saved state
    Show {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Write an export document
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,
    },

    /// Replace the strength map from an export document
    Import {
        /// Export document, or - for stdin
        #[arg(value_name = "FILE")]
        input: String,
    },
}

fn main() {
    let cli = Cli::parse();

    libmusclemap::logging::init_default(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let catalog = Catalog::from_config(&config.catalog)?;
    let persistence = FileStatePersistence::new(config.state_path());

    tracing::debug!(state_file = %persistence.path().display(), "muscle-state started");

    // Reset must work even when the saved state is unreadable
    let mut session = match cli.command {
        Commands::Reset => return cmd_reset(catalog, persistence),
        _ => Session::open(catalog, persistence)?,
    };
    let language = config.defaults.language;

    match cli.command {
        Commands::Set { muscle, level } => {
            let level: StrengthLevel = level.parse().map_err(MuscleMapError::InvalidInput)?;
            session.set_strength(&muscle, level)?;
            println!("{}: {}", muscle, level);
        }
        Commands::Clear { muscle } => {
            session.clear_strength(&muscle)?;
        }
        Commands::Select { muscle, .. } => {
            session.select_muscle(muscle.as_deref())?;
        }
        Commands::Side { side } => {
            let side: ViewSide = side.parse().map_err(MuscleMapError::InvalidInput)?;
            session.set_view_side(side)?;
        }
        Commands::Show { format } => cmd_show(&session, &format, language)?,
        Commands::Export { output } => cmd_export(&session, output.as_deref())?,
        Commands::Import { input } => cmd_import(&mut session, &input)?,
        Commands::Reset => {}
    }

    Ok(())
}

fn cmd_reset(catalog: Catalog, persistence: FileStatePersistence) -> Result<()> {
    let state = match persistence.load() {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable state file");
            StoreState::default()
        }
    };

    let mut session = Session::with_state(catalog, persistence, state);
    session.reset()?;
    Ok(())
}

fn cmd_show(session: &Session<FileStatePersistence>, format: &str, language: Language) -> Result<()> {
    let state = session.state();

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(state).map_err(StateError::Encode)?;
            println!("{}", json);
        }
        "text" => {
            println!("view side: {}", state.view_side);
            println!("selected:  {}", state.selected_muscle.as_deref().unwrap_or("-"));

            if state.muscle_states.is_empty() {
                return Ok(());
            }
            println!();

            let catalog = session.catalog();
            for (id, level) in state.muscle_states.iter() {
                let label = catalog
                    .muscles()
                    .get(id)
                    .map(|m| m.label(language))
                    .unwrap_or("?");
                println!("{:<20} {:<12} {}", id, level.as_str(), label);
            }
        }
        _ => {
            return Err(MuscleMapError::InvalidInput(format!(
                "Invalid format '{}'. Must be 'text' or 'json'",
                format
            )));
        }
    }

    Ok(())
}

fn cmd_export(session: &Session<FileStatePersistence>, output: Option<&str>) -> Result<()> {
    let document = session.export(Utc::now())?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", document)).map_err(StateError::Io)?;
            tracing::info!(path, "Wrote export document");
        }
        None => println!("{}", document),
    }

    Ok(())
}

fn cmd_import(session: &mut Session<FileStatePersistence>, input: &str) -> Result<()> {
    let payload = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(StateError::Io)?;
        buffer
    } else {
        std::fs::read_to_string(input).map_err(StateError::Io)?
    };

    let state = session.import(&payload)?;
    println!("Imported {} muscle states", state.muscle_states.len());
    Ok(())
}
