//! muscle-catalog - Inspect muscle and posture rule reference data
//!
//! Unix-style tool for listing the catalog and checking custom catalog files
//! before pointing the configuration at them.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use libmusclemap::catalog::Catalog;
use libmusclemap::error::StateError;
use libmusclemap::{Config, Language, MuscleMapError, Result, StrengthLevel, ViewSide};

#[derive(Parser, Debug)]
#[command(name = "muscle-catalog")]
#[command(version)]
#[command(about = "Inspect muscle and posture rule reference data")]
#[command(long_about = "\
muscle-catalog - Inspect muscle and posture rule reference data

DESCRIPTION:
    muscle-catalog lists the muscles, strength levels and posture rules that
    muscle-state and posture-analyze use, and validates replacement catalog
    files.

COMMANDS:
    muscles     List muscles
    levels      List strength levels with their colors
    rules       List posture rules and their trigger muscles
    validate    Check catalog files without installing them

USAGE EXAMPLES:
    # Muscles on the back of the body diagram
    muscle-catalog muscles --side back

    # Rules as JSON
    muscle-catalog rules --format json | jq '.[].id'

    # Check a custom rule file against the built-in muscles
    muscle-catalog validate --rules my_rules.json

CONFIGURATION:
    Configuration file: ~/.config/musclemap/config.toml

    [catalog]
    rules_file = \"~/my_rules.json\"
    muscles_file = \"~/my_muscles.json\"

EXIT CODES:
    0 - Success
    1 - Configuration error
    2 - Catalog error (unreadable, malformed or inconsistent catalog)
    3 - Invalid input
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Label language: ko or en (default: from config)
    #[arg(short, long, global = true, value_name = "LANG")]
    lang: Option<String>,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    #[arg(help = "Enable verbose logging to stderr (useful for debugging)")]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List muscles
    Muscles {
        /// Only muscles on this side: front or back
        #[arg(short, long)]
        side: Option<String>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List strength levels
    Levels {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List posture rules
    Rules {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Validate catalog files
    Validate {
        /// Rule catalog file
        #[arg(long, value_name = "FILE")]
        rules: PathBuf,

        /// Muscle catalog file (default: built-in muscles)
        #[arg(long, value_name = "FILE")]
        muscles: Option<PathBuf>,
    },
}

/// A strength level as written by `levels --format json`
#[derive(Debug, Serialize)]
struct LevelOutput<'a> {
    level: StrengthLevel,
    value: i32,
    color: &'a str,
    label_ko: &'a str,
    label_en: &'a str,
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
    // Validation never touches the configured catalog
    if let Commands::Validate { rules, muscles } = &cli.command {
        return cmd_validate(rules, muscles.as_deref());
    }

    let config = Config::load()?;
    let language = match cli.lang {
        Some(ref lang) => lang.parse::<Language>().map_err(MuscleMapError::InvalidInput)?,
        None => config.defaults.language,
    };
    let catalog = Catalog::from_config(&config.catalog)?;

    match cli.command {
        Commands::Muscles { side, format } => {
            let side = side
                .map(|s| s.parse::<ViewSide>())
                .transpose()
                .map_err(MuscleMapError::InvalidInput)?;
            cmd_muscles(&catalog, side, &format, language)
        }
        Commands::Levels { format } => cmd_levels(&catalog, &format, language),
        Commands::Rules { format } => cmd_rules(&catalog, &format, language),
        Commands::Validate { .. } => Ok(()),
    }
}

fn check_format(format: &str) -> Result<()> {
    if format != "text" && format != "json" {
        return Err(MuscleMapError::InvalidInput(format!(
            "Invalid format '{}'. Must be 'text' or 'json'",
            format
        )));
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(StateError::Encode)?;
    println!("{}", json);
    Ok(())
}

fn cmd_muscles(catalog: &Catalog, side: Option<ViewSide>, format: &str, language: Language) -> Result<()> {
    check_format(format)?;

    let muscles: Vec<_> = match side {
        Some(side) => catalog.muscles().on_side(side).collect(),
        None => catalog.muscles().iter().collect(),
    };

    if format == "json" {
        return print_json(&muscles);
    }

    for muscle in muscles {
        println!("{:<20} {:<6} {}", muscle.id, muscle.side.to_string(), muscle.label(language));
    }
    Ok(())
}

fn cmd_levels(catalog: &Catalog, format: &str, language: Language) -> Result<()> {
    check_format(format)?;

    if format == "json" {
        let levels: Vec<LevelOutput> = catalog
            .levels()
            .iter()
            .map(|(level, display)| LevelOutput {
                level,
                value: level.value(),
                color: &display.color,
                label_ko: &display.label_ko,
                label_en: &display.label_en,
            })
            .collect();
        return print_json(&levels);
    }

    for (level, display) in catalog.levels().iter() {
        println!(
            "{:<12} {:>2}  {}  {}",
            level.as_str(),
            level.value(),
            display.color,
            display.label(language)
        );
    }
    Ok(())
}

fn cmd_rules(catalog: &Catalog, format: &str, language: Language) -> Result<()> {
    check_format(format)?;

    if format == "json" {
        let rules: Vec<_> = catalog.rules().iter().collect();
        return print_json(&rules);
    }

    for rule in catalog.rules().iter() {
        println!("{} | {}", rule.id, rule.name(language));
        if !rule.triggers.weak.is_empty() {
            println!("    weak:   {}", rule.triggers.weak.join(", "));
        }
        if !rule.triggers.strong.is_empty() {
            println!("    strong: {}", rule.triggers.strong.join(", "));
        }
    }
    Ok(())
}

fn cmd_validate(rules: &Path, muscles: Option<&Path>) -> Result<()> {
    let catalog = Catalog::load(Some(rules), muscles)?;
    println!(
        "OK: {} rules, {} muscles",
        catalog.rules().len(),
        catalog.muscles().len()
    );
    Ok(())
}
