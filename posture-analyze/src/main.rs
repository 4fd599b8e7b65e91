use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use std::io::Read;

use libmusclemap::analysis::MuscleStatistics;
use libmusclemap::report::{render_report, ReportFormat, ReportInput};
use libmusclemap::store::{import_data, FileStatePersistence};
use libmusclemap::{
    evaluate, Catalog, Config, Language, MuscleMapError, MuscleStateMap, PostureIssue, Session, SeverityTier,
};

#[derive(Parser, Debug)]
#[command(name = "posture-analyze")]
#[command(version, about = "Infer postural issues from muscle strength assessments")]
#[command(long_about = r#"Infer postural issues from muscle strength assessments.

Each posture rule lists muscles expected to be weak and muscles expected to
be strong. A rule fires when at least one of each (where listed) deviates
the expected way; its severity (0-100) grows with how far they deviate.

EXAMPLES:
    # Analyze the saved state (see muscle-state)
    posture-analyze

    # Analyze an export document
    posture-analyze --input assessment.json
    muscle-state export | posture-analyze --input -

    # English output with summary counts
    posture-analyze --lang en --stats

    # JSON output for scripting
    posture-analyze --format json | jq '.[] | select(.tier == "high") | .id'

    # JSONL output (one issue per line)
    posture-analyze --format jsonl

    # Printable report
    posture-analyze --format report > report.txt
    posture-analyze --format markdown --lang en > report.md

OUTPUT FORMATS:
    text     - Ranked issues with severity and contributing muscles (default)
    json     - JSON array of issues (object with statistics when --stats)
    jsonl    - JSON lines, one issue per line
    report   - Full plain-text report with overview and exercises
    markdown - Full report as Markdown

EXIT CODES:
    0 - Success (including no issues detected)
    1 - Configuration or storage error
    2 - Catalog error
    3 - Invalid input (malformed export document)
"#)]
struct Args {
    /// Export document to analyze instead of the saved state
    #[arg(short, long, value_name = "FILE")]
    #[arg(help = "Analyze an export document instead of the saved state (- for stdin)")]
    input: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    #[arg(value_parser = ["text", "json", "jsonl", "report", "markdown"])]
    format: String,

    /// Output language
    #[arg(short, long, value_name = "LANG")]
    #[arg(help = "Output language: ko or en (default: from config)")]
    lang: Option<String>,

    /// Include summary counts
    #[arg(long)]
    #[arg(help = "Include muscle counts by strength in text and json output")]
    stats: bool,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// An issue as written by the json formats
#[derive(Debug, Serialize)]
struct IssueOutput<'a> {
    #[serde(flatten)]
    issue: &'a PostureIssue,
    tier: SeverityTier,
    color: &'static str,
}

impl<'a> From<&'a PostureIssue> for IssueOutput<'a> {
    fn from(issue: &'a PostureIssue) -> Self {
        let tier = SeverityTier::from_score(issue.severity);
        Self {
            issue,
            tier,
            color: tier.color(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AnalysisOutput<'a> {
    issues: Vec<IssueOutput<'a>>,
    statistics: MuscleStatistics,
}

fn main() {
    let args = Args::parse();

    libmusclemap::logging::init_default(args.verbose);
    tracing::debug!("posture-analyze started with args: {:?}", args);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

/// Exit code of the library error behind `e`, or 1
fn exit_code(e: &anyhow::Error) -> i32 {
    e.chain()
        .find_map(|cause| cause.downcast_ref::<MuscleMapError>())
        .map(MuscleMapError::exit_code)
        .unwrap_or(1)
}

fn run(args: Args) -> Result<()> {
    let config = Config::load()?;
    let language = match args.lang {
        Some(ref lang) => lang
            .parse::<Language>()
            .map_err(MuscleMapError::InvalidInput)?,
        None => config.defaults.language,
    };

    let catalog = Catalog::from_config(&config.catalog).map_err(MuscleMapError::from)?;
    let muscle_states = match args.input {
        Some(ref input) => read_document(input)?,
        None => {
            let persistence = FileStatePersistence::new(config.state_path());
            let session = Session::open(catalog.clone(), persistence)?;
            session.state().snapshot()
        }
    };

    let issues = evaluate(&muscle_states, catalog.rules());
    tracing::debug!(muscles = muscle_states.len(), issues = issues.len(), "Analysis complete");

    match args.format.as_str() {
        "json" => {
            let outputs: Vec<IssueOutput> = issues.iter().map(IssueOutput::from).collect();
            let json = if args.stats {
                serde_json::to_string_pretty(&AnalysisOutput {
                    issues: outputs,
                    statistics: MuscleStatistics::from_snapshot(&muscle_states),
                })?
            } else {
                serde_json::to_string_pretty(&outputs)?
            };
            println!("{}", json);
        }
        "jsonl" => {
            for issue in &issues {
                println!("{}", serde_json::to_string(&IssueOutput::from(issue))?);
            }
        }
        "report" | "markdown" => {
            let format: ReportFormat = args.format.parse().map_err(MuscleMapError::InvalidInput)?;
            let input = ReportInput {
                catalog: &catalog,
                muscle_states: &muscle_states,
                issues: &issues,
                language,
                generated_at: Utc::now(),
            };
            print!("{}", render_report(&input, format));
        }
        _ => print_text(&issues, &muscle_states, language, args.stats),
    }

    Ok(())
}

/// Strength map from an export document file, or stdin for `-`
fn read_document(input: &str) -> Result<MuscleStateMap> {
    let payload = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read export document from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
    };

    let muscle_states = import_data(&payload)
        .map_err(MuscleMapError::from)
        .with_context(|| format!("Invalid export document {}", input))?;
    Ok(muscle_states)
}

fn print_text(issues: &[PostureIssue], muscle_states: &MuscleStateMap, language: Language, stats: bool) {
    if stats {
        let statistics = MuscleStatistics::from_snapshot(muscle_states);
        println!(
            "muscles: {} (weak {}, normal {}, strong {}), average {:.2}",
            statistics.total, statistics.weak, statistics.normal, statistics.strong, statistics.average
        );
        println!();
    }

    if issues.is_empty() {
        println!("{}", language.pick("감지된 자세 이상이 없습니다.", "No posture issues detected."));
        return;
    }

    for issue in issues {
        let tier = SeverityTier::from_score(issue.severity);
        println!(
            "{:>3} | {} | {} ({})",
            issue.severity,
            tier.label(language),
            issue.name(language),
            issue.id
        );
        if !issue.triggered_by.weak.is_empty() {
            println!("      weak:   {}", issue.triggered_by.weak.join(", "));
        }
        if !issue.triggered_by.strong.is_empty() {
            println!("      strong: {}", issue.triggered_by.strong.join(", "));
        }
    }
}
