//! Printable analysis report
//!
//! Renders the strength overview and the ranked posture issues as plain
//! text or Markdown, in Korean or English.

use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::analysis::{PostureIssue, SeverityTier};
use crate::catalog::Catalog;
use crate::types::{Language, MuscleStateMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Markdown,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "report" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(format!("Invalid report format: '{}'. Valid options: text, markdown", s)),
        }
    }
}

/// Everything a report shows
pub struct ReportInput<'a> {
    pub catalog: &'a Catalog,
    pub muscle_states: &'a MuscleStateMap,
    pub issues: &'a [PostureIssue],
    pub language: Language,
    pub generated_at: DateTime<Utc>,
}

struct Labels {
    title: &'static str,
    generated: &'static str,
    overview: &'static str,
    analysis: &'static str,
    no_muscles: &'static str,
    no_issues: &'static str,
    severity: &'static str,
    points: &'static str,
    exercises: &'static str,
    disclaimer: &'static str,
}

const KO: Labels = Labels {
    title: "근육 강도 분석 & 자세 평가 보고서",
    generated: "생성일",
    overview: "1. 근육 강도 현황",
    analysis: "2. 자세 분석 결과",
    no_muscles: "입력된 근육 데이터가 없습니다.",
    no_issues: "✓ 특별한 자세 이상이 감지되지 않았습니다.",
    severity: "심각도",
    points: "점",
    exercises: "추천 운동",
    disclaimer: "※ 이 분석은 참고용이며, 전문가의 정확한 진단을 대체할 수 없습니다.",
};

const EN: Labels = Labels {
    title: "Muscle Strength Analysis & Posture Assessment Report",
    generated: "Generated",
    overview: "1. Muscle Strength Overview",
    analysis: "2. Posture Analysis",
    no_muscles: "No muscle data has been entered.",
    no_issues: "✓ No notable postural issues were detected.",
    severity: "Severity",
    points: " points",
    exercises: "Recommended exercises",
    disclaimer: "※ This analysis is for reference only and does not replace an assessment by a professional.",
};

fn labels(language: Language) -> &'static Labels {
    match language {
        Language::Ko => &KO,
        Language::En => &EN,
    }
}

/// Render a report
pub fn render_report(input: &ReportInput<'_>, format: ReportFormat) -> String {
    let labels = labels(input.language);
    let overview = overview_lines(input);
    let date = input.generated_at.format("%Y-%m-%d");

    let mut out: Vec<String> = Vec::new();
    match format {
        ReportFormat::Text => {
            out.push(labels.title.to_string());
            out.push(format!("{}: {}", labels.generated, date));
            out.push(String::new());

            out.push(labels.overview.to_string());
            if overview.is_empty() {
                out.push(format!("  {}", labels.no_muscles));
            }
            for (label, level) in &overview {
                out.push(format!("  • {}: {}", label, level));
            }
            out.push(String::new());

            out.push(labels.analysis.to_string());
            if input.issues.is_empty() {
                out.push(format!("  {}", labels.no_issues));
            }
            for (index, issue) in input.issues.iter().enumerate() {
                let tier = SeverityTier::from_score(issue.severity);
                out.push(format!("  {}. {}", index + 1, issue.name(input.language)));
                out.push(format!(
                    "     {}: {}{} ({})",
                    labels.severity,
                    issue.severity,
                    labels.points,
                    tier.label(input.language)
                ));
                let description = issue.description(input.language);
                if !description.is_empty() {
                    out.push(format!("     {}", description));
                }
                if !issue.recommended_exercises.is_empty() {
                    out.push(format!("     {}:", labels.exercises));
                    for exercise in &issue.recommended_exercises {
                        out.push(format!("       - {}", exercise));
                    }
                }
                out.push(String::new());
            }
            if input.issues.is_empty() {
                out.push(String::new());
            }

            out.push(labels.disclaimer.to_string());
        }
        ReportFormat::Markdown => {
            out.push(format!("# {}", labels.title));
            out.push(String::new());
            out.push(format!("_{}: {}_", labels.generated, date));
            out.push(String::new());

            out.push(format!("## {}", labels.overview));
            out.push(String::new());
            if overview.is_empty() {
                out.push(labels.no_muscles.to_string());
            }
            for (label, level) in &overview {
                out.push(format!("- **{}**: {}", label, level));
            }
            out.push(String::new());

            out.push(format!("## {}", labels.analysis));
            out.push(String::new());
            if input.issues.is_empty() {
                out.push(labels.no_issues.to_string());
                out.push(String::new());
            }
            for (index, issue) in input.issues.iter().enumerate() {
                let tier = SeverityTier::from_score(issue.severity);
                out.push(format!("### {}. {}", index + 1, issue.name(input.language)));
                out.push(String::new());
                out.push(format!(
                    "**{}:** {}{} ({})",
                    labels.severity,
                    issue.severity,
                    labels.points,
                    tier.label(input.language)
                ));
                out.push(String::new());
                let description = issue.description(input.language);
                if !description.is_empty() {
                    out.push(description.to_string());
                    out.push(String::new());
                }
                if !issue.recommended_exercises.is_empty() {
                    out.push(format!("**{}:**", labels.exercises));
                    out.push(String::new());
                    for (i, exercise) in issue.recommended_exercises.iter().enumerate() {
                        out.push(format!("{}. {}", i + 1, exercise));
                    }
                    out.push(String::new());
                }
            }

            out.push(format!("> {}", labels.disclaimer));
        }
    }

    let mut report = out.join("\n");
    report.push('\n');
    report
}

/// (muscle label, level label) for every catalog muscle with an entry
///
/// Entries for muscles the catalog does not know are left out.
fn overview_lines(input: &ReportInput<'_>) -> Vec<(String, String)> {
    input
        .muscle_states
        .iter()
        .filter_map(|(id, level)| {
            let muscle = input.catalog.muscles().get(id)?;
            let display = input.catalog.levels().display(level);
            Some((
                muscle.label(input.language).to_string(),
                display.label(input.language).to_string(),
            ))
        })
        .collect()
}
