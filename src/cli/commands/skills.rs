//! scout skills - Histogram of detected skill labels

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json, use_rich_output};
use crate::core::ItemKind;
use crate::error::Result;
use crate::search::{KeywordClassifier, skill_histogram};

#[derive(Args, Debug)]
pub struct SkillsArgs {
    /// Only count agents or only skills
    #[arg(long = "type", short = 't', value_enum)]
    pub kind: Option<ItemKind>,

    /// Number of labels to show
    #[arg(long, short = 'n', default_value = "20")]
    pub top: usize,
}

#[derive(Debug, Serialize)]
struct LabelCount<'a> {
    label: &'a str,
    count: usize,
}

#[derive(Debug, Serialize)]
struct SkillsReport<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    type_filter: Option<ItemKind>,
    scanned: usize,
    labels: Vec<LabelCount<'a>>,
}

pub fn run(ctx: &AppContext, args: &SkillsArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let classifier = KeywordClassifier::new(ctx.categories.clone());

    let items: Vec<_> = catalog
        .items()
        .iter()
        .filter(|item| args.kind.is_none_or(|kind| item.kind() == kind))
        .collect();
    let mut histogram = skill_histogram(&classifier, items.iter().copied());
    histogram.truncate(args.top);
    debug!(target: "search", scanned = items.len(), labels = histogram.len(), "built skill histogram");

    let report = SkillsReport {
        status: "ok",
        type_filter: args.kind,
        scanned: items.len(),
        labels: histogram
            .iter()
            .map(|(label, count)| LabelCount {
                label: label.as_str(),
                count: *count,
            })
            .collect(),
    };

    match ctx.output_format {
        OutputFormat::Json => emit_json(&report)?,
        OutputFormat::Jsonl => {
            for entry in &report.labels {
                println!("{}", serde_json::to_string(entry).unwrap_or_default());
            }
        }
        OutputFormat::Plain => {
            for entry in &report.labels {
                println!("{}\t{}", entry.label, entry.count);
            }
        }
        OutputFormat::Tsv => {
            println!("label\tcount");
            for entry in &report.labels {
                println!("{}\t{}", entry.label, entry.count);
            }
        }
        OutputFormat::Human => {
            let rich = use_rich_output(ctx.output_format, ctx.robot_mode);
            println!("{}", format_human(&report, rich));
        }
    }
    Ok(())
}

fn format_human(report: &SkillsReport<'_>, rich: bool) -> String {
    if report.labels.is_empty() {
        return format!("No skill labels detected across {} items.", report.scanned);
    }
    let header = format!("Skill labels across {} items", report.scanned);
    let mut out = if rich {
        style(header).bold().force_styling(true).to_string()
    } else {
        header
    };
    out.push('\n');
    let width = report
        .labels
        .iter()
        .map(|entry| entry.label.len())
        .max()
        .unwrap_or(0);
    for entry in &report.labels {
        out.push_str(&format!("\n  {:width$}  {}", entry.label, entry.count));
    }
    out
}
