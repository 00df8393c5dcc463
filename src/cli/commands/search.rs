//! scout search - Rank agents and skills for a query

use std::time::Instant;

use clap::Args;
use tracing::{debug, info};

use crate::app::AppContext;
use crate::cli::formatters::SearchResults;
use crate::cli::output::{Formattable, use_rich_output};
use crate::core::ItemKind;
use crate::error::{Result, ScoutError};
use crate::search::RankQuery;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search words; joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Only return agents or only skills
    #[arg(long = "type", short = 't', value_enum)]
    pub kind: Option<ItemKind>,

    /// Only keep results with one of these skill labels (repeatable)
    #[arg(long = "skill", short = 's')]
    pub skills: Vec<String>,

    /// Maximum number of results (defaults to search.default_limit)
    #[arg(long, short)]
    pub limit: Option<usize>,
}

impl SearchArgs {
    #[must_use]
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(ctx.config.search.default_limit);
    if limit == 0 {
        return Err(ScoutError::ValidationFailed(
            "--limit must be at least 1".to_string(),
        ));
    }

    let skills: Vec<String> = args.skills.iter().map(|s| s.trim().to_lowercase()).collect();
    if let Some(unknown) = skills
        .iter()
        .find(|label| !ctx.categories.contains_label(label))
    {
        return Err(ScoutError::ValidationFailed(format!(
            "unknown skill label '{unknown}' (known: {})",
            ctx.categories.labels().join(", ")
        )));
    }

    let catalog = ctx.load_catalog()?;
    let summary = catalog.summary();
    debug!(
        target: "search",
        path = ?catalog.path(),
        agents = summary.agents,
        skills = summary.skills,
        "catalog ready"
    );
    let text = args.query_text();
    let query = RankQuery::new(text.as_str())
        .with_kind(args.kind)
        .with_skills(skills)
        .with_limit(limit);

    let ranker = ctx.ranker();
    let started = Instant::now();
    let ranked = ranker.rank_all(catalog.items(), &query);
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        target: "search",
        query = %text,
        matches = ranked.len(),
        elapsed_ms,
        "ranked catalog"
    );

    let rich = use_rich_output(ctx.output_format, ctx.robot_mode);
    debug!(target: "search", mode = ?ctx.output_format, rich, "output mode selected");

    let results = SearchResults::new(text, args.kind, ranked, limit)
        .with_duration(elapsed_ms)
        .with_catalog(summary)
        .with_rich(rich);
    println!("{}", results.format(ctx.output_format));
    Ok(())
}
