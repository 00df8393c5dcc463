//! Search results formatter
//!
//! Renders ranked results as styled or plain text (Human), JSON, JSONL,
//! headerless TSV (Plain) and TSV with a header row.

use console::style;
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::catalog::CatalogSummary;
use crate::cli::output::{Formattable, OutputFormat};
use crate::core::{Agent, Item, ItemKind, Skill};
use crate::search::SearchResult;
use crate::utils::{escape_tsv, format_count, truncate_string};

const BIO_WIDTH: usize = 80;
const POST_TITLE_WIDTH: usize = 40;

/// Ranked results for one query, ready for display.
#[derive(Debug, Clone)]
pub struct SearchResults<'a> {
    pub query: String,
    pub kind: Option<ItemKind>,
    /// Results actually shown, best first.
    pub results: Vec<SearchResult<'a>>,
    /// Matches before truncation.
    pub total: usize,
    pub agent_matches: usize,
    pub skill_matches: usize,
    pub duration_ms: Option<u64>,
    /// What was searched; shown above the results.
    pub catalog: Option<CatalogSummary>,
    /// Styled output; only meaningful for [`OutputFormat::Human`].
    pub rich: bool,
}

#[derive(Debug, Serialize)]
struct SearchResultJson<'r> {
    rank: usize,
    score: f64,
    matched_terms: &'r [String],
    skills: &'r [String],
    #[serde(flatten)]
    item: &'r Item,
}

#[derive(Debug, Serialize)]
struct SearchResponseJson<'r> {
    status: &'static str,
    query: &'r str,
    #[serde(skip_serializing_if = "Option::is_none")]
    type_filter: Option<ItemKind>,
    count: usize,
    total: usize,
    agents: usize,
    skills: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog: Option<CatalogSummary>,
    results: Vec<SearchResultJson<'r>>,
}

impl<'a> SearchResults<'a> {
    /// Build from the full ranked list, keeping the first `limit` for display.
    pub fn new(
        query: impl Into<String>,
        kind: Option<ItemKind>,
        mut ranked: Vec<SearchResult<'a>>,
        limit: usize,
    ) -> Self {
        let total = ranked.len();
        let agent_matches = ranked
            .iter()
            .filter(|r| r.item.kind() == ItemKind::Agent)
            .count();
        ranked.truncate(limit);
        Self {
            query: query.into(),
            kind,
            results: ranked,
            total,
            agent_matches,
            skill_matches: total - agent_matches,
            duration_ms: None,
            catalog: None,
            rich: false,
        }
    }

    #[must_use]
    pub const fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    #[must_use]
    pub const fn with_catalog(mut self, catalog: CatalogSummary) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub const fn with_rich(mut self, rich: bool) -> Self {
        self.rich = rich;
        self
    }

    fn json_results(&self) -> Vec<SearchResultJson<'_>> {
        self.results
            .iter()
            .enumerate()
            .map(|(i, r)| SearchResultJson {
                rank: i + 1,
                score: r.score,
                matched_terms: &r.matched_terms,
                skills: &r.skills,
                item: r.item,
            })
            .collect()
    }

    fn to_json_response(&self) -> SearchResponseJson<'_> {
        SearchResponseJson {
            status: "ok",
            query: &self.query,
            type_filter: self.kind,
            count: self.results.len(),
            total: self.total,
            agents: self.agent_matches,
            skills: self.skill_matches,
            duration_ms: self.duration_ms,
            catalog: self.catalog,
            results: self.json_results(),
        }
    }

    fn format_human(&self) -> String {
        debug!(target: "search", rich = self.rich, results = self.results.len(), "rendering results");
        if self.results.is_empty() {
            return self.format_empty();
        }

        let rule = "━".repeat(terminal_width().min(80));
        let mut out = self.build_header();
        out.push_str("\n\n");
        out.push_str(&rule);
        out.push('\n');

        for (i, result) in self.results.iter().enumerate() {
            out.push('\n');
            let block = match result.item {
                Item::Agent(agent) => self.format_agent(agent, result, i + 1),
                Item::Skill(skill) => self.format_skill(skill, result, i + 1),
            };
            out.push_str(&block);
            out.push('\n');
        }

        out.push('\n');
        out.push_str(&rule);
        out.push_str("\n\n");
        out.push_str(&self.build_footer());
        out
    }

    fn format_empty(&self) -> String {
        let mut out = self.catalog_line();
        out.push_str(&format!("No results found for '{}'", self.query));
        if let Some(kind) = self.kind {
            out.push_str(&format!(" (filter: {kind})"));
        }
        out.push_str("\n\nTry:\n  - Using different keywords\n  - Removing the --type or --skill filters\n");
        out
    }

    fn catalog_line(&self) -> String {
        self.catalog
            .map(|summary| format!("{}\n", summary.describe()))
            .unwrap_or_default()
    }

    fn build_header(&self) -> String {
        let mut header = format!(
            "Found {} matching items for '{}'",
            self.total, self.query
        );
        if let Some(kind) = self.kind {
            header.push_str(&format!(" (filter: {kind})"));
        }
        if let Some(ms) = self.duration_ms {
            header.push_str(&format!(" in {ms}ms"));
        }
        format!("{}{}", self.catalog_line(), self.bold(&header))
    }

    fn build_footer(&self) -> String {
        format!(
            "Showing top {} of {} results ({} agents, {} skills).",
            self.results.len(),
            self.total,
            self.agent_matches,
            self.skill_matches,
        )
    }

    fn format_agent(&self, agent: &Agent, result: &SearchResult<'_>, rank: usize) -> String {
        let icon = if self.rich { "🤖" } else { "[agent]" };
        let active = if agent.is_active { "yes" } else { "no" };
        let mut lines = vec![
            format!(
                "#{rank} {icon} {} (score: {:.1}, karma: {})",
                self.bold(&agent.meta.name),
                result.score,
                agent.karma
            ),
            format!(
                "   Source: {} | Followers: {} | Active: {active}",
                agent.meta.source.label(),
                format_count(agent.followers),
            ),
            format!("   Skills: {}", skills_line(&result.skills)),
            format!("   Matched: {}", self.dim(&result.matched_terms.join(", "))),
        ];
        if !agent.meta.description.is_empty() {
            lines.push(format!(
                "   Bio: {}",
                truncate_string(&agent.meta.description, BIO_WIDTH)
            ));
        }
        if let Some(post) = agent.recent_posts.first() {
            let title = if post.title.is_empty() {
                "Untitled".to_string()
            } else {
                truncate_string(&post.title, POST_TITLE_WIDTH)
            };
            lines.push(format!("   Top post: \"{title}\" ({}↑)", post.upvotes));
        }
        lines.join("\n")
    }

    fn format_skill(&self, skill: &Skill, result: &SearchResult<'_>, rank: usize) -> String {
        let icon = if self.rich { "🛠️ " } else { "[skill]" };
        let mut stats = format!(
            "   Source: {} | Downloads: {} | Stars: {}",
            skill.meta.source.label(),
            format_count(skill.stats.downloads),
            format_count(skill.stats.stars),
        );
        if let Some(version) = &skill.latest_version {
            stats.push_str(&format!(" | v{version}"));
        }
        let tags = if skill.tags.is_empty() {
            "none".to_string()
        } else {
            skill.tags.join(", ")
        };
        let mut lines = vec![
            format!(
                "#{rank} {icon} {} (score: {:.1})",
                self.bold(&skill.meta.name),
                result.score
            ),
            stats,
            format!("   Tags: {tags}"),
            format!("   Skills: {}", skills_line(&result.skills)),
            format!("   Matched: {}", self.dim(&result.matched_terms.join(", "))),
        ];
        if !skill.meta.description.is_empty() {
            lines.push(format!(
                "   Desc: {}",
                truncate_string(&skill.meta.description, BIO_WIDTH)
            ));
        }
        if !skill.slug.is_empty() {
            lines.push(format!("   Install: clawdhub install {}", skill.slug));
        }
        lines.join("\n")
    }

    /// SCORE<TAB>TYPE<TAB>ID<TAB>NAME<TAB>SKILLS, no header.
    fn format_plain(&self) -> String {
        self.results
            .iter()
            .map(|r| {
                format!(
                    "{:.2}\t{}\t{}\t{}\t{}",
                    r.score,
                    r.item.kind(),
                    escape_tsv(r.item.id()),
                    escape_tsv(r.item.name()),
                    r.skills.join(","),
                )
            })
            .join("\n")
    }

    fn format_tsv(&self) -> String {
        let mut out = String::from("rank\ttype\tid\tname\tscore\tmatched\tskills\tdescription\n");
        for (i, r) in self.results.iter().enumerate() {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{:.4}\t{}\t{}\t{}\n",
                i + 1,
                r.item.kind(),
                escape_tsv(r.item.id()),
                escape_tsv(r.item.name()),
                r.score,
                r.matched_terms.join(","),
                r.skills.join(","),
                escape_tsv(r.item.description()),
            ));
        }
        out
    }

    fn format_jsonl(&self) -> String {
        self.json_results()
            .iter()
            .filter_map(|r| serde_json::to_string(r).ok())
            .join("\n")
    }

    fn bold(&self, text: &str) -> String {
        if self.rich {
            style(text).bold().force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.rich {
            style(text).dim().force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Formattable for SearchResults<'_> {
    fn format(&self, fmt: OutputFormat) -> String {
        match fmt {
            OutputFormat::Human => self.format_human(),
            OutputFormat::Json => {
                serde_json::to_string_pretty(&self.to_json_response()).unwrap_or_default()
            }
            OutputFormat::Jsonl => self.format_jsonl(),
            OutputFormat::Plain => self.format_plain(),
            OutputFormat::Tsv => self.format_tsv(),
        }
    }
}

fn skills_line(skills: &[String]) -> String {
    if skills.is_empty() {
        "none detected".to_string()
    } else {
        skills.join(", ")
    }
}

/// Get the terminal width, defaulting to 80 if detection fails.
fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(80)
}
