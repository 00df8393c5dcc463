//! scout show - Show one agent or skill
//!
//! Looks the item up by id and prints it with its detected skill labels.

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_json, use_rich_output};
use crate::core::{Agent, Item, Skill};
use crate::error::{Result, ScoutError};
use crate::search::{KeywordClassifier, SkillClassifier};
use crate::utils::{escape_tsv, format_count};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Item id
    pub id: String,
}

#[derive(Debug, Serialize)]
struct ShowJson<'a> {
    status: &'static str,
    item: &'a Item,
    skills: &'a [String],
}

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let item = catalog
        .get(&args.id)
        .ok_or_else(|| ScoutError::NotFound(format!("no agent or skill with id {}", args.id)))?;
    let skills = KeywordClassifier::new(ctx.categories.clone()).classify(item);
    debug!(target: "show", id = item.id(), mode = ?ctx.output_format, "rendering item");

    match ctx.output_format {
        OutputFormat::Json => emit_json(&ShowJson {
            status: "ok",
            item,
            skills: &skills,
        })?,
        OutputFormat::Jsonl => {
            let line = serde_json::to_string(&ShowJson {
                status: "ok",
                item,
                skills: &skills,
            })
            .map_err(|err| ScoutError::Serialization(format!("serialize output: {err}")))?;
            println!("{line}");
        }
        OutputFormat::Plain => println!("{}", tsv_row(item, &skills)),
        OutputFormat::Tsv => {
            println!("type\tid\tname\tskills\tdescription");
            println!("{}", tsv_row(item, &skills));
        }
        OutputFormat::Human => {
            let rich = use_rich_output(ctx.output_format, ctx.robot_mode);
            println!("{}", format_human(item, &skills, rich));
        }
    }
    Ok(())
}

fn tsv_row(item: &Item, skills: &[String]) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        item.kind(),
        escape_tsv(item.id()),
        escape_tsv(item.name()),
        skills.join(","),
        escape_tsv(item.description()),
    )
}

fn format_human(item: &Item, skills: &[String], rich: bool) -> String {
    let mut layout = HumanLayout::new(rich);
    layout.title(&format!("{} ({})", item.name(), item.kind()));
    layout
        .kv("Id", item.id())
        .kv("Source", item.meta().source.label());
    match item {
        Item::Agent(agent) => agent_fields(&mut layout, agent),
        Item::Skill(skill) => skill_fields(&mut layout, skill),
    }
    if let Some(created) = &item.meta().created_at {
        layout.kv("Joined", &created.display_date());
    }
    let skills_line = if skills.is_empty() {
        "none detected".to_string()
    } else {
        skills.join(", ")
    };
    layout.kv("Skills", &skills_line);

    if !item.description().is_empty() {
        layout.blank().bullet(item.description());
    }
    match item {
        Item::Agent(agent) if !agent.recent_posts.is_empty() => {
            layout.blank().kv("Recent posts", "");
            for post in &agent.recent_posts {
                let title = if post.title.is_empty() {
                    "Untitled"
                } else {
                    post.title.as_str()
                };
                let mut line = format!("{title} ({}↑)", post.upvotes);
                if !post.submolt.is_empty() {
                    line.push_str(&format!(" in m/{}", post.submolt));
                }
                layout.bullet(&line);
            }
        }
        Item::Skill(skill) if !skill.slug.is_empty() => {
            layout
                .blank()
                .kv("Install", &format!("clawdhub install {}", skill.slug));
        }
        _ => {}
    }
    layout.build()
}

fn agent_fields(layout: &mut HumanLayout, agent: &Agent) {
    layout
        .kv("Karma", &agent.karma.to_string())
        .kv("Followers", &format_count(agent.followers))
        .kv("Active", if agent.is_active { "yes" } else { "no" });
    if let Some(last) = &agent.last_active {
        layout.kv("Last active", last);
    }
}

fn skill_fields(layout: &mut HumanLayout, skill: &Skill) {
    layout
        .kv("Slug", &skill.slug)
        .kv("Version", skill.latest_version.as_deref().unwrap_or("-"))
        .kv("Downloads", &format_count(skill.stats.downloads))
        .kv("Installs", &format_count(skill.stats.installs))
        .kv("Stars", &format_count(skill.stats.stars))
        .kv("Tags", &skill.tags.join(", "));
}
