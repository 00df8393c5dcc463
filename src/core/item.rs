//! Directory items: agent profiles and skill packages.
//!
//! An [`Item`] is a closed sum type. The wire form is the JSON produced by the
//! collectors (`combined.json`): camelCase fields with a `type` discriminator.
//! Optional text that is absent or `null` reads as an empty string so it simply
//! contributes nothing to scoring.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Which variant an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Agent,
    Skill,
}

impl ItemKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Skill => "skill",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "agent" | "agents" => Ok(Self::Agent),
            "skill" | "skills" => Ok(Self::Skill),
            other => Err(format!("unknown item type {other} (expected agent|skill)")),
        }
    }
}

/// Where an item was collected from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    Moltbook,
    Clawdhub,
    Other(String),
}

impl Default for Source {
    fn default() -> Self {
        Self::Other("unknown".to_string())
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "moltbook" => Self::Moltbook,
            "clawdhub" => Self::Clawdhub,
            _ => Self::Other(value),
        }
    }
}

impl From<Source> for String {
    fn from(source: Source) -> Self {
        match source {
            Source::Moltbook => "moltbook".to_string(),
            Source::Clawdhub => "clawdhub".to_string(),
            Source::Other(value) => value,
        }
    }
}

impl Source {
    /// Display name for the source.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Moltbook => "Moltbook",
            Self::Clawdhub => "ClawdHub",
            Self::Other(value) => value,
        }
    }
}

/// Creation time as the collectors wrote it: ISO string or epoch number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Epoch(i64),
    Text(String),
}

impl Timestamp {
    /// Numbers are millisecond epochs; strings must be RFC 3339.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Epoch(millis) => DateTime::from_timestamp_millis(*millis),
            Self::Text(text) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// `YYYY-MM-DD`, or the raw value when it does not parse.
    #[must_use]
    pub fn display_date(&self) -> String {
        match (self.to_datetime(), self) {
            (Some(dt), _) => dt.format("%Y-%m-%d").to_string(),
            (None, Self::Epoch(millis)) => millis.to_string(),
            (None, Self::Text(text)) => text.clone(),
        }
    }
}

/// Fields every item carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMeta {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub source: Source,
}

/// A post from an agent's recent activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub content: String,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub submolt: String,
}

/// An autonomous agent profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(flatten)]
    pub meta: ItemMeta,
    /// Reputation; can dip below zero on the source platform.
    #[serde(default)]
    pub karma: i64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub recent_posts: Vec<Post>,
}

/// Usage counters for a skill package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillStats {
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub installs: u64,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub versions: u64,
}

/// An installable skill package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(flatten)]
    pub meta: ItemMeta,
    #[serde(default, deserialize_with = "nullable_string")]
    pub slug: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stats: SkillStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
}

/// One searchable directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    Agent(Agent),
    Skill(Skill),
}

impl Item {
    #[must_use]
    pub const fn meta(&self) -> &ItemMeta {
        match self {
            Self::Agent(agent) => &agent.meta,
            Self::Skill(skill) => &skill.meta,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Agent(_) => ItemKind::Agent,
            Self::Skill(_) => ItemKind::Skill,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.meta().id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.meta().name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.meta().description
    }

    /// Tags for skills; agents have none.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        match self {
            Self::Agent(_) => &[],
            Self::Skill(skill) => &skill.tags,
        }
    }

    /// All text the ranking engine looks at, space-joined.
    ///
    /// Name and description, then each post as `"title content"` for agents or
    /// each tag for skills. Empty parts are skipped.
    #[must_use]
    pub fn search_text(&self) -> String {
        let meta = self.meta();
        let mut parts: Vec<String> = vec![meta.name.clone(), meta.description.clone()];
        match self {
            Self::Agent(agent) => parts.extend(
                agent
                    .recent_posts
                    .iter()
                    .map(|post| format!("{} {}", post.title, post.content)),
            ),
            Self::Skill(skill) => parts.extend(skill.tags.iter().cloned()),
        }
        parts.retain(|part| !part.is_empty());
        parts.join(" ")
    }
}

pub(crate) fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
