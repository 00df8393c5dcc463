//! Loading the item collection from JSON snapshots.
//!
//! The collectors write `combined.json` (agents and skills, tagged by `type`).
//! Older checkouts only have `agents.json`, a bare array of snake_case agent
//! records; those are upgraded to [`Item::Agent`] with source `moltbook`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::item::{nullable_string, nullable_vec};
use crate::core::{Agent, Item, ItemKind, ItemMeta, Post, Source, Timestamp};
use crate::error::{Result, ScoutError};

pub const COMBINED_FILE: &str = "combined.json";
pub const LEGACY_AGENTS_FILE: &str = "agents.json";

/// Which snapshot a catalog was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Combined,
    LegacyAgents,
    /// Built in memory.
    Inline,
}

/// Per-kind counts and origin of a loaded catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub agents: usize,
    pub skills: usize,
    pub source: CatalogSource,
}

impl CatalogSummary {
    /// One-line description, e.g. `Searching 12 agents + 40 skills`.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut line = format!("Searching {} agents + {} skills", self.agents, self.skills);
        if self.source == CatalogSource::LegacyAgents {
            line.push_str(&format!(" (legacy {LEGACY_AGENTS_FILE}: no skills loaded)"));
        }
        line
    }
}

/// The immutable item collection for one invocation.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    source: CatalogSource,
    path: Option<PathBuf>,
}

impl Catalog {
    /// Load from `data_dir`, preferring `combined.json` over `agents.json`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let combined = data_dir.join(COMBINED_FILE);
        if combined.is_file() {
            let items: Vec<Item> = read_json(&combined)?;
            info!(target: "catalog", path = %combined.display(), count = items.len(), "loaded combined catalog");
            return Ok(Self::build(items, CatalogSource::Combined, Some(combined)));
        }

        let legacy = data_dir.join(LEGACY_AGENTS_FILE);
        if legacy.is_file() {
            let records: Vec<LegacyAgent> = read_json(&legacy)?;
            info!(target: "catalog", path = %legacy.display(), count = records.len(), "upgrading legacy agents file");
            let items = records
                .into_iter()
                .map(|record| Item::Agent(record.into()))
                .collect();
            return Ok(Self::build(items, CatalogSource::LegacyAgents, Some(legacy)));
        }

        Err(ScoutError::MissingData(data_dir.to_path_buf()))
    }

    /// Wrap an in-memory collection.
    #[must_use]
    pub fn from_items(items: Vec<Item>) -> Self {
        Self::build(items, CatalogSource::Inline, None)
    }

    fn build(items: Vec<Item>, source: CatalogSource, path: Option<PathBuf>) -> Self {
        Self {
            items: dedup_by_id(items),
            source,
            path,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub const fn source(&self) -> CatalogSource {
        self.source
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn count(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|item| item.kind() == kind).count()
    }

    #[must_use]
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            agents: self.count(ItemKind::Agent),
            skills: self.count(ItemKind::Skill),
            source: self.source,
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }
}

/// Keep the first item for each id.
fn dedup_by_id(items: Vec<Item>) -> Vec<Item> {
    let mut seen = HashSet::new();
    let total = items.len();
    let kept: Vec<Item> = items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.id().to_string());
            if !fresh {
                warn!(target: "catalog", id = item.id(), "duplicate item id, keeping first");
            }
            fresh
        })
        .collect();
    if kept.len() != total {
        debug!(target: "catalog", dropped = total - kept.len(), "removed duplicate ids");
    }
    kept
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| ScoutError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Agent record as written by the first collector.
#[derive(Debug, Deserialize)]
struct LegacyAgent {
    id: String,
    name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    description: String,
    #[serde(default)]
    karma: i64,
    #[serde(default)]
    follower_count: u64,
    #[serde(default)]
    is_active: bool,
    #[serde(default)]
    created_at: Option<Timestamp>,
    #[serde(default)]
    last_active: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    recent_posts: Vec<Post>,
}

impl From<LegacyAgent> for Agent {
    fn from(legacy: LegacyAgent) -> Self {
        Self {
            meta: ItemMeta {
                id: legacy.id,
                name: legacy.name,
                description: legacy.description,
                created_at: legacy.created_at,
                source: Source::Moltbook,
            },
            karma: legacy.karma,
            followers: legacy.follower_count,
            is_active: legacy.is_active,
            last_active: legacy.last_active,
            recent_posts: legacy.recent_posts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::UnitTestFixture;

    const COMBINED: &str = r#"[
        {"type": "agent", "id": "a1", "name": "CryptoBot", "description": "trading", "source": "moltbook",
         "karma": 10, "followers": 2, "isActive": true, "recentPosts": []},
        {"type": "skill", "id": "s1", "name": "Pilot", "description": "browser automation", "source": "clawdhub",
         "slug": "pilot", "tags": ["browser"], "stats": {"downloads": 5, "installs": 1, "stars": 0, "versions": 2},
         "latestVersion": "1.2.0"}
    ]"#;

    const LEGACY: &str = r#"[
        {"id": "a1", "name": "OldBot", "description": null, "karma": 3, "follower_count": 9,
         "following_count": 1, "is_active": false, "created_at": "2026-01-01", "last_active": "2026-01-02",
         "recent_posts": [{"title": "hi", "content": "there", "upvotes": 1, "submolt": "general"}]}
    ]"#;

    #[test]
    fn loads_combined_file() {
        let fixture = UnitTestFixture::new();
        let _ = fixture.create_file(COMBINED_FILE, COMBINED);

        let catalog = Catalog::load(&fixture.data_path).unwrap();
        assert_eq!(catalog.source(), CatalogSource::Combined);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.count(ItemKind::Agent), 1);
        assert_eq!(catalog.count(ItemKind::Skill), 1);
        assert_eq!(catalog.get("s1").map(Item::name), Some("Pilot"));
    }

    #[test]
    fn combined_wins_over_legacy() {
        let fixture = UnitTestFixture::new();
        let _ = fixture.create_file(COMBINED_FILE, COMBINED);
        let _ = fixture.create_file(LEGACY_AGENTS_FILE, LEGACY);

        let catalog = Catalog::load(&fixture.data_path).unwrap();
        assert_eq!(catalog.source(), CatalogSource::Combined);
    }

    #[test]
    fn upgrades_legacy_agents() {
        let fixture = UnitTestFixture::new();
        let _ = fixture.create_file(LEGACY_AGENTS_FILE, LEGACY);

        let catalog = Catalog::load(&fixture.data_path).unwrap();
        assert_eq!(catalog.source(), CatalogSource::LegacyAgents);
        let summary = catalog.summary();
        assert_eq!((summary.agents, summary.skills), (1, 0));
        assert_eq!(
            summary.describe(),
            "Searching 1 agents + 0 skills (legacy agents.json: no skills loaded)"
        );
        let Some(Item::Agent(agent)) = catalog.get("a1") else {
            panic!("expected upgraded agent");
        };
        assert_eq!(agent.meta.source, Source::Moltbook);
        assert_eq!(agent.meta.description, "");
        assert_eq!(agent.followers, 9);
        assert_eq!(agent.recent_posts.len(), 1);
    }

    #[test]
    fn missing_data_is_an_error() {
        let fixture = UnitTestFixture::new();
        let err = Catalog::load(&fixture.data_path).unwrap_err();
        assert!(matches!(err, ScoutError::MissingData(_)));
    }

    #[test]
    fn malformed_json_reports_path() {
        let fixture = UnitTestFixture::new();
        let _ = fixture.create_file(COMBINED_FILE, "{not json");
        let err = Catalog::load(&fixture.data_path).unwrap_err();
        assert!(err.to_string().contains(COMBINED_FILE));
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let fixture = UnitTestFixture::new();
        let _ = fixture.create_file(
            COMBINED_FILE,
            r#"[
                {"type": "skill", "id": "dup", "name": "First"},
                {"type": "skill", "id": "dup", "name": "Second"}
            ]"#,
        );
        let catalog = Catalog::load(&fixture.data_path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.items()[0].name(), "First");
    }
}
