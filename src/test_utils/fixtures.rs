use std::path::PathBuf;

use tempfile::TempDir;

use crate::core::{Agent, ItemMeta, Skill, SkillStats, Source};

/// Test fixture providing an isolated data directory.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {data_path:?}");

        Self {
            temp_dir,
            data_path,
        }
    }

    /// Create a test file with content.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }
}

/// Inactive agent with zero karma and no posts.
#[must_use]
pub fn agent(id: &str, name: &str, description: &str) -> Agent {
    Agent {
        meta: ItemMeta {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: None,
            source: Source::Moltbook,
        },
        karma: 0,
        followers: 0,
        is_active: false,
        last_active: None,
        recent_posts: Vec::new(),
    }
}

/// Skill with zeroed stats.
#[must_use]
pub fn skill(id: &str, name: &str, description: &str, tags: &[&str]) -> Skill {
    Skill {
        meta: ItemMeta {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: None,
            source: Source::Clawdhub,
        },
        slug: id.to_string(),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        stats: SkillStats::default(),
        latest_version: None,
    }
}
