use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScoutError};
use crate::search::{Category, CategoryTable, DEFAULT_LIMIT, ScoringWeights};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub search: SearchConfig,
    /// Replaces the built-in category table when non-empty.
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SCOUT_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            debug!(target: "config", "no global config directory");
            return Ok(None);
        };
        Self::load_patch(&dir.join("scout/config.toml"))
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        let path = root.join("config.toml");
        Self::load_patch(&path)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| ScoutError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| ScoutError::Config(format!("parse config {}: {err}", path.display())))?;
        debug!(target: "config", path = %path.display(), "loaded config layer");
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.data {
            self.data.merge(patch);
        }
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("SCOUT_DATA_DIR") {
            self.data.dir = Some(value);
        }
        if let Some(value) = env_usize("SCOUT_SEARCH_LIMIT")? {
            self.search.default_limit = value;
        }
        if let Some(value) = env_bool("SCOUT_SEARCH_PARALLEL") {
            self.search.parallel = value;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.default_limit == 0 {
            return Err(ScoutError::Config(
                "search.default_limit must be at least 1".to_string(),
            ));
        }
        let w = &self.search.weights;
        let named = [
            ("exact", w.exact),
            ("partial", w.partial),
            ("name", w.name),
            ("description", w.description),
            ("tag", w.tag),
            ("karma_boost", w.karma_boost),
            ("active_boost", w.active_boost),
            ("download_boost", w.download_boost),
            ("star_boost", w.star_boost),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoutError::Config(format!(
                    "search.weights.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Data directory: configured path (relative paths resolve against `root`),
    /// or `<root>/data`.
    #[must_use]
    pub fn data_dir(&self, root: &Path) -> PathBuf {
        match self.data.dir.as_deref() {
            Some(dir) => {
                let path = PathBuf::from(dir);
                if path.is_absolute() {
                    path
                } else {
                    root.join(path)
                }
            }
            None => root.join("data"),
        }
    }

    /// Category table for the classifier: configured categories or the built-in set.
    pub fn category_table(&self) -> Result<Arc<CategoryTable>> {
        if self.categories.is_empty() {
            return Ok(CategoryTable::builtin());
        }
        Ok(Arc::new(CategoryTable::from_categories(
            self.categories.clone(),
        )?))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub dir: Option<String>,
}

impl DataConfig {
    fn merge(&mut self, patch: DataPatch) {
        if let Some(value) = patch.dir {
            self.dir = Some(value);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default)]
    pub weights: ScoringWeights,
}

const fn default_limit() -> usize {
    DEFAULT_LIMIT
}

const fn default_parallel() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            parallel: true,
            weights: ScoringWeights::default(),
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.default_limit {
            self.default_limit = value;
        }
        if let Some(value) = patch.parallel {
            self.parallel = value;
        }
        if let Some(patch) = patch.weights {
            patch.apply(&mut self.weights);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub data: Option<DataPatch>,
    pub search: Option<SearchPatch>,
    pub categories: Option<Vec<Category>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DataPatch {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub default_limit: Option<usize>,
    pub parallel: Option<bool>,
    pub weights: Option<WeightsPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct WeightsPatch {
    pub exact: Option<f64>,
    pub partial: Option<f64>,
    pub name: Option<f64>,
    pub description: Option<f64>,
    pub tag: Option<f64>,
    pub karma_boost: Option<f64>,
    pub active_boost: Option<f64>,
    pub download_boost: Option<f64>,
    pub star_boost: Option<f64>,
}

impl WeightsPatch {
    fn apply(self, weights: &mut ScoringWeights) {
        let slots = [
            (self.exact, &mut weights.exact),
            (self.partial, &mut weights.partial),
            (self.name, &mut weights.name),
            (self.description, &mut weights.description),
            (self.tag, &mut weights.tag),
            (self.karma_boost, &mut weights.karma_boost),
            (self.active_boost, &mut weights.active_boost),
            (self.download_boost, &mut weights.download_boost),
            (self.star_boost, &mut weights.star_boost),
        ];
        for (value, slot) in slots {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| parse_bool(&value))
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<usize>().map(Some).map_err(|err| {
            ScoutError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
