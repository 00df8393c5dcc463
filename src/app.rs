use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{Result, ScoutError};
use crate::search::{CategoryTable, KeywordClassifier, Ranker, Scorer};

pub struct AppContext {
    pub config: Config,
    pub data_dir: PathBuf,
    /// Category table shared by the ranker and the skill commands.
    pub categories: Arc<CategoryTable>,
    pub robot_mode: bool,
    pub output_format: OutputFormat,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = Self::find_scout_root()?;
        let config = Config::load(cli.config.as_deref(), &root)?;
        let data_dir = cli
            .data_dir
            .clone()
            .unwrap_or_else(|| config.data_dir(&root));
        let categories = config.category_table()?;
        debug!(
            target: "config",
            root = %root.display(),
            data_dir = %data_dir.display(),
            categories = categories.len(),
            "resolved context"
        );

        Ok(Self {
            config,
            data_dir,
            categories,
            robot_mode: cli.robot,
            output_format: cli.output_format(),
        })
    }

    /// Read the item collection from the data directory.
    pub fn load_catalog(&self) -> Result<Catalog> {
        Catalog::load(&self.data_dir)
    }

    /// Ranker configured from `[search]` and the active category table.
    #[must_use]
    pub fn ranker(&self) -> Ranker {
        Ranker::new(
            Scorer::new(self.config.search.weights),
            Arc::new(KeywordClassifier::new(Arc::clone(&self.categories))),
        )
        .parallel(self.config.search.parallel)
    }

    fn find_scout_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("SCOUT_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let cwd = std::env::current_dir()?;
        if let Some(found) = find_upwards(&cwd, ".scout") {
            return Ok(found);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| ScoutError::MissingConfig("data directory not found".to_string()))?;
        Ok(data_dir.join("scout"))
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_dir())
}
