use std::path::Path;

use serde::Deserialize;

use crate::clean::options::{CleanOption, Configuration};
use crate::error::{HarnessError, Result};

// ---------------------------------------------------------------------------
// RunConfig – parameters for one load-and-clean run
// ---------------------------------------------------------------------------

/// Settings read from a JSON run file. Every field is optional; CLI flags
/// override whatever the file sets.
///
/// ```json
/// { "options": ["urls", "emails", "stopwords"], "rows": 50000, "test_size": 0.25 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub options: Vec<CleanOption>,
    pub rows: Option<usize>,
    pub workers: Option<usize>,
    pub sequential: bool,
    pub test_size: f64,
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            rows: None,
            workers: None,
            sequential: false,
            test_size: 0.25,
            seed: 42,
        }
    }
}

impl RunConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::Configuration(format!("reading {}: {e}", path.display()))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            HarnessError::Configuration(format!("parsing {}: {e}", path.display()))
        })
    }

    pub fn configuration(&self) -> Configuration {
        self.options.iter().copied().collect()
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.test_size) {
            return Err(HarnessError::Configuration(format!(
                "test_size must be in [0, 1), got {}",
                self.test_size
            )));
        }
        if self.workers == Some(0) {
            return Err(HarnessError::Configuration(
                "workers must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
