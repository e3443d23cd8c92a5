use std::path::Path;
use std::time::Instant;

use log::info;

use crate::clean::engine::{clean_all, clean_sequential};
use crate::clean::options::Configuration;
use crate::data::loader::load;
use crate::data::model::{CleanedDataset, Dataset};
use crate::error::Result;

/// How the cleaning pass is scheduled. Both modes produce identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// Fan out over `workers` threads, or one per CPU when `None`.
    Parallel { workers: Option<usize> },
    Sequential,
}

impl Default for Execution {
    fn default() -> Self {
        Execution::Parallel { workers: None }
    }
}

/// Load `path` and clean every review in parallel with the default worker
/// count. Returns the `(samples, labels)` pair an evaluator consumes.
pub fn load_and_clean(
    path: &Path,
    config: &Configuration,
    row_limit: Option<usize>,
) -> Result<CleanedDataset> {
    let dataset = load(path, row_limit)?;
    clean_dataset(&dataset, config, Execution::default())
}

/// Clean an already loaded dataset. Labels pass through untouched.
pub fn clean_dataset(
    dataset: &Dataset,
    config: &Configuration,
    execution: Execution,
) -> Result<CleanedDataset> {
    info!("Cleaning dataset with options [{config}]");
    let start = Instant::now();

    let reviews = dataset.reviews();
    let samples = match execution {
        Execution::Parallel { workers } => clean_all(&reviews, config, workers)?,
        Execution::Sequential => clean_sequential(&reviews, config)?,
    };

    info!(
        "Cleaned {} reviews in {:.2}s",
        samples.len(),
        start.elapsed().as_secs_f64()
    );
    CleanedDataset::new(samples, dataset.labels())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Label, Record};

    fn dataset() -> Dataset {
        Dataset::from_records(
            (0..9)
                .map(|i| Record {
                    label: Label::Integer(i % 2 + 1),
                    title: format!("Title {i}!!"),
                    body: format!("body number {i} sooooo nice"),
                })
                .collect(),
        )
    }

    #[test]
    fn execution_modes_agree() {
        let ds = dataset();
        let config = Configuration::all();
        let sequential = clean_dataset(&ds, &config, Execution::Sequential).unwrap();
        for workers in [Some(1), Some(2), Some(4), None] {
            let parallel = clean_dataset(&ds, &config, Execution::Parallel { workers }).unwrap();
            assert_eq!(parallel, sequential);
        }
    }

    #[test]
    fn labels_pass_through_unchanged() {
        let ds = dataset();
        let cleaned = clean_dataset(&ds, &Configuration::none(), Execution::default()).unwrap();
        assert_eq!(cleaned.labels(), ds.labels().as_slice());
        assert_eq!(cleaned.samples(), ds.reviews().as_slice());
    }
}
