//! Parallel cleaning harness for labelled review text.
//!
//! Loads `[label, title, body]` rows, cleans `title + " " + body` with a
//! configurable set of transforms across all CPUs and hands back an
//! index-aligned `(samples, labels)` pair for an external classifier.

pub mod clean;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;

pub use clean::{clean_all, clean_sequential, CleanOption, Cleaner, Configuration, Normalizer};
pub use data::loader::load;
pub use data::model::{CleanedDataset, Dataset, Label, Record};
pub use error::{HarnessError, Result};
pub use pipeline::{clean_dataset, load_and_clean, Execution};
