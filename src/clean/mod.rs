/// Cleaning layer: option registry, per-review normalizer and the parallel
/// engine that maps it over a whole dataset.
///
/// Architecture:
/// ```text
///   Configuration (set of CleanOption)
///        │  cloned into every worker
///        ▼
///   ┌────────────┐
///   │ normalizer │  one raw review → one cleaned review
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  engine   │  partition rows → scoped threads → join by partition index
///   └──────────┘
/// ```

pub mod engine;
pub mod lexicon;
pub mod normalizer;
pub mod options;

pub use engine::{clean_all, clean_sequential};
pub use normalizer::{Cleaner, Normalizer};
pub use options::{CleanOption, Configuration};
