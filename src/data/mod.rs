/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet   (no header: label, title, body)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset, missing cells → ""
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │   Dataset     │  Vec<Record>, review = title + " " + body
///   └──────────────┘
///        │  cleaned by crate::clean
///        ▼
///   ┌────────────────┐
///   │ CleanedDataset  │  (samples, labels), index-aligned
///   └────────────────┘
/// ```

pub mod loader;
pub mod model;
