use std::collections::BTreeMap;
use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{HarnessError, Result};

// ---------------------------------------------------------------------------
// Label – the categorical value in the first column
// ---------------------------------------------------------------------------

/// A class label. Numeric cells become `Integer`, everything else (including
/// an empty cell) stays as text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Integer(i64),
    Text(String),
}

impl Label {
    /// Interpret a raw cell the way a CSV reader with dtype inference would.
    pub fn parse(cell: &str) -> Self {
        match cell.trim().parse::<i64>() {
            Ok(i) => Label::Integer(i),
            Err(_) => Label::Text(cell.to_string()),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Integer(i) => write!(f, "{i}"),
            Label::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Integer(value)
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source file
// ---------------------------------------------------------------------------

/// One labelled review row. Missing cells are already empty strings here.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub label: Label,
    pub title: String,
    pub body: String,
}

impl Record {
    /// Title and body joined by exactly one space. An empty side leaves a
    /// leading or trailing space in place.
    pub fn review(&self) -> String {
        let mut review = String::with_capacity(self.title.len() + 1 + self.body.len());
        review.push_str(&self.title);
        review.push(' ');
        review.push_str(&self.body);
        review
    }
}

// ---------------------------------------------------------------------------
// Dataset – the loaded rows, in file order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw review text per row, index-aligned with [`Dataset::labels`].
    pub fn reviews(&self) -> Vec<String> {
        self.records.iter().map(Record::review).collect()
    }

    pub fn labels(&self) -> Vec<Label> {
        self.records.iter().map(|r| r.label.clone()).collect()
    }

    /// How many rows carry each label.
    pub fn label_counts(&self) -> BTreeMap<Label, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.label.clone()).or_insert(0) += 1;
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// CleanedDataset – the (samples, labels) pair handed to an evaluator
// ---------------------------------------------------------------------------

/// Cleaned samples with their labels. `samples[i]` always belongs to
/// `labels[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedDataset {
    samples: Vec<String>,
    labels: Vec<Label>,
}

impl CleanedDataset {
    pub fn new(samples: Vec<String>, labels: Vec<Label>) -> Result<Self> {
        if samples.len() != labels.len() {
            return Err(HarnessError::Cleaning {
                partition: 0,
                index: samples.len().min(labels.len()),
                message: format!(
                    "{} samples but {} labels",
                    samples.len(),
                    labels.len()
                ),
            });
        }
        Ok(CleanedDataset { samples, labels })
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Label)> {
        self.samples.iter().zip(self.labels.iter())
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Label>) {
        (self.samples, self.labels)
    }

    /// Shuffle rows with a seeded RNG and split off `test_fraction` of them.
    /// Returns `(train, test)`; pairs stay aligned in both halves.
    pub fn train_test_split(&self, test_fraction: f64, seed: u64) -> Result<(Self, Self)> {
        if !(0.0..1.0).contains(&test_fraction) {
            return Err(HarnessError::Configuration(format!(
                "test fraction must be in [0, 1), got {test_fraction}"
            )));
        }
        let mut order: Vec<usize> = (0..self.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        order.shuffle(&mut rng);

        let n_test = (self.len() as f64 * test_fraction).ceil() as usize;
        let (test_idx, train_idx) = order.split_at(n_test);
        Ok((self.select(train_idx), self.select(test_idx)))
    }

    fn select(&self, indices: &[usize]) -> Self {
        CleanedDataset {
            samples: indices.iter().map(|&i| self.samples[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(label: i64, title: &str, body: &str) -> Record {
        Record {
            label: Label::Integer(label),
            title: title.into(),
            body: body.into(),
        }
    }

    #[test]
    fn review_joins_with_single_space() {
        assert_eq!(record(1, "Great", "loved it").review(), "Great loved it");
    }

    #[test]
    fn review_keeps_edge_spaces_for_empty_fields() {
        assert_eq!(record(1, "Great", "").review(), "Great ");
        assert_eq!(record(1, "", "loved it").review(), " loved it");
        assert_eq!(record(1, "", "").review(), " ");
    }

    #[test]
    fn label_parsing() {
        assert_eq!(Label::parse("1"), Label::Integer(1));
        assert_eq!(Label::parse(" 2 "), Label::Integer(2));
        assert_eq!(Label::parse("positive"), Label::Text("positive".into()));
        assert_eq!(Label::parse(""), Label::Text(String::new()));
        assert_eq!(Label::Integer(2).to_string(), "2");
    }

    #[test]
    fn label_counts_and_alignment() {
        let ds = Dataset::from_records(vec![
            record(2, "a", "b"),
            record(1, "c", "d"),
            record(2, "e", "f"),
        ]);
        assert_eq!(ds.reviews(), vec!["a b", "c d", "e f"]);
        assert_eq!(
            ds.labels(),
            vec![Label::Integer(2), Label::Integer(1), Label::Integer(2)]
        );
        let counts = ds.label_counts();
        assert_eq!(counts[&Label::Integer(1)], 1);
        assert_eq!(counts[&Label::Integer(2)], 2);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        assert!(CleanedDataset::new(vec!["x".into()], vec![]).is_err());
    }

    #[test]
    fn split_is_seeded_and_keeps_pairs() {
        let samples: Vec<String> = (0..20).map(|i| format!("s{i}")).collect();
        let labels: Vec<Label> = (0..20).map(Label::Integer).collect();
        let ds = CleanedDataset::new(samples, labels).unwrap();

        let (train, test) = ds.train_test_split(0.25, 42).unwrap();
        assert_eq!(test.len(), 5);
        assert_eq!(train.len(), 15);
        for (sample, label) in train.iter().chain(test.iter()) {
            assert_eq!(sample, &format!("s{label}"));
        }

        let (train_again, _) = ds.train_test_split(0.25, 42).unwrap();
        assert_eq!(train, train_again);
        assert!(ds.train_test_split(1.0, 42).is_err());
    }
}
