use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use review_sentiment::config::RunConfig;
use review_sentiment::{clean_dataset, load, CleanedDataset, Configuration, Execution};

/// Load a labelled review file, clean it and report what an evaluator would receive.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Dataset file (.csv, .tsv, .json or .parquet) with rows `label,title,body`.
    path: PathBuf,

    /// Comma-separated cleaning options, e.g. `urls,emails,stopwords`.
    #[arg(long, value_delimiter = ',')]
    options: Vec<String>,

    /// Enable every cleaning option.
    #[arg(long, conflicts_with = "options")]
    all_options: bool,

    /// Read at most this many rows.
    #[arg(long)]
    rows: Option<usize>,

    /// Worker threads (default: one per CPU).
    #[arg(long)]
    workers: Option<usize>,

    /// Clean on the current thread only.
    #[arg(long)]
    sequential: bool,

    /// JSON run file; flags given on the command line take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fraction of rows held out for testing.
    #[arg(long)]
    test_size: Option<f64>,

    /// Seed for the train/test shuffle.
    #[arg(long)]
    seed: Option<u64>,

    /// Write cleaned `label,sample` rows (no header) to this CSV file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the first N cleaned samples.
    #[arg(long, default_value_t = 0)]
    preview: usize,
}

impl Cli {
    /// Merge the optional run file with command-line overrides.
    fn run_config(&self) -> Result<(RunConfig, Configuration)> {
        let mut run = match &self.config {
            Some(path) => RunConfig::from_json_file(path)?,
            None => RunConfig::default(),
        };
        if self.rows.is_some() {
            run.rows = self.rows;
        }
        if self.workers.is_some() {
            run.workers = self.workers;
        }
        if self.sequential {
            run.sequential = true;
        }
        if let Some(test_size) = self.test_size {
            run.test_size = test_size;
        }
        if let Some(seed) = self.seed {
            run.seed = seed;
        }
        run.validate()?;

        let options = if self.all_options {
            Configuration::all()
        } else if !self.options.is_empty() {
            Configuration::from_ids(&self.options)?
        } else {
            run.configuration()
        };
        Ok((run, options))
    }
}

fn write_cleaned(path: &Path, cleaned: &CleanedDataset) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for (sample, label) in cleaned.iter() {
        writer.write_record([label.to_string().as_str(), sample.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let (run, options) = cli.run_config()?;

    let dataset = load(&cli.path, run.rows)?;
    let execution = if run.sequential {
        Execution::Sequential
    } else {
        Execution::Parallel {
            workers: run.workers,
        }
    };
    let cleaned = clean_dataset(&dataset, &options, execution)?;

    println!("Rows:    {}", cleaned.len());
    println!("Options: {options}");
    println!("Labels:");
    for (label, count) in dataset.label_counts() {
        println!("  {label:>8}  {count}");
    }

    let (train, test) = cleaned.train_test_split(run.test_size, run.seed)?;
    println!("Split:   {} train / {} test (seed {})", train.len(), test.len(), run.seed);

    for (i, (sample, label)) in cleaned.iter().take(cli.preview).enumerate() {
        println!("[{i}] ({label}) {sample}");
    }

    if let Some(output) = &cli.output {
        write_cleaned(output, &cleaned)?;
        info!("Wrote {} cleaned rows to {}", cleaned.len(), output.display());
    }

    Ok(())
}
