//! termlink - entity-linking CLI
//!
//! Load a terminology resource, inspect corpora, and run candidate
//! ranking over a corpus subset.
//!
//! # Usage
//!
//! ```bash
//! # Look a term up in a terminology file
//! termlink lookup --dict CTD_diseases.tsv --dataset ncbi-disease "colorectal cancer"
//!
//! # Corpus / terminology statistics
//! termlink stats --config config.json --subset dev
//!
//! # Rank candidates for every mention and report accuracy
//! termlink eval --config config.json --subset test
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use termlink::datasets::{ncbi_disease, share_clef};
use termlink::{Config, Dataset, Ranker, Subset, Terminology};

#[derive(Parser)]
#[command(name = "termlink", version, about = "Biomedical entity linking toolkit")]
struct Cli {
    /// Emit machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look a term up in a terminology file.
    Lookup {
        /// Terminology resource file.
        #[arg(long)]
        dict: PathBuf,
        /// Dataset the resource belongs to (decides the parser).
        #[arg(long, default_value = "ncbi-disease")]
        dataset: Dataset,
        /// The term to look up.
        term: String,
    },
    /// Print corpus and terminology statistics.
    Stats {
        /// Run configuration (JSON).
        #[arg(long)]
        config: PathBuf,
        /// Corpus subset to inspect.
        #[arg(long, default_value = "dev")]
        subset: Subset,
    },
    /// Rank candidates for every mention and report ranking accuracy.
    Eval {
        /// Run configuration (JSON).
        #[arg(long)]
        config: PathBuf,
        /// Corpus subset to evaluate on.
        #[arg(long, default_value = "dev")]
        subset: Subset,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> termlink::Result<()> {
    match &cli.command {
        Command::Lookup {
            dict,
            dataset,
            term,
        } => lookup(dict, *dataset, term, cli.json),
        Command::Stats { config, subset } => stats(config, *subset, cli.json),
        Command::Eval { config, subset } => eval(config, *subset, cli.json),
    }
}

fn load_dict(dict: &Path, dataset: Dataset) -> termlink::Result<Terminology> {
    let entries = match dataset {
        Dataset::NcbiDisease => ncbi_disease::load_medic_terminology(dict)?,
        Dataset::ShareClef => share_clef::load_snomed_terminology(dict)?,
        _ => {
            return Err(termlink::Error::invalid_input(format!(
                "unsupported dataset: {}",
                dataset
            )))
        }
    };
    Ok(Terminology::new(entries))
}

fn lookup(dict: &Path, dataset: Dataset, term: &str, json: bool) -> termlink::Result<()> {
    let terminology = load_dict(dict, dataset)?;

    let ids = terminology.ids([term]);
    let names = terminology.names(&ids);
    let definitions = terminology.definitions(term);

    if json {
        let out = serde_json::json!({
            "term": term,
            "known": terminology.has_name(term),
            "ids": sorted(ids),
            "names": sorted(names),
            "definitions": sorted(definitions),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if !terminology.has_name(term) {
        println!("'{}' not found among {} entries", term, terminology.len());
    } else {
        println!("ids:   {}", sorted(ids).join(", "));
        println!("names: {}", sorted(names).join(", "));
        for definition in sorted(definitions) {
            println!("def:   {}", definition);
        }
    }
    Ok(())
}

fn stats(config: &Path, subset: Subset, json: bool) -> termlink::Result<()> {
    let config = Config::from_file(config)?;
    let terminology = termlink::load_terminology(&config)?;
    let corpus = termlink::load_corpus(&config, subset)?;

    if json {
        let out = serde_json::json!({
            "dataset": config.general.dataset,
            "subset": subset.to_string(),
            "documents": corpus.document_count(),
            "mentions": corpus.mention_count(),
            "entries": terminology.len(),
            "distinct_names": terminology.iter_names().count(),
            "distinct_ids": terminology.iter_ids().count(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("dataset:        {}", config.general.dataset);
        println!("subset:         {}", subset);
        println!("documents:      {}", corpus.document_count());
        println!("mentions:       {}", corpus.mention_count());
        println!("dict entries:   {}", terminology.len());
        println!("distinct names: {}", terminology.iter_names().count());
        println!("distinct ids:   {}", terminology.iter_ids().count());
    }
    Ok(())
}

fn eval(config: &Path, subset: Subset, json: bool) -> termlink::Result<()> {
    let config = Config::from_file(config)?;
    let terminology = termlink::load_terminology(&config)?;
    let corpus = termlink::load_corpus(&config, subset)?;
    let ranker = Ranker::from_config(&config.rank)?;

    let accuracy = ranker.evaluate(&terminology, &corpus);

    if json {
        let out = serde_json::json!({
            "subset": subset.to_string(),
            "correct": accuracy.correct,
            "total": accuracy.total,
            "accuracy": accuracy.accuracy(),
            "reachable": accuracy.reachable,
            "reachability": accuracy.reachability(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "accuracy:     {}/{} = {:.4}",
            accuracy.correct,
            accuracy.total,
            accuracy.accuracy()
        );
        println!(
            "reachability: {}/{} = {:.4}",
            accuracy.reachable,
            accuracy.total,
            accuracy.reachability()
        );
    }
    Ok(())
}

fn sorted(set: std::collections::HashSet<String>) -> Vec<String> {
    let mut values: Vec<String> = set.into_iter().collect();
    values.sort();
    values
}
