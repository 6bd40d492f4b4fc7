// SPDX-License-Identifier: Apache-2.0
//! feeder: command-line inspector for distribution feeder files.
//!
//! Loads a feeder description (a JSON map of keyed records, or an `.omd`
//! wrapper carrying one under a top-level `"tree"` field) and answers the
//! questions the viewer answers interactively: what is in the file, which
//! records match a term, and what hangs off a given record.
//!
//! The binary exits `0` on success and non-zero on error.

// The CLI is expected to print to stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use feeder_core::{
    find_exact_matching_objects, find_substring_matching_objects, FeederObject, FeederTree,
    ObjectKey, Relationship,
};

#[derive(Parser, Debug)]
#[command(name = "feeder", version, about = "Inspect and query distribution feeder files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a feeder file: record counts by classification.
    Info {
        /// Feeder file (JSON map of records, or .omd wrapper).
        file: PathBuf,
    },
    /// Find records whose key, field names, or field values match a term.
    Search {
        /// Feeder file.
        file: PathBuf,
        /// Term to look for.
        term: String,
        /// Require exact matches instead of substring matches.
        #[arg(long)]
        exact: bool,
    },
    /// List the keys that would be removed along with a record.
    Subtree {
        /// Feeder file.
        file: PathBuf,
        /// Key of the record to resolve.
        key: String,
        /// Print the one-hop redraw set instead of the removal closure.
        #[arg(long)]
        redraw: bool,
    },
    /// Report whether a record can be removed on its own.
    Removable {
        /// Feeder file.
        file: PathBuf,
        /// Key of the record to check.
        key: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    match cli.command {
        Command::Info { file } => info(&file),
        Command::Search { file, term, exact } => search(&file, &term, exact),
        Command::Subtree { file, key, redraw } => subtree(&file, &key, redraw),
        Command::Removable { file, key } => removable(&file, &key),
    }
}

/// Reads a feeder description from disk.
///
/// Accepts either a bare JSON object mapping keys to records, or a wrapper
/// object (the `.omd` on-disk format) whose `"tree"` field carries that map.
fn load_tree(path: &Path) -> Result<FeederTree> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read feeder file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let serde_json::Value::Object(mut map) = value else {
        bail!("{} does not contain a JSON object", path.display());
    };
    if let Some(wrapped) = map.remove("tree") {
        let serde_json::Value::Object(inner) = wrapped else {
            bail!("the \"tree\" field of {} is not a JSON object", path.display());
        };
        map = inner;
    }
    let records: BTreeMap<String, FeederObject> =
        serde_json::from_value(serde_json::Value::Object(map))
            .with_context(|| format!("{} holds malformed feeder records", path.display()))?;
    FeederTree::from_records(records)
        .with_context(|| format!("{} is not a valid feeder tree", path.display()))
}

fn info(file: &Path) -> Result<()> {
    let tree = load_tree(file)?;
    let mut lines = 0usize;
    let mut children = 0usize;
    let mut configs = 0usize;
    let mut independent = 0usize;
    for (_, object) in tree.iter() {
        match object.relationship() {
            Relationship::Line => lines += 1,
            Relationship::ChildNode => children += 1,
            Relationship::ConfigurationNode => configs += 1,
            Relationship::IndependentNode => independent += 1,
        }
    }
    let mut table = Table::new();
    table.set_header(["classification", "count"]);
    table.add_row(["line", &lines.to_string()]);
    table.add_row(["child node", &children.to_string()]);
    table.add_row(["configuration node", &configs.to_string()]);
    table.add_row(["independent node", &independent.to_string()]);
    table.add_row(["total", &tree.len().to_string()]);
    println!("{table}");
    Ok(())
}

fn search(file: &Path, term: &str, exact: bool) -> Result<()> {
    let tree = load_tree(file)?;
    let keys = if exact {
        find_exact_matching_objects(&tree, term)
    } else {
        find_substring_matching_objects(&tree, term)
    };
    let mut table = Table::new();
    table.set_header(["key", "object", "name"]);
    for key in &keys {
        let record = tree.get(key.as_str())?;
        table.add_row([
            key.as_str(),
            record.object_type().unwrap_or("-"),
            record.name().unwrap_or("-"),
        ]);
    }
    println!("{table}");
    eprintln!("{} matching record(s)", keys.len());
    Ok(())
}

fn subtree(file: &Path, key: &str, redraw: bool) -> Result<()> {
    let tree = load_tree(file)?;
    let keys: Vec<String> = if redraw {
        tree.get(key)?;
        let seed = ObjectKey::parse(key)?;
        tree.redraw_selection([seed])
            .subtree_keys()
            .iter()
            .map(|k| k.as_str().to_owned())
            .collect()
    } else {
        tree.subtree_to_remove(key)?
            .iter()
            .map(|k| k.as_str().to_owned())
            .collect()
    };
    println!("{}", serde_json::to_string(&keys)?);
    Ok(())
}

fn removable(file: &Path, key: &str) -> Result<()> {
    let tree = load_tree(file)?;
    println!("{}", tree.is_removable(key)?);
    Ok(())
}
