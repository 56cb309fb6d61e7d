//! Command-line interface for the splitter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{
    DuplicatePolicy, SplitConfig, DEFAULT_INDEX_PATH, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR,
};
use crate::error::Result;
use crate::json::{to_pretty_json, write_json};
use crate::lookup::RecordLookup;
use crate::reassemble::reassemble;
use crate::splitter::split;
use crate::types::SplitReport;

/// Hexagram splitter - Split a hexagram collection into per-record JSON files.
///
/// Without a subcommand, runs `split` with the default paths.
#[derive(Parser)]
#[command(name = "hexagram-splitter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split the source document into record files and write the code index.
    Split {
        /// Source JSON document
        #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
        input: PathBuf,

        /// Directory receiving one <key>.json file per record
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Path of the code index file
        #[arg(long, default_value = DEFAULT_INDEX_PATH)]
        index: PathBuf,

        /// What to do when two records share a code
        #[arg(long, value_enum, default_value_t = DuplicatePolicy::LastWins)]
        on_duplicate: DuplicatePolicy,
    },

    /// Print the record carrying a code.
    Lookup {
        /// Code to resolve (e.g., 111111)
        code: String,

        /// Directory holding the record files
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Path of the code index file
        #[arg(long, default_value = DEFAULT_INDEX_PATH)]
        index: PathBuf,
    },

    /// Merge record files back into a single document.
    Reassemble {
        /// Directory holding the record files
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Write the document here instead of printing it
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => split_command(&SplitConfig::default()),
        Some(Commands::Split {
            input,
            output_dir,
            index,
            on_duplicate,
        }) => split_command(
            &SplitConfig::new(input, output_dir, index).with_duplicate_policy(on_duplicate),
        ),
        Some(Commands::Lookup {
            code,
            output_dir,
            index,
        }) => lookup_command(&code, &output_dir, &index),
        Some(Commands::Reassemble { output_dir, output }) => {
            reassemble_command(&output_dir, output.as_deref())
        }
    }
}

/// Execute the split command.
fn split_command(config: &SplitConfig) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("Splitting {}...", config.input_path.display()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let report = match split(config) {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();
    print_summary(&report);

    Ok(())
}

fn print_summary(report: &SplitReport) {
    println!(
        "{} {} files created in {}.",
        style("Split complete.").green().bold(),
        report.records,
        report.output_dir.display()
    );
    println!("Index saved to {}", report.index_path.display());

    if report.has_collisions() {
        println!(
            "  Duplicate codes: {}",
            style(report.collisions.len()).yellow().bold()
        );
        for collision in &report.collisions {
            println!(
                "    {} -> {} (was {})",
                collision.code, collision.key, collision.previous_key
            );
        }
    }
}

/// Execute the lookup command.
fn lookup_command(code: &str, output_dir: &Path, index: &Path) -> Result<()> {
    let lookup = RecordLookup::open(index, output_dir)?;
    let (_key, record) = lookup.record_for_code(code)?;
    print!("{}", to_pretty_json(&record)?);
    Ok(())
}

/// Execute the reassemble command.
fn reassemble_command(output_dir: &Path, output: Option<&Path>) -> Result<()> {
    let doc = reassemble(output_dir)?;

    match output {
        Some(path) => {
            write_json(path, &doc)?;
            println!(
                "{} {} records into {}",
                style("Reassembled").green().bold(),
                doc.len(),
                path.display()
            );
        }
        None => print!("{}", to_pretty_json(&doc)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_subcommand() {
        let cli = Cli::parse_from(["hexagram-splitter"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_split_defaults() {
        let cli = Cli::parse_from(["hexagram-splitter", "split"]);

        let Some(Commands::Split {
            input,
            output_dir,
            index,
            on_duplicate,
        }) = cli.command
        else {
            panic!("expected split command");
        };
        assert_eq!(input, PathBuf::from("takashima.json"));
        assert_eq!(output_dir, PathBuf::from("data/takashima"));
        assert_eq!(index, PathBuf::from("data/takashima_index.json"));
        assert_eq!(on_duplicate, DuplicatePolicy::LastWins);
    }

    #[test]
    fn test_cli_parse_split_with_reject() {
        let cli = Cli::parse_from([
            "hexagram-splitter",
            "split",
            "--input",
            "src.json",
            "--on-duplicate",
            "reject",
        ]);

        let Some(Commands::Split {
            input,
            on_duplicate,
            ..
        }) = cli.command
        else {
            panic!("expected split command");
        };
        assert_eq!(input, PathBuf::from("src.json"));
        assert_eq!(on_duplicate, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_cli_parse_lookup() {
        let cli = Cli::parse_from(["hexagram-splitter", "lookup", "111111", "-o", "out"]);

        let Some(Commands::Lookup {
            code, output_dir, ..
        }) = cli.command
        else {
            panic!("expected lookup command");
        };
        assert_eq!(code, "111111");
        assert_eq!(output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_cli_parse_reassemble() {
        let cli = Cli::parse_from(["hexagram-splitter", "reassemble", "--output", "merged.json"]);

        let Some(Commands::Reassemble { output, .. }) = cli.command else {
            panic!("expected reassemble command");
        };
        assert_eq!(output, Some(PathBuf::from("merged.json")));
    }
}
