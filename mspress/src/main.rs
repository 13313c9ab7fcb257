//! # mspress
//!
//! A CLI for assembling a LaTeX manuscript describing a software package.
//!
//! ## Overview
//!
//! mspress is built on top of mspresslib and drives the manuscript project
//! from the command line: flattening the master document, generating the
//! code-statistics artifacts, the author block and the reference datasets,
//! and reformatting the text fragments.
//!
//! ## Usage
//!
//! ```bash
//! # Merge src/text/**/*.tex into src/ms-review.tex
//! mspress assemble
//!
//! # Generate codestats.tex, codestats.csv and codestats.svg
//! mspress stats path/to/project
//!
//! # Generate src/text/0-authors.tex from CITATION.cff
//! mspress authors
//!
//! # Fetch a reference dataset
//! mspress download fermi-gc
//!
//! # Reformat text fragments in place
//! mspress fmt
//! ```
//!
//! All commands accept `--project <dir>` to point at a manuscript project
//! root; paths default to the conventional layout under `src/`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::style;
use mspresslib::{assemble, authors, download, reformat, stats, Layout};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("mspress")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manuscript assembly toolkit for software papers")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("project")
                .short('C')
                .long("project")
                .global(true)
                .help("Manuscript project root (defaults to the current directory)"),
        )
        .subcommand(
            Command::new("assemble")
                .about("Merge text fragments into the review manuscript")
                .arg(
                    Arg::new("master")
                        .long("master")
                        .help("Master document (defaults to src/ms.tex)"),
                )
                .arg(
                    Arg::new("out")
                        .short('o')
                        .long("out")
                        .help("Output document (defaults to src/ms-review.tex)"),
                )
                .arg(
                    Arg::new("allow-unresolved")
                        .long("allow-unresolved")
                        .action(ArgAction::SetTrue)
                        .help("Leave unmatched fragment directives in place instead of failing"),
                ),
        )
        .subcommand(
            Command::new("stats")
                .about("Generate the code statistics table, data file and pie chart")
                .arg(
                    Arg::new("src")
                        .help("Path to the analyzed source tree")
                        .required(true),
                )
                .arg(
                    Arg::new("split-language")
                        .long("split-language")
                        .default_value("Python")
                        .help("Language row to split into API/Tests/DocStrings"),
                )
                .arg(
                    Arg::new("keep")
                        .long("keep")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("5")
                        .help("Categories kept in the chart before grouping into Others"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the report as JSON instead of a summary"),
                ),
        )
        .subcommand(
            Command::new("authors")
                .about("Generate the author/institute block from CITATION.cff")
                .arg(
                    Arg::new("running")
                        .long("running")
                        .help("Override the \\authorrunning header"),
                ),
        )
        .subcommand(
            Command::new("download")
                .about("Download a reference dataset")
                .arg(Arg::new("dataset").help("Dataset name").required(true)),
        )
        .subcommand(Command::new("fmt").about("Reformat text fragments in place with latexindent"))
}

/// Build the layout, honoring the global --project argument
fn layout_from(matches: &ArgMatches) -> Layout {
    match matches.get_one::<String>("project") {
        Some(dir) => Layout::rooted_at(dir),
        None => Layout::default(),
    }
}

/// Handler for the assemble command
fn run_assemble(matches: &ArgMatches) -> anyhow::Result<()> {
    let mut layout = layout_from(matches);
    if let Some(master) = matches.get_one::<String>("master") {
        layout = layout.master(master.as_str());
    }
    if let Some(out) = matches.get_one::<String>("out") {
        layout = layout.output(out.as_str());
    }
    let allow_unresolved = matches.get_flag("allow-unresolved");

    let outcome = assemble(&layout, allow_unresolved)?;

    for key in &outcome.unresolved {
        eprintln!(
            "{} unresolved directive: \\input{{{key}}}",
            style("warning:").yellow().bold()
        );
    }
    println!(
        "{} fragments merged into {}",
        outcome.substituted.len(),
        layout.output.display()
    );
    Ok(())
}

/// Handler for the stats command
fn run_stats(matches: &ArgMatches) -> anyhow::Result<()> {
    let layout = layout_from(matches);
    let src = PathBuf::from(matches.get_one::<String>("src").expect("required"));
    let language = matches
        .get_one::<String>("split-language")
        .expect("defaulted");
    let keep = *matches.get_one::<usize>("keep").expect("defaulted");

    let report = stats::collect(&src, language)?;

    let tex_path = layout.tables_dir.join("codestats.tex");
    let csv_path = layout.tables_dir.join("codestats.csv");
    let chart_path = layout.figures_dir.join("codestats.svg");

    stats::write_latex_table(&report, &tex_path)?;
    stats::write_data_file(&report, &csv_path)?;

    // The chart consumes the written data file
    let rendered = stats::read_data_file(&csv_path)?;
    let config = stats::ChartConfig {
        keep,
        ..stats::ChartConfig::default()
    };
    stats::render_pie(&rendered, &chart_path, &config)?;

    if matches.get_flag("json") {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serializing report")?
        );
    } else {
        println!("{} {}", style("table:").bold(), tex_path.display());
        println!("{} {}", style("data:").bold(), csv_path.display());
        println!("{} {}", style("chart:").bold(), chart_path.display());
    }
    Ok(())
}

/// Handler for the authors command
fn run_authors(matches: &ArgMatches) -> anyhow::Result<()> {
    let layout = layout_from(matches);
    let running = matches.get_one::<String>("running").map(|s| s.as_str());

    let path = authors::write_author_fragment(&layout, running)?;

    println!("author block written to {}", path.display());
    Ok(())
}

/// Handler for the download command
fn run_download(matches: &ArgMatches) -> anyhow::Result<()> {
    let layout = layout_from(matches);
    let name = matches.get_one::<String>("dataset").expect("required");

    if download::dataset(name).is_none() {
        anyhow::bail!(
            "unknown dataset '{}', expected one of: {}",
            name,
            download::dataset_names().join(", ")
        );
    }

    download::download_dataset(&layout, name)?;

    println!(
        "dataset '{}' downloaded to {}",
        name,
        layout.data_dir.display()
    );
    Ok(())
}

/// Handler for the fmt command
fn run_fmt(matches: &ArgMatches) -> anyhow::Result<()> {
    let layout = layout_from(matches);

    let count = reformat::reformat_fragments(&layout)?;

    println!("{count} fragments reformatted");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = build_command().get_matches();
    let result = match matches.subcommand() {
        Some(("assemble", sub)) => run_assemble(sub),
        Some(("stats", sub)) => run_stats(sub),
        Some(("authors", sub)) => run_authors(sub),
        Some(("download", sub)) => run_download(sub),
        Some(("fmt", sub)) => run_fmt(sub),
        _ => unreachable!("subcommand required"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}
