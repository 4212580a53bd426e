//! Template induction CLI
//!
//! Reads an HTML document from a file or stdin, discovers its repeated templates
//! and prints them as a JSON report of CSS locators.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use template_induction::{
    HtmlDocument, InductionOptions, InductionReport, OverlapPolicy, TemplateInducer,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Overlap {
    /// Keep the cluster with more instances (default)
    MostInstances,
    /// Keep the deepest cluster of an ancestor chain
    Deepest,
    /// Keep the outermost cluster of an ancestor chain
    Shallowest,
}

impl From<Overlap> for OverlapPolicy {
    fn from(value: Overlap) -> Self {
        match value {
            Overlap::MostInstances => OverlapPolicy::MostInstances,
            Overlap::Deepest => OverlapPolicy::Deepest,
            Overlap::Shallowest => OverlapPolicy::Shallowest,
        }
    }
}

#[derive(Parser)]
#[command(name = "template-induce")]
#[command(version)]
#[command(about = "Discover repeated templates in an HTML document", long_about = None)]
struct Cli {
    /// HTML file to analyze (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// JSON file with induction options
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Minimum number of wrapper instances
    #[arg(long, value_name = "N")]
    min_instances: Option<usize>,

    /// Minimum number of field groups per template
    #[arg(long, value_name = "N")]
    min_fields: Option<usize>,

    /// Share of instances a field must strictly exceed
    #[arg(long, value_name = "RATIO")]
    coverage: Option<f64>,

    /// Tie-break between nested templates
    #[arg(long, value_enum)]
    overlap: Option<Overlap>,

    /// Drop script, style and noscript elements before analysis
    #[arg(long)]
    simplify: bool,

    /// Print compact JSON
    #[arg(long)]
    compact: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn load_options(cli: &Cli) -> Result<InductionOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            InductionOptions::from_json(&json)?
        }
        None => InductionOptions::default(),
    };

    if let Some(min_instances) = cli.min_instances {
        options = options.min_instances(min_instances);
    }
    if let Some(min_fields) = cli.min_fields {
        options = options.min_fields(min_fields);
    }
    if let Some(coverage) = cli.coverage {
        options = options.field_coverage(coverage);
    }
    if let Some(overlap) = cli.overlap {
        options = options.overlap_policy(overlap.into());
    }

    Ok(options)
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut html = String::new();
            std::io::stdin()
                .read_to_string(&mut html)
                .context("Failed to read stdin")?;
            Ok(html)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let options = load_options(&cli)?;
    let inducer = TemplateInducer::with_options(options)?;

    let html = read_input(cli.input.as_ref())?;
    let document = if cli.simplify {
        HtmlDocument::parse_simplified(&html)
    } else {
        HtmlDocument::parse(&html)
    };
    let tree = document.tree();
    log::info!("Parsed {} elements", tree.count_elements());

    let groups = inducer.induce(tree);
    log::info!("Found {} template(s)", groups.len());

    let report = InductionReport::new(tree, &groups)?;
    let json = if cli.compact {
        report.to_json()?
    } else {
        report.to_json_pretty()?
    };
    println!("{}", json);

    Ok(())
}
