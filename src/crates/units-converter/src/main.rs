use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

use units_converter::{ConverterConfig, SearchField, SearchOptions, UnitRegistry};

const PROGRAM_NAME: &str = "unit-converter";

#[derive(Parser, Debug)]
#[command(name = PROGRAM_NAME, version)]
#[command(about = "Convert quantities between SI units and look up unit definitions", long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(long, global = true, env = "UNIT_CONVERTER_CONFIG")]
    config: Option<PathBuf>,

    /// Simplification passes allowed when parsing a unit (overrides the config file)
    #[arg(long, global = true)]
    max_iterations: Option<usize>,

    /// Logging verbosity, written to stderr
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a number or comma-separated list of numbers between units
    #[command(visible_alias = "c")]
    Convert {
        /// Quantity to convert, e.g. `3` or `1,2.5,10`
        #[arg(allow_hyphen_values = true)]
        quantity: String,

        /// Unit the quantity is expressed in
        #[arg(short, long = "from")]
        from: String,

        /// Unit to convert the quantity to
        #[arg(short, long = "to")]
        to: String,
    },

    /// Show the definition and metadata of a unit
    #[command(visible_alias = "i")]
    Info {
        unit: String,
    },

    /// Search unit keys and metadata. Use `*` to match any text
    #[command(visible_alias = "s")]
    Search {
        term: String,

        /// Comma-separated fields to search: key, name, tags, description
        #[arg(long, default_value = "key,name,tags,description")]
        search_fields: String,

        /// Comma-separated tags every result must carry
        #[arg(long)]
        filter_by_tags: Option<String>,

        /// Show units with several aliases only once
        #[arg(long)]
        hide_aliases: bool,
    },

    /// Show how a unit string breaks down into simple units and exponents
    #[command(visible_alias = "p")]
    Parse {
        unit: String,

        #[arg(long, value_enum, default_value = "debug")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Debug,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .filter_level(args.log_level.into())
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: error: {:#}", PROGRAM_NAME, e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ConverterConfig::load_from_file(path)?,
        None => ConverterConfig::default(),
    };
    if let Some(max_iterations) = args.max_iterations {
        config.max_iterations = max_iterations;
    }

    let registry = UnitRegistry::si_with_config(config).context("failed to load SI units")?;

    match args.command {
        Command::Convert { quantity, from, to } => convert(&registry, &quantity, &from, &to),
        Command::Info { unit } => info(&registry, &unit),
        Command::Search {
            term,
            search_fields,
            filter_by_tags,
            hide_aliases,
        } => {
            let mut options = SearchOptions::default()
                .with_fields(SearchField::parse_list(&search_fields)?)
                .hide_aliases(hide_aliases);
            if let Some(tags) = filter_by_tags {
                options = options.with_tags(tags.split(',').map(str::trim));
            }
            search(&registry, &term, &options)
        }
        Command::Parse { unit, format } => parse(&registry, &unit, format),
    }
}

fn convert(registry: &UnitRegistry, quantity: &str, from: &str, to: &str) -> Result<()> {
    for unit in [from, to] {
        if !registry.is_defined_unit(unit) {
            bail!(
                "Cannot perform unit conversion. Unit \"{}\" has not been defined in the unit converter",
                unit
            );
        }
    }
    if !registry.is_convertible(from, to)? {
        bail!(
            "Cannot perform unit conversion. Units \"{}\" and \"{}\" are not compatible",
            from,
            to
        );
    }

    let values = quantity
        .split(',')
        .map(|value| value.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| {
            format!(
                "Invalid format \"{}\" of quantity to convert. Quantity must either be a number or a comma-separated list of numbers",
                quantity
            )
        })?;

    let converted = registry.convert(values, from, to)?;
    let output: Vec<String> = converted.iter().map(f64::to_string).collect();
    println!("{}", output.join(","));
    Ok(())
}

fn info(registry: &UnitRegistry, unit: &str) -> Result<()> {
    if !registry.is_simplified_unit(unit) {
        bail!(
            "Unit \"{}\" is a compound unit. Detailed information can only be shown for simple units",
            unit
        );
    }

    let Ok(entry) = registry.get(unit) else {
        let matches = close_matches(unit, registry.keys(), 5, 0.6);
        bail!(
            "Unit \"{}\" has not been defined in the unit converter. The most similar available units are: {:?}",
            unit,
            matches
        );
    };

    println!("Unit ID:          {}", unit);
    println!("Name:             {}", entry.name.as_deref().unwrap_or("None"));
    println!("Description:      {}", entry.description.as_deref().unwrap_or("None"));
    println!("Tags:             {:?}", entry.tags);
    println!("Aliases:          {:?}", registry.get_aliases(unit)?);
    println!("Unit definition:  {}", entry.unit);
    Ok(())
}

fn search(registry: &UnitRegistry, term: &str, options: &SearchOptions) -> Result<()> {
    let hits = registry.search(term, options)?;
    if hits.is_empty() {
        println!("No units matched \"{}\"", term);
        return Ok(());
    }

    let width = hits.iter().map(|hit| hit.key.chars().count()).max().unwrap_or(0);
    for hit in hits {
        let name = hit.entry.name.as_deref().unwrap_or("");
        let tags = hit.entry.tags.join(", ");
        println!("{:<width$}  {:<24}  [{}]", hit.key, name, tags, width = width);
    }
    Ok(())
}

fn parse(registry: &UnitRegistry, unit: &str, format: OutputFormat) -> Result<()> {
    let terms = registry.parse(unit)?;
    match format {
        OutputFormat::Debug => println!("{:?}", terms),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&terms)?),
    }
    Ok(())
}

/// Up to `limit` candidates whose similarity to `word` is at least `cutoff`,
/// most similar first
fn close_matches<'a>(
    word: &str,
    candidates: impl Iterator<Item = &'a str>,
    limit: usize,
    cutoff: f64,
) -> Vec<&'a str> {
    let mut scored: Vec<(f64, &str)> = candidates
        .map(|candidate| (similarity(word, candidate), candidate))
        .filter(|(score, _)| *score >= cutoff)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, candidate)| candidate).collect()
}

/// One minus the edit distance scaled by the longer length
fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut current = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        previous = current;
    }

    1.0 - previous[b.len()] as f64 / longest as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("kg", "kg"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert!((similarity("meter", "meters") - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_close_matches() {
        let keys = ["m", "meter", "meters", "mm", "kg"];
        let matches = close_matches("metre", keys.into_iter(), 5, 0.6);
        // "meters" is two edits away from "metre" but longer than "meter"
        assert_eq!(matches, vec!["meters", "meter"]);
        assert!(close_matches("zzz", keys.into_iter(), 5, 0.6).is_empty());
    }

    #[test]
    fn test_cli_parses() {
        let args = Args::try_parse_from([
            "unit-converter",
            "convert",
            "1,2",
            "--from",
            "mm",
            "--to",
            "m",
        ])
        .unwrap();
        assert!(matches!(args.command, Command::Convert { ref from, .. } if from == "mm"));

        let args = Args::try_parse_from(["unit-converter", "search", "k*", "--hide-aliases"]).unwrap();
        assert!(matches!(args.command, Command::Search { hide_aliases: true, .. }));
    }
}
