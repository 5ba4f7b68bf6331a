mod recording;
mod reports;
mod runner;
mod scenarios;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;
use upsell_core::LandingConfig;

use runner::{ScenarioResult, ScenarioRunner};
use scenarios::{all_scenarios, get_scenario, list_scenarios};

/// Landing configuration bundled with the web widget.
const BUNDLED_CONFIG: &str = include_str!("../../upsell-web/static/landing.json");

#[derive(Debug, Parser)]
#[command(name = "upsell-tester", version = "0.1.0")]
#[command(about = "Scenario QA for the upsell product selector without a browser")]
struct Args {
    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed (at least 1)
    #[arg(long, default_value_t = 10)]
    #[arg(value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    iterations: usize,

    /// Landing configuration JSON; defaults to the bundled one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let config = load_config(args.config.as_deref())?;
    let scenarios = expand_scenarios(&args.scenarios);
    let seeds = parse_seeds(&args.seeds)?;
    let results = run_scenarios(&args, &config, &scenarios, &seeds);

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:20} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🛍  Upsell Scenario Tester".bright_cyan().bold());
    println!("{}", "==========================".cyan());
}

fn load_config(path: Option<&Path>) -> Result<LandingConfig> {
    let Some(path) = path else {
        return LandingConfig::from_json(BUNDLED_CONFIG).context("bundled landing config");
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    LandingConfig::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for scenario in all_scenarios() {
            if !scenarios.iter().any(|s| s == scenario.key) {
                scenarios.push(scenario.key.to_string());
            }
        }
    }
    scenarios
}

fn parse_seeds(seeds_arg: &str) -> Result<Vec<u64>> {
    split_csv(seeds_arg)
        .iter()
        .map(|s| {
            s.parse::<u64>()
                .with_context(|| format!("invalid seed {s:?}"))
        })
        .collect()
}

fn run_scenarios(
    args: &Args,
    config: &LandingConfig,
    scenarios: &[String],
    seeds: &[u64],
) -> Vec<ScenarioResult> {
    println!(
        "{} {} scenario(s) over {} product(s)",
        "🧪".cyan(),
        scenarios.len(),
        config.products.len()
    );
    let runner = ScenarioRunner::new(config, args.verbose);
    let mut results = Vec::new();
    for name in scenarios {
        match get_scenario(name) {
            Some(scenario) => {
                results.extend(runner.run_scenario(scenario, seeds, args.iterations));
            }
            None => {
                println!("{} Unknown scenario: {}", "⚠️".yellow(), name.yellow());
            }
        }
    }
    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Upsell Scenario Results\n\n_No scenarios executed._"
                )?;
            } else {
                reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            iterations: 1,
            config: None,
            report: "console".to_string(),
            verbose: false,
            output: None,
        }
    }

    #[test]
    fn bundled_config_is_valid() {
        let config = load_config(None).expect("bundled config");
        assert!(!config.products.is_empty());
    }

    #[test]
    fn expand_all_lists_every_scenario_once() {
        let expanded = expand_scenarios("smoke, all");
        assert_eq!(expanded.len(), all_scenarios().len());
        assert_eq!(expanded[0], "smoke");
    }

    #[test]
    fn split_csv_trims_and_drops_blanks() {
        assert_eq!(split_csv(" a, ,b ,"), vec!["a", "b"]);
    }

    #[test]
    fn parse_seeds_rejects_garbage() {
        assert_eq!(parse_seeds("1,2").expect("seeds"), vec![1, 2]);
        assert!(parse_seeds("1,x").is_err());
    }

    #[test]
    fn write_reports_emits_json_output() {
        let temp = std::env::temp_dir().join("upsell-test-report.json");
        let args = Args {
            report: "json".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).expect("write");
        let content = std::fs::read_to_string(temp).expect("read");
        assert_eq!(content.trim(), "[]");
    }

    #[test]
    fn zero_iterations_are_rejected() {
        assert!(Args::try_parse_from(["upsell-tester", "--iterations", "0"]).is_err());
        let args = Args::try_parse_from(["upsell-tester", "--iterations", "1"]).expect("parse");
        assert_eq!(args.iterations, 1);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = load_config(Some(Path::new("/nonexistent/landing.json")))
            .expect_err("missing file");
        assert!(err.to_string().contains("failed to read"));
    }
}
