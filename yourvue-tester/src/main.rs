mod driver;
mod invariants;
mod policy;
mod reports;
mod scenario;
mod storage;
mod tester;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use scenario::{ScenarioCtx, catalog::all_keys, find_scenario, list_scenarios};
use tester::{ScenarioResult, Tester};
use util::{resolve_seeds, split_csv};
use yourvue_wizard::WizardConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "yourvue-tester", version = "0.1.0")]
#[command(about = "Automated QA testing for the YourVue assessment wizard")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated; non-numeric seeds are hashed)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Commands issued per random walk
    #[arg(long, default_value_t = 400)]
    steps: usize,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Wizard configuration override (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for file-backed storage used by reload scenarios
    #[arg(long, default_value = "target/yourvue-state")]
    state_dir: PathBuf,

    /// Write snapshots and error chains of failed runs here
    #[arg(long)]
    artifacts_dir: Option<PathBuf>,

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
    let cfg = load_config(args.config.as_deref())?;
    let scenarios = expand_scenarios(&args.scenarios);
    let seeds = resolve_seeds(&split_csv(&args.seeds));
    let ctx = ScenarioCtx {
        seed: 0,
        cfg,
        steps: args.steps,
        state_dir: args.state_dir.clone(),
        verbose: args.verbose,
    };
    let tester = Tester::new(ctx, args.artifacts_dir.clone());

    let mut results: Vec<ScenarioResult> = Vec::new();
    for key in &scenarios {
        let Some(scenario) = find_scenario(key) else {
            eprintln!("⚠️  Unknown scenario: {}", key.yellow());
            continue;
        };
        log::info!("running {} for {} seed(s)", scenario.key, seeds.len());
        results.extend(tester.run_scenario(scenario, &seeds, args.iterations));
    }

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
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🧭 YourVue Wizard Tester".bright_cyan().bold());
    println!("{}", "========================".cyan());
}

fn load_config(path: Option<&Path>) -> Result<WizardConfig> {
    let Some(path) = path else {
        return Ok(WizardConfig::default_config().clone());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    WizardConfig::from_json(&raw).with_context(|| format!("invalid config in {}", path.display()))
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for key in all_keys() {
            if !scenarios.contains(&key) {
                scenarios.push(key);
            }
        }
    }
    scenarios
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut output_target, results)?,
        ReportFormat::Markdown => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# YourVue Wizard Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        ReportFormat::Console => {
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

    if args.report != ReportFormat::Json {
        let duration = start_time.elapsed();
        writeln!(&mut output_target)?;
        writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
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

    #[test]
    fn all_expands_without_duplicates() {
        let expanded = expand_scenarios("smoke, all");
        assert_eq!(expanded[0], "smoke");
        assert_eq!(expanded.len(), all_keys().len());
        assert!(expanded.iter().any(|s| s == "random-walk"));
    }

    #[test]
    fn config_override_keeps_unspecified_defaults() {
        let path = std::env::temp_dir().join(format!(
            "yourvue-config-{}.json",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        std::fs::write(&path, r#"{"orientation":{"popup_auto_dismiss_ms":1200}}"#).unwrap();
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.orientation.popup_auto_dismiss_ms, 1_200);
        assert_eq!(cfg.orientation.location_debounce_ms, 300);
        assert_eq!(cfg.analysis, WizardConfig::default().analysis);
    }

    #[test]
    fn missing_config_is_an_error() {
        assert!(load_config(Some(Path::new("/definitely/not/here.json"))).is_err());
    }
}
