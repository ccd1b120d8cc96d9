use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use csv_adapter::CsvJobStore;
use hiring_core::application::PipelineServiceImpl;
use hiring_core::config::{
    DashboardConfig, FetchConfig, DEFAULT_BIND_ADDR, DEFAULT_OUTPUT_FILE, DEFAULT_SOURCE_URL,
    DEFAULT_TOP_N,
};
use hiring_core::ports::{JobSource, JobWriter};
use remoteok_adapter::RemoteOkJobSource;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod prompt;

/// Collect remote job postings into a CSV file and chart them on a local dashboard
#[derive(Parser, Debug)]
#[command(name = "hiring-trends")]
#[command(about = "Fetches RemoteOK job postings, saves a cleaned CSV and serves a trends dashboard")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    pipeline: PipelineArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, clean and save the job listing (the default)
    RunPipeline(PipelineArgs),
    /// Serve the dashboard for a previously saved file
    RunDashboard(DashboardArgs),
}

#[derive(Args, Debug)]
struct PipelineArgs {
    /// Path where the cleaned CSV will be written
    #[arg(short = 'o', long = "output", env = "HIRING_TRENDS_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Job listing endpoint
    #[arg(long = "source-url", env = "HIRING_TRENDS_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    source_url: String,

    /// Address the dashboard binds to if launched
    #[arg(long = "bind", env = "HIRING_TRENDS_BIND", default_value = DEFAULT_BIND_ADDR)]
    bind: String,

    /// Exit after saving instead of asking about the dashboard
    #[arg(long = "no-prompt")]
    no_prompt: bool,
}

#[derive(Args, Debug)]
struct DashboardArgs {
    /// Path of the cleaned CSV to chart
    #[arg(short = 'i', long = "input", env = "HIRING_TRENDS_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    input: PathBuf,

    /// Address to bind the dashboard to
    #[arg(long = "bind", env = "HIRING_TRENDS_BIND", default_value = DEFAULT_BIND_ADDR)]
    bind: String,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let outcome = match cli.command.unwrap_or(Command::RunPipeline(cli.pipeline)) {
        Command::RunPipeline(args) => run_pipeline(args),
        Command::RunDashboard(args) => run_dashboard(DashboardConfig {
            input: args.input,
            bind: args.bind,
            top_n: DEFAULT_TOP_N,
        }),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hiring_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_pipeline(args: PipelineArgs) -> anyhow::Result<()> {
    println!("Running ETL pipeline...");

    // Instantiate concrete implementations of secondary adapters
    let job_source: Box<dyn JobSource> = Box::new(RemoteOkJobSource::new(FetchConfig {
        url: args.source_url,
        ..FetchConfig::default()
    }));
    let job_writer: Box<dyn JobWriter> = Box::new(CsvJobStore::new(args.output));

    let service = PipelineServiceImpl::new(job_source, job_writer);
    let report = service.execute_pipeline()?;
    println!(
        "Data saved to {} ({} jobs, {} dropped for unparsable dates)",
        report.output.display(),
        report.kept,
        report.dropped
    );

    if args.no_prompt || !prompt::confirm_dashboard_launch() {
        return Ok(());
    }

    println!("Launching dashboard...");
    run_dashboard(DashboardConfig {
        input: report.output,
        bind: args.bind,
        top_n: DEFAULT_TOP_N,
    })
}

fn run_dashboard(config: DashboardConfig) -> anyhow::Result<()> {
    let reader = Arc::new(CsvJobStore::new(config.input.clone()));
    dashboard_adapter::show_dashboard(&config, reader)
        .with_context(|| format!("Dashboard server on {} failed", config.bind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_runs_pipeline_with_defaults() {
        let cli = Cli::try_parse_from(["hiring-trends"]).unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.pipeline.output, PathBuf::from("cleaned_jobs.csv"));
        assert_eq!(cli.pipeline.source_url, "https://remoteok.io/api");
        assert!(!cli.pipeline.no_prompt);
    }

    #[test]
    fn test_run_pipeline_subcommand_accepts_output() {
        let cli =
            Cli::try_parse_from(["hiring-trends", "run-pipeline", "--output", "out/jobs.csv"]).unwrap();

        match cli.command {
            Some(Command::RunPipeline(args)) => assert_eq!(args.output, PathBuf::from("out/jobs.csv")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_run_dashboard_subcommand() {
        let cli = Cli::try_parse_from([
            "hiring-trends",
            "run-dashboard",
            "--input",
            "jobs.csv",
            "--bind",
            "0.0.0.0:9000",
        ])
        .unwrap();

        match cli.command {
            Some(Command::RunDashboard(args)) => {
                assert_eq!(args.input, PathBuf::from("jobs.csv"));
                assert_eq!(args.bind, "0.0.0.0:9000");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
