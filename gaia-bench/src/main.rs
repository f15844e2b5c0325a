//! GAIA benchmark CLI

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gaia::ScoreSummary;
use gaia_bench::{
    agent::ToolAgent,
    config::Config,
    dataset::{load_questions, select_questions, DatasetSplit},
    hub::{build_answers_payload, HubClient, DEFAULT_API_URL},
    providers::{create_agent_provider, LLMProvider},
    reporting::{
        banner, format_run_header, load_answers, print_console_report, print_wrong_answers, save_answers,
        AnswersFileName,
    },
    runner::{ConsoleProgress, EvalRunner, RunnerConfig},
};

#[derive(Parser)]
#[command(name = "gaia-bench")]
#[command(about = "Run a tool-using LLM agent on the GAIA benchmark and grade its answers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Question selection shared by `run` and `list`
#[derive(Args)]
struct Selection {
    /// Only questions whose task id contains this (case-insensitive)
    task_id: Option<String>,

    /// Dataset split (default: from config)
    #[arg(long, value_enum)]
    dataset: Option<DatasetSplit>,

    /// Only questions of this level
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    level: Option<u8>,

    /// Directory holding `{split}/metadata.jsonl`
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the agent on selected questions
    Run {
        #[command(flatten)]
        selection: Selection,

        /// Do not write an answers file
        #[arg(long)]
        nosave: bool,

        /// Number of questions evaluated concurrently
        #[arg(long)]
        parallel: Option<usize>,

        /// Directory for answers files
        #[arg(long)]
        answers_dir: Option<PathBuf>,

        /// Model override for the agent provider
        #[arg(long)]
        model: Option<String>,
    },

    /// Summarize a saved answers file
    Review {
        /// Answers file (path, or name inside the answers directory)
        answer_file: PathBuf,

        /// Do not print wrong answers
        #[arg(long)]
        no_print_wrong: bool,

        /// Only print wrong answers of this level
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
        level: Option<u8>,
    },

    /// List selected questions with their expected answers
    List {
        #[command(flatten)]
        selection: Selection,
    },

    /// Build the hub submission payload from an answers file
    Payload {
        /// Answers file (path, or name inside the answers directory)
        answer_file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Download the hub question list
    FetchQuestions {
        /// Hub API root
        #[arg(long, default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate sample configuration
    InitConfig {
        /// Output path for configuration file
        #[arg(short, long, default_value = "config/gaia.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // API keys may live in a .env file
    dotenvy::dotenv().ok();

    let filter = if cli.verbose {
        EnvFilter::new("gaia_bench=debug,gaia=debug,info")
    } else {
        EnvFilter::new("gaia_bench=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            selection,
            nosave,
            parallel,
            answers_dir,
            model,
        } => {
            run_evaluation(&config, selection, nosave, parallel, answers_dir, model).await?;
        }

        Commands::Review {
            answer_file,
            no_print_wrong,
            level,
        } => {
            review_answers(&config, &answer_file, !no_print_wrong, level)?;
        }

        Commands::List { selection } => {
            list_questions(&config, selection)?;
        }

        Commands::Payload {
            answer_file,
            output,
        } => {
            write_payload(&config, &answer_file, output)?;
        }

        Commands::FetchQuestions { api_url, output } => {
            fetch_questions(&api_url, output).await?;
        }

        Commands::InitConfig { output } => {
            init_config(output)?;
        }
    }

    Ok(())
}

async fn run_evaluation(
    config: &Config,
    selection: Selection,
    nosave: bool,
    parallel: Option<usize>,
    answers_dir: Option<PathBuf>,
    model: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let split = selection.dataset.unwrap_or(config.benchmark.dataset);
    let data_dir = selection.data_dir.unwrap_or_else(|| config.data_dir());

    let questions = select_questions(
        load_questions(&data_dir, split)?,
        selection.level,
        selection.task_id.as_deref(),
    );
    if questions.is_empty() {
        println!("No questions to run");
        return Ok(());
    }

    let provider = create_agent_provider(config, model.as_deref())?;
    let agent = ToolAgent::from_config(provider.clone(), config, &split.dir(&data_dir))?;

    println!("=== GAIA Evaluation ===");
    println!("Dataset:   {}", split);
    println!("Provider:  {} ({})", provider.name(), provider.default_model());
    println!("Tools:     {}", agent.tools().names().join(", "));
    println!("Questions: {}", questions.len());

    let mut runner_config = RunnerConfig::from(&config.benchmark);
    if let Some(parallel) = parallel {
        runner_config.parallel = parallel;
    }

    let runner = EvalRunner::new(Arc::new(agent), runner_config).with_progress(Arc::new(ConsoleProgress));
    let answers = runner.evaluate(&questions).await;

    println!("{}", format_run_header(split, selection.level));
    print_console_report(&ScoreSummary::from_answers(&answers));

    if nosave || !config.benchmark.output.save_answers {
        return Ok(());
    }

    let dir = answers_dir.unwrap_or_else(|| config.answers_dir());
    let name = AnswersFileName::new(
        Local::now().date_naive(),
        split,
        selection.level,
        selection.task_id.as_deref(),
    );
    let path = save_answers(&dir, &name, &answers)?;
    println!("\nSaved answers to {}", path.display());

    Ok(())
}

/// A bare file name that does not exist locally is looked up in the answers directory
fn resolve_answers_path(config: &Config, path: &Path) -> PathBuf {
    if path.exists() || path.components().count() > 1 {
        path.to_path_buf()
    } else {
        config.answers_dir().join(path)
    }
}

fn review_answers(
    config: &Config,
    answer_file: &Path,
    print_wrong: bool,
    level: Option<u8>,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = resolve_answers_path(config, answer_file);
    let answers = load_answers(&path)?;

    if let Some(info) = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(AnswersFileName::parse)
    {
        println!("Run date: {}", info.date);
        println!("{}", format_run_header(info.split, info.level));
    }

    print_console_report(&ScoreSummary::from_answers(&answers));
    if print_wrong {
        println!();
        print_wrong_answers(&answers, level);
    }

    Ok(())
}

fn list_questions(config: &Config, selection: Selection) -> Result<(), Box<dyn std::error::Error>> {
    let split = selection.dataset.unwrap_or(config.benchmark.dataset);
    let data_dir = selection.data_dir.unwrap_or_else(|| config.data_dir());

    let questions = select_questions(
        load_questions(&data_dir, split)?,
        selection.level,
        selection.task_id.as_deref(),
    );

    println!("Selected {} questions.", questions.len());
    for question in &questions {
        println!("\n{}\n", banner(&format!("Question {}", question.task_id)));
        println!("Level: {}", question.level);
        println!("Question: {}", question.question);
        if let Some(path) = &question.file_path {
            println!("File: {}", path.display());
        }
        println!("Answer: {}", question.expected_answer);
    }

    Ok(())
}

fn write_payload(
    config: &Config,
    answer_file: &Path,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let answers = load_answers(&resolve_answers_path(config, answer_file))?;
    let payload = build_answers_payload(&answers);
    let json = serde_json::to_string_pretty(&payload)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!("Wrote {} entries to {}", payload.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

async fn fetch_questions(api_url: &str, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let questions = HubClient::new(api_url).fetch_questions().await?;
    let json = serde_json::to_string_pretty(&questions)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!("Fetched {} questions into {}", questions.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn init_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    Config::default().save_toml(&output)?;
    println!("Configuration written to {}", output.display());
    Ok(())
}
