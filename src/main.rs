//! grok4-cli - a command-line interface for xAI's Grok 4 API.
//!
//! Six subcommands forward text, file contents, or CSV data to the Grok chat
//! endpoint and write the returned text to the console or to a file. Each
//! invocation performs exactly one request per task (one per line in chat,
//! one per step in workflows); there is no local inference and no persisted
//! conversation state.

mod api;
mod config;
mod table;
mod workflow;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use api::Client;

#[derive(Parser)]
#[command(name = "grok4")]
#[command(author, version, about = "A command-line interface for xAI's Grok 4 API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat,
    /// Read a file, apply Grok 4 edits based on a prompt, and save the result
    EditFile {
        /// File to edit
        filename: PathBuf,
        /// Editing instruction
        prompt: String,
        /// Output file for edited content (defaults to the input file)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Create a new file with the given content
    CreateFile {
        /// File to create
        filename: PathBuf,
        /// Literal content to write
        content: String,
    },
    /// Analyze a CSV file with Grok 4
    AnalyzeData {
        /// CSV file to analyze
        data_file: PathBuf,
        /// Analysis instruction
        prompt: String,
        /// Output file for analysis results
        #[arg(long, default_value = "output.csv")]
        output: PathBuf,
    },
    /// Run an NLP task (e.g. sentiment analysis, entity recognition)
    Nlp {
        /// Text to process
        text: String,
        /// Task name
        task: String,
    },
    /// Execute an automated workflow defined in a JSON file
    AutomateWorkflow {
        /// Workflow definition file
        workflow_file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // The credential is required before any command can run.
    let config = match config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    };

    let client = Client::new(&config).context("Failed to create API client")?;

    match cli.command {
        Commands::Chat => handle_chat(&client).await?,
        Commands::EditFile {
            filename,
            prompt,
            output,
        } => handle_edit_file(&client, &filename, &prompt, output.as_deref()).await,
        Commands::CreateFile { filename, content } => handle_create_file(&filename, &content),
        Commands::AnalyzeData {
            data_file,
            prompt,
            output,
        } => handle_analyze_data(&client, &data_file, &prompt, &output).await,
        Commands::Nlp { text, task } => handle_nlp(&client, &text, &task).await,
        Commands::AutomateWorkflow { workflow_file } => {
            handle_workflow(&client, &workflow_file).await
        }
    }

    Ok(())
}

/// One dispatch with uniform failure reporting. `None` means the error has
/// already been printed and the caller should perform no side effect.
async fn dispatch(client: &Client, prompt: &str) -> Option<String> {
    match client.complete(prompt).await {
        Ok(response) => Some(response),
        Err(e) => {
            eprintln!("{}", format!("API Error: {}", e).red());
            None
        }
    }
}

/// Interactive chat loop. Exits on the sentinel `exit` (any casing) or EOF.
async fn handle_chat(client: &Client) -> Result<()> {
    println!("{}", "Welcome to Grok 4 Interactive Chat".cyan().bold());
    println!("Type your message and press Enter. Type 'exit' to quit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        print!("{} ", "You:".green().bold());
        std::io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") {
            println!("{}", "Goodbye!".cyan());
            break;
        }
        if input.is_empty() {
            continue;
        }

        if let Some(response) = dispatch(client, input).await {
            println!("{} {}\n", "Grok:".blue().bold(), response);
        }
    }

    Ok(())
}

async fn handle_edit_file(
    client: &Client,
    filename: &Path,
    prompt: &str,
    output: Option<&Path>,
) {
    if !filename.exists() {
        report_missing_file(filename);
        return;
    }

    let content = match std::fs::read_to_string(filename) {
        Ok(content) => content,
        Err(e) => {
            eprintln!(
                "{}",
                format!("Error reading {}: {}", filename.display(), e).red()
            );
            return;
        }
    };

    let full_prompt = format!(
        "Edit the following code/content: {}\n\nContent:\n{}",
        prompt, content
    );

    if let Some(response) = dispatch(client, &full_prompt).await {
        let output_file = output.unwrap_or(filename);
        match std::fs::write(output_file, &response) {
            Ok(()) => println!(
                "{}",
                format!("File edited and saved to {}", output_file.display()).green()
            ),
            Err(e) => eprintln!(
                "{}",
                format!("Error writing {}: {}", output_file.display(), e).red()
            ),
        }
    }
}

fn handle_create_file(filename: &Path, content: &str) {
    match std::fs::write(filename, content) {
        Ok(()) => println!(
            "{}",
            format!("File {} created successfully", filename.display()).green()
        ),
        Err(e) => eprintln!(
            "{}",
            format!("Error creating file {}: {}", filename.display(), e).red()
        ),
    }
}

async fn handle_analyze_data(client: &Client, data_file: &Path, prompt: &str, output: &Path) {
    if !data_file.exists() {
        report_missing_file(data_file);
        return;
    }

    let table = match table::Table::from_csv_path(data_file) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("{}", format!("Error in data analysis: {:#}", e).red());
            return;
        }
    };

    let full_prompt = format!(
        "Analyze this data: {}\n\nData:\n{}",
        prompt,
        table.render()
    );

    if let Some(response) = dispatch(client, &full_prompt).await {
        match std::fs::write(output, &response) {
            Ok(()) => println!(
                "{}",
                format!("Analysis completed and saved to {}", output.display()).green()
            ),
            Err(e) => eprintln!(
                "{}",
                format!("Error writing {}: {}", output.display(), e).red()
            ),
        }
    }
}

async fn handle_nlp(client: &Client, text: &str, task: &str) {
    let full_prompt = format!("Perform NLP task: {}\n\nText: {}", task, text);

    if let Some(response) = dispatch(client, &full_prompt).await {
        println!("{} {}", "NLP Result:".blue().bold(), response);
    }
}

async fn handle_workflow(client: &Client, workflow_file: &Path) {
    if !workflow_file.exists() {
        eprintln!(
            "{}",
            format!(
                "Error: Workflow file {} does not exist",
                workflow_file.display()
            )
            .red()
        );
        return;
    }

    let workflow = match workflow::load(workflow_file) {
        Ok(workflow) => workflow,
        Err(e) => {
            eprintln!("{}", format!("Error in workflow automation: {:#}", e).red());
            return;
        }
    };

    workflow::run(client, &workflow).await;
}

fn report_missing_file(path: &Path) {
    eprintln!(
        "{}",
        format!("Error: File {} does not exist", path.display()).red()
    );
}
