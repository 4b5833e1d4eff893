use std::path::PathBuf;
use clap::{ArgAction, Args, Parser};
use crate::enums::commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "reverse-engineer")]
#[clap(about = "AI-powered code analysis tool", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Wait and resubmit when the request quota is exhausted
    #[clap(long, global = true)]
    pub wait_on_rate_limit: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Without a subcommand the tool starts an interactive session
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
pub struct OperationArgs {
    /// Path to the file or URL containing the code
    #[clap(short, long)]
    pub file: String,

    /// Programming language of the code (inferred from the extension when omitted)
    #[clap(short, long, alias = "from-language")]
    pub language: Option<String>,

    /// Target programming language for conversion
    #[clap(long, alias = "target-language")]
    pub to_language: Option<String>,

    /// Specific model to use instead of the configured default
    #[clap(short, long)]
    pub model: Option<String>,

    /// Output file (overwritten) or existing directory
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}
