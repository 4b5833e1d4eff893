use clap::Parser;
use reverse_engineer::errors::ErrorHandler;
use reverse_engineer::logger;
use reverse_engineer::structs::cli::Cli;
use reverse_engineer::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if let Err(e) = CommandRunner::execute(cli).await {
        ErrorHandler::handle_error(&e);
        std::process::exit(e.exit_code());
    }
}
