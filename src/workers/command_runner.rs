use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use clap::error::ErrorKind;
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use crate::config::config_manager::ConfigManager;
use crate::config::constants::{EXIT_TOKENS, INTERACTIVE_PROMPT, MAX_RATE_LIMIT_WAITS};
use crate::enums::commands::Commands;
use crate::errors::{ErrorHandler, ReverseEngineerError, ReverseEngineerResult};
use crate::helpers::command_line::split_command_line;
use crate::helpers::terminal::divider;
use crate::services::dispatcher::{CommandDispatcher, Invocation};
use crate::structs::cli::Cli;
use crate::structs::config::config::Config;
use crate::structs::prompt_result::Delivery;

pub struct CommandRunner {
    config_path: PathBuf,
    wait_on_rate_limit: bool,
    dispatcher: Option<CommandDispatcher>,
}

impl CommandRunner {
    pub fn new(config_path: PathBuf, wait_on_rate_limit: bool) -> Self {
        Self {
            config_path,
            wait_on_rate_limit,
            dispatcher: None,
        }
    }

    /// Runner around an already wired dispatcher; `init` still reads `config_path`.
    pub fn with_dispatcher(config_path: PathBuf, dispatcher: CommandDispatcher, wait_on_rate_limit: bool) -> Self {
        Self {
            config_path,
            wait_on_rate_limit,
            dispatcher: Some(dispatcher),
        }
    }

    /// Entry point for a parsed command line: one command, or the interactive loop.
    pub async fn execute(cli: Cli) -> ReverseEngineerResult<()> {
        let config_path = ConfigManager::resolve_path(cli.config_path.as_deref());
        let mut runner = Self::new(config_path, cli.wait_on_rate_limit);

        match cli.command {
            Some(command) => runner.run_command(command).await,
            None => {
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                runner.interactive_mode(stdin, &mut io::stdout()).await
            }
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> ReverseEngineerResult<()> {
        let wait = self.wait_on_rate_limit;
        self.dispatch(command, wait, None).await
    }

    /// `init_path` overrides the runner's path for `init` only.
    async fn dispatch(
        &mut self,
        command: Commands,
        wait_on_rate_limit: bool,
        init_path: Option<PathBuf>,
    ) -> ReverseEngineerResult<()> {
        let start_time = Instant::now();

        let result = match command.operation() {
            Some((operation, args)) => {
                let invocation = Invocation::from_args(operation, args);
                self.operation_command(&invocation, wait_on_rate_limit).await.map(|delivery| {
                    if let Delivery::Saved(path) = delivery {
                        log::debug!("📁 {operation} result written to {}", path.display());
                    }
                })
            }
            None => {
                let write_sample = matches!(command, Commands::Init { write_sample: true });
                let path = init_path.unwrap_or_else(|| self.config_path.clone());
                Self::init_command(&path, write_sample)
            }
        };

        log::info!("⏱️  Command completed in {:.2}s", start_time.elapsed().as_secs_f64());
        result
    }

    fn init_command(config_path: &Path, write_sample: bool) -> ReverseEngineerResult<()> {
        log::info!("🚀 Initializing reverse-engineer configuration...");

        if write_sample && ConfigManager::create_sample_config(config_path)? {
            log::info!("📝 Edit the configuration file to add your models.");
        }

        let config = ConfigManager::read(config_path).inspect_err(|_| {
            log::error!("💡 Run 'reverse-engineer init --write-sample' to create a configuration file.");
        })?;

        Self::print_config_summary(&config);
        let validation = ConfigManager::validate(&config);
        validation.print_summary();
        if !validation.is_valid {
            return Err(ConfigManager::invalid_config(config_path, &validation.errors));
        }
        Ok(())
    }

    fn print_config_summary(config: &Config) {
        let line = divider();
        log::info!("{line}");
        log::info!("📋 Configured models:");
        for (key, model) in &config.models {
            let marker = if *key == config.default_model { "⭐" } else { "  " };
            log::info!(
                "{marker} {key}: {} via {} (max_tokens {}, temperature {})",
                model.name,
                model.provider,
                model.max_tokens,
                model.temperature
            );
        }
        log::info!(
            "🚦 Rate limit: {} requests per {}s",
            config.rate_limit.limit,
            config.rate_limit.time_frame
        );
        log::info!("⏰ Request timeout: {}s", config.request_timeout_secs);
        log::info!("{line}");
    }

    async fn operation_command(&mut self, invocation: &Invocation, wait_on_rate_limit: bool) -> ReverseEngineerResult<Delivery> {
        let dispatcher = self.dispatcher()?;
        let request = dispatcher.prepare(invocation).await?;

        let mut waits = 0;
        loop {
            match dispatcher.submit(&request, invocation).await {
                Err(ReverseEngineerError::RateLimited { retry_after })
                    if wait_on_rate_limit && waits < MAX_RATE_LIMIT_WAITS =>
                {
                    waits += 1;
                    log::warn!(
                        "⏳ Rate limit reached, waiting {:.2}s ({waits}/{MAX_RATE_LIMIT_WAITS})",
                        retry_after.as_secs_f64()
                    );
                    tokio::time::sleep(retry_after).await;
                }
                outcome => return outcome,
            }
        }
    }

    /// Loads the configuration on first use; later commands share its rate limiter.
    fn dispatcher(&mut self) -> ReverseEngineerResult<&CommandDispatcher> {
        let dispatcher = match self.dispatcher.take() {
            Some(dispatcher) => dispatcher,
            None => {
                let config = ConfigManager::load(&self.config_path)?;
                CommandDispatcher::from_config(Arc::new(config))?
            }
        };
        Ok(&*self.dispatcher.insert(dispatcher))
    }

    /// Read-eval loop over `input`. Errors are reported inline and never end
    /// the session; `exit`, `quit`, end of input or Ctrl-C at the prompt do.
    pub async fn interactive_mode<R, W>(&mut self, input: R, output: &mut W) -> ReverseEngineerResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        log::info!("🤖 Interactive mode. Type '--help' for commands, 'exit' to quit.");
        let mut lines = input.lines();

        loop {
            write!(output, "{INTERACTIVE_PROMPT}").and_then(|()| output.flush()).map_err(Self::console_error)?;

            let line = tokio::select! {
                line = lines.next_line() => line.map_err(|e| ReverseEngineerError::input_error("<stdin>", &e.to_string()))?,
                _ = tokio::signal::ctrl_c() => None,
            };

            let Some(line) = line else {
                writeln!(output).map_err(Self::console_error)?;
                break;
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if EXIT_TOKENS.iter().any(|token| token.eq_ignore_ascii_case(line)) {
                break;
            }

            if let Err(e) = self.run_line(line, output).await {
                log::debug!("{}", e.technical_details());
                writeln!(output, "{}", ErrorHandler::inline_message(&e)).map_err(Self::console_error)?;
            }
        }

        log::info!("👋 Bye");
        Ok(())
    }

    async fn run_line<W: Write>(&mut self, line: &str, output: &mut W) -> ReverseEngineerResult<()> {
        let mut args = vec!["reverse-engineer".to_string()];
        args.extend(split_command_line(line)?);

        let cli = match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                return write!(output, "{e}").map_err(Self::console_error);
            }
            Err(e) => return Err(ReverseEngineerError::input_error(line, e.to_string().trim())),
        };

        let Some(command) = cli.command else {
            return Err(ReverseEngineerError::input_error(line, "no command given"));
        };

        let init_path = match (&command, cli.config_path) {
            (Commands::Init { .. }, path) => path,
            (_, Some(path)) => {
                self.switch_config_path(line, path)?;
                None
            }
            (_, None) => None,
        };

        let wait = self.wait_on_rate_limit || cli.wait_on_rate_limit;
        tokio::select! {
            result = self.dispatch(command, wait, init_path) => result,
            _ = tokio::signal::ctrl_c() => Err(ReverseEngineerError::Cancelled),
        }
    }

    /// An operation may pick the configuration only until one has been loaded.
    fn switch_config_path(&mut self, line: &str, path: PathBuf) -> ReverseEngineerResult<()> {
        if path == self.config_path {
            return Ok(());
        }
        if self.dispatcher.is_some() {
            return Err(ReverseEngineerError::input_error(
                line,
                &format!(
                    "configuration already loaded from '{}'; restart the session to use '{}'",
                    self.config_path.display(),
                    path.display()
                ),
            ));
        }
        self.config_path = path;
        Ok(())
    }

    fn console_error(error: io::Error) -> ReverseEngineerError {
        ReverseEngineerError::output_error("<stdout>", &error.to_string())
    }
}
