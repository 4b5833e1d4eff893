use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use crate::enums::ai_provider_error::AiProviderError;
use crate::enums::operation::Operation;
use crate::enums::rate_decision::RateDecision;
use crate::errors::{ReverseEngineerError, ReverseEngineerResult};
use crate::helpers::language_helper::LanguageHelper;
use crate::logger::animated_logger::AnimatedLogger;
use crate::prompts::templates::{PromptParameters, PromptRegistry};
use crate::services::ai_providers::router::ProviderRouter;
use crate::services::rate_limiter::ApiRateLimiter;
use crate::services::result_sink::ResultSink;
use crate::services::source_resolver::SourceResolver;
use crate::structs::cli::OperationArgs;
use crate::structs::config::config::Config;
use crate::structs::prompt_request::PromptRequest;
use crate::structs::prompt_result::{Delivery, PromptResult};
use crate::traits::ai_provider::AiProvider;

/// One operation as requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub operation: Operation,
    pub locator: String,
    pub language: Option<String>,
    pub target_language: Option<String>,
    pub model: Option<String>,
    pub output: Option<PathBuf>,
}

impl Invocation {
    pub fn new(operation: Operation, locator: &str) -> Self {
        Self {
            operation,
            locator: locator.to_string(),
            language: None,
            target_language: None,
            model: None,
            output: None,
        }
    }

    pub fn from_args(operation: Operation, args: &OperationArgs) -> Self {
        Self {
            operation,
            locator: args.file.clone(),
            language: args.language.clone(),
            target_language: args.to_language.clone(),
            model: args.model.clone(),
            output: args.output.clone(),
        }
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn with_target_language(mut self, target_language: &str) -> Self {
        self.target_language = Some(target_language.to_string());
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }
}

/// Runs one operation end to end: source, prompt, rate gate, model, sink.
pub struct CommandDispatcher {
    config: Arc<Config>,
    resolver: SourceResolver,
    rate_limiter: Arc<ApiRateLimiter>,
    provider: Arc<dyn AiProvider>,
    sink: ResultSink,
}

impl CommandDispatcher {
    pub fn new(
        config: Arc<Config>,
        resolver: SourceResolver,
        rate_limiter: Arc<ApiRateLimiter>,
        provider: Arc<dyn AiProvider>,
        sink: ResultSink,
    ) -> Self {
        Self { config, resolver, rate_limiter, provider, sink }
    }

    /// Production wiring: HTTP providers, stdout sink, limiter from the config policy.
    pub fn from_config(config: Arc<Config>) -> ReverseEngineerResult<Self> {
        let timeout = config.request_timeout();
        let resolver = SourceResolver::new(timeout)?;
        let router = ProviderRouter::new(timeout)
            .map_err(|e| ReverseEngineerError::config_error(&e.to_string(), None, None))?;
        let rate_limiter = Arc::new(ApiRateLimiter::new(config.rate_limit));

        Ok(Self::new(config, resolver, rate_limiter, Arc::new(router), ResultSink::stdout()))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rate_limiter(&self) -> &ApiRateLimiter {
        &self.rate_limiter
    }

    pub async fn run(&self, invocation: &Invocation) -> ReverseEngineerResult<Delivery> {
        let request = self.prepare(invocation).await?;
        self.submit(&request, invocation).await
    }

    /// Everything up to the rate gate: model lookup, source text, prompt.
    pub async fn prepare(&self, invocation: &Invocation) -> ReverseEngineerResult<PromptRequest> {
        let operation = invocation.operation;
        let model = self.config.resolve_model(invocation.model.as_deref())?.clone();

        let source_text = self.resolver.resolve(&invocation.locator).await?;

        let source_language = match invocation.language.as_deref().map(str::trim) {
            Some(language) if !language.is_empty() => language.to_string(),
            _ => {
                let inferred = LanguageHelper::infer_from_locator(&invocation.locator)
                    .ok_or(ReverseEngineerError::MissingParameter { operation, field: "source_language" })?;
                log::info!("🔤 Detected language: {inferred}");
                inferred.to_string()
            }
        };

        let parameters = PromptParameters::new(Some(&source_language), invocation.target_language.as_deref());
        let prompt = PromptRegistry::render(operation, &parameters)?;

        Ok(PromptRequest {
            operation,
            source_language,
            target_language: invocation.target_language.clone(),
            source_text,
            model,
            prompt,
        })
    }

    /// Rate gate, model call and output. A denied request leaves no trace in the window.
    pub async fn submit(&self, request: &PromptRequest, invocation: &Invocation) -> ReverseEngineerResult<Delivery> {
        if let RateDecision::Denied { retry_after } = self.rate_limiter.check_and_record() {
            log::debug!("🚦 Request denied, retry after {:.2}s", retry_after.as_secs_f64());
            return Err(ReverseEngineerError::RateLimited { retry_after });
        }

        let operation = request.operation;
        let model = &request.model;
        let started = Instant::now();
        let mut spinner = AnimatedLogger::new(format!(
            "{} Running {operation} with {} ({})",
            operation.emoji(),
            model.name,
            model.provider
        ));
        spinner.start();

        let raw_text = match self.provider.invoke(&request.prompt, &request.source_text, model).await {
            Ok(text) => {
                spinner.stop(&format!("{operation} finished in {:.2}s", started.elapsed().as_secs_f64())).await;
                text
            }
            Err(e) => {
                spinner.error(&format!("{operation} failed")).await;
                return Err(Self::invocation_error(e, &request.model.name, request.model.provider.name()));
            }
        };

        let result = PromptResult { raw_text, destination: invocation.output.clone() };
        self.sink.emit(&result, &invocation.locator, operation)
    }

    fn invocation_error(error: AiProviderError, model: &str, provider: &str) -> ReverseEngineerError {
        match error {
            AiProviderError::Configuration(message) => {
                ReverseEngineerError::config_error(&message, Some("models"), None)
            }
            other => ReverseEngineerError::ModelInvocationError {
                model: model.to_string(),
                provider: provider.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
