use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use async_trait::async_trait;
use reverse_engineer::enums::ai_provider_error::AiProviderError;
use reverse_engineer::services::dispatcher::CommandDispatcher;
use reverse_engineer::services::rate_limiter::ApiRateLimiter;
use reverse_engineer::services::result_sink::ResultSink;
use reverse_engineer::services::source_resolver::SourceResolver;
use reverse_engineer::services::ai_providers::router::ProviderRouter;
use reverse_engineer::structs::config::config::Config;
use reverse_engineer::structs::config::model_config::ModelConfig;
use reverse_engineer::structs::config::rate_limit_policy::RateLimitPolicy;
use reverse_engineer::traits::ai_provider::AiProvider;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Minimal HTTP/1.1 server answering every request with the same response.
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubServer {
    pub fn json(status: u16, body: &str) -> Self {
        Self::start(status, "application/json", body)
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self::start(status, "text/plain; charset=utf-8", body)
    }

    fn start(status: u16, content_type: &str, body: &str) -> Self {
        // Clients built after this point, child processes included, skip any configured proxy for loopback.
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        std::env::set_var("no_proxy", "127.0.0.1,localhost");

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let captured = Arc::clone(&requests);
        let content_type = content_type.to_string();
        let body = body.to_string();
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let _ = Self::serve(stream, &captured, status, &content_type, &body);
            }
        });

        Self { addr, requests }
    }

    /// Records the request before answering so callers see it once the response arrives.
    fn serve(
        mut stream: TcpStream,
        captured: &Mutex<Vec<CapturedRequest>>,
        status: u16,
        content_type: &str,
        body: &str,
    ) -> io::Result<()> {
        stream.set_read_timeout(Some(Duration::from_secs(5)))?;
        let mut reader = BufReader::new(stream.try_clone()?);

        let mut request_line = String::new();
        reader.read_line(&mut request_line)?;
        let mut parts = request_line.split_whitespace();
        let method = parts.next().unwrap_or_default().to_string();
        let target = parts.next().unwrap_or_default().to_string();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line)?;
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((key, value)) = line.split_once(':') {
                headers.push((key.trim().to_string(), value.trim().to_string()));
            }
        }

        let length = headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.parse::<usize>().ok())
            .unwrap_or(0);
        let mut raw_body = vec![0; length];
        reader.read_exact(&mut raw_body)?;

        captured.lock().unwrap().push(CapturedRequest {
            method,
            target,
            headers,
            body: String::from_utf8_lossy(&raw_body).into_owned(),
        });

        let reason = match status {
            200 => "OK",
            401 => "Unauthorized",
            404 => "Not Found",
            429 => "Too Many Requests",
            _ => "Internal Server Error",
        };
        write!(
            stream,
            "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )?;
        stream.flush()
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn openai_reply(text: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "stub-model",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 12, "completion_tokens": 1, "total_tokens": 13 }
    })
    .to_string()
}

/// Provider double that records calls and replays a fixed answer.
#[derive(Clone)]
pub struct StubProvider {
    reply: Result<String, AiProviderError>,
    calls: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl StubProvider {
    pub fn answering(text: &str) -> Self {
        Self { reply: Ok(text.to_string()), calls: Arc::default() }
    }

    pub fn failing(error: AiProviderError) -> Self {
        Self { reply: Err(error), calls: Arc::default() }
    }

    /// (prompt, source text, model name) per call.
    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for StubProvider {
    async fn invoke(&self, prompt: &str, source_text: &str, model: &ModelConfig) -> Result<String, AiProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), source_text.to_string(), model.name.clone()));
        self.reply.clone()
    }
}

#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn write_source(dir: &Path, name: &str, text: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path.to_str().unwrap().to_string()
}

pub fn config_with(models: Vec<ModelConfig>, limit: u32) -> Config {
    let default = models.first().map(|m| m.name.clone()).unwrap_or_default();
    Config::new(&default, models).with_rate_limit(RateLimitPolicy::new(limit, 60))
}

pub fn dispatcher_with(config: Config, provider: Arc<dyn AiProvider>, stdout: &SharedBuffer) -> CommandDispatcher {
    let timeout = Duration::from_secs(5);
    let rate_limiter = Arc::new(ApiRateLimiter::new(config.rate_limit));
    CommandDispatcher::new(
        Arc::new(config),
        SourceResolver::new(timeout).unwrap(),
        rate_limiter,
        provider,
        ResultSink::with_writer(Box::new(stdout.clone())),
    )
}

/// Dispatcher that talks HTTP through the real provider router.
pub fn http_dispatcher(config: Config, stdout: &SharedBuffer) -> CommandDispatcher {
    let router = ProviderRouter::new(Duration::from_secs(5)).unwrap();
    dispatcher_with(config, Arc::new(router), stdout)
}

/// Config file pointing an OpenAI-compatible model at `api_base`.
pub fn write_stub_config(dir: &Path, api_base: &str, key_env: &str, limit: u32) -> PathBuf {
    let path = dir.join("config.yaml");
    let yaml = format!(
        "default_model: stub\n\
         models:\n  \
           stub:\n    \
             name: stub-model\n    \
             provider: other\n    \
             api_base: {api_base}\n    \
             api_key_env: {key_env}\n\
         rate_limit:\n  \
           limit: {limit}\n  \
           time_frame: 60\n\
         request_timeout_secs: 5\n"
    );
    std::fs::write(&path, yaml).unwrap();
    path
}
