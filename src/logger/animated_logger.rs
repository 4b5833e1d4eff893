use std::io::{IsTerminal, Write};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner on stderr while a model call is in flight. Silent when stderr is
/// not a terminal so piped output and logs stay clean.
pub struct AnimatedLogger {
    message: String,
    stop_sender: Option<mpsc::UnboundedSender<()>>,
    task_handle: Option<JoinHandle<()>>,
}

impl AnimatedLogger {
    pub fn new(message: String) -> Self {
        Self {
            message,
            stop_sender: None,
            task_handle: None,
        }
    }

    pub fn start(&mut self) {
        if !std::io::stderr().is_terminal() {
            log::info!("{}", self.message);
            return;
        }

        let (stop_tx, mut stop_rx) = mpsc::unbounded_channel();
        let message = self.message.clone();

        let handle = tokio::spawn(async move {
            let mut frame = 0;
            let mut interval = tokio::time::interval(tokio::time::Duration::from_millis(150));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        eprint!("\r{} {} ", message, FRAMES[frame]);
                        let _ = std::io::stderr().flush();
                        frame = (frame + 1) % FRAMES.len();
                    }
                    _ = stop_rx.recv() => {
                        break;
                    }
                }
            }
        });

        self.stop_sender = Some(stop_tx);
        self.task_handle = Some(handle);
    }

    pub async fn stop(&mut self, final_message: &str) {
        if self.halt().await {
            eprint!("\r\x1b[K✅ {final_message}\n");
            let _ = std::io::stderr().flush();
        } else {
            log::info!("✅ {final_message}");
        }
    }

    pub async fn error(&mut self, error_message: &str) {
        if self.halt().await {
            eprint!("\r\x1b[K❌ {error_message}\n");
            let _ = std::io::stderr().flush();
        } else {
            log::debug!("❌ {error_message}");
        }
    }

    /// Stops the spinner task; returns whether one was running.
    async fn halt(&mut self) -> bool {
        if let Some(sender) = self.stop_sender.take() {
            let _ = sender.send(());
        }

        match self.task_handle.take() {
            Some(handle) => {
                let _ = handle.await;
                true
            }
            None => false,
        }
    }
}

impl Drop for AnimatedLogger {
    fn drop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}
