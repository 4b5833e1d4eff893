use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use chrono::Local;
use crate::enums::operation::Operation;
use crate::errors::{ReverseEngineerError, ReverseEngineerResult};
use crate::structs::prompt_result::{Delivery, PromptResult};

/// Delivers model output to a file or to the console.
pub struct ResultSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ResultSink {
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    pub fn emit(&self, result: &PromptResult, locator: &str, operation: Operation) -> ReverseEngineerResult<Delivery> {
        match &result.destination {
            Some(destination) => {
                let path = Self::target_path(destination, locator, operation);
                Self::write_file(&path, &result.raw_text)?;
                log::info!("💾 Output saved to {}", path.display());
                Ok(Delivery::Saved(path))
            }
            None => {
                self.print(&result.raw_text)?;
                Ok(Delivery::Printed)
            }
        }
    }

    /// An existing directory gets a generated `<stem>_<operation>_<timestamp>.txt` name.
    pub fn target_path(destination: &Path, locator: &str, operation: Operation) -> PathBuf {
        if !destination.is_dir() {
            return destination.to_path_buf();
        }

        let stem = locator
            .trim_end_matches('/')
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .and_then(|name| Path::new(name).file_stem())
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .unwrap_or("output");
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");

        destination.join(format!("{stem}_{}_{timestamp}.txt", operation.file_tag()))
    }

    fn write_file(path: &Path, text: &str) -> ReverseEngineerResult<()> {
        let display = path.display().to_string();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ReverseEngineerError::output_error(&display, &e.to_string()))?;
        }
        fs::write(path, text).map_err(|e| ReverseEngineerError::output_error(&display, &e.to_string()))
    }

    fn print(&self, text: &str) -> ReverseEngineerResult<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{text}")
            .and_then(|()| writer.flush())
            .map_err(|e| ReverseEngineerError::output_error("<stdout>", &e.to_string()))
    }
}
