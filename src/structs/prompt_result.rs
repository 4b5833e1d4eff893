use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptResult {
    pub raw_text: String,
    pub destination: Option<PathBuf>,
}

/// Where a result ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Printed,
    Saved(PathBuf),
}
