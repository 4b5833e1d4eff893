#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn print_summary(&self) {
        if self.is_valid {
            log::info!("✅ Validation passed");
        } else {
            log::error!("❌ Validation failed with {} errors", self.errors.len());
        }

        if !self.warnings.is_empty() {
            log::warn!("⚠️ {} warnings found", self.warnings.len());
        }

        for error in &self.errors {
            log::error!("   ❌ {error}");
        }

        for warning in &self.warnings {
            log::warn!("   ⚠️ {warning}");
        }
    }
}
