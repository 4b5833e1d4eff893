use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// A code task that can be sent to a model. Selected once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Analyze,
    IdentifyIssues,
    Optimize,
    GenerateDocumentation,
    Refactor,
    ExplainAlgorithm,
    GenerateTestCases,
    IdentifyDesignPatterns,
    ConvertLanguage,
    SecurityAudit,
}

impl Operation {
    pub const ALL: [Self; 10] = [
        Self::Analyze,
        Self::IdentifyIssues,
        Self::Optimize,
        Self::GenerateDocumentation,
        Self::Refactor,
        Self::ExplainAlgorithm,
        Self::GenerateTestCases,
        Self::IdentifyDesignPatterns,
        Self::ConvertLanguage,
        Self::SecurityAudit,
    ];

    /// Command-line name, e.g. `identify-issues`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::IdentifyIssues => "identify-issues",
            Self::Optimize => "optimize",
            Self::GenerateDocumentation => "generate-documentation",
            Self::Refactor => "refactor",
            Self::ExplainAlgorithm => "explain-algorithm",
            Self::GenerateTestCases => "generate-test-cases",
            Self::IdentifyDesignPatterns => "identify-design-patterns",
            Self::ConvertLanguage => "convert-language",
            Self::SecurityAudit => "security-audit",
        }
    }

    /// Tag used when naming generated output files.
    pub fn file_tag(self) -> String {
        self.name().replace('-', "_")
    }

    pub const fn requires_target_language(self) -> bool {
        matches!(self, Self::ConvertLanguage)
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Analyze => "🔍",
            Self::IdentifyIssues => "🐛",
            Self::Optimize => "⚡",
            Self::GenerateDocumentation => "📚",
            Self::Refactor => "🔧",
            Self::ExplainAlgorithm => "🧠",
            Self::GenerateTestCases => "🧪",
            Self::IdentifyDesignPatterns => "🧩",
            Self::ConvertLanguage => "🔄",
            Self::SecurityAudit => "🔒",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|operation| operation.name() == normalized)
            .ok_or_else(|| format!("unknown operation '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for operation in Operation::ALL {
            assert_eq!(operation.name().parse::<Operation>(), Ok(operation));
        }
    }

    #[test]
    fn accepts_snake_case_names() {
        assert_eq!("security_audit".parse::<Operation>(), Ok(Operation::SecurityAudit));
        assert!("compile".parse::<Operation>().is_err());
    }

    #[test]
    fn only_conversion_needs_a_target() {
        let needing: Vec<_> = Operation::ALL
            .into_iter()
            .filter(|op| op.requires_target_language())
            .collect();
        assert_eq!(needing, vec![Operation::ConvertLanguage]);
        assert_eq!(Operation::GenerateTestCases.file_tag(), "generate_test_cases");
    }
}
