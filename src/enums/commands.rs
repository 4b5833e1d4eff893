use clap::Subcommand;
use crate::enums::operation::Operation;
use crate::structs::cli::OperationArgs;

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Load and validate the configuration file
    Init {
        /// Write a sample configuration first if none exists at the path
        #[clap(long)]
        write_sample: bool,
    },
    /// Analyze the given code file
    Analyze(OperationArgs),
    /// Identify issues in the given code file
    IdentifyIssues(OperationArgs),
    /// Suggest optimizations for the given code file
    Optimize(OperationArgs),
    /// Generate documentation for the given code file
    GenerateDocumentation(OperationArgs),
    /// Suggest refactoring improvements for the given code file
    Refactor(OperationArgs),
    /// Explain the algorithm used in the given code file
    ExplainAlgorithm(OperationArgs),
    /// Generate test cases for the given code file
    GenerateTestCases(OperationArgs),
    /// Identify design patterns used in the given code file
    IdentifyDesignPatterns(OperationArgs),
    /// Convert the given code file to another programming language
    ConvertLanguage(OperationArgs),
    /// Perform a security audit on the given code file
    SecurityAudit(OperationArgs),
}

impl Commands {
    /// The operation and its arguments, or `None` for `init`.
    pub const fn operation(&self) -> Option<(Operation, &OperationArgs)> {
        match self {
            Self::Init { .. } => None,
            Self::Analyze(args) => Some((Operation::Analyze, args)),
            Self::IdentifyIssues(args) => Some((Operation::IdentifyIssues, args)),
            Self::Optimize(args) => Some((Operation::Optimize, args)),
            Self::GenerateDocumentation(args) => Some((Operation::GenerateDocumentation, args)),
            Self::Refactor(args) => Some((Operation::Refactor, args)),
            Self::ExplainAlgorithm(args) => Some((Operation::ExplainAlgorithm, args)),
            Self::GenerateTestCases(args) => Some((Operation::GenerateTestCases, args)),
            Self::IdentifyDesignPatterns(args) => Some((Operation::IdentifyDesignPatterns, args)),
            Self::ConvertLanguage(args) => Some((Operation::ConvertLanguage, args)),
            Self::SecurityAudit(args) => Some((Operation::SecurityAudit, args)),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use crate::enums::operation::Operation;
    use crate::structs::cli::Cli;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("reverse-engineer").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn every_operation_has_a_subcommand() {
        for operation in Operation::ALL {
            let cli = parse(&[operation.name(), "--file", "main.rs", "--language", "rust"]);
            let command = cli.command.expect("subcommand");
            let (parsed, args) = command.operation().expect("operation command");
            assert_eq!(parsed, operation);
            assert_eq!(args.file, "main.rs");
            assert_eq!(args.language.as_deref(), Some("rust"));
        }
    }

    #[test]
    fn convert_language_accepts_from_alias() {
        let cli = parse(&["convert-language", "-f", "a.py", "--from-language", "python", "--to-language", "go", "-o", "out.go"]);
        let command = cli.command.unwrap();
        let (_, args) = command.operation().unwrap();
        assert_eq!(args.language.as_deref(), Some("python"));
        assert_eq!(args.to_language.as_deref(), Some("go"));
        assert_eq!(args.output.as_deref(), Some(std::path::Path::new("out.go")));
    }

    #[test]
    fn init_takes_global_config_path() {
        let cli = parse(&["init", "--config-path", "conf/settings.yaml", "--write-sample"]);
        assert_eq!(cli.config_path.as_deref(), Some(std::path::Path::new("conf/settings.yaml")));
        assert!(matches!(cli.command, Some(super::Commands::Init { write_sample: true })));
    }

    #[test]
    fn file_is_required() {
        let result = Cli::try_parse_from(["reverse-engineer", "analyze", "--language", "rust"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_subcommand_means_interactive() {
        assert!(parse(&[]).command.is_none());
    }
}
