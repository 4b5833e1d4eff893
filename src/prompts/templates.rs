//! Instruction templates, one per [`Operation`].
//!
//! Templates use `{language}` and `{target_language}` placeholders. The source
//! text itself is attached by the message builder in
//! [`crate::helpers::prompt_generator`].

use crate::enums::operation::Operation;
use crate::errors::{ReverseEngineerError, ReverseEngineerResult};

const LANGUAGE: &str = "{language}";
const TARGET_LANGUAGE: &str = "{target_language}";

const REFACTOR_PRINCIPLES: &str = "Please refactor the code to improve readability, maintainability, and adherence to best practices. \
Apply the following where they fit:\n\n\
- SOLID principles (SRP, OCP, LSP, ISP, DIP).\n\
- Clean code: meaningful names, short focused functions, consistent formatting.\n\
- DRY: remove duplication through abstraction and modularity.\n\
- KISS and YAGNI: prefer simple solutions and avoid unnecessary features.\n\
- Separation of concerns and appropriate design patterns.\n\
- Security and performance best practices.\n\
- Clear documentation for the code and any APIs involved.\n\n\
Explain your design choices and show the refactored code.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub preamble: &'static str,
    pub guidance: &'static str,
}

impl PromptTemplate {
    pub const fn for_operation(operation: Operation) -> Self {
        match operation {
            Operation::Analyze => Self {
                preamble: "Analyze the following source code written in {language}.",
                guidance: "Provide a detailed analysis of potential issues along with specific recommendations for fixing them. \
Include a relevant code snippet for each recommendation to demonstrate the solution. \
Do not repeat the original source code in your response; focus on advice, solutions and examples so the developer can make the corrections independently.",
            },
            Operation::IdentifyIssues => Self {
                preamble: "Identify potential issues, vulnerabilities, or areas for improvement in the following {language} code.",
                guidance: "List each finding with its location, why it is a problem, and a suggested fix.",
            },
            Operation::Optimize => Self {
                preamble: "Suggest improvements to optimize performance and security for the following {language} code.",
                guidance: "For each suggestion, explain the expected impact and show the optimized code.",
            },
            Operation::GenerateDocumentation => Self {
                preamble: "Generate comprehensive documentation for the following {language} code.",
                guidance: "Include function/method descriptions, parameters, return values, and overall purpose.",
            },
            Operation::Refactor => Self {
                preamble: "Refactor the following {language} code.",
                guidance: REFACTOR_PRINCIPLES,
            },
            Operation::ExplainAlgorithm => Self {
                preamble: "Explain the algorithm(s) used in the following {language} code in detail.",
                guidance: "Describe the approach, time complexity, and space complexity if applicable.",
            },
            Operation::GenerateTestCases => Self {
                preamble: "Generate comprehensive test cases for the following {language} code.",
                guidance: "Include normal cases, edge cases, and potential error scenarios, using the idiomatic test framework for {language}.",
            },
            Operation::IdentifyDesignPatterns => Self {
                preamble: "Identify and explain any design patterns used in the following {language} code.",
                guidance: "Describe how each pattern is implemented and its purpose in the code.",
            },
            Operation::ConvertLanguage => Self {
                preamble: "Convert the following {language} code to {target_language}.",
                guidance: "Ensure that the functionality remains the same and adhere to the best practices of {target_language}. \
Return the complete converted program and note any behavior that cannot be translated directly.",
            },
            Operation::SecurityAudit => Self {
                preamble: "Perform a comprehensive security audit on the following {language} code.",
                guidance: "Identify potential security vulnerabilities, suggest fixes, and explain the implications of each issue. \
Rate each finding as critical, high, medium or low.",
            },
        }
    }
}

/// Named values interpolated into a template.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptParameters<'a> {
    pub source_language: Option<&'a str>,
    pub target_language: Option<&'a str>,
}

impl<'a> PromptParameters<'a> {
    pub const fn new(source_language: Option<&'a str>, target_language: Option<&'a str>) -> Self {
        Self { source_language, target_language }
    }
}

pub struct PromptRegistry;

impl PromptRegistry {
    pub fn render(operation: Operation, parameters: &PromptParameters<'_>) -> ReverseEngineerResult<String> {
        let language = Self::required(operation, parameters.source_language, "source_language")?;
        let template = PromptTemplate::for_operation(operation);

        let mut prompt = format!("{}\n\n{}", template.preamble, template.guidance).replace(LANGUAGE, language);

        if operation.requires_target_language() {
            let target = Self::required(operation, parameters.target_language, "target_language")?;
            prompt = prompt.replace(TARGET_LANGUAGE, target);
        }

        if prompt.contains(LANGUAGE) || prompt.contains(TARGET_LANGUAGE) {
            return Err(ReverseEngineerError::config_error(
                &format!("Template for '{operation}' has an unresolved placeholder"),
                Some("prompt template"),
                None,
            ));
        }

        Ok(prompt)
    }

    fn required<'a>(operation: Operation, value: Option<&'a str>, field: &'static str) -> ReverseEngineerResult<&'a str> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ReverseEngineerError::MissingParameter { operation, field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn every_operation_renders_with_its_language() {
        for operation in Operation::ALL {
            let params = PromptParameters::new(Some("python"), Some("rust"));
            let prompt = PromptRegistry::render(operation, &params).unwrap();
            assert!(!prompt.is_empty());
            assert!(prompt.contains("python"), "{operation}: {prompt}");
        }
    }

    #[test]
    fn conversion_mentions_both_languages() {
        let params = PromptParameters::new(Some("java"), Some("kotlin"));
        let prompt = PromptRegistry::render(Operation::ConvertLanguage, &params).unwrap();
        assert!(prompt.contains("java"));
        assert!(prompt.contains("kotlin"));
    }

    #[test]
    fn conversion_without_target_fails() {
        let params = PromptParameters::new(Some("java"), None);
        let error = PromptRegistry::render(Operation::ConvertLanguage, &params).unwrap_err();
        assert!(matches!(
            error,
            ReverseEngineerError::MissingParameter { operation: Operation::ConvertLanguage, field: "target_language" }
        ));
    }

    #[test]
    fn blank_source_language_is_missing() {
        let params = PromptParameters::new(Some("   "), None);
        let error = PromptRegistry::render(Operation::Analyze, &params).unwrap_err();
        assert!(matches!(error, ReverseEngineerError::MissingParameter { field: "source_language", .. }));
    }

    #[test]
    fn target_is_ignored_for_other_operations() {
        let params = PromptParameters::new(Some("go"), Some("c"));
        let prompt = PromptRegistry::render(Operation::SecurityAudit, &params).unwrap();
        assert!(!prompt.contains(TARGET_LANGUAGE));
    }

    proptest! {
        #[test]
        fn rendered_prompt_contains_any_language_name(
            index in 0usize..Operation::ALL.len(),
            language in "[a-z][a-z0-9+#]{0,11}",
            target in "[a-z][a-z0-9+#]{0,11}",
        ) {
            let operation = Operation::ALL[index];
            let params = PromptParameters::new(Some(&language), Some(&target));
            let prompt = PromptRegistry::render(operation, &params).unwrap();
            prop_assert!(prompt.contains(&language));
            if operation.requires_target_language() {
                prop_assert!(prompt.contains(&target));
            }
        }
    }
}
