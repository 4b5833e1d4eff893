use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "REVERSE_ENGINEER_CONFIG_PATH";
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const HOME_CONFIG_DIR: &str = ".reverse-engineer";

pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_RATE_LIMIT: u32 = 50;
pub const DEFAULT_RATE_LIMIT_TIME_FRAME_SECS: u64 = 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

pub const MAX_RATE_LIMIT_WAITS: usize = 3;
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

pub const INTERACTIVE_PROMPT: &str = "Enter a command (or 'exit' to quit): ";
pub const EXIT_TOKENS: &[&str] = &["exit", "quit"];

pub const SUPPORTED_FILE_EXTENSIONS: &[(&str, &str)] = &[
    ("rs", "rust"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("mjs", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("py", "python"),
    ("java", "java"),
    ("kt", "kotlin"),
    ("cpp", "cpp"),
    ("cc", "cpp"),
    ("cxx", "cpp"),
    ("hpp", "cpp"),
    ("c", "c"),
    ("h", "c"),
    ("cs", "csharp"),
    ("go", "go"),
    ("php", "php"),
    ("rb", "ruby"),
    ("swift", "swift"),
    ("asm", "assembly"),
    ("s", "assembly"),
    ("sh", "shell"),
    ("sql", "sql"),
    ("html", "html"),
    ("css", "css"),
];

pub const fn timeout_duration(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}
