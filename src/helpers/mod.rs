pub mod command_line;
pub mod config_helper;
pub mod language_helper;
pub mod prompt_generator;
pub mod terminal;
