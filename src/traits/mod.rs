pub mod ai_provider;
