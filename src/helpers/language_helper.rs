use std::path::Path;
use crate::config::constants::SUPPORTED_FILE_EXTENSIONS;

pub struct LanguageHelper;

impl LanguageHelper {
    /// Guesses the language from the locator's file extension. URLs are
    /// judged by their path, ignoring query and fragment.
    pub fn infer_from_locator(locator: &str) -> Option<&'static str> {
        let path = reqwest::Url::parse(locator)
            .ok()
            .filter(|url| url.has_host())
            .map_or_else(|| locator.to_string(), |url| url.path().to_string());

        let extension = Path::new(&path).extension()?.to_str()?.to_ascii_lowercase();

        SUPPORTED_FILE_EXTENSIONS
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, language)| *language)
    }
}
