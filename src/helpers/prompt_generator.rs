/// Builds the user message: the rendered instruction followed by the source
/// in a fenced block.
pub fn generate_prompt(instruction: &str, source_text: &str) -> String {
    let fence = fence_for(source_text);
    let mut prompt = String::with_capacity(instruction.len() + source_text.len() + 16);
    prompt.push_str(instruction.trim_end());
    prompt.push_str("\n\n");
    prompt.push_str(&fence);
    prompt.push('\n');
    prompt.push_str(source_text.trim_end_matches('\n'));
    prompt.push('\n');
    prompt.push_str(&fence);
    prompt.push('\n');
    prompt
}

/// A backtick fence longer than any run of backticks inside the source.
fn fence_for(source_text: &str) -> String {
    let longest = source_text
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}
