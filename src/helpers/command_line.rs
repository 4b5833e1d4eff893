use crate::errors::{ReverseEngineerError, ReverseEngineerResult};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Splits an interactive command line into arguments.
///
/// Whitespace separates arguments. Single quotes keep everything literally.
/// Inside double quotes a backslash only escapes `"` or `\`, so quoted
/// Windows paths such as `"C:\src\main.rs"` survive intact. Outside quotes a
/// backslash escapes the next character.
pub fn split_command_line(line: &str) -> ReverseEngineerResult<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote = Quote::None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Quote::None, c) if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            (Quote::None, '\'') => {
                quote = Quote::Single;
                in_arg = true;
            }
            (Quote::None, '"') => {
                quote = Quote::Double;
                in_arg = true;
            }
            (Quote::None, '\\') => {
                in_arg = true;
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (Quote::Single, '\'') | (Quote::Double, '"') => quote = Quote::None,
            (Quote::Double, '\\') => match chars.peek().copied() {
                Some(next) if next == '"' || next == '\\' => {
                    current.push(next);
                    chars.next();
                }
                _ => current.push('\\'),
            },
            (_, c) => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if quote != Quote::None {
        return Err(ReverseEngineerError::input_error(line, "unterminated quote"));
    }

    if in_arg {
        args.push(current);
    }

    Ok(args)
}
