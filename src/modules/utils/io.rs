use serde_json::Value;
use std::io::{self, Write};

/// Helper function to read a line from stdin
pub fn read_line() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Helper function to prompt for a yes/no answer; an empty reply picks `default`
pub fn prompt_with_confirmation(prompt: &str, confirmation: &str, default: bool) -> io::Result<bool> {
    println!("{}", prompt);
    print!("{} ({}): ", confirmation, if default { "Y/n" } else { "y/N" });
    io::stdout().flush()?;

    let response = read_line()?.to_lowercase();
    Ok(match response.as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    })
}

/// Parse a `key=value` argument into a field for a new admin.
///
/// Values that are valid JSON (numbers, booleans, arrays, objects) keep
/// their type; anything else is stored as a string.
pub fn parse_field(arg: &str) -> Option<(String, Value)> {
    let (key, raw) = arg.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Some((key.to_string(), value))
}
