use serde_json::Value;
use std::io::{self, Read};

/// Attempt to read JSON or YAML from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive).
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

/// Parse piped text as YAML, which also accepts JSON documents.
fn parse_piped(text: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_yaml::from_str(trimmed)?;
    Ok(Some(value))
}

/// Read a typed input from `--input <file>` or, failing that, piped stdin.
pub fn read_file_or_stdin<T: serde::de::DeserializeOwned>(
    path: Option<&str>,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        super::file::read_input(path)
    } else if let Some(data) = read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err(format!("--input <file.json|file.yaml> or stdin required for {what}").into())
    }
}
