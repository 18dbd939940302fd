//! Minimal `.env` reader.
//!
//! Variables are kept in memory and looked up explicitly; the process
//! environment is never modified.

use anyhow::{Context, Result};
use std::{collections::HashMap, fs, io, path::Path};
use tracing::warn;

pub const DEFAULT_FILENAME: &str = ".env";

#[derive(Debug, Default, Clone)]
pub struct Dotenv {
    vars: HashMap<String, String>,
}

impl Dotenv {
    /// Read a `.env` file. Returns `Ok(None)` if the file does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        Ok(Some(Self::parse(&contents)))
    }

    /// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped,
    /// an `export ` prefix is allowed, matching quotes around the value are
    /// stripped, and ` # comment` tails on unquoted values are dropped.
    /// Lines that cannot be parsed are skipped with a warning.
    pub fn parse(contents: &str) -> Self {
        let mut vars = HashMap::new();

        for (line_num, line) in contents.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match parse_line(trimmed) {
                Ok((key, value)) => {
                    vars.insert(key, value);
                }
                Err(msg) => warn!(line = line_num + 1, "Skipping .env line: {msg}"),
            }
        }

        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

fn parse_line(line: &str) -> Result<(String, String), &'static str> {
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=').ok_or("invalid format: missing '='")?;

    let key = key.trim();
    if key.is_empty() {
        return Err("empty key");
    }

    Ok((key.to_string(), clean_value(value.trim()).to_string()))
}

fn clean_value(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.split_once(quote)) {
            return inner.0;
        }
    }

    // Unquoted: a `#` preceded by whitespace starts a comment.
    let end = value
        .char_indices()
        .find(|&(i, c)| c == '#' && value[..i].ends_with(char::is_whitespace))
        .map_or(value.len(), |(i, _)| i);
    value[..end].trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_comments_and_quotes() {
        let env = Dotenv::parse(
            "# weather\n\
             WEATHER_API_KEY=abc123\n\
             \n\
             export QUOTED=\"with spaces\"\n\
             SINGLE='x'\n\
             EMPTY=\n",
        );

        assert_eq!(env.get("WEATHER_API_KEY"), Some("abc123"));
        assert_eq!(env.get("QUOTED"), Some("with spaces"));
        assert_eq!(env.get("SINGLE"), Some("x"));
        assert_eq!(env.get("EMPTY"), Some(""));
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn unmatched_quote_is_kept() {
        let env = Dotenv::parse("KEY=\"abc");
        assert_eq!(env.get("KEY"), Some("\"abc"));
    }

    #[test]
    fn inline_comments_are_stripped_from_unquoted_values() {
        let env = Dotenv::parse(
            "WEATHER_API_KEY=abc # personal key\n\
             HASH=a#b\n\
             QUOTED=\"x # y\" # trailing\n",
        );

        assert_eq!(env.get("WEATHER_API_KEY"), Some("abc"));
        assert_eq!(env.get("HASH"), Some("a#b"));
        assert_eq!(env.get("QUOTED"), Some("x # y"));
    }

    #[test]
    fn unparseable_lines_are_skipped() {
        let env = Dotenv::parse("WEATHER_API_KEY=abc\nsome stray note\n=no key\nB=2\n");

        assert_eq!(env.get("WEATHER_API_KEY"), Some("abc"));
        assert_eq!(env.get("B"), Some("2"));
        assert_eq!(env.get("some stray note"), None);
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Dotenv::from_file(&dir.path().join(DEFAULT_FILENAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILENAME);
        fs::write(&path, "WEATHER_API_KEY=from-file\n").unwrap();

        let env = Dotenv::from_file(&path).unwrap().expect("file exists");
        assert_eq!(env.get("WEATHER_API_KEY"), Some("from-file"));
    }
}
