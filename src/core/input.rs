use std::fs;
use std::io::Read;
use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{PbsDoError, Result};

/// Find/replace substitution applied to every token.
#[derive(Debug, Clone)]
pub struct Substitution {
    pattern: Regex,
    replacement: String,
}

/// Inclusion or exclusion filter over tokens.
#[derive(Debug, Clone)]
pub struct TokenFilter {
    pattern: Regex,
    /// Drop matching tokens instead of keeping them.
    omit: bool,
}

/// Tokenize -> substitute -> filter pipeline over the raw input text.
///
/// Each step is optional apart from tokenizing and the order is fixed:
/// tokens are produced by splitting on the delimiter, rewritten by the
/// substitution, then kept or dropped by the filter.
#[derive(Debug, Clone)]
pub struct TokenPipeline {
    delimiter: Regex,
    substitution: Option<Substitution>,
    filter: Option<TokenFilter>,
}

impl TokenPipeline {
    /// Compile a pipeline from user-supplied patterns.
    pub fn new(
        delimiter: &str,
        resub: Option<(&str, &str)>,
        filter: Option<(&str, bool)>,
    ) -> Result<Self> {
        let substitution = match resub {
            Some((pattern, replacement)) => Some(Substitution {
                pattern: compile(pattern)?,
                replacement: replacement.to_string(),
            }),
            None => None,
        };
        let filter = match filter {
            Some((pattern, omit)) => Some(TokenFilter {
                pattern: compile(pattern)?,
                omit,
            }),
            None => None,
        };
        Ok(Self {
            delimiter: compile(delimiter)?,
            substitution,
            filter,
        })
    }

    /// Run the full pipeline over raw input text.
    pub fn tokens(&self, raw: &str) -> Vec<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        let tokens: Vec<String> = self
            .delimiter
            .split(trimmed)
            .map(|token| self.substitute(token))
            .filter(|token| self.keep(token))
            .collect();
        debug!("Input pipeline produced {} tokens", tokens.len());
        tokens
    }

    fn substitute(&self, token: &str) -> String {
        match &self.substitution {
            Some(sub) => sub
                .pattern
                .replace_all(token, sub.replacement.as_str())
                .into_owned(),
            None => token.to_string(),
        }
    }

    fn keep(&self, token: &str) -> bool {
        match &self.filter {
            Some(filter) => filter.pattern.is_match(token) != filter.omit,
            None => true,
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| PbsDoError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })
}

/// Read raw input from the argument file, or standard input when none is
/// given.
pub fn read_raw(arg_file: Option<&Path>) -> Result<String> {
    match arg_file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| PbsDoError::ArgFileRead(path.to_path_buf(), e)),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Check that every token names an existing path, reporting each one that
/// does not.
pub fn check_arguments(tokens: &[String]) -> Result<()> {
    let missing: Vec<String> = tokens
        .iter()
        .filter(|token| !Path::new(token.as_str()).exists())
        .cloned()
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    for path in &missing {
        warn!("{} does not exist", path);
    }
    Err(PbsDoError::MissingArguments(missing))
}
