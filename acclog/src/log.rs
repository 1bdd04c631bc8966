use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;

/// How the value following a key is located in a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The key is matched as an exact substring and the value is the first
    /// whitespace-delimited token after it, e.g. `Acc1 = 0.75`.
    Exact(&'static str),
    /// The value is the token after the first whitespace-delimited token
    /// containing the key, e.g. `Acc1: 0.75`.
    Token(&'static str),
}

impl Rule {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Exact(key) | Self::Token(key) => *key,
        }
    }

    /// Extracts the value for this rule. Returns `None` if no value follows
    /// the key.
    pub fn extract(&self, line: &str) -> Result<Option<f64>, Report> {
        let token = match self {
            Self::Exact(key) => line
                .split_once(key)
                .and_then(|(_, rest)| rest.split_whitespace().next()),
            Self::Token(key) => {
                let tokens: Vec<_> = line.split_whitespace().collect();
                tokens
                    .iter()
                    .position(|token| token.contains(key))
                    .and_then(|index| tokens.get(index + 1))
                    .copied()
            }
        };
        token.map(parse_value).transpose()
    }
}

/// Last accuracy: the legacy `Acc1 =` format first, then the generic one.
pub const LAST_ACCURACY: &[Rule] =
    &[Rule::Exact("Acc1 ="), Rule::Token("Acc1")];

/// Best accuracy, in order of precedence.
pub const BEST_ACCURACY: &[Rule] = &[
    Rule::Exact("Best Acc1"),
    Rule::Exact("Best_Acc1"),
    Rule::Exact("Best"),
];

/// Picks the first rule whose key appears in `line`.
pub fn select<'r>(rules: &'r [Rule], line: &str) -> Option<&'r Rule> {
    rules.iter().find(|rule| line.contains(rule.key()))
}

/// Applies the first matching rule. Returns `Ok(None)` if none of the keys is
/// present or if the matching key is not followed by a value.
pub fn extract_first(
    rules: &[Rule],
    line: &str,
) -> Result<Option<f64>, Report> {
    match select(rules, line) {
        Some(rule) => rule.extract(line),
        None => Ok(None),
    }
}

/// Extracts the value following `key` in a tokenized line, accepting both
/// `key value` and `key = value`.
pub fn value_after_key(line: &str, key: &str) -> Result<f64, Report> {
    let tokens: Vec<_> = line.split_whitespace().collect();
    let index = tokens
        .iter()
        .position(|token| token.contains(key))
        .ok_or_else(|| {
            eyre::eyre!("key {:?} not found in line {:?}", key, line)
        })?;

    let next = tokens.get(index + 1).ok_or_else(|| {
        eyre::eyre!("key {:?} is not followed by a value in {:?}", key, line)
    })?;
    if let Ok(value) = next.parse::<f64>() {
        return Ok(value);
    }
    let after = tokens.get(index + 2).ok_or_else(|| {
        eyre::eyre!("key {:?} is not followed by a value in {:?}", key, line)
    })?;
    parse_value(after).wrap_err_with(|| format!("parse value of {:?}", key))
}

fn parse_value(token: &str) -> Result<f64, Report> {
    token
        .parse::<f64>()
        .wrap_err_with(|| format!("invalid number {:?}", token))
}
