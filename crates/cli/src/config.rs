//! Environment-driven configuration.

use std::path::PathBuf;
use std::str::FromStr;

use tallysheet_invoicing::document::DEFAULT_COMPANY;
use tallysheet_invoicing::{Grouping, NegativeInput};

pub const ENV_COMPANY: &str = "TALLYSHEET_COMPANY";
pub const ENV_GROUPING: &str = "TALLYSHEET_GROUPING";
pub const ENV_NEGATIVE_INPUT: &str = "TALLYSHEET_NEGATIVE_INPUT";
pub const ENV_OUTPUT: &str = "TALLYSHEET_OUTPUT";

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub company_name: String,
    pub grouping: Grouping,
    pub negative_input: NegativeInput,
    /// Where to write the document; stdout when absent.
    pub output: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY.to_string(),
            grouping: Grouping::default(),
            negative_input: NegativeInput::default(),
            output: None,
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. Unrecognised values fall back to the
    /// default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let company_name = lookup(ENV_COMPANY)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.company_name);

        let grouping = parse_or_default(&lookup, ENV_GROUPING, defaults.grouping);
        let negative_input = parse_or_default(&lookup, ENV_NEGATIVE_INPUT, defaults.negative_input);

        let output = lookup(ENV_OUTPUT)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            company_name,
            grouping,
            negative_input,
            output,
        }
    }
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!(key, value = %raw, error = %e, "ignoring unrecognised setting");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> CliConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config(&[]), CliConfig::default());
        assert_eq!(CliConfig::default().company_name, "PACIFIC LEATHER COMPANY");
    }

    #[test]
    fn reads_every_setting() {
        let cfg = config(&[
            (ENV_COMPANY, "  Hides & Skins  "),
            (ENV_GROUPING, "western"),
            (ENV_NEGATIVE_INPUT, "reject"),
            (ENV_OUTPUT, "/tmp/invoice.html"),
        ]);
        assert_eq!(cfg.company_name, "Hides & Skins");
        assert_eq!(cfg.grouping, Grouping::Western);
        assert_eq!(cfg.negative_input, NegativeInput::Reject);
        assert_eq!(cfg.output, Some(PathBuf::from("/tmp/invoice.html")));
    }

    #[test]
    fn unrecognised_values_fall_back() {
        let cfg = config(&[
            (ENV_COMPANY, "   "),
            (ENV_GROUPING, "roman"),
            (ENV_NEGATIVE_INPUT, "maybe"),
            (ENV_OUTPUT, ""),
        ]);
        assert_eq!(cfg, CliConfig::default());
    }
}
