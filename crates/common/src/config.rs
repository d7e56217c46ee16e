//! Plugin parameter parsing and generator options
//!
//! protoc hands plugin options over as a single string, e.g.
//! `--twirp_flow_out=version=v6:./out` arrives as `version=v6`.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Twirp protocol revision the generated clients target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TwirpVersion {
    #[default]
    V5,
    V6,
}

impl TwirpVersion {
    /// URL path prefix placed before `/{package}.{Service}/`
    pub fn path_prefix(self) -> &'static str {
        match self {
            TwirpVersion::V5 => "/twirp",
            TwirpVersion::V6 => "",
        }
    }
}

impl FromStr for TwirpVersion {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "v5" => Ok(TwirpVersion::V5),
            "v6" => Ok(TwirpVersion::V6),
            other => Err(GeneratorError::Config(format!(
                "version is {}, must be v5 or v6",
                other
            ))),
        }
    }
}

impl fmt::Display for TwirpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwirpVersion::V5 => write!(f, "v5"),
            TwirpVersion::V6 => write!(f, "v6"),
        }
    }
}

/// Split a `key=value,key=value` parameter string
///
/// Empty segments are ignored and a repeated key keeps its last value.
/// A segment without `=` is rejected.
pub fn parse_parameters(parameter: &str) -> Result<BTreeMap<String, String>> {
    let mut params = BTreeMap::new();

    for pair in parameter.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }

        let (key, value) = pair.split_once('=').ok_or_else(|| {
            GeneratorError::Config(format!(
                "invalid parameter '{}', expected key=value",
                pair
            ))
        })?;
        params.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(params)
}

/// Options controlling a generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub version: TwirpVersion,
}

impl GeneratorOptions {
    /// Build options from the raw plugin parameter, if protoc sent one
    pub fn from_parameter(parameter: Option<&str>) -> Result<Self> {
        let params = match parameter {
            Some(raw) => parse_parameters(raw)?,
            None => BTreeMap::new(),
        };

        let version = match params.get("version") {
            Some(v) => v.parse()?,
            None => TwirpVersion::default(),
        };

        for key in params.keys().filter(|k| k.as_str() != "version") {
            tracing::debug!(key = %key, "ignoring unknown plugin parameter");
        }

        Ok(Self { version })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_parameters() {
        let params = parse_parameters("version=v6,foo=bar").unwrap();
        assert_eq!(params.get("version").map(String::as_str), Some("v6"));
        assert_eq!(params.get("foo").map(String::as_str), Some("bar"));
    }

    #[test]
    fn test_parse_parameters_last_wins_and_skips_empty() {
        let params = parse_parameters("version=v5,,version=v6").unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["version"], "v6");
        assert!(parse_parameters("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_parameters_rejects_bare_key() {
        let err = parse_parameters("version").unwrap_err();
        assert!(matches!(err, GeneratorError::Config(_)));
    }

    #[test]
    fn test_default_version_is_v5() {
        let options = GeneratorOptions::from_parameter(None).unwrap();
        assert_eq!(options.version, TwirpVersion::V5);
        assert_eq!(options.version.path_prefix(), "/twirp");

        let options = GeneratorOptions::from_parameter(Some("other=1")).unwrap();
        assert_eq!(options.version, TwirpVersion::V5);
    }

    #[test]
    fn test_v6_has_empty_prefix() {
        let options = GeneratorOptions::from_parameter(Some("version=v6")).unwrap();
        assert_eq!(options.version, TwirpVersion::V6);
        assert_eq!(options.version.path_prefix(), "");
    }

    #[test]
    fn test_unknown_version_is_config_error() {
        let err = GeneratorOptions::from_parameter(Some("version=v7")).unwrap_err();
        assert!(matches!(err, GeneratorError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Config error: version is v7, must be v5 or v6"
        );
    }

    #[test]
    fn test_version_display_round_trips() {
        for version in [TwirpVersion::V5, TwirpVersion::V6] {
            assert_eq!(version.to_string().parse::<TwirpVersion>().unwrap(), version);
        }
    }
}
