//! Language version sets.

use crate::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages whose toolchain version parameterizes a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Dotnet,
    Go,
    Nodejs,
    Python,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Dotnet,
        Language::Go,
        Language::Nodejs,
        Language::Python,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Dotnet => "dotnet",
            Language::Go => "go",
            Language::Nodejs => "nodejs",
            Language::Python => "python",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| Error::UnknownLanguage(s.to_string()))
    }
}

/// A total mapping from every known language to a version spec.
///
/// Version strings are passed through untouched (`1.19.x`, `18.x`, ...), they
/// are interpreted by the toolchain setup actions downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VersionSet {
    pub name: String,
    pub dotnet: String,
    pub go: String,
    pub nodejs: String,
    pub python: String,
}

impl VersionSet {
    pub const MINIMUM: &'static str = "minimum";
    /// Label carried by the minimum set in generated matrices.
    pub const MINIMUM_LABEL: &'static str = "minimal";
    pub const CURRENT: &'static str = "current";

    /// Oldest supported toolchains.
    pub fn minimum() -> Self {
        Self {
            name: Self::MINIMUM_LABEL.to_string(),
            dotnet: "6.0.x".to_string(),
            go: "1.18.x".to_string(),
            nodejs: "14.x".to_string(),
            python: "3.9.x".to_string(),
        }
    }

    /// Latest supported toolchains.
    pub fn current() -> Self {
        Self {
            name: Self::CURRENT.to_string(),
            dotnet: "6.0.x".to_string(),
            go: "1.19.x".to_string(),
            nodejs: "18.x".to_string(),
            python: "3.10.x".to_string(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Dotnet => &self.dotnet,
            Language::Go => &self.go,
            Language::Nodejs => &self.nodejs,
            Language::Python => &self.python,
        }
    }

    pub fn set(&mut self, language: Language, version: impl Into<String>) {
        let version = version.into();
        match language {
            Language::Dotnet => self.dotnet = version,
            Language::Go => self.go = version,
            Language::Nodejs => self.nodejs = version,
            Language::Python => self.python = version,
        }
    }

    /// Render as `lang=version,...` in [`Language::ALL`] order.
    pub fn to_spec(&self) -> String {
        Language::ALL
            .iter()
            .map(|lang| format!("{}={}", lang, self.get(*lang)))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse() {
        assert_eq!("nodejs".parse::<Language>().unwrap(), Language::Nodejs);
        let err = "node".parse::<Language>().unwrap_err();
        assert!(matches!(err, Error::UnknownLanguage(ref l) if l == "node"));
    }

    #[test]
    fn test_set_overrides_single_language() {
        let mut set = VersionSet::minimum();
        set.set(Language::Go, "1.20.x");
        assert_eq!(set.get(Language::Go), "1.20.x");
        assert_eq!(set.get(Language::Nodejs), "14.x");
    }

    #[test]
    fn test_to_spec() {
        assert_eq!(
            VersionSet::current().to_spec(),
            "dotnet=6.0.x,go=1.19.x,nodejs=18.x,python=3.10.x"
        );
    }

    #[test]
    fn test_serialized_field_order() {
        let json = serde_json::to_string(&VersionSet::minimum()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"minimal","dotnet":"6.0.x","go":"1.18.x","nodejs":"14.x","python":"3.9.x"}"#
        );
    }
}
