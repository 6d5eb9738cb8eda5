//! Job kinds.

use crate::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which slice of the test corpus a matrix covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum JobKind {
    IntegrationTest,
    UnitTest,
    AllTest,
}

impl JobKind {
    pub const ALL: [JobKind; 3] = [JobKind::IntegrationTest, JobKind::UnitTest, JobKind::AllTest];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::IntegrationTest => "integration-test",
            JobKind::UnitTest => "unit-test",
            JobKind::AllTest => "all-test",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        JobKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::InvalidKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!("integration-test".parse::<JobKind>().unwrap(), JobKind::IntegrationTest);
        assert_eq!("unit-test".parse::<JobKind>().unwrap(), JobKind::UnitTest);
        assert_eq!("all-test".parse::<JobKind>().unwrap(), JobKind::AllTest);
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = "smoke-test".parse::<JobKind>().unwrap_err();
        assert!(matches!(err, Error::InvalidKind(ref k) if k == "smoke-test"));
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&JobKind::UnitTest).unwrap();
        assert_eq!(json, "\"unit-test\"");
    }
}
