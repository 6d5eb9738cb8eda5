//! Test selection filters.
//!
//! The partitioner describes a group's tests as a list of anchored exact
//! matches, `-run='^TestOne$,^TestTwo$'`. `go test` treats a comma inside
//! `-run` as a subtest separator, so the list has to be rewritten as a single
//! anchored alternation, `-run ^(TestOne|TestTwo)$`.
//!
//! [`TestFilter::parse`] reads the partitioner syntax and the formatting
//! methods produce the native one.

use crate::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static ANCHORED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\^([^\^$,|()]+)\$$").expect("anchored name pattern"));

/// A parsed set of exact test names, optionally tied to a command flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TestFilter {
    /// Flag the filter was attached to, e.g. `-run`.
    pub flag: Option<String>,
    pub names: Vec<String>,
}

impl TestFilter {
    pub fn new(names: Vec<String>) -> Self {
        Self { flag: None, names }
    }

    /// Parse `[-flag=]['^A$,^B$']`.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        let (flag, body) = match input.strip_prefix('-') {
            Some(_) => {
                let (flag, rest) = input
                    .split_once('=')
                    .ok_or_else(|| Error::InvalidTestFilter(input.to_string()))?;
                (Some(flag.to_string()), rest)
            }
            None => (None, input),
        };

        let body = unquote(body).ok_or_else(|| Error::InvalidTestFilter(input.to_string()))?;

        let names = if body.is_empty() {
            Vec::new()
        } else {
            body.split(',')
                .map(|atom| {
                    ANCHORED_NAME
                        .captures(atom)
                        .and_then(|caps| caps.get(1))
                        .map(|m| m.as_str().to_string())
                        .ok_or_else(|| Error::InvalidTestFilter(input.to_string()))
                })
                .collect::<Result<Vec<_>>>()?
        };

        Ok(Self { flag, names })
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The anchored alternation, `^(A|B)$`, or `None` when no tests remain.
    pub fn native_pattern(&self) -> Option<String> {
        if self.names.is_empty() {
            return None;
        }
        Some(format!("^({})$", self.names.join("|")))
    }

    /// The pattern with its flag re-attached as a separate argument,
    /// `-run ^(A|B)$`.
    pub fn native_option(&self) -> Option<String> {
        let pattern = self.native_pattern()?;
        Some(match &self.flag {
            Some(flag) => format!("{} {}", flag, pattern),
            None => pattern,
        })
    }
}

impl fmt::Display for TestFilter {
    /// Formats back into the partitioner syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .names
            .iter()
            .map(|name| format!("^{}$", name))
            .collect::<Vec<_>>()
            .join(",");
        match &self.flag {
            Some(flag) => write!(f, "{}='{}'", flag, body),
            None => write!(f, "'{}'", body),
        }
    }
}

fn unquote(body: &str) -> Option<&str> {
    match (body.strip_prefix('\''), body.ends_with('\'')) {
        (Some(inner), true) => inner.strip_suffix('\''),
        (None, false) => Some(body),
        _ => None,
    }
}
