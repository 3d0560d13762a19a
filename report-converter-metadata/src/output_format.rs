// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::OutputFormatParseError;
use serde::{Deserialize, Deserializer};
use std::{fmt, str::FromStr};

/// An output format that reports can be converted into.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum OutputFormat {
    /// JUnit-style XML.
    Junit,

    /// NUnit 3 XML.
    Nunit3,
}

impl OutputFormat {
    /// All known output formats, in the order they are documented.
    pub const ALL: &'static [Self] = &[Self::Junit, Self::Nunit3];

    /// Returns the canonical name of this format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Junit => "junit",
            Self::Nunit3 => "nunit3",
        }
    }

    /// Returns the canonical names of all known formats.
    pub fn variants() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|format| format.as_str())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = OutputFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| OutputFormatParseError::new(s))
    }
}

impl<'de> Deserialize<'de> for OutputFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("junit", OutputFormat::Junit; "lowercase junit")]
    #[test_case("JUnit", OutputFormat::Junit; "mixed case junit")]
    #[test_case(" nunit3 ", OutputFormat::Nunit3; "padded nunit3")]
    fn parse_known_formats(input: &str, expected: OutputFormat) {
        assert_eq!(input.parse::<OutputFormat>().unwrap(), expected);
    }

    #[test]
    fn parse_unknown_format() {
        let err = "xunit".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err.input(), "xunit");
        assert_eq!(
            err.to_string(),
            "unrecognized output format: xunit (known formats: junit, nunit3)"
        );
    }
}
