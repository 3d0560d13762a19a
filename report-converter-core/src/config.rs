// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for report-converter.
//!
//! The embedded default config is always read first. A user-supplied TOML file, if any, is layered
//! on top of it, so every key has a value after loading.

use crate::errors::ConfigParseError;
use camino::Utf8Path;
use config::{Config, File, FileFormat};
use report_converter_metadata::OutputFormat;
use serde::Deserialize;

/// Overall configuration for report-converter.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConverterConfig {
    input: InputConfig,
    junit: JunitConfig,
    output: OutputConfig,
}

impl ConverterConfig {
    /// The default configuration, embedded into the binary.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    /// Reads the configuration, layering `config_file` (if provided) on top of the defaults.
    pub fn from_sources(config_file: Option<&Utf8Path>) -> Result<Self, ConfigParseError> {
        let mut builder =
            Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml));
        if let Some(config_file) = config_file {
            builder = builder.add_source(File::new(config_file.as_str(), FileFormat::Toml));
        }

        let source = config_file.unwrap_or(Utf8Path::new("<default config>"));
        builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|err| ConfigParseError::new(source, err))
    }

    /// Returns the default configuration.
    pub fn default_config() -> Result<Self, ConfigParseError> {
        Self::from_sources(None)
    }

    /// Returns input probing configuration.
    pub fn input(&self) -> &InputConfig {
        &self.input
    }

    /// Returns JUnit output configuration.
    pub fn junit(&self) -> &JunitConfig {
        &self.junit
    }

    /// Returns general output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Where to look for a report when an input path is a directory.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InputConfig {
    report_file_name: String,
    report_dir_name: String,
}

impl InputConfig {
    /// Returns the file name of the report.
    pub fn report_file_name(&self) -> &str {
        &self.report_file_name
    }

    /// Returns the name of the subdirectory that may contain the report.
    pub fn report_dir_name(&self) -> &str {
        &self.report_dir_name
    }
}

/// JUnit output configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JunitConfig {
    report_name: String,
    testcase_separator: String,
    store_extension_data: bool,
}

impl JunitConfig {
    /// Returns the name of the JUnit report.
    pub fn report_name(&self) -> &str {
        &self.report_name
    }

    /// Returns the separator placed between result names in test case names.
    pub fn testcase_separator(&self) -> &str {
        &self.testcase_separator
    }

    /// Returns true if activity extension data should be written to system-out.
    pub fn store_extension_data(&self) -> bool {
        self.store_extension_data
    }
}

/// General output configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    default_format: OutputFormat,
}

impl OutputConfig {
    /// Returns the output format used when none is specified.
    pub fn default_format(&self) -> OutputFormat {
        self.default_format
    }
}
