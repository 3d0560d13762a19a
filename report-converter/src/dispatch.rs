// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError, Result,
    output::{OutputContext, OutputOpts},
};
use camino::Utf8PathBuf;
use clap::{Args, Parser};
use report_converter_core::{
    config::ConverterConfig,
    convert::{AggregationPlan, converter_for, write_output},
    input::resolve_input,
    reader::ReportReader,
};
use report_converter_metadata::{ConverterExitCode, OutputFormat};
use tracing::info;

/// Converts GUI, API and business process test reports into CI result formats.
///
/// Each INPUT is either a `run_results.xml` report or a directory containing one, directly or in
/// a `Report` subdirectory.
#[derive(Debug, Parser)]
#[command(version, name = "report-converter")]
pub struct ReportConverterApp {
    /// Report files or directories to convert
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<Utf8PathBuf>,

    /// File to write the converted report to
    #[arg(long, short, value_name = "FILE")]
    output: Utf8PathBuf,

    /// Output format: junit, nunit3 [default: from config]
    #[arg(long, short, value_name = "FORMAT")]
    format: Option<String>,

    /// Convert several reports into a single output file
    #[arg(long)]
    aggregate: bool,

    #[command(flatten)]
    config_opts: ConfigOpts,

    #[command(flatten)]
    output_opts: OutputOpts,
}

#[derive(Debug, Args)]
struct ConfigOpts {
    /// Config file layered on top of the defaults
    #[arg(long, value_name = "PATH", env = "REPORT_CONVERTER_CONFIG")]
    config_file: Option<Utf8PathBuf>,
}

impl ConfigOpts {
    fn make_config(&self) -> Result<ConverterConfig> {
        Ok(ConverterConfig::from_sources(self.config_file.as_deref())?)
    }
}

impl ReportConverterApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output_opts.init()
    }

    /// Executes the app, returning the process exit code on success.
    pub fn exec(self) -> Result<i32> {
        let config = self.config_opts.make_config()?;
        let format = match &self.format {
            Some(format) => format.parse::<OutputFormat>()?,
            None => config.output().default_format(),
        };

        if self.inputs.len() > 1 && !self.aggregate {
            return Err(ExpectedError::MultipleInputs {
                count: self.inputs.len(),
            });
        }

        let sources = self
            .inputs
            .iter()
            .map(|input| resolve_input(input, config.input()))
            .collect::<Result<Vec<_>, _>>()?;
        let plan = AggregationPlan::new(sources, self.output)?;
        let converter = converter_for(format, &config)?;

        let reader = ReportReader::new();
        let reports = plan
            .sources()
            .iter()
            .map(|source| reader.read(source))
            .collect::<Result<Vec<_>, _>>()?;

        let contents = converter.render(&reports)?;
        write_output(plan.destination(), &contents)?;
        info!(
            "converted {} report(s) to {format} at `{}`",
            reports.len(),
            plan.destination(),
        );

        Ok(ConverterExitCode::OK)
    }
}
