// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolving user-supplied input paths to report files.

use crate::{config::InputConfig, errors::InputNotFound};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// Resolves `path` to a report file.
///
/// An existing file is returned as-is. For a directory, the report file is looked for directly
/// inside it, then inside the report subdirectory.
pub fn resolve_input(path: &Utf8Path, config: &InputConfig) -> Result<Utf8PathBuf, InputNotFound> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if !path.is_dir() {
        return Err(InputNotFound::new(path, Vec::new()));
    }

    let candidates = [
        path.join(config.report_file_name()),
        path.join(config.report_dir_name())
            .join(config.report_file_name()),
    ];
    for candidate in &candidates {
        if candidate.is_file() {
            debug!("resolved input `{path}` to `{candidate}`");
            return Ok(candidate.clone());
        }
        debug!("no report at `{candidate}`");
    }

    Err(InputNotFound::new(path, candidates.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConverterConfig;
    use camino_tempfile::Utf8TempDir;
    use camino_tempfile_ext::prelude::*;
    use pretty_assertions::assert_eq;

    fn input_config() -> InputConfig {
        ConverterConfig::default_config().unwrap().input().clone()
    }

    #[test]
    fn file_is_used_as_is() {
        let temp = Utf8TempDir::new().unwrap();
        let file = temp.child("custom.xml");
        file.write_str("<Results/>").unwrap();

        let resolved = resolve_input(file.as_path(), &input_config()).unwrap();
        assert_eq!(resolved, file.as_path());
    }

    #[test]
    fn directory_probing_order() {
        let temp = Utf8TempDir::new().unwrap();
        let nested = temp.child("Report/run_results.xml");
        nested.write_str("<Results/>").unwrap();

        let resolved = resolve_input(temp.path(), &input_config()).unwrap();
        assert_eq!(resolved, nested.as_path());

        let direct = temp.child("run_results.xml");
        direct.write_str("<Results/>").unwrap();
        let resolved = resolve_input(temp.path(), &input_config()).unwrap();
        assert_eq!(resolved, direct.as_path());
    }

    #[test]
    fn directory_without_report() {
        let temp = Utf8TempDir::new().unwrap();
        temp.child("Report/other.xml").write_str("<Results/>").unwrap();

        let err = resolve_input(temp.path(), &input_config()).unwrap_err();
        assert_eq!(err.path(), temp.path());
        assert_eq!(
            err.probed(),
            [
                temp.path().join("run_results.xml"),
                temp.path().join("Report").join("run_results.xml"),
            ]
        );
    }

    #[test]
    fn missing_path() {
        let temp = Utf8TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let err = resolve_input(&missing, &input_config()).unwrap_err();
        assert_eq!(err.path(), missing);
        assert!(err.probed().is_empty());
    }
}
