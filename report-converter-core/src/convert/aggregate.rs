// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::AggregationConflict;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// The validated sources and destination of a conversion.
///
/// Creating a plan checks the destination against the sources before anything is read or
/// written.
#[derive(Clone, Debug)]
pub struct AggregationPlan {
    sources: Vec<Utf8PathBuf>,
    destination: Utf8PathBuf,
}

impl AggregationPlan {
    /// Checks that `destination` can be written without clobbering any of `sources`.
    pub fn new(
        sources: impl IntoIterator<Item = Utf8PathBuf>,
        destination: impl Into<Utf8PathBuf>,
    ) -> Result<Self, AggregationConflict> {
        let sources: Vec<_> = sources.into_iter().collect();
        let destination = destination.into();

        if destination.is_dir() {
            return Err(AggregationConflict::DestinationIsDirectory { destination });
        }

        let normalized_destination = normalize(&destination);
        for source in &sources {
            if normalize(source) == normalized_destination {
                return Err(AggregationConflict::DestinationIsSource { destination });
            }
        }

        debug!(
            "writing {} source report(s) to `{destination}`",
            sources.len()
        );
        Ok(Self {
            sources,
            destination,
        })
    }

    /// Returns the source reports, in input order.
    pub fn sources(&self) -> &[Utf8PathBuf] {
        &self.sources
    }

    /// Returns the destination path.
    pub fn destination(&self) -> &Utf8Path {
        &self.destination
    }
}

/// Returns the canonical form of `path`, or of its parent joined with its file name if `path` does
/// not exist yet. Falls back to `path` itself.
fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    if let Ok(canonical) = path.canonicalize_utf8() {
        return canonical;
    }
    let (Some(parent), Some(file_name)) = (path.parent(), path.file_name()) else {
        return path.to_path_buf();
    };
    let parent = if parent.as_str().is_empty() {
        Utf8Path::new(".")
    } else {
        parent
    };
    match parent.canonicalize_utf8() {
        Ok(parent) => parent.join(file_name),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::Utf8TempDir;
    use camino_tempfile_ext::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn destination_equal_to_source() {
        let temp = Utf8TempDir::new().unwrap();
        let a = temp.child("a.xml");
        let b = temp.child("b.xml");
        a.write_str("<Results/>").unwrap();
        b.write_str("<Results/>").unwrap();

        // The same file, spelled differently.
        let destination = temp.path().join("sub/../b.xml");
        std::fs::create_dir_all(temp.path().join("sub")).unwrap();

        let err = AggregationPlan::new(
            [a.as_path().to_path_buf(), b.as_path().to_path_buf()],
            destination.clone(),
        )
        .unwrap_err();
        assert_eq!(err, AggregationConflict::DestinationIsSource { destination });
    }

    #[test]
    fn destination_is_directory() {
        let temp = Utf8TempDir::new().unwrap();
        let a = temp.child("a.xml");
        a.write_str("<Results/>").unwrap();

        let err = AggregationPlan::new([a.as_path().to_path_buf()], temp.path()).unwrap_err();
        assert_eq!(
            err,
            AggregationConflict::DestinationIsDirectory {
                destination: temp.path().to_path_buf()
            }
        );
    }

    #[test]
    fn new_destination() {
        let temp = Utf8TempDir::new().unwrap();
        let a = temp.child("a.xml");
        a.write_str("<Results/>").unwrap();
        let destination = temp.path().join("out/junit.xml");

        let plan = AggregationPlan::new([a.as_path().to_path_buf()], destination.clone()).unwrap();
        assert_eq!(plan.sources(), [a.as_path().to_path_buf()]);
        assert_eq!(plan.destination(), destination);
        assert!(!destination.exists(), "planning does not write anything");
    }
}
