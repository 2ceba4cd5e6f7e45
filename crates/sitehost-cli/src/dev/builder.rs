//! Site builder: replaces the output directory with a fresh copy of the
//! source tree, nested under the app name.
//!
//! Every build is a full replace. The whole output directory is removed
//! first, including any other app names previously built there, so the
//! result never mixes old and new files.

use crate::error::BuildError;
use crate::ui;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// What to copy and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Site source tree
    pub source: PathBuf,
    /// Output root; removed entirely on every build
    pub output: PathBuf,
    /// Directory created under `output` to hold the copy
    pub app_name: String,
}

impl BuildRequest {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>, app_name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            app_name: app_name.into(),
        }
    }

    /// `output/app_name`
    pub fn destination(&self) -> PathBuf {
        self.output.join(&self.app_name)
    }

    /// Reject a source and output where one contains the other; clearing the
    /// output would delete the source or vice versa.
    pub fn check_layout(&self) -> Result<(), BuildError> {
        if self.source.starts_with(&self.output) || self.output.starts_with(&self.source) {
            return Err(BuildError::OverlappingPaths {
                source_dir: self.source.clone(),
                output_dir: self.output.clone(),
            });
        }
        Ok(())
    }
}

/// Result of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildReport {
    /// Source was copied.
    Built {
        destination: PathBuf,
        files: u64,
        bytes: u64,
        duration: Duration,
    },
    /// Source did not exist; output was cleared and nothing copied.
    SourceMissing { source: PathBuf },
}

impl BuildReport {
    pub fn is_built(&self) -> bool {
        matches!(self, BuildReport::Built { .. })
    }
}

/// Replace `request.output` with a copy of `request.source` under
/// `request.app_name`.
///
/// A missing source is reported as [`BuildReport::SourceMissing`] with a
/// warning, not an error. Any filesystem failure while removing or copying is
/// returned as-is; there are no retries.
///
/// # Errors
///
/// - [`BuildError::OverlappingPaths`] if one directory contains the other
/// - [`BuildError::RemoveOutput`] if the old output can't be removed
/// - [`BuildError::CopyFailed`] / [`BuildError::Walk`] on copy failures
pub fn build_site(request: &BuildRequest) -> Result<BuildReport, BuildError> {
    let start = Instant::now();
    request.check_layout()?;

    remove_output(&request.output)?;

    if !request.source.exists() {
        ui::warning(&format!(
            "Source directory not found: {}",
            request.source.display()
        ));
        tracing::warn!(source = %request.source.display(), "build skipped, source missing");
        return Ok(BuildReport::SourceMissing {
            source: request.source.clone(),
        });
    }

    let destination = request.destination();
    let (files, bytes) = copy_tree(&request.source, &destination)?;
    let duration = start.elapsed();

    ui::success(&format!(
        "Built site: {} -> {} ({} files, {} in {})",
        request.source.display(),
        destination.display(),
        files,
        ui::format_size(bytes),
        ui::format_duration(duration)
    ));
    tracing::debug!(files, bytes, "build finished");

    Ok(BuildReport::Built {
        destination,
        files,
        bytes,
        duration,
    })
}

/// Builder bound to one request, used by the lifecycle controller.
///
/// The copy runs on Tokio's blocking pool so the runtime keeps driving
/// signal handling while a large tree is copied.
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    request: BuildRequest,
}

impl SiteBuilder {
    pub fn new(request: BuildRequest) -> Self {
        Self { request }
    }

    pub fn request(&self) -> &BuildRequest {
        &self.request
    }

    /// Run [`build_site`] off the async runtime.
    pub async fn build(&self) -> Result<BuildReport, BuildError> {
        let request = self.request.clone();
        let spinner = ui::Spinner::new(&format!("Copying {}...", request.source.display()));

        let result = tokio::task::spawn_blocking(move || build_site(&request))
            .await
            .map_err(|e| BuildError::Task(e.to_string()))
            .and_then(|result| result);

        match &result {
            Ok(_) => spinner.finish("Site copied"),
            Err(_) => spinner.fail("Build failed"),
        }
        result
    }
}

fn remove_output(output: &Path) -> Result<(), BuildError> {
    let metadata = match fs::symlink_metadata(output) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(BuildError::RemoveOutput {
                path: output.to_path_buf(),
                source,
            })
        }
    };

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(output)
    } else {
        fs::remove_file(output)
    };

    removed.map_err(|source| BuildError::RemoveOutput {
        path: output.to_path_buf(),
        source,
    })
}

/// Copy `source` recursively to `destination`, following symlinks.
///
/// Returns (files copied, bytes copied).
fn copy_tree(source: &Path, destination: &Path) -> Result<(u64, u64), BuildError> {
    let mut files = 0u64;
    let mut bytes = 0u64;

    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = destination.join(relative);

        let copy_err = |source_err: std::io::Error| BuildError::CopyFailed {
            from: entry.path().to_path_buf(),
            to: target.clone(),
            source: source_err,
        };

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(copy_err)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(copy_err)?;
            }
            bytes += fs::copy(entry.path(), &target).map_err(copy_err)?;
            files += 1;
        }
    }

    Ok((files, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_destination_nests_app_name() {
        let request = BuildRequest::new("site", "bin", "Quizify");
        assert_eq!(request.destination(), PathBuf::from("bin/Quizify"));
    }

    #[test]
    fn test_build_copies_nested_tree() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("site");
        write(&source.join("index.html"), "<h1>hi</h1>");
        write(&source.join("js/app.js"), "console.log(1)");

        let request = BuildRequest::new(&source, temp.path().join("bin"), "Quizify");
        let report = build_site(&request).unwrap();

        match report {
            BuildReport::Built { files, bytes, .. } => {
                assert_eq!(files, 2);
                assert_eq!(bytes, 11 + 14);
            }
            other => panic!("expected Built, got {:?}", other),
        }
        let dest = request.destination();
        assert_eq!(fs::read_to_string(dest.join("index.html")).unwrap(), "<h1>hi</h1>");
        assert_eq!(fs::read_to_string(dest.join("js/app.js")).unwrap(), "console.log(1)");
    }

    #[test]
    fn test_empty_source_still_creates_app_dir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("site");
        fs::create_dir_all(&source).unwrap();

        let request = BuildRequest::new(&source, temp.path().join("bin"), "App");
        assert!(build_site(&request).unwrap().is_built());
        assert!(request.destination().is_dir());
    }

    #[test]
    fn test_missing_source_clears_output_and_warns() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("bin");
        write(&output.join("Old/index.html"), "stale");

        let request = BuildRequest::new(temp.path().join("nope"), &output, "App");
        let report = build_site(&request).unwrap();

        assert!(matches!(report, BuildReport::SourceMissing { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_output_file_is_replaced() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("site");
        write(&source.join("a.txt"), "a");
        let output = temp.path().join("bin");
        fs::write(&output, "not a directory").unwrap();

        let request = BuildRequest::new(&source, &output, "App");
        build_site(&request).unwrap();
        assert!(output.is_dir());
    }

    #[test]
    fn test_overlapping_paths_rejected() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("site");
        write(&source.join("index.html"), "x");

        let nested_output = BuildRequest::new(&source, source.join("bin"), "App");
        assert!(matches!(
            build_site(&nested_output),
            Err(BuildError::OverlappingPaths { .. })
        ));

        let output_contains_source = BuildRequest::new(&source, temp.path(), "App");
        assert!(matches!(
            build_site(&output_contains_source),
            Err(BuildError::OverlappingPaths { .. })
        ));
        // source must survive the rejected request
        assert!(source.join("index.html").exists());
    }

    #[tokio::test]
    async fn test_site_builder_runs_on_blocking_pool() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("site");
        write(&source.join("index.html"), "hello");

        let builder = SiteBuilder::new(BuildRequest::new(&source, temp.path().join("bin"), "App"));
        let report = builder.build().await.unwrap();
        assert!(report.is_built());
        assert!(builder.request().destination().join("index.html").is_file());
    }
}
