//! Profiling archives: a `.tar.gz` holding one CSV per compilation unit.

use crate::Result;

use anyhow::{Context, bail};
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Profiling files unpacked into a scratch directory.
///
/// The directory and everything in it is removed when this is dropped.
pub struct ExtractedProfiles {
    dir: TempDir,
    pub files: Vec<PathBuf>,
}

impl ExtractedProfiles {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// Unpack `archive` and collect its CSV files, sorted by path.
///
/// Fails when the archive holds no CSV files at all.
pub fn extract_profiles(archive: &Path) -> Result<ExtractedProfiles> {
    let file = File::open(archive)
        .with_context(|| format!("read profile archive {}", archive.display()))?;
    let dir = TempDir::new().context("failed to create extraction directory")?;

    tar::Archive::new(GzDecoder::new(file))
        .unpack(dir.path())
        .with_context(|| format!("extract profile archive {}", archive.display()))?;

    let files = discover_csv_files(dir.path())?;
    if files.is_empty() {
        bail!(
            "no profiling CSV files found in archive {}",
            archive.display()
        );
    }
    tracing::info!(archive = %archive.display(), files = files.len(), "profiles.extracted");

    Ok(ExtractedProfiles { dir, files })
}

/// Every regular `*.csv` file under `root`, in lexical path order.
pub fn discover_csv_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", root.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "csv")
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
