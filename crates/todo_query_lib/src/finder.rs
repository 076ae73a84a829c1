//! The file collector: finds source files and snapshots their contents.
mod walk;

use std::path::PathBuf;

use crate::Error;

/// Where to look and what to look for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// The directory to walk recursively.
    pub root: PathBuf,
    /// Only files with this extension are collected, eg. `js`.
    pub extension: String,
    /// Globs of files or directories to skip.
    pub excludes: Vec<String>,
}

impl SearchConfig {
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        SearchConfig {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_owned(),
            excludes: vec![],
        }
    }

    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }
}

/// The full contents of one source file, read once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: &str, content: &str) -> Self {
        SourceFile {
            path: path.into(),
            content: content.into(),
        }
    }
}

pub struct FileSearcher;

impl FileSearcher {
    /// Snapshot every matching file under the configured root, in traversal
    /// order. Files that can't be read are skipped.
    pub fn find(config: &SearchConfig) -> Result<Vec<SourceFile>, Error> {
        let paths = walk::matching_paths(config)?;
        log::debug!(
            "found {} .{} files under {:?}",
            paths.len(),
            config.extension,
            config.root
        );

        let files = paths
            .into_iter()
            .filter_map(|path| match std::fs::read_to_string(&path) {
                Ok(content) => {
                    log::trace!("read {path:?}");
                    Some(SourceFile {
                        path: path.display().to_string(),
                        content,
                    })
                }
                Err(err) => {
                    log::warn!("skipping {path:?}: {err}");
                    None
                }
            })
            .collect();
        Ok(files)
    }
}
