//! Walking the directory tree to find candidate files.
use std::{ffi::OsStr, path::PathBuf};

use ignore::{overrides::OverrideBuilder, WalkBuilder};
use snafu::ResultExt;

use crate::{Error, IoSnafu, WalkSnafu};

use super::SearchConfig;

/// Recursively list the files under `config.root` that carry the configured
/// extension, sorted by file name at each level of the tree.
pub(crate) fn matching_paths(config: &SearchConfig) -> Result<Vec<PathBuf>, Error> {
    std::fs::metadata(&config.root).context(IoSnafu)?;

    let mut overrides = OverrideBuilder::new(&config.root);
    for exclude in config.excludes.iter() {
        overrides
            .add(&format!("!{exclude}"))
            .context(WalkSnafu {
                root: config.root.clone(),
            })?;
    }
    let overrides = overrides.build().context(WalkSnafu {
        root: config.root.clone(),
    })?;

    // Every file is a candidate, hidden or git-ignored alike.
    let walker = WalkBuilder::new(&config.root)
        .standard_filters(false)
        .overrides(overrides)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let extension = OsStr::new(&config.extension);
    let mut paths = vec![];
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skipping an entry under {:?}: {err}", config.root);
                continue;
            }
        };
        let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
        if is_file && entry.path().extension() == Some(extension) {
            paths.push(entry.into_path());
        }
    }

    Ok(paths)
}
