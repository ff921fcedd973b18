use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use crate::avance::tools::config::IngestConfig;
use crate::avance::tools::error::{Result, ToolError};
use crate::avance::tools::filename::parse_date_tag;
use crate::avance::tools::model::SourceFile;

/// Lists the entry names in `folder` that start with the configured prefix
/// and end with the configured extension, sorted by name.
///
/// An existing folder with no match yields an empty list.
#[instrument(level = "debug", skip(config), fields(folder = %folder.display()))]
pub fn list_candidates(folder: &Path, config: &IngestConfig) -> Result<Vec<String>> {
    if !folder.is_dir() {
        return Err(ToolError::InvalidDirectory(folder.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            debug!(entry = ?entry.file_name(), "skipping non UTF-8 entry");
            continue;
        };
        if !name.starts_with(&config.file_prefix) || !name.ends_with(&config.file_extension) {
            continue;
        }
        if !entry.file_type()?.is_file() {
            debug!(%name, "skipping non-file entry");
            continue;
        }
        names.push(name);
    }
    names.sort();
    debug!(matched = names.len(), "candidate workbooks listed");
    Ok(names)
}

/// Resolves every candidate into a [`SourceFile`] with its parsed date tag.
pub fn discover_sources(folder: &Path, config: &IngestConfig) -> Result<Vec<SourceFile>> {
    list_candidates(folder, config)?
        .into_iter()
        .map(|file_name| {
            let date = parse_date_tag(&file_name)?;
            Ok(SourceFile {
                path: folder.join(&file_name),
                file_name,
                date,
            })
        })
        .collect()
}
