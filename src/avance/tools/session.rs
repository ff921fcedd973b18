use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::avance::tools::config::IngestConfig;
use crate::avance::tools::consolidate::{Progress, consolidate};
use crate::avance::tools::error::{Result, ToolError};
use crate::avance::tools::frequency::{self, FrequencyTable};
use crate::avance::tools::io::chart::{self, ChartKind};
use crate::avance::tools::io::excel_write;
use crate::avance::tools::model::{ColumnKind, Table};
use crate::avance::tools::request::RunRequest;

/// Outcome of a successful processing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub files: usize,
    pub rows: usize,
    pub output_path: PathBuf,
}

/// Owns the consolidated table of one interactive session.
///
/// A run builds a fresh table and only then replaces the current one, so a
/// failed run leaves the previous data intact. The session is single-threaded:
/// callers must not start a run while another is in progress.
#[derive(Debug, Default)]
pub struct Session {
    config: IngestConfig,
    table: Option<Table>,
}

impl Session {
    pub fn new(config: IngestConfig) -> Self {
        Self {
            config,
            table: None,
        }
    }

    /// The table produced by the last successful consolidation.
    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// Validates the request, consolidates the folder and writes the output
    /// workbook next to the sources.
    ///
    /// When only the write fails the new table is still kept and
    /// [`ToolError::WriteFailed`] is returned, so charts remain available.
    #[instrument(level = "info", skip_all, fields(folder = %request.folder_path))]
    pub fn process<F>(&mut self, request: &RunRequest, mut on_progress: F) -> Result<RunReport>
    where
        F: FnMut(Progress),
    {
        let plan = request.validate(&self.config)?;

        let mut files = 0;
        let table = consolidate(&plan.folder, &plan.window, &self.config, |progress| {
            files = progress.completed;
            on_progress(progress);
        })?;
        let rows = table.row_count();
        let table = self.table.insert(table);

        let output_path = plan.folder.join(&self.config.output_file);
        if let Err(err) = excel_write::write_table(&output_path, table) {
            warn!(error = %err, "consolidated table kept in memory after write failure");
            return Err(err);
        }

        info!(files, rows, output = %output_path.display(), "run completed");
        Ok(RunReport {
            files,
            rows,
            output_path,
        })
    }

    /// Columns that can be charted: textual ones first, then numeric ones.
    pub fn chartable_columns(&self) -> Result<Vec<String>> {
        let table = self.current()?;
        let columns_of = |wanted: ColumnKind| {
            table
                .columns()
                .iter()
                .filter(move |name| table.column_kind(name) == Some(wanted))
                .cloned()
        };
        Ok(columns_of(ColumnKind::Textual)
            .chain(columns_of(ColumnKind::Numeric))
            .collect())
    }

    /// Value counts of one column of the current table.
    pub fn summarize(&self, column: &str) -> Result<FrequencyTable> {
        frequency::summarize(self.current()?, column)
    }

    /// Renders a chart of `column` into `folder` and returns the image path.
    /// A failure here never touches the consolidated table.
    pub fn chart(&self, column: &str, kind: ChartKind, folder: &Path) -> Result<PathBuf> {
        let summary = self.summarize(column)?;
        chart::render_chart(&summary, kind, folder)
    }

    fn current(&self) -> Result<&Table> {
        self.table.as_ref().ok_or(ToolError::NoData)
    }
}
