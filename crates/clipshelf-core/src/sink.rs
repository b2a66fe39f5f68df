//! Display sink abstraction.

use anyhow::Result;

use crate::models::RenderRow;

/// Receives the rows of each successful pass.
///
/// Every call replaces whatever the sink showed before; there is no
/// incremental diffing. An empty slice means "show nothing", not
/// "leave the previous output".
pub trait DisplaySink {
    fn replace(&mut self, rows: &[RenderRow]) -> Result<()>;
}

impl<K: DisplaySink + ?Sized> DisplaySink for &mut K {
    fn replace(&mut self, rows: &[RenderRow]) -> Result<()> {
        (**self).replace(rows)
    }
}

impl<K: DisplaySink + ?Sized> DisplaySink for Box<K> {
    fn replace(&mut self, rows: &[RenderRow]) -> Result<()> {
        (**self).replace(rows)
    }
}

/// Keeps the most recent rows in memory, for hosts that format output
/// themselves.
#[derive(Debug, Default)]
pub struct CollectingSink {
    rows: Vec<RenderRow>,
    replacements: usize,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows from the last successful pass.
    pub fn rows(&self) -> &[RenderRow] {
        &self.rows
    }

    /// Number of times the output has been replaced.
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    pub fn into_rows(self) -> Vec<RenderRow> {
        self.rows
    }
}

impl DisplaySink for CollectingSink {
    fn replace(&mut self, rows: &[RenderRow]) -> Result<()> {
        self.rows = rows.to_vec();
        self.replacements += 1;
        Ok(())
    }
}
