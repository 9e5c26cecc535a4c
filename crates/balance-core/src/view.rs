//! Report view: owns the loaded records, the filter and the selection
//!
//! The view is either unloaded or holds one full collection. Every load
//! replaces the collection wholesale and clears the selection; the filter
//! criteria survive reloads. Derived values (visible rows, totals) are
//! recomputed on every call.

use anyhow::Result;
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::aggregate;
use crate::filter::{self, FilterCriteria};
use crate::records::Record;
use crate::render::{self, Document, PrintSink, ReportOptions};
use crate::selection::Selection;

/// Load lifecycle of the view
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loaded(Vec<Record>),
}

/// Pipeline root for one report session
#[derive(Debug, Clone, Default)]
pub struct ReportView {
    state: LoadState,
    criteria: FilterCriteria,
    selection: Selection,
}

impl ReportView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given filter already applied
    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }

    /// Replace the collection with a freshly normalized one and reset the selection
    pub fn load(&mut self, records: Vec<Record>) {
        info!(records = records.len(), "loaded client records");
        self.state = LoadState::Loaded(records);
        self.selection.clear();
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded(_))
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Full collection (empty while unloaded)
    pub fn records(&self) -> &[Record] {
        match &self.state {
            LoadState::Loaded(records) => records,
            LoadState::Unloaded => &[],
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn criteria_mut(&mut self) -> &mut FilterCriteria {
        &mut self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Records passing the current filter
    pub fn visible(&self) -> Vec<&Record> {
        filter::apply(self.records(), &self.criteria)
    }

    pub fn select(&mut self, id: impl Into<String>) -> bool {
        self.selection.select(id)
    }

    pub fn deselect(&mut self, id: &str) -> bool {
        self.selection.deselect(id)
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    pub fn replace_selection<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.replace(ids);
    }

    /// Add every visible record to the selection. Returns how many were visible.
    pub fn select_visible(&mut self) -> usize {
        let visible: Vec<String> = self.visible().iter().map(|r| r.id.clone()).collect();
        let count = visible.len();
        self.selection.extend(visible);
        count
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_ids(&self) -> &BTreeSet<String> {
        self.selection.ids()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Selected records present in the collection, in collection order
    pub fn selected_records(&self) -> Vec<&Record> {
        aggregate::selected_records(self.records(), self.selection.ids())
    }

    /// Balance total over the selection, regardless of the filter
    pub fn total(&self) -> f64 {
        aggregate::total(self.records(), self.selection.ids())
    }

    /// Whether printing is allowed: at least one selected record exists
    pub fn can_print(&self) -> bool {
        !self.selected_records().is_empty()
    }

    /// Render the selected records
    pub fn render_selected(&self, options: &ReportOptions) -> Document {
        render::render(&self.selected_records(), options)
    }

    /// Render the selection and hand it to `sink`.
    ///
    /// Callers gate this on [`ReportView::can_print`]; with nothing selected the
    /// sink is not invoked and `Ok(None)` is returned.
    pub fn print_selected(&self, options: &ReportOptions, sink: &mut dyn PrintSink) -> Result<Option<Document>> {
        if !self.can_print() {
            debug!("print skipped, no selected records");
            return Ok(None);
        }
        let document = self.render_selected(options);
        sink.print(&document)?;
        info!(rows = document.rows, "report handed to print sink");
        Ok(Some(document))
    }
}
