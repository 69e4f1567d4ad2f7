use std::path::PathBuf;
use std::sync::Arc;

use crate::data::aggregate::AccessSummary;
use crate::data::filter::Selection;
use crate::data::model::{AccessLevel, FilterOptions, VenueTable};
use crate::figure::{render, MapFigure, MapSettings};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. One per window; the table
/// itself is shared read-only.
pub struct AppState {
    /// Loaded base table, never mutated.
    pub table: Arc<VenueTable>,

    /// Where `table` came from.
    pub source: PathBuf,

    /// Values offered by the three controls.
    pub options: FilterOptions,

    /// Current control selections.
    pub selection: Selection,

    pub settings: MapSettings,

    /// Output of the last `render` (cached until the selection changes).
    pub figure: MapFigure,
    pub summary: AccessSummary,

    /// Set whenever the figure is rebuilt so the map snaps back to its
    /// fixed centre and zoom on the next frame.
    pub reset_view: bool,
}

impl AppState {
    pub fn new(table: Arc<VenueTable>, source: PathBuf, settings: MapSettings) -> Self {
        let options = table.filter_options();
        let selection = Selection::default();
        let (figure, summary) = render(&table, &selection, &settings);
        Self {
            table,
            source,
            options,
            selection,
            settings,
            figure,
            summary,
            reset_view: true,
        }
    }

    /// Recompute figure and summary after a selection change.
    pub fn refresh(&mut self) {
        let (figure, summary) = render(&self.table, &self.selection, &self.settings);
        self.figure = figure;
        self.summary = summary;
        self.reset_view = true;
    }

    pub fn toggle_year(&mut self, year: i32) {
        self.selection.toggle_year(year);
        self.refresh();
    }

    pub fn toggle_venue(&mut self, venue: &str) {
        self.selection.toggle_venue(venue);
        self.refresh();
    }

    pub fn toggle_level(&mut self, level: &AccessLevel) {
        self.selection.toggle_level(level);
        self.refresh();
    }

    pub fn clear_years(&mut self) {
        self.selection.years.clear();
        self.refresh();
    }

    pub fn clear_venues(&mut self) {
        self.selection.venues.clear();
        self.refresh();
    }

    pub fn clear_levels(&mut self) {
        self.selection.levels.clear();
        self.refresh();
    }

    /// Number of records currently on the map.
    pub fn visible_records(&self) -> usize {
        self.figure.marker_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::VenueRecord;

    fn state() -> AppState {
        let table = VenueTable::from_records(vec![
            VenueRecord::new(
                "Venue A".into(),
                55.95,
                -3.19,
                2022,
                AccessLevel::Numeric(1.0),
                None,
                None,
            ),
            VenueRecord::new(
                "Venue B".into(),
                55.94,
                -3.2,
                2023,
                AccessLevel::Text("Partial".into()),
                None,
                None,
            ),
        ]);
        AppState::new(Arc::new(table), PathBuf::from("venues.csv"), MapSettings::default())
    }

    #[test]
    fn starts_with_everything_visible() {
        let s = state();
        assert_eq!(s.visible_records(), 2);
        assert_eq!(s.summary.total, 2);
        assert_eq!(s.options.years, vec![2022, 2023]);
    }

    #[test]
    fn toggles_rerender_and_clear_restores() {
        let mut s = state();
        s.reset_view = false;
        s.toggle_year(2023);
        assert!(s.reset_view);
        assert_eq!(s.visible_records(), 1);
        assert_eq!(s.summary.medium, 1);
        assert_eq!(s.summary.low, 0);

        s.clear_years();
        assert_eq!(s.visible_records(), 2);
    }

    #[test]
    fn sessions_share_the_table_but_not_selections() {
        let a = state();
        let mut b = AppState::new(a.table.clone(), a.source.clone(), a.settings.clone());
        b.toggle_venue("Venue A");
        assert_eq!(b.visible_records(), 1);
        assert_eq!(a.visible_records(), 2);
        assert!(Arc::ptr_eq(&a.table, &b.table));
    }
}
