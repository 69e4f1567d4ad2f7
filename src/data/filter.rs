use std::collections::BTreeSet;

use super::model::{AccessLevel, VenueRecord, VenueTable};

// ---------------------------------------------------------------------------
// Selection: which raw values are chosen per control
// ---------------------------------------------------------------------------

/// Current state of the three filter controls. An empty set means
/// "no constraint" for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub venues: BTreeSet<String>,
    /// Raw accessibility values, not derived categories.
    pub levels: BTreeSet<AccessLevel>,
    pub years: BTreeSet<i32>,
}

impl Selection {
    /// Whether no control constrains the table.
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty() && self.levels.is_empty() && self.years.is_empty()
    }

    /// Does `record` satisfy every active control?
    pub fn matches(&self, record: &VenueRecord) -> bool {
        (self.venues.is_empty() || self.venues.contains(&record.venue))
            && (self.levels.is_empty() || self.levels.contains(&record.level))
            && (self.years.is_empty() || self.years.contains(&record.year))
    }

    pub fn toggle_venue(&mut self, venue: &str) {
        toggle(&mut self.venues, venue.to_string());
    }

    pub fn toggle_level(&mut self, level: &AccessLevel) {
        toggle(&mut self.levels, level.clone());
    }

    pub fn toggle_year(&mut self, year: i32) {
        toggle(&mut self.years, year);
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if set.contains(&value) {
        set.remove(&value);
    } else {
        set.insert(value);
    }
}

// ---------------------------------------------------------------------------
// FilteredView – a borrowed subset of the base table
// ---------------------------------------------------------------------------

/// Records that passed a selection, in table order.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    pub records: Vec<&'a VenueRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a VenueRecord> + '_ {
        self.records.iter().copied()
    }
}

/// Return the records of `table` that pass all active controls.
///
/// AND across controls, OR within a control's selected values.
pub fn filter<'a>(table: &'a VenueTable, selection: &Selection) -> FilteredView<'a> {
    FilteredView {
        records: table
            .records()
            .iter()
            .filter(|r| selection.matches(r))
            .collect(),
    }
}
