use std::collections::BTreeSet;

use serde::Serialize;

use super::filter::FilteredView;
use super::model::Category;

/// Distinct-venue counts for a filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccessSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl AccessSummary {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Low => self.low,
            Category::Medium => self.medium,
            Category::High => self.high,
        }
    }

    /// One-line statistics text shown above the map.
    pub fn summary_line(&self) -> String {
        format!(
            "Total Venues: {} | High Accessibility: {} | Medium Accessibility: {} | Low Accessibility: {}",
            self.total, self.high, self.medium, self.low
        )
    }
}

/// Count distinct venues overall and per category.
///
/// A venue appearing in several years counts once per group. Blank venue
/// names are not counted.
pub fn aggregate(view: &FilteredView<'_>) -> AccessSummary {
    let mut all: BTreeSet<&str> = BTreeSet::new();
    let mut low: BTreeSet<&str> = BTreeSet::new();
    let mut medium: BTreeSet<&str> = BTreeSet::new();
    let mut high: BTreeSet<&str> = BTreeSet::new();

    for rec in view.iter() {
        if rec.venue.is_empty() {
            continue;
        }
        let name = rec.venue.as_str();
        all.insert(name);
        match rec.category() {
            Category::Low => low.insert(name),
            Category::Medium => medium.insert(name),
            Category::High => high.insert(name),
        };
    }

    AccessSummary {
        total: all.len(),
        high: high.len(),
        medium: medium.len(),
        low: low.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, Selection};
    use crate::data::model::{AccessLevel, VenueRecord, VenueTable};

    fn record(venue: &str, year: i32, level: AccessLevel) -> VenueRecord {
        VenueRecord::new(venue.to_string(), 55.95, -3.19, year, level, None, None)
    }

    #[test]
    fn empty_view_reports_zeros() {
        let summary = aggregate(&FilteredView::default());
        assert_eq!(summary, AccessSummary::default());
        assert_eq!(
            summary.summary_line(),
            "Total Venues: 0 | High Accessibility: 0 | Medium Accessibility: 0 | Low Accessibility: 0"
        );
    }

    #[test]
    fn venue_in_several_years_counts_once() {
        let table = VenueTable::from_records(vec![
            record("Venue B", 2022, AccessLevel::Numeric(2.0)),
            record("Venue B", 2023, AccessLevel::Text("medium".into())),
        ]);
        let summary = aggregate(&filter(&table, &Selection::default()));
        assert_eq!(summary.medium, 1);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.low, 0);
        assert_eq!(summary.high, 0);
    }

    #[test]
    fn venue_changing_category_counts_in_each_group() {
        let table = VenueTable::from_records(vec![
            record("Venue A", 2022, AccessLevel::Numeric(1.0)),
            record("Venue A", 2023, AccessLevel::Numeric(4.0)),
            record("Venue C", 2023, AccessLevel::Numeric(4.0)),
        ]);
        let summary = aggregate(&filter(&table, &Selection::default()));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.count(Category::Low), 1);
        assert_eq!(summary.count(Category::High), 2);
    }

    #[test]
    fn low_record_survives_year_filter() {
        let table = VenueTable::from_records(vec![
            record("Venue A", 2022, AccessLevel::Numeric(1.0)),
            record("Venue D", 2021, AccessLevel::Numeric(3.0)),
        ]);
        let mut sel = Selection::default();
        sel.toggle_year(2022);
        let summary = aggregate(&filter(&table, &sel));
        assert!(summary.low >= 1);
        assert_eq!(summary.total, 1);
    }

    #[test]
    fn blank_venues_are_not_counted() {
        let table = VenueTable::from_records(vec![record("", 2022, AccessLevel::Numeric(1.0))]);
        let summary = aggregate(&filter(&table, &Selection::default()));
        assert_eq!(summary.total, 0);
        assert_eq!(summary.low, 0);
    }
}
