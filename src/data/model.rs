use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

use super::classify::classify;

// ---------------------------------------------------------------------------
// AccessLevel – the raw accessibility cell
// ---------------------------------------------------------------------------

/// The raw "accessibility level" cell. Festival exports mix numeric grades
/// with free text, so both shapes are kept verbatim.
#[derive(Debug, Clone)]
pub enum AccessLevel {
    Numeric(f64),
    Text(String),
    Missing,
}

impl AccessLevel {
    /// Interpret an untyped text cell (CSV, command line): blank → `Missing`,
    /// a finite float → `Numeric`, otherwise `Text`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return AccessLevel::Missing;
        }
        match parse_finite(trimmed) {
            Some(v) => AccessLevel::Numeric(v),
            None => AccessLevel::Text(raw.to_string()),
        }
    }
}

// -- Manual Eq/Ord so AccessLevel can live in a BTreeSet selection --

impl PartialEq for AccessLevel {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AccessLevel {}

impl PartialOrd for AccessLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AccessLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        use AccessLevel::*;
        fn discriminant(v: &AccessLevel) -> u8 {
            match v {
                Missing => 0,
                Numeric(_) => 1,
                Text(_) => 2,
            }
        }
        match (self, other) {
            (Missing, Missing) => Ordering::Equal,
            (Numeric(a), Numeric(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for AccessLevel {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            AccessLevel::Numeric(v) => v.to_bits().hash(state),
            AccessLevel::Text(s) => s.hash(state),
            AccessLevel::Missing => {}
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessLevel::Numeric(v) => write!(f, "{}", format_number(*v)),
            AccessLevel::Text(s) => write!(f, "{s}"),
            AccessLevel::Missing => write!(f, "<missing>"),
        }
    }
}

impl Serialize for AccessLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AccessLevel::Numeric(v) => serializer.serialize_f64(*v),
            AccessLevel::Text(s) => serializer.serialize_str(s),
            AccessLevel::Missing => serializer.serialize_none(),
        }
    }
}

/// `str::parse::<f64>` also accepts `nan`, `inf` and `infinity`; those stay text.
pub fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Render a number without a trailing `.0` when it is integral.
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

// ---------------------------------------------------------------------------
// Category – derived three-tier classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Low,
    Medium,
    High,
}

impl Category {
    /// Order in which marker layers and legend entries are emitted.
    pub const LAYER_ORDER: [Category; 3] = [Category::High, Category::Medium, Category::Low];

    pub fn label(self) -> &'static str {
        match self {
            Category::Low => "Low",
            Category::Medium => "Medium",
            Category::High => "High",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// VenueRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single venue/year row. `category` is derived from `level` on
/// construction and cannot be set independently.
#[derive(Debug, Clone)]
pub struct VenueRecord {
    pub venue: String,
    pub latitude: f64,
    pub longitude: f64,
    pub year: i32,
    pub level: AccessLevel,
    pub performances: Option<f64>,
    pub detail: Option<String>,
    category: Category,
}

impl VenueRecord {
    pub fn new(
        venue: String,
        latitude: f64,
        longitude: f64,
        year: i32,
        level: AccessLevel,
        performances: Option<f64>,
        detail: Option<String>,
    ) -> Self {
        let category = classify(&level);
        VenueRecord {
            venue,
            latitude,
            longitude,
            year,
            level,
            performances,
            detail,
            category,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

// ---------------------------------------------------------------------------
// VenueTable – the immutable base table
// ---------------------------------------------------------------------------

/// The cleaned dataset. Built once by the loader and only ever shared
/// by reference afterwards.
#[derive(Debug, Clone, Default)]
pub struct VenueTable {
    records: Vec<VenueRecord>,
}

impl VenueTable {
    pub fn from_records(records: Vec<VenueRecord>) -> Self {
        VenueTable { records }
    }

    pub fn records(&self) -> &[VenueRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct values offered by the three filter controls.
    pub fn filter_options(&self) -> FilterOptions {
        let mut years = BTreeSet::new();
        let mut venues = BTreeSet::new();
        let mut levels = BTreeSet::new();
        for rec in &self.records {
            years.insert(rec.year);
            if !rec.venue.is_empty() {
                venues.insert(rec.venue.clone());
            }
            levels.insert(rec.level.clone());
        }

        let mut levels: Vec<AccessLevel> = levels.into_iter().collect();
        levels.sort_by(|a, b| a.to_string().cmp(&b.to_string()).then_with(|| a.cmp(b)));

        FilterOptions {
            years: years.into_iter().collect(),
            venues: venues.into_iter().collect(),
            levels,
        }
    }
}

/// Selectable values for each filter control, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Ascending.
    pub years: Vec<i32>,
    /// Lexicographic, blanks excluded.
    pub venues: Vec<String>,
    /// Lexicographic by display string.
    pub levels: Vec<AccessLevel>,
}
