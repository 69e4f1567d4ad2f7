/// Data layer: core types, loading, classification, filtering, aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, drop rows without lat/lon/year
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ VenueTable │  Vec<VenueRecord>, category fixed by classify
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  distinct venues per category
///   └───────────┘
/// ```

pub mod aggregate;
pub mod classify;
pub mod filter;
pub mod loader;
pub mod model;
