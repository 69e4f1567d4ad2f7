use std::fmt;

use serde::Serialize;

use crate::color::category_hex;
use crate::data::aggregate::{aggregate, AccessSummary};
use crate::data::filter::{filter, FilteredView, Selection};
use crate::data::model::{format_number, Category, VenueRecord, VenueTable};

/// Tile size used by web maps; one zoom step doubles the pixels per degree.
const TILE_SIZE_PX: f64 = 256.0;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Fixed presentation parameters for every rebuilt figure.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f64,
    pub marker_size: f32,
    pub marker_opacity: f32,
    pub detail_max_chars: usize,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            // Edinburgh city centre
            center_lat: 55.9533,
            center_lon: -3.1883,
            zoom: 12.0,
            marker_size: 12.0,
            marker_opacity: 0.8,
            detail_max_chars: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFigure {
    pub layers: Vec<MarkerLayer>,
    pub view: MapView,
}

impl MapFigure {
    pub fn marker_count(&self) -> usize {
        self.layers.iter().map(|l| l.markers.len()).sum()
    }
}

/// Where the map is centred and how far it is zoomed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f64,
}

impl MapView {
    /// Longitude/latitude extents (`[min_lon, min_lat]`, `[max_lon, max_lat]`)
    /// visible in a viewport of the given pixel size.
    pub fn bounds(&self, width_px: f64, height_px: f64) -> ([f64; 2], [f64; 2]) {
        let width_px = width_px.max(1.0);
        let height_px = height_px.max(1.0);
        let lon_span = 360.0 * width_px / (TILE_SIZE_PX * 2f64.powf(self.zoom));
        let lat_span = lon_span * (height_px / width_px) * self.center_lat.to_radians().cos();
        (
            [self.center_lon - lon_span / 2.0, self.center_lat - lat_span / 2.0],
            [self.center_lon + lon_span / 2.0, self.center_lat + lat_span / 2.0],
        )
    }
}

/// All markers of one category, drawn in a single colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLayer {
    pub category: Category,
    /// Legend entry, e.g. "High Accessibility".
    pub name: String,
    pub color: &'static str,
    pub size: f32,
    pub opacity: f32,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub tooltip: MarkerTooltip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerTooltip {
    pub venue: String,
    pub year: i32,
    pub performances: String,
    pub level: String,
    pub detail: String,
}

impl MarkerTooltip {
    fn from_record(rec: &VenueRecord, detail_max_chars: usize) -> Self {
        MarkerTooltip {
            venue: rec.venue.clone(),
            year: rec.year,
            performances: rec
                .performances
                .map(format_number)
                .unwrap_or_else(|| "n/a".to_string()),
            level: rec.level.to_string(),
            detail: rec
                .detail
                .as_deref()
                .map(|d| truncate_detail(d, detail_max_chars))
                .unwrap_or_else(|| "n/a".to_string()),
        }
    }

    /// Lines below the venue heading.
    pub fn body_lines(&self) -> [String; 4] {
        [
            format!("Year: {}", self.year),
            format!("Performances: {}", self.performances),
            format!("Accessibility Level: {}", self.level),
            format!("Details: {}", self.detail),
        ]
    }
}

impl fmt::Display for MarkerTooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.venue)?;
        for line in self.body_lines() {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

/// Keep at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_detail(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Group a filtered view into per-category marker layers.
///
/// Layers come out High, Medium, Low; categories with no records get no
/// layer so the legend never shows an empty entry.
pub fn build_figure(view: &FilteredView<'_>, settings: &MapSettings) -> MapFigure {
    let layers = Category::LAYER_ORDER
        .iter()
        .filter_map(|&category| {
            let markers: Vec<Marker> = view
                .iter()
                .filter(|r| r.category() == category)
                .map(|r| Marker {
                    latitude: r.latitude,
                    longitude: r.longitude,
                    tooltip: MarkerTooltip::from_record(r, settings.detail_max_chars),
                })
                .collect();
            if markers.is_empty() {
                return None;
            }
            Some(MarkerLayer {
                category,
                name: format!("{} Accessibility", category.label()),
                color: category_hex(category),
                size: settings.marker_size,
                opacity: settings.marker_opacity,
                markers,
            })
        })
        .collect();

    MapFigure {
        layers,
        view: MapView {
            center_lat: settings.center_lat,
            center_lon: settings.center_lon,
            zoom: settings.zoom,
        },
    }
}

/// Recompute the whole dashboard output for one selection.
///
/// Pure: depends only on the table, the selection and the settings.
pub fn render(
    table: &VenueTable,
    selection: &Selection,
    settings: &MapSettings,
) -> (MapFigure, AccessSummary) {
    let view = filter(table, selection);
    let summary = aggregate(&view);
    let figure = build_figure(&view, settings);
    if view.is_empty() && !table.is_empty() {
        log::info!("No records match the current selection");
    }
    log::debug!(
        "Rendered {} of {} records into {} layers (filters active: {})",
        view.len(),
        table.len(),
        figure.layers.len(),
        !selection.is_empty()
    );
    (figure, summary)
}
