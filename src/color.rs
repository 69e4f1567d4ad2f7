use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Darken, Hsl, IntoColor, Srgb};

use crate::data::model::Category;

// ---------------------------------------------------------------------------
// Traffic-light palette
// ---------------------------------------------------------------------------

/// Hex colour used for a category's marker layer.
pub fn category_hex(category: Category) -> &'static str {
    match category {
        Category::Low => "#FF0000",
        Category::Medium => "#FFA500",
        Category::High => "#00FF00",
    }
}

/// Parse a `#rrggbb` string into an egui colour. Unparseable input maps to grey.
pub fn hex_to_color32(hex: &str) -> Color32 {
    match Srgb::<u8>::from_str(hex) {
        Ok(rgb) => Color32::from_rgb(rgb.red, rgb.green, rgb.blue),
        Err(e) => {
            log::warn!("Invalid colour '{hex}': {e}");
            Color32::GRAY
        }
    }
}

/// Marker fill for a layer, with the layer's opacity applied.
pub fn marker_color(hex: &str, opacity: f32) -> Color32 {
    let base = hex_to_color32(hex);
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), alpha)
}

/// Darker shade of the category colour, readable as text on a light panel.
pub fn text_color(category: Category) -> Color32 {
    let base = hex_to_color32(category_hex(category));
    let rgb = Srgb::new(
        base.r() as f32 / 255.0,
        base.g() as f32 / 255.0,
        base.b() as f32 / 255.0,
    );
    let hsl: Hsl = rgb.into_color();
    let darker: Srgb = hsl.darken(0.3).into_color();
    Color32::from_rgb(
        (darker.red * 255.0) as u8,
        (darker.green * 255.0) as u8,
        (darker.blue * 255.0) as u8,
    )
}
