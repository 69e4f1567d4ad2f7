use eframe::egui::Ui;
use egui_plot::{Corner, Legend, MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints, PlotUi, Points};

use crate::color::marker_color;
use crate::figure::{MapFigure, Marker};
use crate::state::AppState;

/// Extra pixels around a marker that still count as hovering it.
const HOVER_SLOP_PX: f32 = 3.0;

// ---------------------------------------------------------------------------
// Venue map (central panel)
// ---------------------------------------------------------------------------

/// Draw the marker layers as a longitude/latitude scatter with hover tooltips.
pub fn venue_map(ui: &mut Ui, state: &mut AppState) {
    let reset = std::mem::take(&mut state.reset_view);
    let figure = &state.figure;
    let size = ui.available_size();

    let response = Plot::new("venue_map")
        .legend(Legend::default().position(Corner::LeftTop))
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if reset {
                let (min, max) = figure.view.bounds(size.x as f64, size.y as f64);
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
            }

            for layer in &figure.layers {
                let points: PlotPoints = layer
                    .markers
                    .iter()
                    .map(|m| [m.longitude, m.latitude])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&layer.name)
                        .color(marker_color(layer.color, layer.opacity))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(layer.size / 2.0),
                );
            }

            hovered_marker(plot_ui, figure)
        });

    if let Some(marker) = response.inner {
        response.response.on_hover_ui_at_pointer(|ui: &mut Ui| {
            ui.strong(&marker.tooltip.venue);
            for line in marker.tooltip.body_lines() {
                ui.label(line);
            }
        });
    }
}

/// The marker closest to the pointer, if the pointer is on one.
fn hovered_marker<'f>(plot_ui: &PlotUi, figure: &'f MapFigure) -> Option<&'f Marker> {
    let pointer = plot_ui.screen_from_plot(plot_ui.pointer_coordinate()?);

    figure
        .layers
        .iter()
        .flat_map(|layer| layer.markers.iter().map(move |m| (layer.size / 2.0, m)))
        .filter_map(|(radius, m)| {
            let pos = plot_ui.screen_from_plot(PlotPoint::new(m.longitude, m.latitude));
            let dist = pos.distance(pointer);
            (dist <= radius + HOVER_SLOP_PX).then_some((dist, m))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, m)| m)
}
