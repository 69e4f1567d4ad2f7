use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::text_color;
use crate::data::classify::classify;
use crate::data::model::Category;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. An empty control means "show all".
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone what we need so we can mutate state inside the loops.
    let options = state.options.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let n_selected = state.selection.years.len();
            filter_section(ui, "Select Year(s)", n_selected, options.years.len(), |ui| {
                if ui.small_button("Clear").clicked() {
                    state.clear_years();
                }
                for &year in &options.years {
                    let mut checked = state.selection.years.contains(&year);
                    if ui.checkbox(&mut checked, year.to_string()).changed() {
                        state.toggle_year(year);
                    }
                }
            });

            let n_selected = state.selection.venues.len();
            filter_section(ui, "Select Venue(s)", n_selected, options.venues.len(), |ui| {
                if ui.small_button("Clear").clicked() {
                    state.clear_venues();
                }
                for venue in &options.venues {
                    let mut checked = state.selection.venues.contains(venue);
                    if ui.checkbox(&mut checked, venue.as_str()).changed() {
                        state.toggle_venue(venue);
                    }
                }
            });

            let n_selected = state.selection.levels.len();
            filter_section(
                ui,
                "Filter by Accessibility",
                n_selected,
                options.levels.len(),
                |ui| {
                    if ui.small_button("Clear").clicked() {
                        state.clear_levels();
                    }
                    for level in &options.levels {
                        let mut checked = state.selection.levels.contains(level);
                        let text = RichText::new(level.to_string())
                            .color(text_color(classify(level)));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_level(level);
                        }
                    }
                },
            );
        });
}

fn filter_section(
    ui: &mut Ui,
    title: &str,
    n_selected: usize,
    n_total: usize,
    add_contents: impl FnOnce(&mut Ui),
) {
    let header_text = if n_selected == 0 {
        format!("{title}  (all {n_total})")
    } else {
        format!("{title}  ({n_selected}/{n_total})")
    };
    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, add_contents);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar with the statistics line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export JSON…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        if ui.button("Reset view").clicked() {
            state.reset_view = true;
        }

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} visible",
            state.table.len(),
            state.visible_records()
        ));
        if !state.selection.is_empty() {
            ui.label(RichText::new("(filtered)").italics());
        }
    });

    ui.label(
        RichText::new(
            "Explore venue accessibility using the traffic light system: \
             Green (High), Orange (Medium), Red (Low)",
        )
        .color(Color32::GRAY),
    );

    ui.horizontal(|ui: &mut Ui| {
        let summary = state.summary;
        ui.label(RichText::new(format!("Total Venues: {} | ", summary.total)).strong());
        for (i, category) in Category::LAYER_ORDER.iter().enumerate() {
            if i > 0 {
                ui.label(RichText::new("|").strong());
            }
            ui.label(RichText::new(format!("{} Accessibility:", category.label())).strong());
            ui.label(
                RichText::new(summary.count(*category).to_string())
                    .strong()
                    .color(text_color(*category)),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – visible records
// ---------------------------------------------------------------------------

/// Table of the records currently on the map.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let rows: Vec<_> = state
        .figure
        .layers
        .iter()
        .flat_map(|layer| layer.markers.iter().map(move |m| (layer.category, m)))
        .collect();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(200.0))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Venue", "Year", "Level", "Performances", "Details"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let (category, marker) = rows[row.index()];
                let tip = &marker.tooltip;
                row.col(|ui: &mut Ui| {
                    ui.label(&tip.venue);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(tip.year.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(RichText::new(&tip.level).color(text_color(category)));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&tip.performances);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&tip.detail);
                });
            });
        });
}

/// Status line with the loaded file.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    ui.label(
        RichText::new(format!("Source: {}", state.source.display()))
            .small()
            .color(Color32::GRAY),
    );
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export map figure")
        .set_file_name("fringe-access.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = crate::export::write_json(&path, &state.figure, &state.summary) {
            log::error!("Failed to export figure: {e:#}");
        }
    }
}
