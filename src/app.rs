use eframe::egui;

use crate::state::AppState;
use crate::ui::{map, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FringeAccessApp {
    pub state: AppState,
}

impl FringeAccessApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for FringeAccessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + statistics ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &self.state);
        });

        // ---- Bottom panel: visible records ----
        egui::TopBottomPanel::bottom("records_panel")
            .default_height(180.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::records_table(ui, &self.state);
            });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            map::venue_map(ui, &mut self.state);
        });
    }
}
