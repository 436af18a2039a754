use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StoreLensApp {
    pub state: AppState,
}

impl StoreLensApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for StoreLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, charts, raw data ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(dataset) = &self.state.dataset else {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a sales CSV to begin  (File → Open CSV…)");
                });
                return;
            };

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut egui::Ui| {
                    panels::kpi_row(ui, &self.state.dashboard.kpis);
                    ui.separator();
                    charts::dashboard_charts(ui, &self.state.dashboard);
                    ui.separator();
                    ui.heading("Raw Data");
                    panels::raw_data_table(ui, dataset, &self.state.visible);
                });
        });
    }
}
