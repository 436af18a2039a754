use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::{self, EncodeError, EXPORT_FILE_NAME};
use crate::data::loader::COLUMNS;
use crate::data::metrics::Kpis;
use crate::data::model::{Dataset, FilterField};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one collapsible allow-list per dimension.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone the value lists so we can mutate state inside the loop.
    let distinct: Vec<(FilterField, Vec<String>)> = match &state.dataset {
        Some(ds) => FilterField::ALL
            .iter()
            .map(|&f| (f, ds.distinct_values(f).iter().cloned().collect()))
            .collect(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (field, values) in &distinct {
                let n_selected = state.selection.values(*field).len();
                let header_text =
                    format!("{}  ({}/{})", field.label(), n_selected, values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(field.label())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(*field);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(*field);
                            }
                        });

                        for value in values {
                            let mut checked = state.selection.contains(*field, value);
                            let label =
                                if value.is_empty() { "(blank)" } else { value.as_str() };
                            if ui.checkbox(&mut checked, label).changed() {
                                state.toggle_filter_value(*field, value);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                ds.len(),
                state.visible.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

/// Render the three scalar KPIs above the charts.
pub fn kpi_row(ui: &mut Ui, kpis: &Kpis) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Sales", &format_money(kpis.total_sales));
        metric(&mut cols[1], "Total Profit", &format_money(kpis.total_profit));
        metric(&mut cols[2], "Distinct Orders", &kpis.distinct_orders.to_string());
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).strong().size(22.0));
    });
}

/// Dollar formatting with thousands separators, presentation-only rounding
/// to cents.
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < -0.005 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

// ---------------------------------------------------------------------------
// Raw data table
// ---------------------------------------------------------------------------

/// Render the filtered view as a table, one row per record.
pub fn raw_data_table(ui: &mut Ui, dataset: &Dataset, visible: &[usize]) {
    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(280.0)
        .columns(Column::auto().at_least(70.0), COLUMNS.len())
        .header(20.0, |mut header| {
            for name in COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, visible.len(), |mut row| {
                let rec = &dataset.records[visible[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.order_id);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.order_date.format("%Y-%m-%d").to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.category);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.sub_category);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.segment);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.region);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2}", rec.sales));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2}", rec.profit));
                });
            });
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        load_into(state, &path);
    }
}

/// Load a dataset into the app state, surfacing failures in the status bar.
pub fn load_into(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_csv(path) {
        Ok(dataset) => {
            log::info!("Loaded {} records from {}", dataset.len(), path.display());
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e}", path.display());
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

/// Ask for a target path and write the current filtered view as CSV.
pub fn export_dialog(state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    let result = export::encode(dataset, &state.visible)
        .and_then(|bytes| std::fs::write(&path, bytes).map_err(EncodeError::from));

    match result {
        Ok(()) => {
            log::info!(
                "Exported {} records to {}",
                state.visible.len(),
                path.display()
            );
        }
        Err(e) => {
            log::error!("Export failed: {e}");
            state.status_message = Some(format!("Export error: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::format_money;

    #[test]
    fn money_formatting_groups_thousands() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(2_297_200.86), "$2,297,200.86");
        assert_eq!(format_money(-12.031), "-$12.03");
    }
}
