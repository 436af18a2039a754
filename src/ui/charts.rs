use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

use crate::color::ColorMap;
use crate::data::aggregate::AggregateTable;
use crate::state::Dashboard;

const CHART_HEIGHT: f32 = 220.0;

// ---------------------------------------------------------------------------
// Dashboard charts (central panel)
// ---------------------------------------------------------------------------

/// Render all five charts for the current dashboard state.
pub fn dashboard_charts(ui: &mut Ui, dashboard: &Dashboard) {
    monthly_sales_chart(ui, &dashboard.monthly_sales);
    ui.separator();
    bar_chart(ui, "category_sales", "Sales by Category", &dashboard.category_sales);
    ui.separator();
    bar_chart(
        ui,
        "sub_category_profit",
        "Profit by Sub-Category (descending)",
        &dashboard.sub_category_profit,
    );
    ui.separator();
    bar_chart(ui, "segment_profit", "Profit by Customer Segment", &dashboard.segment_profit);
    ui.separator();
    bar_chart(
        ui,
        "profit_ratio",
        "Profit-to-Sales Ratio by Category",
        &dashboard.profit_ratio_by_category,
    );
}

/// Line chart of sales per month, in chronological order.
fn monthly_sales_chart(ui: &mut Ui, table: &AggregateTable) {
    ui.heading("Monthly Sales Trend");
    if table.is_empty() {
        ui.label("No data for the current filters.");
        return;
    }

    let months: Vec<String> = table.iter().map(|(k, _)| k.clone()).collect();
    let points: PlotPoints = table
        .iter()
        .enumerate()
        .map(|(i, &(_, v))| [i as f64, v])
        .collect();

    Plot::new("monthly_sales")
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| axis_label(&months, mark.value))
        .y_axis_label("Sales")
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("Sales").color(Color32::LIGHT_BLUE).width(2.0));
        });
}

/// Bar chart of an aggregate table, one coloured bar per group key, in the
/// table's own order.
fn bar_chart(ui: &mut Ui, id: &str, title: &str, table: &AggregateTable) {
    ui.heading(title);
    if table.is_empty() {
        ui.label("No data for the current filters.");
        return;
    }

    let colors = ColorMap::from_keys(table.iter().map(|(k, _)| k.as_str()));
    let keys: Vec<String> = table.iter().map(|(k, _)| k.clone()).collect();
    let bars: Vec<Bar> = table
        .iter()
        .enumerate()
        .map(|(i, (key, value))| {
            Bar::new(i as f64, *value)
                .width(0.6)
                .name(key)
                .fill(colors.color_for(key))
        })
        .collect();

    Plot::new(id.to_string())
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| axis_label(&keys, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Map an axis position back to its group label; non-integer grid marks and
/// out-of-range positions stay blank.
fn axis_label(keys: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    keys.get(idx as usize).cloned().unwrap_or_default()
}
