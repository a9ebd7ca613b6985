use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use web_summary_viewer::data::model::Record;
use web_summary_viewer::state::AppState;

const ROW_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Records table (central panel)
// ---------------------------------------------------------------------------

/// Render the visible records, one row per page.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    if state.dataset().is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.loading {
                ui.heading("Loading…");
            } else {
                ui.heading("Open a scraped summary to get started  (File → Open…)");
            }
        });
        return;
    }

    let records: Vec<&Record> = state.visible_records().collect();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::initial(220.0).at_least(80.0).clip(true))
        .column(Column::initial(220.0).at_least(80.0).clip(true))
        .column(Column::initial(280.0).at_least(80.0).clip(true))
        .column(Column::remainder().at_least(120.0).clip(true))
        .header(ROW_HEIGHT, |mut header| {
            for name in ["URL", "Title", "Meta Description", "AI Summary"] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, records.len(), |mut row| {
                let record = records[row.index()];
                row.col(|ui| {
                    ui.hyperlink_to(record.url.as_str(), record.url.as_str());
                });
                for text in [&record.title, &record.meta_description, &record.ai_summary] {
                    row.col(|ui| text_cell(ui, text.as_deref()));
                }
            });
        });
}

/// Single-line cell; the full text is shown on hover.
fn text_cell(ui: &mut Ui, text: Option<&str>) {
    if let Some(text) = text {
        ui.add(egui::Label::new(text).truncate())
            .on_hover_text(text);
    }
}
