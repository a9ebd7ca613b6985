use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, Ui};

use web_summary_viewer::state::{AppState, Phase};

/// Requests from the top bar that the app carries out after drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Open(PathBuf),
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the menu, search box and status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) -> Option<Action> {
    let mut action = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                action = open_file_dialog().map(Action::Open);
                ui.close_menu();
            }
            if ui.button("Refresh").clicked() {
                action = Some(Action::Refresh);
                ui.close_menu();
            }
        });

        if let Some(source) = &state.source {
            ui.separator();
            ui.label(RichText::new(source.to_string()).weak());
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        // Edit a copy so every keystroke goes through `set_query`.
        let mut query = state.query().to_owned();
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("Search by keyword...")
                .desired_width(300.0),
        );
        if response.changed() {
            state.set_query(query);
        }
        if !state.query().is_empty() && ui.small_button("✕").clicked() {
            state.clear_query();
        }

        if ui.button("🔄 Refresh").clicked() {
            action = Some(Action::Refresh);
        }

        ui.separator();

        if state.loading {
            ui.spinner();
        }

        if let Some(ds) = state.dataset() {
            let text = match state.phase() {
                Phase::Filtered => format!(
                    "{} of {} pages match",
                    state.visible_indices().len(),
                    ds.len()
                ),
                _ => format!("{} pages loaded", ds.len()),
            };
            ui.label(text);
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    action
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open scraped summary")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file()
}
