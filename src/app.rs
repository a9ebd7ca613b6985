use eframe::egui;

use web_summary_viewer::config::ViewerConfig;
use web_summary_viewer::data::loader::Source;
use web_summary_viewer::state::{AppState, LoadOutcome};
use web_summary_viewer::worker::LoadWorker;

use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ViewerApp {
    pub state: AppState,
    worker: LoadWorker,
    ctx: egui::Context,
    /// Source used by Refresh until a load succeeds.
    default_source: Source,
}

impl ViewerApp {
    pub fn new(ctx: egui::Context, config: ViewerConfig) -> Self {
        let mut app = Self {
            state: AppState::new(config.reset_query_on_reload),
            worker: LoadWorker::new(),
            ctx,
            default_source: config.source(),
        };
        if config.auto_load {
            app.request_load(app.default_source.clone());
        }
        app
    }

    /// Start loading `source` in the background.
    pub fn request_load(&mut self, source: Source) {
        let ticket = self.state.begin_load();
        let ctx = self.ctx.clone();
        self.worker
            .spawn(ticket, source, move || ctx.request_repaint());
    }

    /// Reload whatever is currently shown.
    pub fn refresh(&mut self) {
        let source = self
            .state
            .source
            .clone()
            .unwrap_or_else(|| self.default_source.clone());
        self.request_load(source);
    }

    fn apply_finished_loads(&mut self) {
        for done in self.worker.poll() {
            if let LoadOutcome::Applied { rows } =
                self.state.complete_load(done.ticket, done.source, done.result)
            {
                log::debug!("Showing {rows} records");
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_finished_loads();

        // ---- Top panel: menu, search box, refresh ----
        let mut action = None;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            action = panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::records_table(ui, &self.state);
        });

        match action {
            Some(panels::Action::Refresh) => self.refresh(),
            Some(panels::Action::Open(path)) => self.request_load(Source::Path(path)),
            None => {}
        }
    }
}
