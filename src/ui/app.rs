use eframe::egui;
use log::{error, info, warn};
use std::time::{Duration, Instant};

use crate::catalog::filter::{filter_records, source_options, ALL_SOURCES};
use crate::catalog::{append_entry, load_catalog, FavoritesLedger, NewEntry, Record};
use crate::config::Config;
use crate::launcher;
use crate::ui::edit_view::{EditAction, EditView};
use crate::ui::table::{CatalogTable, TableEvent};

/// Application view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    /// Main menu
    MainMenu,
    /// Full catalog list
    List,
    /// Favorites only
    Favorites,
    /// Add-game form
    AddGame,
}

/// Non-fatal notification shown under the heading
struct StatusLine {
    text: String,
    is_error: bool,
}

/// Mini Games Hub application
pub struct GamesHubApp {
    /// Current view
    view: AppView,
    /// Configuration
    config: Config,
    /// Favorites ledger, loaded once at startup
    ledger: FavoritesLedger,
    /// Catalog store, rebuilt on every view change
    catalog: Vec<Record>,
    /// Filtered list view
    list_table: CatalogTable,
    /// Favorites view
    favorites_table: CatalogTable,
    /// Free-text filter query
    filter_text: String,
    /// Selected source, or the "All Sources" sentinel
    selected_source: String,
    /// Dropdown options derived from the catalog
    source_options: Vec<String>,
    /// Add-game form
    edit_view: EditView,
    /// Current notification, if any
    status: Option<StatusLine>,
    /// Set when the query changed and the filter has not been re-run yet
    filter_pending: bool,
    /// Time of the last query edit, for the debounce window
    last_filter_edit: Instant,
}

impl GamesHubApp {
    /// Create the application and load both backing files
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let ledger = FavoritesLedger::load(config.favorites_path());

        let mut app = Self {
            view: AppView::MainMenu,
            config,
            ledger,
            catalog: Vec::new(),
            list_table: CatalogTable::new("list_view"),
            favorites_table: CatalogTable::new("favorites_view"),
            filter_text: String::new(),
            selected_source: ALL_SOURCES.to_string(),
            source_options: Vec::new(),
            edit_view: EditView::new(),
            status: None,
            filter_pending: false,
            last_filter_edit: Instant::now(),
        };

        app.reload_catalog();
        app
    }

    /// Rebuild the catalog store from disk: full re-parse, favorites
    /// re-derived from the ledger, existence filter re-applied.
    fn reload_catalog(&mut self) {
        let catalog_path = self.config.catalog_path();
        let report = load_catalog(&catalog_path, &self.config.paths.base_dir, &self.ledger);

        if let Some(warning) = report.warning(&catalog_path) {
            warn!("{}", warning);
            self.status = Some(StatusLine {
                text: warning,
                is_error: false,
            });
        }

        self.catalog = report.records;
        self.source_options = source_options(&self.catalog);
        if self.selected_source != ALL_SOURCES
            && !self.source_options.contains(&self.selected_source)
        {
            self.selected_source = ALL_SOURCES.to_string();
        }

        self.apply_filter();
        self.rebuild_favorites_rows();
    }

    /// Re-run the filter engine over the in-memory catalog
    fn apply_filter(&mut self) {
        self.list_table.set_rows(filter_records(
            &self.catalog,
            &self.filter_text,
            &self.selected_source,
        ));
        self.filter_pending = false;
    }

    /// Derive the favorites view from the in-memory catalog, without
    /// re-reading the catalog file
    fn rebuild_favorites_rows(&mut self) {
        let rows = self
            .catalog
            .iter()
            .filter(|record| record.favorite)
            .cloned()
            .collect();
        self.favorites_table.set_rows(rows);
    }

    /// Apply a table event from either view
    fn handle_table_event(&mut self, event: TableEvent, view: AppView) {
        match event {
            TableEvent::FavoriteToggled { name, favorite } => {
                self.ledger.toggle(&name, favorite);

                // The toggle is only authoritative once the ledger hit
                // disk; report failure instead of success otherwise.
                if let Err(e) = self.ledger.save() {
                    error!("Failed to save favorites: {:#}", e);
                    self.status = Some(StatusLine {
                        text: format!("Could not save favorites: {}", e),
                        is_error: true,
                    });
                    return;
                }

                let folded = crate::catalog::filter::fold_diacritics(&name);
                for record in &mut self.catalog {
                    if crate::catalog::filter::fold_diacritics(&record.name) == folded {
                        record.favorite = favorite;
                    }
                }
                self.list_table.patch_favorite(&name, favorite);
                self.favorites_table.patch_favorite(&name, favorite);
                self.rebuild_favorites_rows();

                info!("Favorite '{}' set to {}", name, favorite);
            }
            TableEvent::Activated { row } => {
                let table = match view {
                    AppView::Favorites => &self.favorites_table,
                    _ => &self.list_table,
                };
                let Some(record) = table.record(row) else {
                    return;
                };
                let (name, filename) = (record.name.clone(), record.filename.clone());

                if let Err(e) = launcher::launch(&self.config.paths.base_dir, &filename) {
                    error!("Failed to launch '{}': {:#}", name, e);
                    self.status = Some(StatusLine {
                        text: format!("Could not launch '{}': {}", name, e),
                        is_error: true,
                    });
                }
            }
        }
    }

    /// Submit the add-game form
    fn submit_new_entry(&mut self, entry: NewEntry) {
        let catalog_path = self.config.catalog_path();
        match append_entry(&catalog_path, &self.config.paths.base_dir, &entry) {
            Ok(record) => {
                self.status = Some(StatusLine {
                    text: format!("New game '{}' added successfully.", record.name),
                    is_error: false,
                });
                self.edit_view.clear();
                self.reload_catalog();
            }
            Err(e) => {
                warn!("Failed to add new game: {}", e);
                self.status = Some(StatusLine {
                    text: format!("Could not add game: {}", e),
                    is_error: true,
                });
            }
        }
    }

    fn open_view(&mut self, view: AppView) {
        // Entering either catalog view rebuilds the store from disk.
        if matches!(view, AppView::List | AppView::Favorites) {
            self.reload_catalog();
        }
        self.status = None;
        self.view = view;
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        let mut dismissed = false;
        if let Some(status) = &self.status {
            ui.horizontal(|ui| {
                let color = if status.is_error {
                    egui::Color32::LIGHT_RED
                } else {
                    egui::Color32::YELLOW
                };
                ui.colored_label(color, &status.text);
                if ui.small_button("x").clicked() {
                    dismissed = true;
                }
            });
            ui.separator();
        }
        if dismissed {
            self.status = None;
        }
    }

    fn render_main_menu(&mut self, ui: &mut egui::Ui) {
        ui.heading("Mini Games Hub");
        ui.separator();
        self.render_status(ui);

        ui.add_space(24.0);
        ui.horizontal(|ui| {
            let size = egui::vec2(150.0, 150.0);
            if ui.add_sized(size, egui::Button::new("List All Games")).clicked() {
                self.open_view(AppView::List);
            }
            if ui.add_sized(size, egui::Button::new("Favorites")).clicked() {
                self.open_view(AppView::Favorites);
            }
            if ui.add_sized(size, egui::Button::new("Add Game")).clicked() {
                self.open_view(AppView::AddGame);
            }
        });
    }

    fn render_list_view(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("All Games");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Back to Main Menu").clicked() {
                    self.open_view(AppView::MainMenu);
                }
            });
        });
        ui.separator();
        self.render_status(ui);

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.filter_text)
                    .hint_text("Search by name or category...")
                    .desired_width(300.0),
            );
            if response.changed() {
                self.filter_pending = true;
                self.last_filter_edit = Instant::now();
            }

            let mut source_changed = false;
            egui::ComboBox::from_id_source("source_filter")
                .selected_text(&self.selected_source)
                .show_ui(ui, |ui| {
                    source_changed |= ui
                        .selectable_value(
                            &mut self.selected_source,
                            ALL_SOURCES.to_string(),
                            ALL_SOURCES,
                        )
                        .changed();
                    for source in self.source_options.clone() {
                        source_changed |= ui
                            .selectable_value(
                                &mut self.selected_source,
                                source.clone(),
                                &source,
                            )
                            .changed();
                    }
                });
            if source_changed {
                self.apply_filter();
            }
        });

        ui.separator();
        ui.label(format!("Found {} games", self.list_table.row_count()));
        ui.separator();

        let mut events = Vec::new();
        self.list_table.show(ui, |event| events.push(event));
        for event in events {
            self.handle_table_event(event, AppView::List);
        }
    }

    fn render_favorites_view(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Favorites");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Back to Main Menu").clicked() {
                    self.open_view(AppView::MainMenu);
                }
            });
        });
        ui.separator();
        self.render_status(ui);

        let mut events = Vec::new();
        self.favorites_table.show(ui, |event| events.push(event));
        for event in events {
            self.handle_table_event(event, AppView::Favorites);
        }
    }

    fn render_add_game_view(&mut self, ui: &mut egui::Ui) {
        self.render_status(ui);

        let mut actions = Vec::new();
        self.edit_view.show(ui, |action| actions.push(action));
        for action in actions {
            match action {
                EditAction::Submit(entry) => self.submit_new_entry(entry),
                EditAction::Back => self.open_view(AppView::MainMenu),
            }
        }
    }
}

impl eframe::App for GamesHubApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Debounced free-text filtering: re-run the filter only after
        // the query has been quiet for the configured window.
        let debounce = Duration::from_millis(self.config.ui.filter_debounce_ms);
        if self.filter_pending {
            if self.last_filter_edit.elapsed() >= debounce {
                self.apply_filter();
            } else {
                ctx.request_repaint_after(debounce - self.last_filter_edit.elapsed());
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            AppView::MainMenu => self.render_main_menu(ui),
            AppView::List => self.render_list_view(ui),
            AppView::Favorites => self.render_favorites_view(ui),
            AppView::AddGame => self.render_add_game_view(ui),
        });
    }
}
