use eframe::egui;
use std::path::PathBuf;

use crate::catalog::NewEntry;

/// Add-game form action
pub enum EditAction {
    /// Submit the form as typed; validation happens in the catalog layer
    Submit(NewEntry),
    /// Return to the main menu
    Back,
}

/// Add-game form state
pub struct EditView {
    name: String,
    categories: String,
    source: String,
    file_path: Option<PathBuf>,
}

impl EditView {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            categories: String::new(),
            source: String::new(),
            file_path: None,
        }
    }

    /// Reset the form after a successful submission
    pub fn clear(&mut self) {
        self.name.clear();
        self.categories.clear();
        self.source.clear();
        self.file_path = None;
    }

    pub fn show<F>(&mut self, ui: &mut egui::Ui, mut on_action: F)
    where
        F: FnMut(EditAction),
    {
        ui.heading("Add Game");
        ui.separator();

        egui::Grid::new("add_game_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Game Name:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.name)
                        .hint_text("Enter new game name...")
                        .desired_width(360.0),
                );
                ui.end_row();

                ui.label("Categories:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.categories)
                        .hint_text("Enter categories (comma-separated)...")
                        .desired_width(360.0),
                );
                ui.end_row();

                ui.label("Source:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.source)
                        .hint_text("Enter source...")
                        .desired_width(360.0),
                );
                ui.end_row();

                ui.label("File:");
                let button_text = self
                    .file_path
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "Select File".to_string());
                if ui.button(button_text).clicked() {
                    if let Some(path) = rfd::FileDialog::new().pick_file() {
                        self.file_path = Some(path);
                    }
                }
                ui.end_row();
            });

        ui.add_space(12.0);

        ui.horizontal(|ui| {
            if ui.button("Add New Game").clicked() {
                on_action(EditAction::Submit(NewEntry {
                    name: self.name.clone(),
                    categories: self.categories.clone(),
                    source: self.source.clone(),
                    file_path: self.file_path.clone().unwrap_or_default(),
                }));
            }
            if ui.button("Back to Main Menu").clicked() {
                on_action(EditAction::Back);
            }
        });
    }
}

impl Default for EditView {
    fn default() -> Self {
        Self::new()
    }
}
