use eframe::egui;
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::catalog::filter::fold_diacritics;
use crate::catalog::Record;

/// Table columns, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Category,
    Source,
    Filename,
    Favorite,
}

impl Column {
    /// Fixed column order
    pub const ORDER: [Column; 5] = [
        Column::Name,
        Column::Category,
        Column::Source,
        Column::Filename,
        Column::Favorite,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Category => "Category",
            Column::Source => "Source",
            Column::Filename => "Filename",
            Column::Favorite => "Favorite",
        }
    }

    /// The filename column exists in the model but is never shown
    pub fn hidden(self) -> bool {
        matches!(self, Column::Filename)
    }
}

/// Edit/selection events emitted by the table
pub enum TableEvent {
    /// The favorite checkbox of a row was edited
    FavoriteToggled { name: String, favorite: bool },
    /// A row was double-clicked
    Activated { row: usize },
}

/// Tabular view over a derived, non-owning slice of the catalog.
///
/// The favorite checkbox is the only editable cell; edits are emitted
/// as [`TableEvent`]s for the owning controller to apply to the
/// ledger, rather than written back to any store from here.
pub struct CatalogTable {
    id: &'static str,
    rows: Vec<Record>,
}

impl CatalogTable {
    pub fn new(id: &'static str) -> Self {
        Self { id, rows: Vec::new() }
    }

    /// Replace the displayed rows with a freshly derived view
    pub fn set_rows(&mut self, rows: Vec<Record>) {
        self.rows = rows;
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        Column::ORDER.len()
    }

    pub fn record(&self, row: usize) -> Option<&Record> {
        self.rows.get(row)
    }

    /// Display value of one cell
    pub fn cell(&self, row: usize, column: Column) -> Option<String> {
        let record = self.rows.get(row)?;
        Some(match column {
            Column::Name => record.name.clone(),
            Column::Category => record.categories.join(", "),
            Column::Source => record.source.clone(),
            Column::Filename => record.filename.clone(),
            Column::Favorite => record.favorite.to_string(),
        })
    }

    /// Edit the favorite cell of a row, returning the event for the
    /// controller to persist
    pub fn set_favorite(&mut self, row: usize, favorite: bool) -> Option<TableEvent> {
        let record = self.rows.get_mut(row)?;
        record.favorite = favorite;
        Some(TableEvent::FavoriteToggled {
            name: record.name.clone(),
            favorite,
        })
    }

    /// Patch the favorite flag of every row with a matching folded
    /// name, used to keep the sibling view in sync without a reload
    pub fn patch_favorite(&mut self, name: &str, favorite: bool) {
        let folded = fold_diacritics(name);
        for record in &mut self.rows {
            if fold_diacritics(&record.name) == folded {
                record.favorite = favorite;
            }
        }
    }

    /// Render the table and report edits and double-clicks
    pub fn show<F>(&mut self, ui: &mut egui::Ui, mut on_event: F)
    where
        F: FnMut(TableEvent),
    {
        let mut toggled: Vec<(usize, bool)> = Vec::new();
        let mut activated: Option<usize> = None;

        ui.push_id(self.id, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .column(TableColumn::initial(250.0).at_least(120.0))
                .column(TableColumn::initial(300.0).at_least(120.0))
                .column(TableColumn::initial(200.0).at_least(80.0))
                .column(TableColumn::remainder())
                .header(20.0, |mut header| {
                    for column in Column::ORDER.iter().filter(|c| !c.hidden()) {
                        header.col(|ui| {
                            ui.strong(column.title());
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, self.rows.len(), |index, mut row| {
                        let record = &self.rows[index];

                        row.col(|ui| {
                            let label = ui.add(
                                egui::Label::new(&record.name).sense(egui::Sense::click()),
                            );
                            if label.double_clicked() {
                                activated = Some(index);
                            }
                        });
                        row.col(|ui| {
                            ui.label(record.categories.join(", "));
                        });
                        row.col(|ui| {
                            ui.label(&record.source);
                        });
                        row.col(|ui| {
                            let mut favorite = record.favorite;
                            if ui.checkbox(&mut favorite, "").changed() {
                                toggled.push((index, favorite));
                            }
                        });
                    });
                });
        });

        for (row, favorite) in toggled {
            if let Some(event) = self.set_favorite(row, favorite) {
                on_event(event);
            }
        }
        if let Some(row) = activated {
            on_event(TableEvent::Activated { row });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<Record> {
        vec![
            Record {
                name: "Pac Man".to_string(),
                categories: vec!["Arcade".to_string(), "Classic".to_string()],
                source: "MAME".to_string(),
                filename: "pacman.zip".to_string(),
                favorite: false,
            },
            Record {
                name: "Oyün".to_string(),
                categories: vec!["Klasik".to_string()],
                source: "unknown".to_string(),
                filename: "oyun.swf".to_string(),
                favorite: true,
            },
        ]
    }

    #[test]
    fn exposes_the_fixed_column_order() {
        let table = CatalogTable::new("test");
        assert_eq!(table.column_count(), 5);
        assert_eq!(Column::ORDER[0].title(), "Name");
        assert_eq!(Column::ORDER[4].title(), "Favorite");
        assert!(Column::Filename.hidden());
    }

    #[test]
    fn cell_accessor_formats_each_column() {
        let mut table = CatalogTable::new("test");
        table.set_rows(sample_rows());

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, Column::Name).unwrap(), "Pac Man");
        assert_eq!(table.cell(0, Column::Category).unwrap(), "Arcade, Classic");
        assert_eq!(table.cell(0, Column::Source).unwrap(), "MAME");
        assert_eq!(table.cell(0, Column::Filename).unwrap(), "pacman.zip");
        assert_eq!(table.cell(1, Column::Favorite).unwrap(), "true");
        assert!(table.cell(9, Column::Name).is_none());
    }

    #[test]
    fn set_favorite_updates_the_row_and_reports_the_event() {
        let mut table = CatalogTable::new("test");
        table.set_rows(sample_rows());

        let event = table.set_favorite(0, true).unwrap();
        match event {
            TableEvent::FavoriteToggled { name, favorite } => {
                assert_eq!(name, "Pac Man");
                assert!(favorite);
            }
            _ => panic!("expected a favorite toggle"),
        }
        assert!(table.record(0).unwrap().favorite);
    }

    #[test]
    fn patch_favorite_matches_folded_names() {
        let mut table = CatalogTable::new("test");
        table.set_rows(sample_rows());

        table.patch_favorite("Oyun", false);
        assert!(!table.record(1).unwrap().favorite);
    }
}
