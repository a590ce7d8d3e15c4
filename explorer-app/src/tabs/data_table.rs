use egui::{Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::ui_consts::{TABLE_HEADER_HEIGHT, TABLE_ROW_HEIGHT};
use crate::util::plural;
use crate::ExplorerApp;

const COLUMNS: [&str; 3] = ["source", "relation", "target"];

impl ExplorerApp {
    /// The raw triplet store, not the extracted subgraph.
    pub fn ui_data_table_tab(&mut self, ui: &mut Ui) {
        let triplets = self.session.triplets();
        if triplets.is_empty() {
            ui.colored_label(ui.visuals().warn_fg_color, "No data available to display.");
            return;
        }
        ui.weak(plural(triplets.len(), "row", "rows"));

        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .cell_layout(Layout::left_to_right(egui::Align::Center));
        for _ in COLUMNS {
            builder = builder.column(Column::remainder().at_least(80.0).clip(true));
        }

        builder
            .header(TABLE_HEADER_HEIGHT, |mut header| {
                for name in COLUMNS {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(TABLE_ROW_HEIGHT, triplets.len(), |mut row| {
                    let t = &triplets[row.index()];
                    for cell in [&t.source, &t.relation, &t.target] {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    }
}
