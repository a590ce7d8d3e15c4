use egui::{Grid, RichText, ScrollArea, Ui};
use kg_explorer::GraphStats;

use crate::ui_consts::STATS_TABLE_MAX_HEIGHT;
use crate::ExplorerApp;

fn metric(ui: &mut Ui, label: &str, value: usize) {
    ui.label(label);
    ui.label(RichText::new(value.to_string()).size(28.0).strong());
}

fn count_table<'a>(ui: &mut Ui, id: &str, rows: impl Iterator<Item = (&'a str, usize)>) {
    ScrollArea::vertical()
        .id_salt(id)
        .max_height(STATS_TABLE_MAX_HEIGHT)
        .show(ui, |ui| {
            Grid::new(id).striped(true).num_columns(2).show(ui, |ui| {
                ui.strong("");
                ui.strong("Count");
                ui.end_row();
                for (label, count) in rows {
                    ui.label(label);
                    ui.label(count.to_string());
                    ui.end_row();
                }
            });
        });
}

fn ui_stats(ui: &mut Ui, stats: &GraphStats) {
    ui.columns(3, |cols| {
        metric(&mut cols[0], "Nodes", stats.node_count);
        metric(&mut cols[0], "Edges", stats.edge_count);

        cols[1].strong("Node Types");
        count_table(
            &mut cols[1],
            "node_types",
            stats.categories.iter().map(|(c, n)| (c.display_name(), n)),
        );

        cols[2].strong("Top Relationships");
        count_table(
            &mut cols[2],
            "relations",
            stats.relations.iter().map(|(r, n)| (r.as_str(), *n)),
        );
    });
}

impl ExplorerApp {
    pub fn ui_statistics_tab(&mut self, ui: &mut Ui) {
        match self.session.current() {
            Some(snapshot) if !snapshot.stats.is_empty() => ui_stats(ui, &snapshot.stats),
            _ => {
                ui.colored_label(ui.visuals().warn_fg_color, "No graph data to analyze.");
            }
        }
    }
}
