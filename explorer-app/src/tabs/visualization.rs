use egui::{RichText, ScrollArea, Ui};
use kg_explorer::{to_hex, EntityCategory, WidgetDocument};

use crate::figure_view::FigureView;
use crate::session::Rendering;
use crate::ui_consts::{HEADING_TEXT_SIZE, SECTION_SPACING};
use crate::util::{file_url, plural, save_with_dialog, write_temp_page};
use crate::ExplorerApp;

impl ExplorerApp {
    pub fn ui_visualization_tab(&mut self, ui: &mut Ui) {
        let Some(snapshot) = self.session.current() else {
            ui.weak("Nothing computed yet.");
            return;
        };

        match &snapshot.rendering {
            Rendering::Figure(fig) => {
                ui.add(FigureView::new(fig).with_labels(self.labels));
            }
            Rendering::Widget(doc) => {
                let title = snapshot.title.clone();
                let doc = doc.clone();
                self.ui_widget_document(ui, &title, &doc);
            }
            Rendering::Failed(msg) => {
                ui.colored_label(ui.visuals().error_fg_color, msg);
            }
        }
    }

    fn ui_widget_document(&mut self, ui: &mut Ui, title: &str, doc: &WidgetDocument) {
        ui.label(RichText::new(title).size(HEADING_TEXT_SIZE).strong());
        if doc.is_empty() {
            ui.weak("No graph data to display.");
            return;
        }
        ui.label(format!(
            "Interactive network document with {} and {}.",
            plural(doc.node_count, "node", "nodes"),
            plural(doc.edge_count, "edge", "edges")
        ));
        ui.add_space(SECTION_SPACING);

        ui.horizontal(|ui| {
            if ui
                .button("Open in browser")
                .on_hover_text("Show the interactive page in the default browser")
                .clicked()
            {
                match write_temp_page(&doc.html) {
                    Ok(path) => ui.ctx().open_url(egui::OpenUrl::new_tab(file_url(&path))),
                    Err(err) => self.status.push_error(format!("Could not open page: {err}")),
                }
            }
            if ui
                .button("Save HTML…")
                .on_hover_text("Write the interactive page to a file")
                .clicked()
            {
                match save_with_dialog("knowledge_graph.html", "HTML", "html", doc.html.as_bytes())
                {
                    Ok(Some(path)) => self
                        .status
                        .push_success(format!("Saved {}", path.display())),
                    Ok(None) => {}
                    Err(err) => self.status.push_error(format!("Save failed: {err}")),
                }
            }
            if ui.button("Copy HTML").clicked() {
                ui.ctx().copy_text(doc.html.clone());
                self.status.push_info("Copied HTML to clipboard");
            }
        });
        ui.add_space(SECTION_SPACING);

        ui.label(RichText::new("Legend").strong());
        for category in EntityCategory::ALL {
            let style = self.session.style().category(category);
            ui.horizontal(|ui| {
                ui.colored_label(style.color, "⏺");
                ui.label(format!("{} ({})", category.display_name(), to_hex(style.color)));
            });
        }
        ui.add_space(SECTION_SPACING);

        ui.collapsing("Page source", |ui| {
            ScrollArea::both().max_height(ui.available_height()).show(ui, |ui| {
                ui.monospace(&doc.html);
            });
        });
    }
}
