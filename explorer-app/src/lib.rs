use eframe::{App, CreationContext};
use egui::{self, Align2, CollapsingHeader, Color32, ComboBox, RichText, ScrollArea, Ui};
use kg_explorer::{
    clamp_cap, ExplorerSettings, ExportOutcome, FilterCategory, Query, Selection, VizBackend,
    ALL_CHOICE, CAP_MAX, CAP_MIN,
};

mod figure_view;
mod session;
mod status;
mod tabs;
mod ui_consts;
mod util;

pub use figure_view::{FigureView, ViewMetadata};
pub use session::{Rendering, Session, Snapshot};

use crate::status::{StatusKind, StatusQueue};
use crate::ui_consts::{
    ENTITY_LIST_LIMIT, ENTITY_LIST_MAX_HEIGHT, EXPORT_HEIGHT, EXPORT_WIDTH, HEADING_TEXT_SIZE,
    SECTION_SPACING, SIDE_PANEL_WIDTH, UI_MARGIN,
};

pub const APP_NAME: &str = "KG Genie: Clinical Trials Explorer";

fn info_icon(ui: &mut egui::Ui, tip: &str) {
    ui.add_space(4.0);
    ui.small_button("ℹ").on_hover_text(tip);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Visualization,
    DataTable,
    Statistics,
}

// Main explorer application state
pub struct ExplorerApp {
    pub session: Session,
    // Controls
    pub backend: VizBackend,
    pub category: FilterCategory,
    pub selection: Selection,
    pub entity_filter: String,
    pub cap: usize,
    pub labels: bool,
    // UI
    pub tab: Tab,
    pub status: StatusQueue,
    pub data_path: String,
    /// Session revision the figure view was last fitted for
    pub seen_revision: u64,
}

impl ExplorerApp {
    pub fn new(_cc: &CreationContext<'_>, settings: ExplorerSettings) -> Self {
        let mut app = Self {
            session: Session::new(&settings),
            backend: VizBackend::default(),
            category: FilterCategory::default(),
            selection: Selection::All,
            entity_filter: String::new(),
            cap: clamp_cap(settings.extraction.cap),
            labels: true,
            tab: Tab::Visualization,
            status: StatusQueue::new(),
            data_path: settings.data.path.display().to_string(),
            seen_revision: 0,
        };
        app.sync_store();
        app
    }

    pub fn query(&self) -> Query {
        Query::new(self.selection.clone(), self.category, self.cap)
    }

    /// Applies a reloaded store: surfaces load errors and drops a selection
    /// that no longer exists.
    fn sync_store(&mut self) {
        if !self.session.sync_store() {
            return;
        }
        self.after_store_change();
    }

    fn after_store_change(&mut self) {
        if let Some(err) = self.session.load_error() {
            self.status.push_warning(format!(
                "{err}. Please ensure '{}' is in the correct directory.",
                self.data_path
            ));
        }
        if let Some(entity) = self.selection.entity() {
            if !self.session.classifier().choices(self.category).contains(entity) {
                self.selection = Selection::All;
            }
        }
    }

    pub fn ui_controls(&mut self, ui: &mut Ui) {
        ui.label(
            RichText::new("Exploration Controls")
                .size(HEADING_TEXT_SIZE)
                .strong(),
        );
        ui.add_space(SECTION_SPACING);

        ui.horizontal(|ui| {
            ui.label("Visualization Type");
            info_icon(ui, "Choose between different visualization engines");
        });
        for backend in VizBackend::ALL {
            ui.radio_value(&mut self.backend, backend, backend.label());
        }
        ui.add_space(SECTION_SPACING);

        ui.horizontal(|ui| {
            ui.label("Explore by:");
            info_icon(ui, "Start your exploration from different entity types");
        });
        let before = self.category;
        for category in FilterCategory::ALL {
            ui.radio_value(&mut self.category, category, category.label());
        }
        if before != self.category {
            self.selection = Selection::All;
            self.entity_filter.clear();
        }
        ui.add_space(SECTION_SPACING);

        self.ui_entity_picker(ui);
        ui.add_space(SECTION_SPACING);

        ui.horizontal(|ui| {
            ui.add(egui::Slider::new(&mut self.cap, CAP_MIN..=CAP_MAX).text("Maximum nodes"));
            info_icon(ui, "Limit the number of rows shown for a specific entity");
        });
        ui.checkbox(&mut self.labels, "Show labels");
        ui.add_space(SECTION_SPACING);

        if ui
            .button("Reload data")
            .on_hover_text(format!("Read '{}' again", self.data_path))
            .clicked()
        {
            self.session.reload();
            self.after_store_change();
            self.status.push_info(format!(
                "Loaded {} triplets",
                self.session.triplets().len()
            ));
        }

        ui.separator();
        self.ui_export(ui);
    }

    fn ui_entity_picker(&mut self, ui: &mut Ui) {
        let choices = self.session.classifier().choices(self.category);
        let filter = self.entity_filter.to_lowercase();
        let mut picked: Option<Selection> = None;

        ComboBox::from_label(format!("Select {}", self.category.label()))
            .selected_text(self.selection.label())
            .width(SIDE_PANEL_WIDTH - 100.0)
            .show_ui(ui, |ui| {
                ui.text_edit_singleline(&mut self.entity_filter)
                    .on_hover_text("Filter entities");
                if ui
                    .selectable_label(self.selection == Selection::All, ALL_CHOICE)
                    .clicked()
                {
                    picked = Some(Selection::All);
                }
                ScrollArea::vertical()
                    .max_height(ENTITY_LIST_MAX_HEIGHT)
                    .show(ui, |ui| {
                        let matching = choices
                            .iter()
                            .filter(|c| filter.is_empty() || c.to_lowercase().contains(&filter));
                        let mut shown = 0;
                        for choice in matching {
                            if shown == ENTITY_LIST_LIMIT {
                                ui.weak("… refine the filter to see more");
                                break;
                            }
                            let selected = self.selection.entity() == Some(choice.as_str());
                            if ui.selectable_label(selected, choice).clicked() {
                                picked = Some(Selection::Entity(choice.clone()));
                            }
                            shown += 1;
                        }
                    });
            });

        if let Some(selection) = picked {
            self.selection = selection;
        }
    }

    fn ui_export(&mut self, ui: &mut Ui) {
        CollapsingHeader::new("Export Options")
            .default_open(true)
            .show(ui, |ui| {
                if !ui.button("Export Current View as Image").clicked() {
                    return;
                }
                match self.session.export(EXPORT_WIDTH, EXPORT_HEIGHT) {
                    Ok(ExportOutcome::Png(bytes)) => {
                        match util::save_with_dialog("knowledge_graph.png", "PNG image", "png", &bytes)
                        {
                            Ok(Some(path)) => self
                                .status
                                .push_success(format!("Saved {}", path.display())),
                            Ok(None) => {}
                            Err(err) => self.status.push_error(format!("Export failed: {err}")),
                        }
                    }
                    Ok(ExportOutcome::Unsupported(hint)) => self.status.push_warning(hint),
                    Err(err) => self.status.push_error(format!("Export failed: {err}")),
                }
            });
    }

    fn draw_status(&mut self, ui: &Ui) {
        self.status.retain_active();
        let Some(m) = self.status.latest() else {
            return;
        };
        let font = egui::TextStyle::Body.resolve(ui.style());
        let color = match m.kind {
            StatusKind::Error => ui.visuals().error_fg_color,
            StatusKind::Warning => ui.visuals().warn_fg_color,
            StatusKind::Success => Color32::from_rgb(80, 200, 120),
            StatusKind::Info => ui.visuals().hyperlink_color,
        };
        let rect = ui.max_rect();
        let pos = egui::pos2(rect.left() + UI_MARGIN, rect.bottom() - UI_MARGIN);
        ui.painter()
            .text(pos, Align2::LEFT_BOTTOM, m.text.clone(), font, color);
    }

    /// Recomputes the snapshot if a control or the store changed.
    fn refresh(&mut self, ui: &Ui) {
        let query = self.query();
        let store_empty = self.session.triplets().is_empty();
        let snapshot = self.session.snapshot(&query, self.backend);
        let empty = snapshot.graph.is_empty();

        if self.session.revision() != self.seen_revision {
            self.seen_revision = self.session.revision();
            ViewMetadata::reset(ui);
            if empty && !store_empty {
                self.status
                    .push_warning("No data available for the selected entity.");
            }
        }
    }
}

impl App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_store();

        egui::SidePanel::left("controls")
            .default_width(SIDE_PANEL_WIDTH)
            .min_width(SIDE_PANEL_WIDTH)
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| self.ui_controls(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.refresh(ui);

            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Visualization, "📊 Visualization");
                ui.selectable_value(&mut self.tab, Tab::DataTable, "📋 Data Table");
                ui.selectable_value(&mut self.tab, Tab::Statistics, "📈 Statistics");
            });
            ui.separator();
            match self.tab {
                Tab::Visualization => self.ui_visualization_tab(ui),
                Tab::DataTable => self.ui_data_table_tab(ui),
                Tab::Statistics => self.ui_statistics_tab(ui),
            }

            self.draw_status(ui);
        });
    }
}
