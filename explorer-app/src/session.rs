use kg_explorer::{
    export_image, extract, Classifier, ExplorerSettings, ExportOutcome, ForceDirectedRenderer,
    ForceFigure, GraphRenderer, GraphStats, KnowledgeGraph, LoadError, Query, RenderContext,
    RenderError, StoreCache, StyleGraph, Triplets, VizBackend, WidgetDocument, WidgetRenderer,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Export hint when the current view failed to render.
pub const NOTHING_TO_EXPORT: &str = "The current view could not be rendered, nothing to export";

/// Output of the selected backend for the current snapshot.
#[derive(Debug, Clone)]
pub enum Rendering {
    Figure(ForceFigure),
    Widget(WidgetDocument),
    Failed(String),
}

/// Everything derived from one combination of control values.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub query: Query,
    pub backend: VizBackend,
    pub title: String,
    pub graph: KnowledgeGraph,
    pub stats: GraphStats,
    pub rendering: Rendering,
    generation: u64,
}

impl Snapshot {
    fn matches(&self, query: &Query, backend: VizBackend, generation: u64) -> bool {
        self.query == *query && self.backend == backend && self.generation == generation
    }
}

/// Data side of the explorer: the cached store, its classification and the
/// snapshot for the current controls.
pub struct Session {
    store: StoreCache,
    triplets: Triplets,
    classifier: Classifier,
    generation: u64,
    rng: StdRng,
    force: ForceDirectedRenderer,
    widget: WidgetRenderer,
    style: StyleGraph,
    snapshot: Option<Snapshot>,
    revision: u64,
}

impl Session {
    pub fn new(settings: &ExplorerSettings) -> Self {
        let rng = settings.extraction.sample_seed.map_or_else(
            || StdRng::from_rng(&mut rand::rng()),
            StdRng::seed_from_u64,
        );
        Self {
            store: StoreCache::new(settings.data.path.clone()),
            triplets: Triplets::empty(),
            classifier: Classifier::default(),
            generation: 0,
            rng,
            force: ForceDirectedRenderer::new(settings.layout.clone()),
            widget: WidgetRenderer::default(),
            style: settings.style.clone(),
            snapshot: None,
            revision: 0,
        }
    }

    /// Picks up a changed data file. Returns `true` when the store was (re)loaded.
    pub fn sync_store(&mut self) -> bool {
        let triplets = self.store.get();
        if self.store.generation() == self.generation {
            return false;
        }
        self.generation = self.store.generation();
        self.classifier = Classifier::new(&triplets);
        self.triplets = triplets;
        log::info!(
            "store generation {}: {} triplets, {} trials, {} drugs, {} conditions, {} outcomes",
            self.generation,
            self.triplets.len(),
            self.classifier.clinical_trials().len(),
            self.classifier.drugs().len(),
            self.classifier.conditions().len(),
            self.classifier.outcomes().len()
        );
        true
    }

    /// Drops the cached table and loads it again.
    pub fn reload(&mut self) -> bool {
        self.store.invalidate();
        self.sync_store()
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        self.store.last_error()
    }

    pub fn triplets(&self) -> &Triplets {
        &self.triplets
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn style(&self) -> &StyleGraph {
        &self.style
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Incremented every time a snapshot is computed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Snapshot for `query` rendered with `backend`, recomputed only when
    /// one of them or the store changed.
    pub fn snapshot(&mut self, query: &Query, backend: VizBackend) -> &Snapshot {
        let current = match self.snapshot.take() {
            Some(s) if s.matches(query, backend, self.generation) => s,
            _ => self.compute(query, backend),
        };
        self.snapshot.insert(current)
    }

    fn compute(&mut self, query: &Query, backend: VizBackend) -> Snapshot {
        self.revision += 1;
        let graph = extract(query, &self.triplets, &mut self.rng);
        let stats = GraphStats::compute(&graph, &self.classifier);
        let ctx = RenderContext::for_selection(&query.selection, self.style.clone());

        let rendered = match backend {
            VizBackend::ForceDirected => self
                .force
                .render(&graph, &self.classifier, &ctx)
                .map(Rendering::Figure),
            VizBackend::NetworkWidget => self
                .widget
                .render(&graph, &self.classifier, &ctx)
                .map(Rendering::Widget),
        };
        let rendering = rendered.unwrap_or_else(|err| {
            log::error!("rendering {} failed: {err}", backend.label());
            Rendering::Failed(err.to_string())
        });

        Snapshot {
            query: query.clone(),
            backend,
            title: ctx.title,
            graph,
            stats,
            rendering,
            generation: self.generation,
        }
    }

    /// PNG of the current force figure, or the hint for backends without export.
    pub fn export(&self, width: u32, height: u32) -> Result<ExportOutcome, RenderError> {
        let Some(snapshot) = &self.snapshot else {
            return export_image(VizBackend::ForceDirected, &ForceFigure::default(), width, height);
        };
        match &snapshot.rendering {
            Rendering::Figure(fig) => export_image(snapshot.backend, fig, width, height),
            Rendering::Widget(_) => {
                export_image(snapshot.backend, &ForceFigure::default(), width, height)
            }
            Rendering::Failed(_) => Ok(ExportOutcome::Unsupported(NOTHING_TO_EXPORT)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kg_explorer::{FilterCategory, Selection, SCREENSHOT_HINT};
    use std::path::PathBuf;

    fn write_table(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "kg_explorer_session_{name}_{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, body).unwrap();
        path
    }

    fn session(path: PathBuf) -> Session {
        let mut settings = ExplorerSettings::default();
        settings.data.path = path;
        settings.extraction.sample_seed = Some(1);
        let mut s = Session::new(&settings);
        s.sync_store();
        s
    }

    const TABLE: &str = "source,relation,target\n\
        NCT001,treats,DrugA\n\
        DrugA,has_condition,CancerX\n\
        NCT002,treats,DrugA\n";

    #[test]
    fn missing_file_degrades_to_empty() {
        let mut s = session(PathBuf::from("/definitely/not/here.csv"));
        assert!(matches!(s.load_error(), Some(LoadError::NotFound(_))));
        let snap = s.snapshot(
            &Query::new(Selection::All, FilterCategory::Drug, 100),
            VizBackend::ForceDirected,
        );
        assert!(snap.graph.is_empty());
        assert_eq!(snap.stats.node_count, 0);
        assert!(matches!(&snap.rendering, Rendering::Figure(f) if f.is_empty()));
    }

    #[test]
    fn snapshot_follows_controls() {
        let path = write_table("controls", TABLE);
        let mut s = session(path.clone());
        let q = Query::new(Selection::from_choice("DrugA"), FilterCategory::Drug, 100);

        let snap = s.snapshot(&q, VizBackend::ForceDirected);
        assert_eq!(snap.title, "Knowledge Graph: DrugA");
        assert_eq!(snap.stats.node_count, 4);
        assert_eq!(snap.stats.edge_count, 3);
        s.snapshot(&q, VizBackend::ForceDirected);
        assert_eq!(s.revision(), 1);

        let snap = s.snapshot(&q, VizBackend::NetworkWidget);
        assert!(matches!(&snap.rendering, Rendering::Widget(doc) if doc.node_count == 4));
        assert_eq!(
            s.export(64, 64).unwrap(),
            ExportOutcome::Unsupported(SCREENSHOT_HINT)
        );

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn force_snapshot_exports_png() {
        let path = write_table("export", TABLE);
        let mut s = session(path.clone());
        s.snapshot(
            &Query::new(Selection::All, FilterCategory::ClinicalTrial, 100),
            VizBackend::ForceDirected,
        );
        let ExportOutcome::Png(bytes) = s.export(64, 48).unwrap() else {
            panic!("expected png");
        };
        assert_eq!(&bytes[..4], b"\x89PNG");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn failed_render_exports_nothing() {
        let path = write_table("failed", TABLE);
        let mut s = session(path.clone());
        let q = Query::new(Selection::All, FilterCategory::Drug, 100);
        let mut snap = s.snapshot(&q, VizBackend::ForceDirected).clone();
        snap.rendering = Rendering::Failed("layout exploded".into());
        s.snapshot = Some(snap);

        assert_eq!(
            s.export(64, 48).unwrap(),
            ExportOutcome::Unsupported(NOTHING_TO_EXPORT)
        );
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn reload_bumps_store() {
        let path = write_table("reload", TABLE);
        let mut s = session(path.clone());
        assert_eq!(s.triplets().len(), 3);
        assert!(s.classifier().drugs().contains("DrugA"));
        assert!(s.reload());
        assert!(!s.sync_store());
        std::fs::remove_file(path).ok();
    }
}
