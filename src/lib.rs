mod classify;
mod error;
mod extract;
mod graph;
mod settings;
mod stats;
mod store;
mod style;

pub mod layouts;
pub mod render;

pub use self::classify::{is_trial_id, Classifier, EntityCategory, TRIAL_MARKER};
pub use self::error::{LoadError, RenderError};
pub use self::extract::{
    extract, extract_rows, sample_rows, EndpointRole, FilterCategory, Query, Selection,
    ALL_CHOICE, ALL_SAMPLE_LIMIT,
};
pub use self::graph::KnowledgeGraph;
pub use self::render::{
    export_image, rasterize, EdgeSegment, ExportOutcome, ForceDirectedRenderer, ForceFigure,
    GraphRenderer, NodeMarker, RasterImage, RenderContext, VizBackend, WidgetDocument,
    WidgetRenderer, SCREENSHOT_HINT,
};
pub use self::settings::{
    clamp_cap, ExplorerSettings, SettingsData, SettingsExtraction, CAP_DEFAULT, CAP_MAX, CAP_MIN,
    DEFAULT_DATA_PATH,
};
pub use self::stats::{CategoryCounts, GraphStats};
pub use self::store::{load, load_from_reader, load_or_empty, StoreCache, Triplet, Triplets};
pub use self::style::{to_hex, StyleCategory, StyleGraph};
