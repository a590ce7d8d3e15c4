// Shared margins
pub const UI_MARGIN: f32 = 10.0;

// Common spacing between grouped controls
pub const SECTION_SPACING: f32 = 6.0;

// Side panel sizing
pub const SIDE_PANEL_WIDTH: f32 = 300.0;

// Text sizes
pub const HEADING_TEXT_SIZE: f32 = 16.0;

// Entity picker
pub const ENTITY_LIST_MAX_HEIGHT: f32 = 240.0;
pub const ENTITY_LIST_LIMIT: usize = 200;

// Tables
pub const TABLE_ROW_HEIGHT: f32 = 18.0;
pub const TABLE_HEADER_HEIGHT: f32 = 20.0;
pub const STATS_TABLE_MAX_HEIGHT: f32 = 200.0;

// Figure view
pub const ZOOM_STEP: f32 = 0.1;
pub const FIT_PADDING: f32 = 0.1;

// Raster export size
pub const EXPORT_WIDTH: u32 = 1600;
pub const EXPORT_HEIGHT: u32 = 1200;
