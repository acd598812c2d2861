//! Cognitive profile chart: flattening, layout, draw passes and export.
//!
//! [`ProfileRenderer`] is the entry point; [`ChartHost`] adds the mounted
//! surface lifecycle the UI components rely on.

pub mod config;
pub mod export;
pub mod host;
pub mod layout;
pub mod passes;
pub mod renderer;
pub mod scale;
pub mod series;
pub mod surface;
pub mod text;

pub use config::ChartConfig;
pub use export::{export_artifact, export_file_name, ExportError};
pub use host::{ChartHost, Viewport};
pub use passes::{default_passes, DrawPass, PassContext};
pub use renderer::{ProfileRenderer, VisualArtifact};
pub use scale::{CategoryScale, CoordinateTransform, PlotArea};
pub use series::{ChartSeries, FlattenCache, GroupSpan};
