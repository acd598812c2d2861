mod export_panel;
mod profile_chart;

pub use export_panel::ProfileExportPanel;
pub use profile_chart::CognitiveProfileChart;
