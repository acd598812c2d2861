//! Turns a result mapping into a finished chart document.

use std::rc::Rc;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::core::format::profile_title;
use crate::core::profile::{DisplayMeta, ResultMapping};

use super::config::ChartConfig;
use super::layout::Layout;
use super::passes::{default_passes, DrawPass, PassContext};
use super::scale::CategoryScale;
use super::series::{ChartSeries, FlattenCache};
use super::surface::SvgSurface;

/// A rendered chart. Dropping it releases its markup.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualArtifact {
    svg: String,
    width: u32,
    height: u32,
    title: String,
    series: Rc<ChartSeries>,
    passes: Vec<&'static str>,
    generation: u64,
}

impl VisualArtifact {
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    pub fn labels(&self) -> &[String] {
        &self.series.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.series.values
    }

    pub fn group_boundaries(&self) -> &[f64] {
        &self.series.group_boundaries
    }

    /// Names of the passes that drew this artifact, in execution order.
    pub fn passes(&self) -> &[&'static str] {
        &self.passes
    }

    /// Increases by one for every render made by the same renderer.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn data_url(&self) -> String {
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(self.svg.as_bytes()))
    }
}

pub struct ProfileRenderer {
    config: ChartConfig,
    passes: Vec<Box<dyn DrawPass>>,
    cache: FlattenCache,
    generation: u64,
}

impl Default for ProfileRenderer {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

impl ProfileRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self::with_passes(config, default_passes())
    }

    pub fn with_passes(config: ChartConfig, passes: Vec<Box<dyn DrawPass>>) -> Self {
        Self {
            config,
            passes,
            cache: FlattenCache::new(),
            generation: 0,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    pub fn cache(&self) -> &FlattenCache {
        &self.cache
    }

    /// Draws `data` with every pass in order. Never fails; bad input draws
    /// outside the bands instead of erroring.
    pub fn render(&mut self, data: &ResultMapping, meta: &DisplayMeta) -> VisualArtifact {
        let misses = self.cache.misses();
        let series = self.cache.get_or_flatten(data);
        if self.cache.misses() != misses {
            let duplicates = data.duplicate_indices();
            if !duplicates.is_empty() {
                tracing::warn!(?duplicates, "index names repeat across functions; plotting each occurrence");
            }
        }

        let layout = Layout::resolve(&self.config, &series);
        let scale = CategoryScale::new(layout.plot, series.len());
        let title = profile_title(meta);

        let ctx = PassContext {
            config: &self.config,
            layout: &layout,
            scale: &scale,
            series: &series,
            title: &title,
        };

        let mut surface = SvgSurface::new(self.config.width, self.config.height, &self.config.background);
        let mut executed = Vec::with_capacity(self.passes.len());
        for pass in &self.passes {
            pass.draw(&ctx, &mut surface);
            executed.push(pass.name());
        }

        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            indices = series.len(),
            groups = series.groups.len(),
            "rendered cognitive profile"
        );

        VisualArtifact {
            svg: surface.finish(),
            width: self.config.width,
            height: self.config.height,
            title,
            series,
            passes: executed,
            generation: self.generation,
        }
    }
}
