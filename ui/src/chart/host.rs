//! Binds a renderer to the surface it draws on.
//!
//! At most one artifact is bound at a time: a new render releases the previous
//! artifact first, and rendering before the surface is mounted is a no-op the
//! caller can retry once it is.

use crate::core::profile::{DisplayMeta, ResultMapping};

use super::renderer::{ProfileRenderer, VisualArtifact};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SurfaceState {
    Unmounted,
    Mounted(Viewport),
}

pub struct ChartHost {
    renderer: ProfileRenderer,
    state: SurfaceState,
    bound: Option<VisualArtifact>,
    released: u64,
}

impl ChartHost {
    pub fn new(renderer: ProfileRenderer) -> Self {
        Self {
            renderer,
            state: SurfaceState::Unmounted,
            bound: None,
            released: 0,
        }
    }

    /// Host whose surface is available right away, sized from the renderer config.
    pub fn mounted(renderer: ProfileRenderer) -> Self {
        let viewport = Viewport {
            width: renderer.config().width,
            height: renderer.config().height,
        };
        let mut host = Self::new(renderer);
        host.mount(viewport);
        host
    }

    pub fn mount(&mut self, viewport: Viewport) {
        if viewport.width == 0 || viewport.height == 0 {
            tracing::debug!(?viewport, "ignoring empty viewport");
            return;
        }
        self.renderer.set_size(viewport.width, viewport.height);
        self.state = SurfaceState::Mounted(viewport);
    }

    pub fn unmount(&mut self) {
        self.release();
        self.state = SurfaceState::Unmounted;
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.state, SurfaceState::Mounted(_))
    }

    pub fn viewport(&self) -> Option<Viewport> {
        match self.state {
            SurfaceState::Mounted(viewport) => Some(viewport),
            SurfaceState::Unmounted => None,
        }
    }

    /// Renders into the mounted surface, replacing whatever was bound.
    ///
    /// Returns `None` while unmounted.
    pub fn render(&mut self, data: &ResultMapping, meta: &DisplayMeta) -> Option<&VisualArtifact> {
        if !self.is_mounted() {
            tracing::debug!("chart surface not mounted; render deferred");
            return None;
        }

        self.release();
        let artifact = self.renderer.render(data, meta);
        Some(&*self.bound.insert(artifact))
    }

    pub fn current(&self) -> Option<&VisualArtifact> {
        self.bound.as_ref()
    }

    /// Artifacts released so far.
    pub fn released_count(&self) -> u64 {
        self.released
    }

    pub fn renderer(&self) -> &ProfileRenderer {
        &self.renderer
    }

    fn release(&mut self) {
        if let Some(previous) = self.bound.take() {
            self.released += 1;
            tracing::debug!(generation = previous.generation(), "released chart artifact");
        }
    }
}
