//! File-backed rendering surfaces (PNG or interactive HTML)

use std::collections::HashMap;
use std::path::Path;

use charming::{Chart, HtmlRenderer, ImageRenderer, renderer::ImageFormat};

use super::{RenderingSurface, Size};
use crate::chart::{ChartConfig, to_chart};
use crate::error::TxChartError;

/// Output pixels per CSS pixel for PNG (2x for Retina quality)
const PNG_SCALE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Html,
}

impl ExportFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "html" | "htm" => Some(ExportFormat::Html),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

struct ExportSurface {
    path: String,
    format: ExportFormat,
    size: Size,
    chart: Option<Chart>,
    writes: usize,
}

impl ExportSurface {
    fn write(&mut self) -> Result<(), TxChartError> {
        let Some(chart) = &self.chart else {
            return Ok(());
        };
        match self.format {
            ExportFormat::Png => {
                let (Some(width), Some(height)) = (
                    self.size.width.checked_mul(PNG_SCALE),
                    self.size.height.checked_mul(PNG_SCALE),
                ) else {
                    return Err(TxChartError::Render(format!(
                        "image size {}x{} is too large",
                        self.size.width, self.size.height
                    )));
                };
                let mut renderer = ImageRenderer::new(width, height);
                renderer
                    .save_format(ImageFormat::Png, chart, &self.path)
                    .map_err(|e| TxChartError::Render(e.to_string()))?;
            }
            ExportFormat::Html => {
                let mut renderer = HtmlRenderer::new(
                    "Transaction History",
                    u64::from(self.size.width),
                    u64::from(self.size.height),
                );
                renderer
                    .save(chart, &self.path)
                    .map_err(|e| TxChartError::Render(e.to_string()))?;
            }
        }
        self.writes += 1;
        tracing::debug!(path = %self.path, writes = self.writes, "chart written");
        Ok(())
    }
}

/// Surfaces keyed by container, where a container is the output file path.
///
/// Every `set_option` or `resize` rewrites the file.
pub struct ExportSurfaces {
    surfaces: HashMap<SurfaceId, ExportSurface>,
    next_id: u64,
    initial_size: Size,
}

impl ExportSurfaces {
    pub fn new(initial_size: Size) -> Self {
        Self {
            surfaces: HashMap::new(),
            next_id: 0,
            initial_size,
        }
    }

    /// Number of times the surface has written its file
    pub fn writes(&self, id: SurfaceId) -> Option<usize> {
        self.surfaces.get(&id).map(|s| s.writes)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl RenderingSurface for ExportSurfaces {
    type Handle = SurfaceId;

    fn init(&mut self, container: &str) -> SurfaceId {
        if let Some(existing) = self.lookup(container) {
            return existing;
        }
        let format = ExportFormat::from_path(container).unwrap_or(ExportFormat::Png);
        self.next_id += 1;
        let id = SurfaceId(self.next_id);
        self.surfaces.insert(
            id,
            ExportSurface {
                path: container.to_string(),
                format,
                size: self.initial_size,
                chart: None,
                writes: 0,
            },
        );
        id
    }

    fn lookup(&self, container: &str) -> Option<SurfaceId> {
        self.surfaces
            .iter()
            .find(|(_, surface)| surface.path == container)
            .map(|(id, _)| *id)
    }

    fn set_option(&mut self, handle: &SurfaceId, config: &ChartConfig) -> Result<(), TxChartError> {
        let surface = self
            .surfaces
            .get_mut(handle)
            .ok_or_else(|| TxChartError::Render("surface was disposed".to_string()))?;
        surface.chart = Some(to_chart(config));
        surface.write()
    }

    fn resize(&mut self, handle: &SurfaceId, size: Size) {
        let Some(surface) = self.surfaces.get_mut(handle) else {
            return;
        };
        // Container height is fixed; only the width follows the viewport
        if surface.size.width == size.width {
            return;
        }
        surface.size.width = size.width;
        if let Err(e) = surface.write() {
            tracing::warn!(path = %surface.path, error = %e, "failed to redraw after resize");
        }
    }

    fn dispose(&mut self, handle: &SurfaceId) {
        self.surfaces.remove(handle);
    }
}
