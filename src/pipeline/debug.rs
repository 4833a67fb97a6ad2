use image::{GrayImage, RgbaImage};

/// Intermediate raster handed to a [`DebugSink`].
#[derive(Clone, Copy, Debug)]
pub enum DebugRaster<'a> {
    Mask(&'a GrayImage),
    Rgba(&'a RgbaImage),
}

/// Receives named intermediate rasters while a sticker is built.
///
/// Names used by the pipeline: `mask_raw`, `mask_selected`, `mask_clean`, `alpha`,
/// `cutout`, `outline`, `shadow`, `final`.
pub trait DebugSink {
    fn emit(&mut self, job: &str, name: &'static str, raster: DebugRaster<'_>);
}

impl<F> DebugSink for F
where
    F: FnMut(&str, &'static str, DebugRaster<'_>),
{
    fn emit(&mut self, job: &str, name: &'static str, raster: DebugRaster<'_>) {
        self(job, name, raster)
    }
}

/// Owned copy of an emitted raster.
#[derive(Clone, Debug, PartialEq)]
pub enum CapturedRaster {
    Mask(GrayImage),
    Rgba(RgbaImage),
}

/// Keeps every emitted raster in memory, in emission order.
#[derive(Clone, Debug, Default)]
pub struct MemoryDebugSink {
    pub entries: Vec<(String, &'static str, CapturedRaster)>,
}

impl MemoryDebugSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage names in emission order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(_, name, _)| *name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&CapturedRaster> {
        self.entries
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(_, _, r)| r)
    }
}

impl DebugSink for MemoryDebugSink {
    fn emit(&mut self, job: &str, name: &'static str, raster: DebugRaster<'_>) {
        let captured = match raster {
            DebugRaster::Mask(m) => CapturedRaster::Mask(m.clone()),
            DebugRaster::Rgba(r) => CapturedRaster::Rgba(r.clone()),
        };
        self.entries.push((job.to_string(), name, captured));
    }
}
