//! Per-image sticker pipeline, batch runner, configuration and debug taps.

pub mod batch;
pub mod config;
pub mod debug;
pub mod runner;

pub use batch::{BatchEntry, BatchReport, ImageReport, ImageStatus};
pub use config::{CaptionConfig, MaskConfig, OutlineConfig, SelectConfig, ShadowConfig, StickerConfig};
pub use debug::{CapturedRaster, DebugRaster, DebugSink, MemoryDebugSink};
pub use runner::{Stage, StageError, StickerJob, StickerOutput, StickerPipeline};
