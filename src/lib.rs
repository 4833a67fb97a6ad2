//! stickerkit is the raster compositing core of a photo-to-sticker pipeline.
//!
//! Given a decoded photo, a raw 0/255 subject mask and an optional caption it produces a
//! finished sticker:
//!
//! - pick one subject component from the mask ([`mask::select`])
//! - clean and feather its edge into an alpha channel ([`mask::refine`])
//! - draw a two-ring outline and a soft drop shadow ([`effects`])
//! - auto-fit and wrap the caption into a bottom box ([`text::layout`])
//! - stack everything back to front ([`render::compose`])
//!
//! [`StickerPipeline`] runs all stages for one image, or for a batch in parallel.
#![forbid(unsafe_code)]

mod foundation;

/// Blur, alpha-over, outline and shadow layers.
pub mod effects;
/// Component selection, morphology, feathering and subject bounds.
pub mod mask;
/// Per-image pipeline, batch runner, configuration and debug taps.
pub mod pipeline;
/// Layer compositing and caption painting.
pub mod render;
/// Font capability, wrapping and caption layout.
pub mod text;

pub use crate::foundation::core::{
    AlphaMask, BinaryMask, FaceBox, MASK_OFF, MASK_ON, PixelRect, Point, Rgba8, RgbaImage,
    transparent_raster,
};
pub use crate::foundation::error::{StickerError, StickerResult, StickerWarning};

pub use crate::effects::{outline, outline_rings, shadow};
pub use crate::mask::{crop_to_subject, refine, remove_small_components, select, subject_bounds};
pub use crate::pipeline::{
    BatchReport, DebugSink, ImageReport, ImageStatus, MemoryDebugSink, Stage, StageError,
    StickerConfig, StickerJob, StickerOutput, StickerPipeline,
};
pub use crate::render::{CaptionPaint, ComposeInput, Composite, compose};
pub use crate::text::{
    BlockFont, CaptionStyle, FitLimits, FontBackend, LayoutResult, ParleyFontBackend, layout,
    wrap_lines,
};
