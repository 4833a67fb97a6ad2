use image::RgbaImage;

use crate::effects::composite::apply_alpha;
use crate::effects::outline::outline_rings;
use crate::effects::shadow::shadow;
use crate::foundation::core::{BinaryMask, FaceBox, PixelRect};
use crate::foundation::error::{StickerError, StickerResult, StickerWarning};
use crate::mask::bounds::crop_to_subject;
use crate::mask::refine::{clean_mask, feather_mask};
use crate::mask::select::{remove_small_components, select};
use crate::pipeline::config::StickerConfig;
use crate::pipeline::debug::{DebugRaster, DebugSink};
use crate::render::compositor::{ComposeInput, compose};
use crate::text::font::FontBackend;
use crate::text::layout::{CaptionStyle, LayoutResult, layout_with_limits};

/// Pipeline stage names, reported with failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Select,
    Refine,
    Outline,
    Shadow,
    Layout,
    Compose,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Refine => "refine",
            Self::Outline => "outline",
            Self::Shadow => "shadow",
            Self::Layout => "layout",
            Self::Compose => "compose",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure and the stage it happened in.
#[derive(thiserror::Error, Debug)]
#[error("{stage} stage failed: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: StickerError,
}

trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, StageError>;
}

impl<T> AtStage<T> for StickerResult<T> {
    fn at(self, stage: Stage) -> Result<T, StageError> {
        self.map_err(|source| StageError { stage, source })
    }
}

/// One image to turn into a sticker.
#[derive(Clone, Debug)]
pub struct StickerJob {
    pub name: String,
    pub image: RgbaImage,
    /// Raw segmentation mask, same size as `image`.
    pub mask: BinaryMask,
    /// Face detection used to pick the subject among several components.
    pub face: Option<FaceBox>,
    pub caption: Option<String>,
}

impl StickerJob {
    pub fn new(name: impl Into<String>, image: RgbaImage, mask: BinaryMask) -> Self {
        Self {
            name: name.into(),
            image,
            mask,
            face: None,
            caption: None,
        }
    }

    pub fn with_face(mut self, face: FaceBox) -> Self {
        self.face = Some(face);
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

#[derive(Clone, Debug)]
pub struct StickerOutput {
    pub image: RgbaImage,
    pub layout: Option<LayoutResult>,
    /// Region of the input kept when cropping to the subject.
    pub crop: Option<PixelRect>,
    pub warnings: Vec<StickerWarning>,
}

/// Runs the sticker stages for one image at a time. Holds only immutable configuration.
#[derive(Clone, Debug, Default)]
pub struct StickerPipeline {
    config: StickerConfig,
}

impl StickerPipeline {
    pub fn new(config: StickerConfig) -> StickerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StickerConfig {
        &self.config
    }

    /// Build one sticker: select, refine, outline, shadow, caption layout and compose.
    ///
    /// Without a font a requested caption is skipped with a warning. An empty subject is
    /// not an error; it yields a transparent sticker and an [`StickerWarning::EmptyMask`].
    #[tracing::instrument(skip_all, fields(job = %job.name))]
    pub fn process(
        &self,
        job: &StickerJob,
        mut font: Option<&mut dyn FontBackend>,
        mut debug: Option<&mut dyn DebugSink>,
    ) -> Result<StickerOutput, StageError> {
        let cfg = &self.config;
        let mut warnings = Vec::new();
        let mut emit = |name: &'static str, raster: DebugRaster<'_>| {
            if let Some(sink) = debug.as_deref_mut() {
                sink.emit(&job.name, name, raster);
            }
        };

        let (w, h) = job.image.dimensions();
        job.mask.ensure_dimensions(w, h).at(Stage::Select)?;
        emit("mask_raw", DebugRaster::Mask(job.mask.as_image()));

        let denoised = remove_small_components(&job.mask, cfg.select.min_component_fraction);
        let selected = select(&denoised, job.face.map(FaceBox::center));
        emit("mask_selected", DebugRaster::Mask(selected.as_image()));
        if selected.is_empty() {
            tracing::warn!("selected subject mask is empty");
            warnings.push(StickerWarning::EmptyMask);
        }

        let (image, selected, crop) = if cfg.select.crop_to_subject {
            let crop = crop_to_subject(
                &job.image,
                &selected,
                cfg.select.crop_margin,
                cfg.select.crop_min_fraction,
            )
            .at(Stage::Select)?;
            (crop.image, crop.mask, Some(crop.rect))
        } else {
            (job.image.clone(), selected, None)
        };

        let cleaned = clean_mask(&selected, cfg.mask.close_kernel, cfg.mask.open_kernel);
        emit("mask_clean", DebugRaster::Mask(cleaned.as_image()));
        let alpha = feather_mask(&cleaned, cfg.mask.feather).at(Stage::Refine)?;
        emit("alpha", DebugRaster::Mask(alpha.as_image()));
        let cutout = apply_alpha(&image, &alpha).at(Stage::Refine)?;
        emit("cutout", DebugRaster::Rgba(&cutout));

        let rings = if cfg.outline.enabled {
            let rings = outline_rings(&cleaned, cfg.outline.outer_px, cfg.outline.inner_px)
                .at(Stage::Outline)?;
            emit("outline", DebugRaster::Rgba(&rings));
            Some(rings)
        } else {
            None
        };

        let drop_shadow = if cfg.shadow.enabled {
            let layer = shadow(
                &cleaned,
                cfg.shadow.offset,
                cfg.shadow.blur_px,
                cfg.shadow.alpha,
            )
            .at(Stage::Shadow)?;
            emit("shadow", DebugRaster::Rgba(&layer));
            Some(layer)
        } else {
            None
        };

        let caption_text = job.caption.as_deref().unwrap_or("");
        let wants_caption =
            cfg.caption.style != CaptionStyle::None && !caption_text.trim().is_empty();
        let layout = match (wants_caption, font.as_deref_mut()) {
            (false, _) => None,
            (true, None) => {
                tracing::warn!("no font available, caption skipped");
                warnings.push(StickerWarning::FontUnavailable {
                    message: "no font backend provided".to_string(),
                });
                None
            }
            (true, Some(font)) => match layout_with_limits(
                caption_text,
                (image.width(), image.height()),
                cfg.caption.style,
                cfg.caption.max_lines,
                cfg.caption.font_size,
                cfg.caption.limits,
                font,
            ) {
                Ok(layout) => layout,
                Err(err) if !err.is_fatal() => {
                    tracing::warn!(error = %err, "caption skipped");
                    warnings.push(StickerWarning::FontUnavailable {
                        message: err.to_string(),
                    });
                    None
                }
                Err(source) => {
                    return Err(StageError {
                        stage: Stage::Layout,
                        source,
                    });
                }
            },
        };
        if let Some(l) = layout.as_ref().filter(|l| l.overflowed) {
            warnings.push(StickerWarning::CaptionOverflow {
                font_size: l.font_size,
            });
        }

        let composite = compose(
            ComposeInput {
                base: &image,
                alpha: &alpha,
                outline: rings.as_ref(),
                shadow: drop_shadow.as_ref(),
                caption: layout.as_ref(),
                style: cfg.caption.style,
            },
            &cfg.caption.paint,
            font,
        )
        .at(Stage::Compose)?;
        emit("final", DebugRaster::Rgba(&composite.image));
        warnings.extend(composite.warnings);

        tracing::debug!(warnings = warnings.len(), "sticker built");
        Ok(StickerOutput {
            image: composite.image,
            layout,
            crop,
            warnings,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/runner.rs"]
mod tests;
