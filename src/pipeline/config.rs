use crate::foundation::error::{StickerError, StickerResult};
use crate::render::caption::CaptionPaint;
use crate::text::layout::{CaptionStyle, FitLimits};

/// Subject isolation before refinement.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Components smaller than this fraction of the canvas are dropped before selection.
    pub min_component_fraction: f64,
    /// Crop image and mask to the selected subject.
    pub crop_to_subject: bool,
    pub crop_margin: f64,
    /// Subjects whose bounds cover less than this fraction of the canvas are not cropped.
    pub crop_min_fraction: f64,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            min_component_fraction: 0.0,
            crop_to_subject: false,
            crop_margin: 0.2,
            crop_min_fraction: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    pub feather: u32,
    pub close_kernel: u32,
    pub open_kernel: u32,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            feather: 3,
            close_kernel: 5,
            open_kernel: 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    pub enabled: bool,
    pub outer_px: u32,
    pub inner_px: u32,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            outer_px: 10,
            inner_px: 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    pub enabled: bool,
    pub offset: (i32, i32),
    pub blur_px: u32,
    pub alpha: u8,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            offset: (0, 2),
            blur_px: 4,
            alpha: 70,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    pub style: CaptionStyle,
    pub font_size: u32,
    pub max_lines: usize,
    pub limits: FitLimits,
    pub paint: CaptionPaint,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            style: CaptionStyle::Bubble,
            font_size: 24,
            max_lines: 2,
            limits: FitLimits::default(),
            paint: CaptionPaint::default(),
        }
    }
}

/// Full set of sticker settings. Built once and shared read-only across images.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StickerConfig {
    pub select: SelectConfig,
    pub mask: MaskConfig,
    pub outline: OutlineConfig,
    pub shadow: ShadowConfig,
    pub caption: CaptionConfig,
}

impl StickerConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> StickerResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> StickerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> StickerResult<()> {
        let fraction = |name: &str, v: f64| {
            if v.is_finite() && (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(StickerError::validation(format!(
                    "{name} must be in [0, 1], got {v}"
                )))
            }
        };
        fraction("select.min_component_fraction", self.select.min_component_fraction)?;
        fraction("select.crop_min_fraction", self.select.crop_min_fraction)?;
        if !self.select.crop_margin.is_finite() || self.select.crop_margin < 0.0 {
            return Err(StickerError::validation("select.crop_margin must be >= 0"));
        }
        if self.caption.max_lines == 0 {
            return Err(StickerError::validation("caption.max_lines must be >= 1"));
        }
        if self.caption.font_size == 0 {
            return Err(StickerError::validation("caption.font_size must be >= 1"));
        }
        if self.caption.limits.step == 0 || self.caption.limits.floor == 0 {
            return Err(StickerError::validation(
                "caption.limits.step and caption.limits.floor must be >= 1",
            ));
        }
        if self.outline.enabled && self.outline.inner_px > self.outline.outer_px {
            tracing::warn!(
                inner = self.outline.inner_px,
                outer = self.outline.outer_px,
                "inner outline is wider than the outer one and will hide it"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/config.rs"]
mod tests;
