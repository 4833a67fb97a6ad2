/// Convenience result type used across stickerkit.
pub type StickerResult<T> = Result<T, StickerError>;

/// Top-level error taxonomy used by the compositing core.
#[derive(thiserror::Error, Debug)]
pub enum StickerError {
    /// Invalid caller-provided parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A mask does not match the raster it is applied to.
    #[error("invalid mask dimensions: mask is {mask_w}x{mask_h}, image is {image_w}x{image_h}")]
    InvalidMaskDimensions {
        /// Mask width in pixels.
        mask_w: u32,
        /// Mask height in pixels.
        mask_h: u32,
        /// Image width in pixels.
        image_w: u32,
        /// Image height in pixels.
        image_h: u32,
    },

    /// The selected subject mask has no foreground pixels.
    #[error("empty mask: selected subject has no foreground pixels")]
    EmptyMask,

    /// No font measurement/rendering capability could be obtained.
    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    /// Errors raised while rasterizing layers.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StickerError {
    /// Build a [`StickerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StickerError::FontUnavailable`] value.
    pub fn font_unavailable(msg: impl Into<String>) -> Self {
        Self::FontUnavailable(msg.into())
    }

    /// Build a [`StickerError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StickerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`StickerError::InvalidMaskDimensions`] value from the two sizes.
    pub fn mask_dimensions(mask: (u32, u32), image: (u32, u32)) -> Self {
        Self::InvalidMaskDimensions {
            mask_w: mask.0,
            mask_h: mask.1,
            image_w: image.0,
            image_h: image.1,
        }
    }

    /// Stable, machine-readable name of the error kind, used in batch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Validation",
            Self::InvalidMaskDimensions { .. } => "InvalidMaskDimensions",
            Self::EmptyMask => "EmptyMask",
            Self::FontUnavailable(_) => "FontUnavailable",
            Self::Render(_) => "Render",
            Self::Serde(_) => "Serde",
            Self::Other(_) => "Other",
        }
    }

    /// Whether the error stops the pipeline of the image it occurred in.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::EmptyMask | Self::FontUnavailable(_))
    }
}

impl From<serde_json::Error> for StickerError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

/// Non-fatal conditions surfaced alongside a finished sticker.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StickerWarning {
    /// No font size down to the floor fit the caption budget.
    CaptionOverflow { font_size: u32 },
    /// The caption was skipped because no font was available.
    FontUnavailable { message: String },
    /// The selected subject is empty; the sticker has no visible subject.
    EmptyMask,
}

impl std::fmt::Display for StickerWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CaptionOverflow { font_size } => {
                write!(f, "caption overflow: text does not fit at {font_size}px")
            }
            Self::FontUnavailable { message } => {
                write!(f, "font unavailable: caption skipped ({message})")
            }
            Self::EmptyMask => f.write_str("empty mask: subject is fully transparent"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
