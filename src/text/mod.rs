//! Caption text: font capability, CJK-aware wrapping and auto-fit layout.

pub mod font;
pub mod layout;
pub mod wrap;

pub use font::{BlockFont, FontBackend, GlyphCoverage, ParleyFontBackend, TextExtent};
pub use layout::{CaptionStyle, FitLimits, LaidOutLine, LayoutResult, layout, layout_with_limits};
pub use wrap::{WrappedText, is_break_char, wrap_lines, wrap_with_font};
