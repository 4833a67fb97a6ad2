//! Layer compositing: shadow, cut-out subject, outline and caption in a fixed order.

pub mod canvas;
pub mod caption;
pub mod compositor;

pub use canvas::PremulCanvas;
pub use caption::{CaptionPaint, paint_caption};
pub use compositor::{ComposeInput, Composite, compose};
