//! Raster effects shared by the sticker stages: blur, alpha-over, outline rings and shadow.

pub mod blur;
pub mod composite;
pub mod outline;
pub mod shadow;

pub use outline::{INNER_RING_COLOR, OUTER_RING_COLOR, outline, outline_rings};
pub use shadow::shadow;
