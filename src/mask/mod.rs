//! Binary mask processing: component selection, morphology, feathering and subject bounds.

pub mod bounds;
pub mod morphology;
pub mod refine;
pub mod select;

pub use bounds::{SubjectCrop, crop_to_subject, subject_bounds};
pub use refine::{clean_mask, feather_mask, refine};
pub use select::{ConnectedComponent, connected_components, remove_small_components, select};
