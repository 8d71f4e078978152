//! Domain value objects flowing through the pipeline.
//!
//! Data flows one way: [`RawDetection`] fragments from the OCR collaborator
//! become normalized [`Dimension`] values, a [`EquipmentShape`] tag is
//! assigned to the collection, and a [`SurfaceAreaResult`] is computed from
//! it. Every type here is immutable after construction.

pub mod area;
pub mod detection;
pub mod dimension;
pub mod shape;

pub use area::SurfaceAreaResult;
pub use detection::RawDetection;
pub use dimension::{Dimension, Unit, to_mm};
pub use shape::EquipmentShape;
