//! Pure transformation steps of the pipeline.
//!
//! Everything in this module is side-effect free: the parser, classifier,
//! and calculator each map immutable inputs to new value objects, which is
//! what lets the orchestrator run images in parallel without locking.

pub mod calculator;
pub mod classifier;
pub mod geometry;
pub mod parser;

pub use calculator::{CylinderRoles, RoleAssignment, SurfaceAreaCalculator, TaperedRoles};
pub use classifier::ShapeClassifier;
pub use geometry::{BoundingBox, Point};
pub use parser::DimensionParser;
