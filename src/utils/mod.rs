//! Utility functions for images.

pub mod image;

pub use image::{dynamic_to_rgb, load_image};
