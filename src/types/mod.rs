//! Core value types shared across the document model

pub mod bounds;
pub mod color;
pub mod handle;
pub mod line_weight;
pub mod transparency;
pub mod vector;

pub use bounds::BoundingBox3D;
pub use color::Color;
pub use handle::Handle;
pub use line_weight::LineWeight;
pub use transparency::Transparency;
pub use vector::{Vector2, Vector3};
