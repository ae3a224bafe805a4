//! Axis-aligned bounding boxes and the spatial queries built on them.

pub use self::{aabb::AxisAlignedBox, ray::RaySpan};

pub mod aabb;
pub mod ray;
