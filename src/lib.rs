//! Axis-aligned bounding box primitive (see [`bounds::AxisAlignedBox`]).
//!
//! The box is a plain `Copy` value built on [`glam`] vectors; construction, derived
//! quantities, containment and overlap, set operations, scaling and ray tests all
//! live on the type itself.

pub mod bounds;

pub use glam;
