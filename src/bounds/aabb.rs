use std::fmt::{self, Display, Formatter};

use glam::{Mat4, Vec3, Vec4};
use miette::{miette, Result};


/// An axis-aligned bounding box, stored as its minimum and maximum corner.
///
/// For every axis `i`, a well-formed box satisfies `min[i] <= max[i]`.
/// [`AxisAlignedBox::empty`] deliberately violates this: its minimum corner sits at
/// [`f32::MAX`] and its maximum corner at [`f32::MIN`], which makes it the identity
/// for [`AxisAlignedBox::enlarge`] and [`AxisAlignedBox::unite`]. Such a box has no extent.
///
/// Boxes built from explicit corners are not validated
/// (see [`AxisAlignedBox::checked_from_min_and_max`] for the validating constructor).
/// Queries on an unordered box return meaningless values (e.g. a negative volume).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisAlignedBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl AxisAlignedBox {
    /// The inverted box that absorbs the first point or box it is enlarged by.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            min: Vec3::MAX,
            max: Vec3::MIN,
        }
    }

    #[inline]
    pub const fn from_min_and_max(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[inline]
    pub const fn from_components(
        min_x: f32,
        min_y: f32,
        min_z: f32,
        max_x: f32,
        max_y: f32,
        max_z: f32,
    ) -> Self {
        Self {
            min: Vec3::new(min_x, min_y, min_z),
            max: Vec3::new(max_x, max_y, max_z),
        }
    }

    /// Same as [`Self::from_min_and_max`], but rejects corners that are out of order
    /// on any axis.
    pub fn checked_from_min_and_max(min: Vec3, max: Vec3) -> Result<Self> {
        for axis in 0..3 {
            if min[axis] > max[axis] {
                return Err(miette!(
                    "box minimum exceeds maximum on axis {} ({} > {})",
                    axis,
                    min[axis],
                    max[axis]
                ));
            }
        }

        Ok(Self::from_min_and_max(min, max))
    }

    /// Computes the tightest box enclosing all `points`.
    ///
    /// With no points, this returns [`Self::empty`], **not** a box at the origin.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        points.into_iter().collect()
    }

    /// Computes the tightest box enclosing all `points` after transforming each of them
    /// (as a point, i.e. with `w = 1`) by `transform`.
    pub fn from_points_transformed<I>(points: I, transform: &Mat4) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        points
            .into_iter()
            .map(|point| transform.transform_point3(point))
            .collect()
    }

    /// Computes the tightest box enclosing homogeneous `points` transformed by `transform`.
    ///
    /// Only the `xyz` part of each transformed point is used; there is no perspective divide.
    pub fn from_homogeneous_points_transformed<I>(points: I, transform: &Mat4) -> Self
    where
        I: IntoIterator<Item = Vec4>,
    {
        points
            .into_iter()
            .map(|point| (*transform * point).truncate())
            .collect()
    }


    /// `true` if the box has no extent on at least one axis (`min > max`),
    /// as is the case for [`Self::empty`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// `true` if `min <= max` holds on every axis.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    #[inline]
    pub fn range(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.max + self.min) * 0.5
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        let range = self.range();
        range.x * range.y * range.z
    }

    #[inline]
    pub fn shortest_side_length(&self) -> f32 {
        self.range().min_element()
    }

    #[inline]
    pub fn longest_side_length(&self) -> f32 {
        self.range().max_element()
    }

    /// Returns the eight corners of the box.
    ///
    /// Corner `i` takes the minimum coordinate on axis `k` if bit `k` of `i` is set,
    /// and the maximum coordinate otherwise. Corner `0` is therefore [`Self::max`]
    /// and corner `7` is [`Self::min`].
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|corner_index| {
            Vec3::new(
                if corner_index & 1 != 0 {
                    self.min.x
                } else {
                    self.max.x
                },
                if corner_index & 2 != 0 {
                    self.min.y
                } else {
                    self.max.y
                },
                if corner_index & 4 != 0 {
                    self.min.z
                } else {
                    self.max.z
                },
            )
        })
    }

    /// Boundary-inclusive point containment. Always `false` for an empty box.
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Boundary-inclusive overlap test. Symmetric in `self` and `other`.
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..3).all(|axis| {
            !(self.max[axis] < other.min[axis] || self.min[axis] > other.max[axis])
        })
    }


    /// Grows the box so that it contains `point`.
    #[inline]
    pub fn enlarge(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Resizes the box around its center: the range on each axis is multiplied
    /// by the matching component of `factors`.
    ///
    /// Factors must be non-negative; negative factors are a caller error and produce
    /// a box with its corners out of order. A box with no extent is left untouched.
    pub fn scale(&mut self, factors: Vec3) {
        debug_assert!(
            factors.cmpge(Vec3::ZERO).all(),
            "negative box scale factors are not supported: {factors}"
        );

        if self.is_empty() {
            return;
        }

        let center = self.center();
        let scaled_range = self.range() * factors;

        self.min = center - scaled_range * 0.5;
        self.max = self.min + scaled_range;
    }


    /// The smallest box containing both `first` and `second`.
    #[inline]
    pub fn unite(first: &Self, second: &Self) -> Self {
        Self::from_min_and_max(
            first.min.min(second.min),
            first.max.max(second.max),
        )
    }

    /// Separating-axis test between two boxes. Boxes sharing a face (or an edge, or a corner)
    /// are considered intersecting.
    pub fn intersects(first: &Self, second: &Self) -> bool {
        for axis in 0..3 {
            if first.min[axis] > second.max[axis] || first.max[axis] < second.min[axis] {
                return false;
            }
        }

        true
    }

    /// The overlapping region of `first` and `second`, if they intersect.
    ///
    /// The returned box is the largest box contained in both inputs.
    pub fn intersection(first: &Self, second: &Self) -> Option<Self> {
        if !Self::intersects(first, second) {
            return None;
        }

        Some(Self::from_min_and_max(
            first.min.max(second.min),
            first.max.min(second.max),
        ))
    }
}

impl Default for AxisAlignedBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<Vec3> for AxisAlignedBox {
    fn from_iter<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut bounds = Self::empty();
        bounds.extend(points);
        bounds
    }
}

impl Extend<Vec3> for AxisAlignedBox {
    fn extend<I: IntoIterator<Item = Vec3>>(&mut self, points: I) {
        for point in points {
            self.enlarge(point);
        }
    }
}

impl Display for AxisAlignedBox {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "AxisAlignedBox:")?;
        writeln!(f, "\tmin: {}", self.min)?;
        write!(f, "\tmax: {}", self.max)
    }
}
