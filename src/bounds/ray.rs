//! Ray/box slab tests.
//!
//! A ray is `origin + t * direction` with `t >= 0`. Direction components may be zero:
//! a ray parallel to an axis' pair of planes either runs between them (the axis places
//! no limit on `t`) or misses the box entirely. Handling that case up front keeps
//! `0 * inf` (NaN) out of the interval fold.
//!
//! Boxes with no extent (see [`AxisAlignedBox::is_empty`]) are never hit: the slab fold
//! would otherwise reorder their inverted planes and report a huge span.

use glam::Vec3;

use super::aabb::AxisAlignedBox;


/// The parametric interval along a ray that lies inside a box.
///
/// `near` may be negative when the ray starts inside the box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaySpan {
    pub near: f32,
    pub far: f32,
}

impl RaySpan {
    #[inline]
    pub fn length(&self) -> f32 {
        self.far - self.near
    }
}


/// Parametric distances at which a ray crosses one axis' pair of planes, ordered so that
/// the entering crossing comes first.
///
/// Returns `None` if the ray is parallel to the slab and lies outside of it.
#[inline]
fn slab_crossings(
    origin: f32,
    direction: f32,
    slab_min: f32,
    slab_max: f32,
) -> Option<(f32, f32)> {
    if direction == 0.0 {
        return if origin >= slab_min && origin <= slab_max {
            Some((f32::NEG_INFINITY, f32::INFINITY))
        } else {
            None
        };
    }

    let t_first = (slab_min - origin) / direction;
    let t_second = (slab_max - origin) / direction;

    if t_first <= t_second {
        Some((t_first, t_second))
    } else {
        Some((t_second, t_first))
    }
}


impl AxisAlignedBox {
    /// Casts a ray against the box and returns a single hit distance.
    ///
    /// The entry distance is clamped at the ray origin. If the origin is inside the box
    /// (or exactly on its boundary), the returned distance is where the ray exits the box,
    /// otherwise it is where the ray enters it.
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        if self.is_empty() {
            return None;
        }

        let mut t_enter = 0.0_f32;
        let mut t_exit = f32::INFINITY;

        for axis in 0..3 {
            let (t_axis_enter, t_axis_exit) = slab_crossings(
                origin[axis],
                direction[axis],
                self.min[axis],
                self.max[axis],
            )?;

            t_enter = t_enter.max(t_axis_enter);
            t_exit = t_exit.min(t_axis_exit);
        }

        if t_enter >= t_exit {
            return None;
        }

        if t_enter == 0.0 {
            Some(t_exit)
        } else {
            Some(t_enter.min(t_exit))
        }
    }

    /// Casts a ray against the box and returns both the entry and exit distance.
    ///
    /// Unlike [`Self::intersect_ray`], the entry distance is not clamped at the origin.
    /// A box lying entirely behind the origin is not hit.
    pub fn intersect_ray_span(&self, origin: Vec3, direction: Vec3) -> Option<RaySpan> {
        if self.is_empty() {
            return None;
        }

        let parallel_axes = direction.cmpeq(Vec3::ZERO);

        if parallel_axes.any() {
            for axis in 0..3 {
                if parallel_axes.test(axis)
                    && (origin[axis] < self.min[axis] || origin[axis] > self.max[axis])
                {
                    return None;
                }
            }
        }

        // Divide per axis: the reciprocal of a subnormal component overflows to inf.
        let t_bottom = (self.min - origin) / direction;
        let t_top = (self.max - origin) / direction;

        let t_min = Vec3::select(
            parallel_axes,
            Vec3::splat(f32::NEG_INFINITY),
            t_bottom.min(t_top),
        );
        let t_max = Vec3::select(
            parallel_axes,
            Vec3::splat(f32::INFINITY),
            t_bottom.max(t_top),
        );

        let near = t_min.max_element();
        let far = t_max.min_element();

        if far > near && far > 0.0 {
            Some(RaySpan { near, far })
        } else {
            None
        }
    }

    #[inline]
    pub fn hits_ray(&self, origin: Vec3, direction: Vec3) -> bool {
        self.intersect_ray(origin, direction).is_some()
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> AxisAlignedBox {
        AxisAlignedBox::from_min_and_max(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn axis_parallel_ray_from_outside() {
        let origin = Vec3::new(-1.0, 0.5, 0.5);
        let direction = Vec3::X;

        let span = unit_box()
            .intersect_ray_span(origin, direction)
            .expect("ray should hit");
        assert_eq!(span.near, 1.0);
        assert_eq!(span.far, 2.0);
        assert_eq!(span.length(), 1.0);

        assert_eq!(unit_box().intersect_ray(origin, direction), Some(1.0));
        assert!(unit_box().hits_ray(origin, direction));
    }

    #[test]
    fn ray_pointing_away_misses() {
        let origin = Vec3::new(2.0, 0.5, 0.5);
        let direction = Vec3::X;

        assert_eq!(unit_box().intersect_ray(origin, direction), None);
        assert_eq!(unit_box().intersect_ray_span(origin, direction), None);
        assert!(!unit_box().hits_ray(origin, direction));
    }

    #[test]
    fn ray_from_inside_reports_exit() {
        let origin = Vec3::splat(0.5);
        let direction = Vec3::new(0.0, 0.0, -2.0);

        assert_eq!(unit_box().intersect_ray(origin, direction), Some(0.25));

        let span = unit_box()
            .intersect_ray_span(origin, direction)
            .expect("ray should hit");
        assert_eq!(span.near, -0.25);
        assert_eq!(span.far, 0.25);
    }

    #[test]
    fn ray_starting_on_near_face_reports_exit() {
        let origin = Vec3::new(0.0, 0.5, 0.5);

        assert_eq!(unit_box().intersect_ray(origin, Vec3::X), Some(1.0));
    }

    #[test]
    fn ray_starting_on_far_face_pointing_out_misses() {
        let origin = Vec3::new(1.0, 0.5, 0.5);

        assert_eq!(unit_box().intersect_ray(origin, Vec3::X), None);
        assert_eq!(unit_box().intersect_ray_span(origin, Vec3::X), None);
    }

    #[test]
    fn parallel_ray_outside_slab_misses() {
        let origin = Vec3::new(-1.0, 1.5, 0.5);

        assert_eq!(unit_box().intersect_ray(origin, Vec3::X), None);
        assert_eq!(unit_box().intersect_ray_span(origin, Vec3::X), None);
    }

    #[test]
    fn parallel_ray_exactly_on_slab_plane_hits() {
        // The origin's y lies exactly on the box's lower y plane while the ray
        // runs parallel to it; this would be 0 * inf without special-casing.
        let origin = Vec3::new(-1.0, 0.0, 0.5);

        assert_eq!(unit_box().intersect_ray(origin, Vec3::X), Some(1.0));

        let span = unit_box()
            .intersect_ray_span(origin, Vec3::X)
            .expect("grazing ray should hit");
        assert_eq!(span.near, 1.0);
        assert_eq!(span.far, 2.0);
    }

    #[test]
    fn subnormal_direction_on_slab_plane_hits_in_both_forms() {
        let origin = Vec3::new(-1.0, 0.0, 0.5);
        let direction = Vec3::new(1.0, 1e-40, 0.0);

        assert_eq!(unit_box().intersect_ray(origin, direction), Some(1.0));

        let span = unit_box()
            .intersect_ray_span(origin, direction)
            .expect("ray should hit");
        assert_eq!(span.near, 1.0);
        assert_eq!(span.far, 2.0);
    }

    #[test]
    fn negative_zero_direction_is_parallel() {
        let origin = Vec3::new(0.5, 0.5, 3.0);
        let direction = Vec3::new(-0.0, 0.0, -1.0);

        assert_eq!(unit_box().intersect_ray(origin, direction), Some(2.0));

        let span = unit_box()
            .intersect_ray_span(origin, direction)
            .expect("ray should hit");
        assert_eq!(span.near, 2.0);
        assert_eq!(span.far, 3.0);
    }

    #[test]
    fn diagonal_ray_hits_at_entry() {
        let bounds = AxisAlignedBox::from_components(1.0, 1.0, 1.0, 3.0, 3.0, 3.0);
        let origin = Vec3::ZERO;
        let direction = Vec3::ONE;

        assert_eq!(bounds.intersect_ray(origin, direction), Some(1.0));

        let span = bounds
            .intersect_ray_span(origin, direction)
            .expect("ray should hit");
        assert_eq!(span.near, 1.0);
        assert_eq!(span.far, 3.0);
    }

    #[test]
    fn diagonal_ray_passing_beside_box_misses() {
        let bounds = AxisAlignedBox::from_components(1.0, 1.0, 1.0, 2.0, 2.0, 2.0);
        let origin = Vec3::new(0.0, 3.0, 0.0);
        let direction = Vec3::new(1.0, 0.0, 1.0);

        assert_eq!(bounds.intersect_ray(origin, direction), None);
        assert_eq!(bounds.intersect_ray_span(origin, direction), None);
    }

    #[test]
    fn empty_box_is_never_hit() {
        let empty = AxisAlignedBox::empty();

        assert_eq!(empty.intersect_ray(Vec3::ZERO, Vec3::X), None);
        assert_eq!(empty.intersect_ray_span(Vec3::ZERO, Vec3::X), None);
        assert_eq!(
            empty.intersect_ray_span(Vec3::new(-1.0, 0.3, 0.2), Vec3::new(1.0, 0.1, 0.1)),
            None
        );
    }
}
