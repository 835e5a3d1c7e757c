//! Primitive intersection tests
//!
//! Exact, stateless predicates between circles, spheres, axis-aligned boxes
//! and finite rays. Every test is boundary inclusive: touching shapes
//! intersect.

use crate::foundation::math::{Aabb, Aabb2, Circle, Ray2, Sphere, Vec2};

/// Portion of a ray inside a shape, as ray parameters in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySpan {
    /// Parameter where the ray enters the shape (clamped to the ray start)
    pub enter: f32,
    /// Parameter where the ray leaves the shape (clamped to the ray end)
    pub exit: f32,
}

/// One contact of a ray with a box face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayContact {
    /// Ray parameter of the contact, in `[0, 1]`
    pub t: f32,
    /// Contact point
    pub point: Vec2,
    /// Unit axis normal of the face crossed, or zero if the contact is a
    /// ray end lying inside the box
    pub normal: Vec2,
}

/// Result of a ray/box test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayAabbHit {
    /// Where the ray enters the box; the normal faces against the ray
    pub enter: RayContact,
    /// Where the ray leaves the box; the normal faces along the ray
    pub exit: RayContact,
}

/// Check if two circles intersect (tangent circles do)
pub fn circle_circle(a: &Circle, b: &Circle) -> bool {
    let distance_squared = (a.center - b.center).magnitude_squared();
    let radius_sum = a.radius + b.radius;
    distance_squared <= radius_sum * radius_sum
}

/// Gap between two circles, 0.0 if they touch or overlap
pub fn circle_distance(a: &Circle, b: &Circle) -> f32 {
    ((a.center - b.center).magnitude() - (a.radius + b.radius)).max(0.0)
}

/// Penetration depth between two circles, 0.0 if they do not overlap
pub fn circle_penetration(a: &Circle, b: &Circle) -> f32 {
    ((a.radius + b.radius) - (a.center - b.center).magnitude()).max(0.0)
}

/// Check if two spheres intersect (tangent spheres do)
pub fn sphere_sphere(a: &Sphere, b: &Sphere) -> bool {
    let distance_squared = (a.center - b.center).magnitude_squared();
    let radius_sum = a.radius + b.radius;
    distance_squared <= radius_sum * radius_sum
}

/// Check if a ray touches a circle
pub fn ray_circle(ray: &Ray2, circle: &Circle) -> bool {
    ray_circle_span(ray, circle).is_some()
}

/// Ray/circle test reporting where the ray enters and leaves the circle
///
/// Solves `|origin + t * delta - center|^2 = radius^2` for `t`. The ray hits
/// when the root interval overlaps `[0, 1]`; a double root (tangency) counts.
/// A zero-length ray hits only if its origin is inside the circle.
pub fn ray_circle_span(ray: &Ray2, circle: &Circle) -> Option<RaySpan> {
    // Work in the circle's frame
    let oc = ray.origin - circle.center;

    let a = ray.delta.dot(&ray.delta);
    let c = oc.dot(&oc) - circle.radius * circle.radius;

    if a == 0.0 {
        return (c <= 0.0).then_some(RaySpan { enter: 0.0, exit: 0.0 });
    }

    let b = 2.0 * oc.dot(&ray.delta);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_discriminant = discriminant.sqrt();
    let t1 = (-b - sqrt_discriminant) / (2.0 * a);
    let t2 = (-b + sqrt_discriminant) / (2.0 * a);

    if t2 < 0.0 || t1 > 1.0 {
        return None;
    }

    Some(RaySpan {
        enter: t1.max(0.0),
        exit: t2.min(1.0),
    })
}

/// Check if two 2D boxes overlap (touching boxes do)
pub fn aabb_aabb(a: &Aabb2, b: &Aabb2) -> bool {
    a.min.x <= b.max.x && a.max.x >= b.min.x &&
    a.min.y <= b.max.y && a.max.y >= b.min.y
}

/// Check if two 3D boxes overlap (touching boxes do)
pub fn aabb_aabb_3d(a: &Aabb, b: &Aabb) -> bool {
    a.min.x <= b.max.x && a.max.x >= b.min.x &&
    a.min.y <= b.max.y && a.max.y >= b.min.y &&
    a.min.z <= b.max.z && a.max.z >= b.min.z
}

/// Check if a circle overlaps a 2D box
pub fn circle_aabb(circle: &Circle, aabb: &Aabb2) -> bool {
    let closest = aabb.closest_point(circle.center);
    (closest - circle.center).magnitude_squared() <= circle.radius * circle.radius
}

/// Check if a sphere overlaps a 3D box
pub fn sphere_aabb(sphere: &Sphere, aabb: &Aabb) -> bool {
    let closest = aabb.closest_point(sphere.center);
    (closest - sphere.center).magnitude_squared() <= sphere.radius * sphere.radius
}

/// Check if a ray touches a 2D box
pub fn ray_aabb(ray: &Ray2, aabb: &Aabb2) -> bool {
    ray_aabb_hit(ray, aabb).is_some()
}

/// Ray/box test using the slab method
///
/// Each axis clips the parameter range to the slab between the box faces.
/// The axis that last raised `t_min` is the entry face, the axis that last
/// lowered `t_max` is the exit face. An axis-parallel ray outside a slab
/// can never enter it.
pub fn ray_aabb_hit(ray: &Ray2, aabb: &Aabb2) -> Option<RayAabbHit> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    let mut enter_normal = Vec2::zeros();
    let mut exit_normal = Vec2::zeros();

    for axis in 0..2 {
        let origin = ray.origin[axis];
        let delta = ray.delta[axis];
        let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

        if delta == 0.0 {
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let mut near = (lo - origin) / delta;
        let mut far = (hi - origin) / delta;
        if near > far {
            std::mem::swap(&mut near, &mut far);
        }

        let mut axis_normal = Vec2::zeros();
        axis_normal[axis] = delta.signum();

        if near > t_min {
            t_min = near;
            enter_normal = -axis_normal;
        }
        if far < t_max {
            t_max = far;
            exit_normal = axis_normal;
        }
    }

    if t_min > t_max || t_max < 0.0 || t_min > 1.0 {
        return None;
    }

    let enter_t = t_min.max(0.0);
    let exit_t = t_max.min(1.0);

    Some(RayAabbHit {
        enter: RayContact {
            t: enter_t,
            point: ray.point_at(enter_t),
            normal: if t_min >= 0.0 { enter_normal } else { Vec2::zeros() },
        },
        exit: RayContact {
            t: exit_t,
            point: ray.point_at(exit_t),
            normal: if t_max <= 1.0 { exit_normal } else { Vec2::zeros() },
        },
    })
}

impl Circle {
    /// Method form of [`circle_circle`]
    pub fn intersects(&self, other: &Circle) -> bool {
        circle_circle(self, other)
    }
}

impl Sphere {
    /// Method form of [`sphere_sphere`]
    pub fn intersects(&self, other: &Sphere) -> bool {
        sphere_sphere(self, other)
    }
}

impl Aabb2 {
    /// Method form of [`aabb_aabb`]
    pub fn intersects(&self, other: &Aabb2) -> bool {
        aabb_aabb(self, other)
    }
}

impl Aabb {
    /// Method form of [`aabb_aabb_3d`]
    pub fn intersects(&self, other: &Aabb) -> bool {
        aabb_aabb_3d(self, other)
    }
}

impl Ray2 {
    /// Method form of [`ray_circle`]
    pub fn hits_circle(&self, circle: &Circle) -> bool {
        ray_circle(self, circle)
    }

    /// Method form of [`ray_aabb`]
    pub fn hits_aabb(&self, aabb: &Aabb2) -> bool {
        ray_aabb(self, aabb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    fn unit_box() -> Aabb2 {
        Aabb2::new(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0))
    }

    #[test]
    fn test_method_forms_match_functions() {
        let a = Circle::new(Vec2::zeros(), 1.0);
        let b = Circle::new(Vec2::new(2.0, 0.0), 1.0);
        assert_eq!(a.intersects(&b), circle_circle(&a, &b));

        let ray = Ray2::between(Vec2::new(-3.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!(ray.hits_aabb(&unit_box()));
        assert!(!ray.hits_circle(&b));
        assert!(unit_box().intersects(&Aabb2::new(Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0))));

        let cube = Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        assert!(!cube.intersects(&Aabb::new(Vec3::new(0.0, 0.0, 1.5), Vec3::new(1.0, 1.0, 2.0))));
        assert!(Sphere::new(Vec3::zeros(), 1.0).intersects(&Sphere::new(Vec3::new(0.0, 0.0, 2.0), 1.0)));
    }

    #[test]
    fn test_tangent_circles_intersect() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 1.0);
        let b = Circle::new(Vec2::new(3.0, 0.0), 2.0);
        assert!(circle_circle(&a, &b));
        assert_eq!(circle_distance(&a, &b), 0.0);
        assert_eq!(circle_penetration(&a, &b), 0.0);
    }

    #[test]
    fn test_circle_distance_and_penetration() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 1.0);
        let far = Circle::new(Vec2::new(5.0, 0.0), 1.0);
        let near = Circle::new(Vec2::new(1.5, 0.0), 1.0);

        assert!(!circle_circle(&a, &far));
        assert_relative_eq!(circle_distance(&a, &far), 3.0, epsilon = EPSILON);
        assert_eq!(circle_penetration(&a, &far), 0.0);

        assert!(circle_circle(&a, &near));
        assert_eq!(circle_distance(&a, &near), 0.0);
        assert_relative_eq!(circle_penetration(&a, &near), 0.5, epsilon = EPSILON);
    }

    #[test]
    fn test_ray_through_circle_reports_span() {
        let circle = Circle::new(Vec2::new(0.0, 0.0), 1.0);
        let ray = Ray2::between(Vec2::new(-2.0, 0.0), Vec2::new(2.0, 0.0));

        let span = ray_circle_span(&ray, &circle).expect("ray crosses the circle");
        assert_relative_eq!(span.enter, 0.25, epsilon = EPSILON);
        assert_relative_eq!(span.exit, 0.75, epsilon = EPSILON);
    }

    #[test]
    fn test_ray_tangent_to_circle_hits() {
        let circle = Circle::new(Vec2::new(0.0, 0.0), 1.0);
        let ray = Ray2::between(Vec2::new(-2.0, 1.0), Vec2::new(2.0, 1.0));

        let span = ray_circle_span(&ray, &circle).expect("tangent ray touches");
        assert_relative_eq!(span.enter, 0.5, epsilon = EPSILON);
        assert_relative_eq!(span.exit, 0.5, epsilon = EPSILON);
    }

    #[test]
    fn test_ray_short_of_circle_misses() {
        let circle = Circle::new(Vec2::new(5.0, 0.0), 1.0);
        let ray = Ray2::between(Vec2::new(0.0, 0.0), Vec2::new(3.0, 0.0));
        assert!(!ray_circle(&ray, &circle));

        let behind = Ray2::between(Vec2::new(0.0, 0.0), Vec2::new(-3.0, 0.0));
        assert!(!ray_circle(&behind, &circle));
    }

    #[test]
    fn test_ray_inside_circle_is_clamped() {
        let circle = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let ray = Ray2::between(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));

        let span = ray_circle_span(&ray, &circle).expect("segment lies inside");
        assert_eq!(span.enter, 0.0);
        assert_eq!(span.exit, 1.0);
    }

    #[test]
    fn test_zero_length_ray_against_circle() {
        let circle = Circle::new(Vec2::new(0.0, 0.0), 1.0);
        let inside = Ray2::new(Vec2::new(0.5, 0.0), Vec2::zeros());
        let on_edge = Ray2::new(Vec2::new(1.0, 0.0), Vec2::zeros());
        let outside = Ray2::new(Vec2::new(2.0, 0.0), Vec2::zeros());

        assert_eq!(ray_circle_span(&inside, &circle), Some(RaySpan { enter: 0.0, exit: 0.0 }));
        assert!(ray_circle(&on_edge, &circle));
        assert!(!ray_circle(&outside, &circle));
    }

    #[test]
    fn test_touching_boxes_overlap() {
        let a = unit_box();
        let b = Aabb2::new(Vec2::new(1.0, -0.5), Vec2::new(2.0, 0.5));
        let c = Aabb2::new(Vec2::new(1.01, -0.5), Vec2::new(2.0, 0.5));

        assert!(aabb_aabb(&a, &b));
        assert!(!aabb_aabb(&a, &c));
    }

    #[test]
    fn test_3d_boxes_separated_on_z() {
        let a = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vec3::new(0.0, 0.0, 2.0), Vec3::new(1.0, 1.0, 3.0));
        assert!(!aabb_aabb_3d(&a, &b));
        assert!(aabb_aabb(&a.to_2d(), &b.to_2d()));
    }

    #[test]
    fn test_circle_against_box_corner() {
        let aabb = unit_box();
        let touching = Circle::new(Vec2::new(2.0, 1.0), 1.0);
        let diagonal_miss = Circle::new(Vec2::new(2.0, 2.0), 1.0);

        assert!(circle_aabb(&touching, &aabb));
        assert!(!circle_aabb(&diagonal_miss, &aabb));
    }

    #[test]
    fn test_sphere_against_box() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(sphere_aabb(&Sphere::new(Vec3::new(0.0, 0.0, 3.0), 2.0), &aabb));
        assert!(!sphere_aabb(&Sphere::new(Vec3::new(0.0, 0.0, 3.5), 2.0), &aabb));
        assert!(sphere_sphere(
            &Sphere::new(Vec3::zeros(), 1.0),
            &Sphere::new(Vec3::new(0.0, 2.0, 0.0), 1.0),
        ));
    }

    #[test]
    fn test_ray_through_box_reports_faces() {
        let ray = Ray2::between(Vec2::new(-3.0, 0.0), Vec2::new(3.0, 0.0));
        let hit = ray_aabb_hit(&ray, &unit_box()).expect("ray crosses the box");

        assert_relative_eq!(hit.enter.t, 1.0 / 3.0, epsilon = EPSILON);
        assert_relative_eq!(hit.exit.t, 2.0 / 3.0, epsilon = EPSILON);
        assert_relative_eq!(hit.enter.point, Vec2::new(-1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(hit.exit.point, Vec2::new(1.0, 0.0), epsilon = EPSILON);
        assert_eq!(hit.enter.normal, Vec2::new(-1.0, 0.0));
        assert_eq!(hit.exit.normal, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_diagonal_ray_enters_through_latest_slab() {
        // Crosses x = -1 at t = 0.25 and y = -1 at t = 0.5, so y is the entry face
        let ray = Ray2::between(Vec2::new(-2.0, -3.0), Vec2::new(2.0, 1.0));
        let hit = ray_aabb_hit(&ray, &unit_box()).expect("ray clips the box");

        assert_relative_eq!(hit.enter.t, 0.5, epsilon = EPSILON);
        assert_eq!(hit.enter.normal, Vec2::new(0.0, -1.0));
        assert_relative_eq!(hit.exit.t, 0.75, epsilon = EPSILON);
        assert_eq!(hit.exit.normal, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_ray_ending_on_box_face_hits() {
        let ray = Ray2::between(Vec2::new(-3.0, 0.0), Vec2::new(-1.0, 0.0));
        let hit = ray_aabb_hit(&ray, &unit_box()).expect("endpoint on the boundary");

        assert_eq!(hit.enter.t, 1.0);
        assert_eq!(hit.enter.normal, Vec2::new(-1.0, 0.0));
        assert_eq!(hit.exit.t, 1.0);
        assert_eq!(hit.exit.normal, Vec2::zeros());
    }

    #[test]
    fn test_axis_parallel_ray_outside_slab_misses() {
        let ray = Ray2::between(Vec2::new(-3.0, 2.0), Vec2::new(3.0, 2.0));
        assert!(!ray_aabb(&ray, &unit_box()));

        let grazing = Ray2::between(Vec2::new(-3.0, 1.0), Vec2::new(3.0, 1.0));
        assert!(ray_aabb(&grazing, &unit_box()));
    }

    #[test]
    fn test_ray_starting_inside_box() {
        let ray = Ray2::between(Vec2::new(0.0, 0.0), Vec2::new(0.0, 4.0));
        let hit = ray_aabb_hit(&ray, &unit_box()).expect("origin inside");

        assert_eq!(hit.enter.t, 0.0);
        assert_eq!(hit.enter.normal, Vec2::zeros());
        assert_relative_eq!(hit.exit.t, 0.25, epsilon = EPSILON);
        assert_eq!(hit.exit.normal, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_zero_length_ray_against_box() {
        let inside = Ray2::new(Vec2::new(0.5, 0.5), Vec2::zeros());
        let outside = Ray2::new(Vec2::new(1.5, 0.5), Vec2::zeros());

        assert!(ray_aabb(&inside, &unit_box()));
        assert!(!ray_aabb(&outside, &unit_box()));
    }

    #[test]
    fn test_ray_pointing_away_from_box_misses() {
        let ray = Ray2::between(Vec2::new(3.0, 0.0), Vec2::new(6.0, 0.0));
        assert!(!ray_aabb(&ray, &unit_box()));
    }
}
