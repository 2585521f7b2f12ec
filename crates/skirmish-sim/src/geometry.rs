//! Stateless geometric predicates on the ground plane (y = 0).

use glam::{Vec2, Vec3};

use skirmish_core::constants::QUAD_VERTEX_FLOATS;

use crate::error::SimError;

/// Upward normal of the ground plane.
pub const GROUND_NORMAL: Vec3 = Vec3::Y;

/// Intersect a ray with the ground plane.
///
/// No check is made that the hit lies in front of `origin`; a camera ray
/// pointing away from the ground still resolves to the plane behind it.
pub fn ray_ground_plane_intersection(direction: Vec3, origin: Vec3) -> Result<Vec3, SimError> {
    let denom = GROUND_NORMAL.dot(direction);
    if denom == 0.0 {
        return Err(SimError::DegenerateRay);
    }
    let t = -GROUND_NORMAL.dot(origin) / denom;
    Ok(origin + t * direction)
}

/// Containment test with asymmetric bounds: inclusive on both x edges and the
/// top edge, exclusive on the bottom edge.
pub fn point_in_axis_aligned_rect(point: Vec2, corner: Vec2, width: f32, height: f32) -> bool {
    point.x >= corner.x
        && point.x <= corner.x + width
        && point.y > corner.y
        && point.y <= corner.y + height
}

/// Whether the ground projection (x, z) of `point` lies inside the rectangle
/// spanned by the corners `r1` and `r2`, in any relative order.
pub fn point_in_drag_rect(point: Vec3, r1: Vec3, r2: Vec3) -> bool {
    let corner = Vec2::new(r1.x.min(r2.x), r1.z.min(r2.z));
    let width = (r1.x - r2.x).abs();
    let height = (r1.z - r2.z).abs();
    point_in_axis_aligned_rect(Vec2::new(point.x, point.z), corner, width, height)
}

/// Four corners of the ground rectangle spanned by `a` and `b`, in draw order:
/// `a`, `(a.x, 0, b.z)`, `b`, `(b.x, 0, a.z)`.
pub fn make_quad(a: Vec3, b: Vec3) -> Result<[Vec3; 4], SimError> {
    if a == b {
        return Err(SimError::DegenerateDragQuad);
    }
    let c = Vec3::new(a.x, 0.0, b.z);
    let d = Vec3::new(b.x, 0.0, a.z);
    Ok([a, c, b, d])
}

/// Flatten quad corners into the vertex-buffer layout.
pub fn quad_to_buffer(quad: &[Vec3; 4]) -> [f32; QUAD_VERTEX_FLOATS] {
    let mut out = [0.0; QUAD_VERTEX_FLOATS];
    for (chunk, v) in out.chunks_exact_mut(3).zip(quad) {
        chunk.copy_from_slice(&v.to_array());
    }
    out
}
