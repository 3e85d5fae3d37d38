use std::cell::Cell;

use cgmath::InnerSpace;

use crate::{Axis, Bounds3, FaceError, Result, Vector3};

/// A triangular face of a surface mesh.
///
/// A face owns no geometry. It stores up to three indices into a shared,
/// externally owned vertex list and answers queries about the triangle
/// those indices describe: its axis-aligned bounds, its surface area,
/// its signed volume contribution, and the chord where an axis-aligned
/// plane cuts it.
///
/// Construction is a short accumulation phase: bind the vertex list,
/// call [`add_vertex`](Face::add_vertex) three times, and set the
/// outward normal if signed volume will be queried. The bounding box
/// grows as indices are added. Area and volume are computed on first
/// query and memoized; vertex positions are assumed immutable once
/// queries begin, so there is no invalidation path.
///
/// Queries take `&self` through interior-mutable memo cells, which makes
/// a face `Send` but not `Sync`: one writer at a time per face, while
/// the shared vertex slice is freely shared read-only.
#[derive(Debug)]
pub struct Face<'v> {
    vertices: &'v [Vector3],
    indices: [u32; 3],
    count: usize,
    bounds: Bounds3,
    normal: Option<Vector3>,
    surface_area: Cell<Option<f32>>,
    signed_volume: Cell<Option<f32>>,
}

impl<'v> Face<'v> {
    /// Creates an empty face bound to a shared vertex list.
    pub fn new(vertices: &'v [Vector3]) -> Self {
        Self {
            vertices,
            indices: [0; 3],
            count: 0,
            bounds: Bounds3::empty(),
            normal: None,
            surface_area: Cell::new(None),
            signed_volume: Cell::new(None),
        }
    }

    /// Appends a vertex index and folds the referenced point into the
    /// bounding box.
    ///
    /// Index order matters: it defines the winding and the edge
    /// traversal order used by [`intersection`](Face::intersection).
    /// A fourth vertex is rejected and leaves the face untouched.
    pub fn add_vertex(&mut self, index: u32) -> Result<()> {
        if self.count == 3 {
            return Err(FaceError::InvalidState(
                "too many vertices for a triangular face",
            ));
        }
        let p = *self
            .vertices
            .get(index as usize)
            .ok_or(FaceError::IndexOutOfRange {
                index,
                len: self.vertices.len(),
            })?;
        self.indices[self.count] = index;
        if self.count == 0 {
            // The first vertex defines the box outright instead of
            // merging with the empty sentinel.
            self.bounds = Bounds3::point(p);
        } else {
            self.bounds.fold(p);
        }
        self.count += 1;
        Ok(())
    }

    /// Stores the face normal. Overwriting a previously set normal is
    /// permitted; queries made before the overwrite keep their cached
    /// result.
    pub fn set_normal(&mut self, normal: Vector3) {
        self.normal = Some(normal);
    }

    pub fn normal(&self) -> Option<Vector3> {
        self.normal
    }

    /// The vertex indices added so far, in insertion order.
    pub fn indices(&self) -> &[u32] {
        &self.indices[..self.count]
    }

    pub fn is_complete(&self) -> bool {
        self.count == 3
    }

    pub fn bounds(&self) -> Bounds3 {
        self.bounds
    }

    /// The three corner positions, in index order.
    pub fn corners(&self) -> Result<[Vector3; 3]> {
        if self.count < 3 {
            return Err(FaceError::InvalidState(
                "triangle has fewer than three vertices",
            ));
        }
        Ok([self.point(0), self.point(1), self.point(2)])
    }

    fn reset_bounds(&mut self) {
        self.bounds = Bounds3::empty();
    }

    /// Re-derives the bounding box from the referenced vertices.
    ///
    /// The incremental fold in [`add_vertex`](Face::add_vertex) already
    /// keeps the box exact; this recomputes it from scratch for callers
    /// that moved the underlying points before issuing any queries.
    pub fn update_bounds(&mut self) {
        self.reset_bounds();
        for i in 0..self.count {
            let p = self.point(i);
            if i == 0 {
                self.bounds = Bounds3::point(p);
            } else {
                self.bounds.fold(p);
            }
        }
    }

    fn point(&self, corner: usize) -> Vector3 {
        self.vertices[self.indices[corner] as usize]
    }

    /// The surface area of the triangle. Computed once and memoized.
    pub fn surface_area(&self) -> Result<f32> {
        if let Some(area) = self.surface_area.get() {
            return Ok(area);
        }
        if self.count < 3 {
            return Err(FaceError::InvalidState(
                "cannot compute area of an incomplete triangle",
            ));
        }
        // Half the parallelogram spanned by the two edges out of vertex
        // 0. Unsigned, so winding does not matter.
        let e1 = self.point(0) - self.point(1);
        let e2 = self.point(0) - self.point(2);
        let area = e1.cross(e2).magnitude() / 2.0;
        self.surface_area.set(Some(area));
        Ok(area)
    }

    /// The signed volume of the tetrahedron spanned by this face and
    /// the origin. Computed once and memoized.
    ///
    /// The sign is the orientation of that tetrahedron relative to the
    /// face normal: summed over a closed mesh with outward normals, the
    /// far side of the surface adds volume and the near side subtracts
    /// it, leaving the enclosed volume. A face whose plane passes
    /// through the origin contributes exactly zero; that is the correct
    /// value, not an error.
    ///
    /// Requires all three vertices and a normal.
    pub fn signed_volume(&self) -> Result<f32> {
        if let Some(volume) = self.signed_volume.get() {
            return Ok(volume);
        }
        if self.count < 3 {
            return Err(FaceError::InvalidState(
                "cannot compute volume of an incomplete triangle",
            ));
        }
        let normal = self.normal.ok_or(FaceError::InvalidState(
            "signed volume requires the face normal",
        ))?;
        let a = self.point(0);
        let b = self.point(1);
        let c = self.point(2);

        let d = a.dot(normal);
        let sign = if d > 0.0 {
            1.0
        } else if d < 0.0 {
            -1.0
        } else {
            0.0
        };

        // Scalar triple product a . (b x c), expanded.
        let vol = -c.x * b.y * a.z + b.x * c.y * a.z + c.x * a.y * b.z
            - a.x * c.y * b.z
            - b.x * a.y * c.z
            + a.x * b.y * c.z;
        let volume = sign * (vol / 6.0).abs();
        self.signed_volume.set(Some(volume));
        Ok(volume)
    }

    /// The chord where the plane `axis = pos` cuts this face.
    ///
    /// Returns `Ok(None)` when the plane misses the triangle, including
    /// when it only touches the bounding interval at `min` or `max`. An
    /// edge crosses only if its endpoints lie strictly on opposite
    /// sides of the plane; a vertex exactly on the plane does not by
    /// itself contribute a point. Each crossing edge is interpolated
    /// linearly, with the coordinate along `axis` pinned exactly to
    /// `pos`.
    ///
    /// A crossing count other than 0 or 2 cannot happen under exact
    /// arithmetic but can under floating point; it is reported as
    /// [`FaceError::AnomalousIntersection`] so the caller can tell a
    /// missed face from a misbehaving one.
    pub fn intersection(&self, axis: Axis, pos: f32) -> Result<Option<(Vector3, Vector3)>> {
        if self.count < 3 {
            return Err(FaceError::InvalidState(
                "cannot intersect an incomplete triangle",
            ));
        }

        // Cheap rejection off the bounding interval. Boundary values
        // count as non-crossing, consistent with the strict edge test
        // below.
        let (lo, hi) = self.bounds.interval(axis);
        if pos <= lo || pos >= hi {
            return Ok(None);
        }

        let ai = axis.index();
        let mut chord = [Vector3::new(0.0, 0.0, 0.0); 2];
        let mut crossings = 0;
        for i in 0..3 {
            let a = self.point(i);
            let b = self.point((i + 1) % 3);
            let (ca, cb) = (a[ai], b[ai]);
            if !((ca < pos && cb > pos) || (ca > pos && cb < pos)) {
                continue;
            }
            let span = cb - ca;
            if span == 0.0 {
                // Unreachable while the strict test above holds; the
                // guard keeps a broken comparison from ever emitting a
                // non-finite point.
                return Err(FaceError::DegenerateGeometry);
            }
            let t = (pos - ca) / span;
            let mut p = a + (b - a) * t;
            p[ai] = pos;
            if crossings < 2 {
                chord[crossings] = p;
            }
            crossings += 1;
        }

        match crossings {
            0 => Ok(None),
            2 => Ok(Some((chord[0], chord[1]))),
            n => Err(FaceError::AnomalousIntersection(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;

    fn v(x: f32, y: f32, z: f32) -> Vector3 {
        Vector3::new(x, y, z)
    }

    fn face_over<'v>(vertices: &'v [Vector3], order: &[u32]) -> Face<'v> {
        let mut face = Face::new(vertices);
        for &i in order {
            face.add_vertex(i).unwrap();
        }
        face
    }

    #[test]
    fn right_triangle_area() {
        let vertices = [v(0.0, 0.0, 0.0), v(3.0, 0.0, 0.0), v(0.0, 4.0, 0.0)];
        let face = face_over(&vertices, &[0, 1, 2]);
        assert_float_eq!(face.surface_area().unwrap(), 6.0, abs <= 1e-5);
    }

    #[test]
    fn area_is_winding_invariant() {
        let vertices = [v(0.2, 1.5, -3.0), v(4.0, 0.0, 2.0), v(-1.0, 2.0, 0.0)];
        let orders: [&[u32]; 3] = [&[0, 1, 2], &[2, 0, 1], &[1, 0, 2]];
        let areas: Vec<f32> = orders
            .iter()
            .map(|order| face_over(&vertices, order).surface_area().unwrap())
            .collect();
        assert!(areas[0] > 0.0);
        assert_float_eq!(areas[0], areas[1], abs <= 1e-5);
        assert_float_eq!(areas[0], areas[2], abs <= 1e-5);
    }

    #[test]
    fn area_of_incomplete_triangle_fails() {
        let vertices = [v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0)];
        let face = face_over(&vertices, &[0, 1]);
        assert_eq!(
            face.surface_area(),
            Err(FaceError::InvalidState(
                "cannot compute area of an incomplete triangle"
            ))
        );
    }

    #[test]
    fn fourth_vertex_is_rejected() {
        let vertices = [
            v(0.0, 0.0, 0.0),
            v(1.0, 0.0, 0.0),
            v(0.0, 1.0, 0.0),
            v(5.0, 5.0, 5.0),
        ];
        let mut face = face_over(&vertices, &[0, 1, 2]);
        let bounds = face.bounds();

        let err = face.add_vertex(3);
        assert_eq!(
            err,
            Err(FaceError::InvalidState(
                "too many vertices for a triangular face"
            ))
        );
        // The rejected vertex must leave indices and bounds untouched.
        assert_eq!(face.indices(), &[0, 1, 2]);
        assert_eq!(face.bounds(), bounds);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let vertices = [v(0.0, 0.0, 0.0)];
        let mut face = Face::new(&vertices);
        assert_eq!(
            face.add_vertex(7),
            Err(FaceError::IndexOutOfRange { index: 7, len: 1 })
        );
        assert_eq!(face.indices(), &[] as &[u32]);
    }

    #[test]
    fn bounds_are_min_max_of_corners() {
        let vertices = [v(1.0, -2.0, 3.0), v(-1.0, 5.0, 0.5), v(0.0, 0.0, 9.0)];
        for order in [[0, 1, 2], [2, 1, 0], [1, 2, 0]] {
            let face = face_over(&vertices, &order);
            let bounds = face.bounds();
            assert_eq!(bounds.min, v(-1.0, -2.0, 0.5));
            assert_eq!(bounds.max, v(1.0, 5.0, 9.0));
        }
    }

    #[test]
    fn update_bounds_matches_incremental() {
        let vertices = [v(1.0, -2.0, 3.0), v(-1.0, 5.0, 0.5), v(0.0, 0.0, 9.0)];
        let mut face = face_over(&vertices, &[0, 1, 2]);
        let incremental = face.bounds();
        face.update_bounds();
        assert_eq!(face.bounds(), incremental);
    }

    #[test]
    fn volume_requires_normal() {
        let vertices = [v(1.0, 0.0, 1.0), v(0.0, 1.0, 1.0), v(1.0, 1.0, 1.0)];
        let face = face_over(&vertices, &[0, 1, 2]);
        assert_eq!(
            face.signed_volume(),
            Err(FaceError::InvalidState(
                "signed volume requires the face normal"
            ))
        );
    }

    #[test]
    fn volume_is_memoized_and_sign_follows_normal() {
        let vertices = [v(1.0, 0.0, 1.0), v(0.0, 1.0, 1.0), v(1.0, 1.0, 1.0)];

        let mut up = face_over(&vertices, &[0, 1, 2]);
        up.set_normal(v(0.0, 0.0, 1.0));
        let first = up.signed_volume().unwrap();
        let second = up.signed_volume().unwrap();
        assert_eq!(first, second);
        assert!(first > 0.0);

        let mut down = face_over(&vertices, &[0, 1, 2]);
        down.set_normal(v(0.0, 0.0, -1.0));
        let flipped = down.signed_volume().unwrap();
        assert_float_eq!(flipped, -first, abs <= 1e-6);
    }

    #[test]
    fn volume_is_zero_when_plane_contains_origin() {
        // All corners in z = 0, normal along z: dot(v0, n) == 0.
        let vertices = [v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0), v(1.0, 1.0, 0.0)];
        let mut face = face_over(&vertices, &[0, 1, 2]);
        face.set_normal(v(0.0, 0.0, 1.0));
        assert_eq!(face.signed_volume().unwrap(), 0.0);
    }

    #[test]
    fn chord_outside_bounds_is_none() {
        let vertices = [v(0.0, 0.0, 0.0), v(2.0, 0.0, 0.0), v(0.0, 2.0, 0.0)];
        let face = face_over(&vertices, &[0, 1, 2]);
        assert_eq!(face.intersection(Axis::X, -1.0).unwrap(), None);
        assert_eq!(face.intersection(Axis::X, 3.0).unwrap(), None);
        assert_eq!(face.intersection(Axis::Z, 1.0).unwrap(), None);
    }

    #[test]
    fn chord_at_exact_bound_is_none() {
        // A plane tangent to the box at a vertex reports no crossing
        // through the fast path and would report none through the edge
        // test either; the two paths agree on the boundary.
        let vertices = [v(0.0, 0.0, 0.0), v(2.0, 0.0, 0.0), v(0.0, 2.0, 0.0)];
        let face = face_over(&vertices, &[0, 1, 2]);
        assert_eq!(face.intersection(Axis::X, 0.0).unwrap(), None);
        assert_eq!(face.intersection(Axis::X, 2.0).unwrap(), None);
    }

    #[test]
    fn chord_crosses_two_edges() {
        let vertices = [v(0.0, 0.0, 0.0), v(2.0, 0.0, 0.0), v(0.0, 2.0, 0.0)];
        let face = face_over(&vertices, &[0, 1, 2]);
        let (a, b) = face.intersection(Axis::X, 1.0).unwrap().unwrap();
        // Edge order: v0->v1 first, then v1->v2. The plane coordinate is
        // pinned exactly.
        assert_eq!(a, v(1.0, 0.0, 0.0));
        assert_eq!(b, v(1.0, 1.0, 0.0));
    }

    #[test]
    fn vertex_on_plane_is_anomalous() {
        // The apex sits exactly on the plane, so only one edge crosses
        // strictly. The caller gets a diagnostic, not a bogus chord.
        let vertices = [v(0.0, 0.0, 0.0), v(2.0, 0.0, 0.0), v(1.0, 1.0, 0.0)];
        let face = face_over(&vertices, &[0, 1, 2]);
        assert_eq!(
            face.intersection(Axis::X, 1.0),
            Err(FaceError::AnomalousIntersection(1))
        );
    }

    #[test]
    fn intersection_of_incomplete_triangle_fails() {
        let vertices = [v(0.0, 0.0, 0.0), v(2.0, 0.0, 0.0)];
        let face = face_over(&vertices, &[0, 1]);
        assert!(matches!(
            face.intersection(Axis::X, 1.0),
            Err(FaceError::InvalidState(_))
        ));
    }

    #[test]
    fn area_is_memoized() {
        let vertices = [v(0.0, 0.0, 0.0), v(3.0, 0.0, 0.0), v(0.0, 4.0, 0.0)];
        let face = face_over(&vertices, &[0, 1, 2]);
        let first = face.surface_area().unwrap();
        assert_eq!(face.surface_area().unwrap(), first);
    }
}
