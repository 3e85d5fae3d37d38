use std::collections::HashMap;

use cgmath::{InnerSpace, Vector2};
use julienne_mesh::{Axis, Bounds3, FaceError, TriangleMesh, Vector3};
use ordered_float::OrderedFloat;
use tracing::{debug, info, warn};

use crate::config::SlicerConfig;
use crate::contour::Contour;

pub type OrderedVec2 = Vector2<OrderedFloat<f32>>;
pub type SegmentMap = HashMap<OrderedVec2, OrderedVec2>;

// Segment endpoints become hash keys, so nearby floats must collapse to
// an identical representation. Snapping to the nearest micron (model
// units are mm) absorbs interpolation error between adjacent faces.
#[inline(always)]
fn snap(v: f32) -> f32 {
    (v * 1_000.0).round() / 1_000.0
}

/// The result of slicing: one [`Contour`] per cutting plane, in layer
/// order, plus the in-plane extents over all layers.
pub struct SlicedMesh {
    contours: Vec<Contour>,
    limits_u: (f32, f32),
    limits_v: (f32, f32),
    skipped: usize,
}

impl SlicedMesh {
    fn new() -> Self {
        Self {
            contours: Vec::new(),
            limits_u: (f32::INFINITY, f32::NEG_INFINITY),
            limits_v: (f32::INFINITY, f32::NEG_INFINITY),
            skipped: 0,
        }
    }

    pub fn contours(&self) -> &[Contour] {
        self.contours.as_slice()
    }

    /// Extent along the first in-plane axis, over all layers.
    pub fn limits_u(&self) -> (f32, f32) {
        self.limits_u
    }

    /// Extent along the second in-plane axis, over all layers.
    pub fn limits_v(&self) -> (f32, f32) {
        self.limits_v
    }

    /// Face contributions dropped because a plane produced a degenerate
    /// or anomalous crossing.
    pub fn skipped_faces(&self) -> usize {
        self.skipped
    }
}

// The set of cutting planes (multiples of the layer height) that can
// cross one face's extent along the slicing axis. Planes exactly at the
// extent boundaries are kept; the face itself reports no chord there.
fn layer_range(
    bounds: &Bounds3,
    axis: Axis,
    layer_height: f32,
) -> Option<std::ops::RangeInclusive<usize>> {
    let (lo, hi) = bounds.interval(axis);
    if !(hi > lo) {
        return None;
    }
    let first = (lo / layer_height).ceil().max(0.0) as usize;
    let last = (hi / layer_height).floor() as usize;
    if first <= last {
        Some(first..=last)
    } else {
        None
    }
}

/// Cuts `mesh` into evenly spaced layers of closed outlines.
///
/// Every face is queried against each cutting plane its bounds admit.
/// A face that reports a degenerate or anomalous crossing keeps the
/// rest of the batch alive: its contribution for that plane is dropped,
/// logged, and counted in [`SlicedMesh::skipped_faces`]. The chords of
/// each layer are then chained into closed outlines.
pub fn slice_mesh<M: TriangleMesh>(
    mesh: &M,
    config: &SlicerConfig,
) -> Result<SlicedMesh, FaceError> {
    let axis = config.axis;
    let (u_axis, v_axis) = axis.plane();
    let plane_normal = axis.unit();

    let faces = mesh.faces()?;
    debug!(facets = faces.len(), ?axis, "slicing mesh");

    let project = |p: Vector3| -> OrderedVec2 {
        Vector2 {
            x: OrderedFloat(snap(p[u_axis.index()])),
            y: OrderedFloat(snap(p[v_axis.index()])),
        }
    };

    // One entry per cutting plane, mapping the start of each directed
    // chord to its end. The contours are pieced back together from
    // these maps at the end.
    let mut slices: Vec<SegmentMap> = Vec::new();
    let mut skipped = 0usize;

    for face in &faces {
        let Some(layers) = layer_range(&face.bounds(), axis, config.layer_height) else {
            continue;
        };

        // Chords are oriented before insertion so that every layer's
        // outlines wind the same way: the cross product of the plane
        // normal and the face normal points along the outline.
        let corners = face.corners()?;
        let normal = face
            .normal()
            .unwrap_or_else(|| (corners[1] - corners[0]).cross(corners[2] - corners[0]));
        let direction = plane_normal.cross(normal);

        for layer in layers {
            let pos = layer as f32 * config.layer_height;
            let (first, second) = match face.intersection(axis, pos) {
                Ok(Some(chord)) => chord,
                Ok(None) => continue,
                Err(
                    err @ (FaceError::AnomalousIntersection(_) | FaceError::DegenerateGeometry),
                ) => {
                    // Typically a vertex sitting exactly on a cutting
                    // plane. Adjacent faces still contribute the
                    // surrounding chords, so only this face's share of
                    // the layer is dropped.
                    warn!(layer, %err, "dropping face contribution");
                    skipped += 1;
                    continue;
                }
                Err(err) => return Err(err),
            };

            let (start, end) = if (first - second).dot(direction) > 0.0 {
                (first, second)
            } else {
                (second, first)
            };

            if slices.len() <= layer {
                slices.resize_with(layer + 1, SegmentMap::new);
            }
            slices[layer].insert(project(start), project(end));
        }
    }

    let mut sliced = SlicedMesh::new();
    for map in slices {
        let contour = Contour::from_segment_map(map);
        if !contour.is_empty() {
            let (ulo, uhi) = contour.limits_u();
            let (vlo, vhi) = contour.limits_v();
            sliced.limits_u.0 = sliced.limits_u.0.min(ulo);
            sliced.limits_u.1 = sliced.limits_u.1.max(uhi);
            sliced.limits_v.0 = sliced.limits_v.0.min(vlo);
            sliced.limits_v.1 = sliced.limits_v.1.max(vhi);
        }
        sliced.contours.push(contour);
    }
    sliced.skipped = skipped;
    info!(
        layers = sliced.contours.len(),
        skipped, "sliced mesh into contours"
    );
    Ok(sliced)
}
