use cgmath::InnerSpace;

use crate::{Face, RawFacet, Result, TriangleMesh, Vector3};

/// A single stored facet: three offsets into the shared point list.
///
/// Points are not stored inline. A facet corner costs 4 bytes instead
/// of the 12 a position would, the savings compound wherever a vertex
/// is shared, and every facet reads the same view of the geometry.
pub struct Facet {
    pub p0: u32,
    pub p1: u32,
    pub p2: u32,
}

/// A triangle mesh stored as a shared point list plus index triples.
pub struct VertexIndex {
    pub points: Vec<Vector3>,
    pub facets: Vec<Facet>,
    /// One outward normal per facet, parallel to `facets`.
    pub normals: Vec<Vector3>,
}

impl TriangleMesh for VertexIndex {
    fn from_facets(raw: Vec<RawFacet>) -> Self {
        let mut points = Vec::with_capacity(raw.len() * 3);
        let mut facets = Vec::with_capacity(raw.len());
        let mut normals = Vec::with_capacity(raw.len());
        for (i, f) in raw.iter().enumerate() {
            // Loaders provide one point per facet corner, so this is an
            // identity mapping (facet i covers points 3i..3i+2).
            //
            // As a future optimization we should de-duplicate the
            // points vector.
            let base = (3 * i) as u32;
            points.push(f.p0);
            points.push(f.p1);
            points.push(f.p2);
            facets.push(Facet {
                p0: base,
                p1: base + 1,
                p2: base + 2,
            });
            normals.push(facet_normal(f));
        }
        Self {
            points,
            facets,
            normals,
        }
    }

    fn facet_count(&self) -> usize {
        self.facets.len()
    }

    fn faces(&self) -> Result<Vec<Face<'_>>> {
        let mut faces = Vec::with_capacity(self.facets.len());
        for (facet, normal) in self.facets.iter().zip(&self.normals) {
            let mut face = Face::new(&self.points);
            face.add_vertex(facet.p0)?;
            face.add_vertex(facet.p1)?;
            face.add_vertex(facet.p2)?;
            face.set_normal(*normal);
            faces.push(face);
        }
        Ok(faces)
    }
}

// Loaders may leave the normal zeroed and rely on counter-clockwise
// winding; derive it from the corners in that case.
fn facet_normal(f: &RawFacet) -> Vector3 {
    if f.normal.magnitude2() > 0.0 {
        return f.normal;
    }
    let n = (f.p1 - f.p0).cross(f.p2 - f.p0);
    if n.magnitude2() > 0.0 {
        n.normalize()
    } else {
        n
    }
}
