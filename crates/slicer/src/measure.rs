use julienne_mesh::{Result, TriangleMesh};

/// Total surface area of the mesh: the sum of all facet areas.
pub fn surface_area<M: TriangleMesh>(mesh: &M) -> Result<f32> {
    let mut total = 0.0;
    for face in &mesh.faces()? {
        total += face.surface_area()?;
    }
    Ok(total)
}

/// Volume enclosed by the mesh.
///
/// Sums the signed volume of the tetrahedron each face spans with the
/// origin. Faces on the far side of the surface add volume, faces on
/// the near side subtract it. The result is only meaningful for a
/// closed mesh with outward normals.
pub fn enclosed_volume<M: TriangleMesh>(mesh: &M) -> Result<f32> {
    let mut total = 0.0;
    for face in &mesh.faces()? {
        total += face.signed_volume()?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;
    use julienne_mesh::DefaultMesh;

    use super::*;

    #[test]
    fn cube_surface_area() {
        let mesh: DefaultMesh = julienne_test_data::cube(10.0);
        // 6 sides of 10 x 10.
        assert_float_eq!(surface_area(&mesh).unwrap(), 600.0, abs <= 1e-3);
    }

    #[test]
    fn cube_enclosed_volume() {
        let mesh: DefaultMesh = julienne_test_data::cube(10.0);
        assert_float_eq!(enclosed_volume(&mesh).unwrap(), 1000.0, abs <= 1e-2);
    }

    #[test]
    fn enclosed_volume_flips_with_inverted_normals() {
        let mut facets = julienne_test_data::cube_facets(10.0);
        for f in &mut facets {
            f.normal = -f.normal;
        }
        let inverted = DefaultMesh::from_facets(facets);
        assert_float_eq!(enclosed_volume(&inverted).unwrap(), -1000.0, abs <= 1e-2);
    }
}
