use byteorder::{LittleEndian, WriteBytesExt};
use julienne_mesh::{RawFacet, TriangleMesh, Vector3};

fn v(x: f32, y: f32, z: f32) -> Vector3 {
    Vector3::new(x, y, z)
}

/// The twelve facets of an axis-aligned cube spanning `0..size` on
/// every axis, with outward normals and counter-clockwise winding.
pub fn cube_facets(size: f32) -> Vec<RawFacet> {
    let s = size;
    let quad = |normal: Vector3, a: Vector3, b: Vector3, c: Vector3, d: Vector3| {
        [
            RawFacet {
                normal,
                p0: a,
                p1: b,
                p2: c,
            },
            RawFacet {
                normal,
                p0: a,
                p1: c,
                p2: d,
            },
        ]
    };

    let mut facets = Vec::with_capacity(12);
    // z = 0 and z = s
    facets.extend(quad(
        v(0.0, 0.0, -1.0),
        v(0.0, 0.0, 0.0),
        v(0.0, s, 0.0),
        v(s, s, 0.0),
        v(s, 0.0, 0.0),
    ));
    facets.extend(quad(
        v(0.0, 0.0, 1.0),
        v(0.0, 0.0, s),
        v(s, 0.0, s),
        v(s, s, s),
        v(0.0, s, s),
    ));
    // x = 0 and x = s
    facets.extend(quad(
        v(-1.0, 0.0, 0.0),
        v(0.0, 0.0, 0.0),
        v(0.0, 0.0, s),
        v(0.0, s, s),
        v(0.0, s, 0.0),
    ));
    facets.extend(quad(
        v(1.0, 0.0, 0.0),
        v(s, 0.0, 0.0),
        v(s, s, 0.0),
        v(s, s, s),
        v(s, 0.0, s),
    ));
    // y = 0 and y = s
    facets.extend(quad(
        v(0.0, -1.0, 0.0),
        v(0.0, 0.0, 0.0),
        v(s, 0.0, 0.0),
        v(s, 0.0, s),
        v(0.0, 0.0, s),
    ));
    facets.extend(quad(
        v(0.0, 1.0, 0.0),
        v(0.0, s, 0.0),
        v(0.0, s, s),
        v(s, s, s),
        v(s, s, 0.0),
    ));
    facets
}

/// A closed cube mesh, for tests that need real geometry.
pub fn cube<M: TriangleMesh>(size: f32) -> M {
    M::from_facets(cube_facets(size))
}

/// The same cube encoded as an in-memory binary STL file: 80 byte
/// header, facet count, then 50 bytes per facet.
pub fn cube_stl_bytes(size: f32) -> Vec<u8> {
    let facets = cube_facets(size);
    let mut bytes = Vec::with_capacity(84 + facets.len() * 50);
    bytes.extend_from_slice(&[0u8; 80]);
    bytes.write_u32::<LittleEndian>(facets.len() as u32).unwrap();
    for f in &facets {
        for p in [f.normal, f.p0, f.p1, f.p2] {
            bytes.write_f32::<LittleEndian>(p.x).unwrap();
            bytes.write_f32::<LittleEndian>(p.y).unwrap();
            bytes.write_f32::<LittleEndian>(p.z).unwrap();
        }
        bytes.write_u16::<LittleEndian>(0).unwrap();
    }
    bytes
}
