use anyhow::Context;
use byteorder::{LittleEndian, ReadBytesExt};
use julienne_mesh::{RawFacet, TriangleMesh, Vector3};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

fn read_vector<T: Read>(f: &mut T) -> std::io::Result<Vector3> {
    Ok(Vector3 {
        x: f.read_f32::<LittleEndian>()?,
        y: f.read_f32::<LittleEndian>()?,
        z: f.read_f32::<LittleEndian>()?,
    })
}

fn read_binary<M: TriangleMesh, T: Read + Seek>(f: &mut T) -> anyhow::Result<M> {
    // Binary files start with an 80 byte header. There is no defined
    // structure for this header but some implementations stash metadata
    // in it, so it is skipped rather than validated.
    f.seek(SeekFrom::Start(80))?;

    // Immediately following the header is an unsigned 32-bit integer
    // carrying the number of facets that follow.
    let n_facets = f.read_u32::<LittleEndian>()? as usize;

    let mut facets = Vec::<RawFacet>::with_capacity(n_facets);
    for i in 0..n_facets {
        // Each facet is a normal vector followed by its 3 vertices. The
        // normal may be zeroed, with the vertices listed in
        // counter-clockwise order instead; the mesh derives it from the
        // winding in that case.
        let normal = read_vector(f).with_context(|| format!("truncated facet {i}"))?;
        let p0 = read_vector(f)?;
        let p1 = read_vector(f)?;
        let p2 = read_vector(f)?;
        // A 2-byte "attribute byte count" trails the geometry. Some
        // applications use it for color data; nothing here does.
        let _attribute_byte_count = f.read_u16::<LittleEndian>()?;
        facets.push(RawFacet { normal, p0, p1, p2 });
    }
    Ok(M::from_facets(facets))
}

pub fn read_stl<M: TriangleMesh, P: AsRef<Path>>(p: P) -> anyhow::Result<M> {
    let mut f = std::fs::File::open(p.as_ref())
        .with_context(|| format!("failed to open {}", p.as_ref().display()))?;
    read_binary(&mut f)
}

pub fn parse_stl<M: TriangleMesh>(data: &[u8]) -> anyhow::Result<M> {
    let mut c = std::io::Cursor::new(data);
    read_binary(&mut c)
}
