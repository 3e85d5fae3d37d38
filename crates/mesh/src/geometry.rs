pub type Vector3 = cgmath::Vector3<f32>;

/// A coordinate axis. Slicing planes are perpendicular to one of these.
///
/// Per-axis bound lookups and component extraction go through this enum,
/// so each query is a match over three cases rather than a field access
/// keyed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component offset of this axis within a [`Vector3`].
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The unit vector along this axis.
    pub fn unit(self) -> Vector3 {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }

    /// The two axes spanning the plane perpendicular to this one,
    /// ordered so that (u, v, self) form a right-handed basis.
    pub fn plane(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::Z, Axis::X),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}

/// A facet as it appears in a triangle soup: a normal and three corner
/// points by value.
///
/// This is the exchange format between loaders and
/// [`TriangleMesh`](crate::TriangleMesh) implementations; meshes
/// re-index the corners into a shared point list.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct RawFacet {
    pub normal: Vector3,
    pub p0: Vector3,
    pub p1: Vector3,
    pub p2: Vector3,
}

impl std::default::Default for RawFacet {
    fn default() -> Self {
        let zero = Vector3::new(0.0, 0.0, 0.0);
        Self {
            normal: zero,
            p0: zero,
            p1: zero,
            p2: zero,
        }
    }
}
