mod bounds;
mod error;
mod face;
mod geometry;
mod vertex_index;

pub use bounds::*;
pub use error::*;
pub use face::*;
pub use geometry::*;
pub use vertex_index::*;

/// A reasonable default mesh to select for unopinionated consumers.
pub type DefaultMesh = VertexIndex;

pub trait TriangleMesh: Sized {
    /// Creates a TriangleMesh from a list of raw facets, e.g. as
    /// decoded from an STL file.
    ///
    /// # Arguments
    ///
    /// * `facets` - The facets of the mesh, corners by value.
    fn from_facets(facets: Vec<RawFacet>) -> Self;

    /// Returns the number of triangular facets that comprise this mesh.
    fn facet_count(&self) -> usize;

    /// Builds the queryable [`Face`] for every facet, bound to this
    /// mesh's shared point list.
    ///
    /// Fails if a stored facet references a point that does not exist.
    fn faces(&self) -> Result<Vec<Face<'_>>>;
}
