mod config;
mod contour;
mod measure;
mod slicer;

pub use config::SlicerConfig;
pub use contour::{Contour, Polygon, Segments};
pub use measure::{enclosed_volume, surface_area};
pub use slicer::{slice_mesh, OrderedVec2, SegmentMap, SlicedMesh};
