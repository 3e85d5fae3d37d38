use julienne_mesh::Axis;

/// Parameters for slicing a mesh into layers.
#[derive(Debug, Clone, Copy)]
pub struct SlicerConfig {
    /// Distance between successive cutting planes.
    pub layer_height: f32,
    /// The axis the cutting planes are perpendicular to.
    pub axis: Axis,
}

impl Default for SlicerConfig {
    fn default() -> Self {
        Self {
            layer_height: 0.2,
            axis: Axis::Z,
        }
    }
}
