use glam::Mat4;

/// The two shared geometries every frame draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Sun,
    Particle,
}

/// Per-instance payload, laid out for direct upload to a vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
}

impl InstanceData {
    pub fn new(model: Mat4, tint: [f32; 3]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            tint: [tint[0], tint[1], tint[2], 1.0],
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrices {
    pub view: Mat4,
    pub projection: Mat4,
}

impl CameraMatrices {
    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Where a frame's draw calls go.
pub trait RenderSink {
    /// Width over height of the target, used for the projection.
    fn aspect_ratio(&self) -> f32;

    /// Starts a frame: clears the target and sets the camera for what follows.
    fn begin_frame(&mut self, camera: &CameraMatrices);

    fn draw_mesh(&mut self, mesh: MeshKind, instance: InstanceData);
}
