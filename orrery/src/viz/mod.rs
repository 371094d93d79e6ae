pub mod camera;
pub mod input;
pub mod sink;

pub use camera::{Camera, MoveDirection, PitchPolicy};
pub use input::{InputMode, InputState};
pub use sink::{CameraMatrices, InstanceData, MeshKind, RenderSink};
