pub mod attachment;
pub mod camera;

pub use attachment::AttachmentLoader;
pub use camera::{CameraBackend, CameraError, CameraSession, CaptureStream, Facing, NoCameraBackend};
