// One error type for the whole sketch.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),
    /// Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),
    /// Opening/starting the camera failed
    #[error("Camera init error: {0}")]
    CameraInit(String),
    /// Grabbing/decoding a frame failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String),
    /// The capture worker thread could not be spawned
    #[error("Capture thread error: {0}")]
    CaptureThread(#[from] std::io::Error),
    /// A tuning value is out of range
    #[error("Invalid config: {0}")]
    Config(String),
    /// A second session was requested in the same process
    #[error("Trail synth already initialized")]
    AlreadyInitialized,
}
