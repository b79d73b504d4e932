use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to register global input hook: {0}")]
    HookRegistration(String),
    #[error("input capture thread exited before the hook was live")]
    CaptureThreadExited,
    #[error("failed to query primary display geometry: {0}")]
    DisplayGeometry(String),
    #[error("unrecognized key: {0:?}")]
    UnrecognizedKey(rdev::Key),
    #[error("unrecognized mouse button: {0:?}")]
    UnrecognizedButton(rdev::Button),
    #[error("failed to load asset {}: {source}", path.display())]
    Asset {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("overlay window error: {0}")]
    Window(#[from] eframe::Error),
}
