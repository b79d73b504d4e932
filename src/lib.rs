//! This crate draws a transparent, always-on-top overlay that mirrors live keyboard and mouse
//! activity: pressed keys light up on a small keyboard, the mouse image follows button and wheel
//! use, and an arrow points from the screen center toward the cursor.
//!
//! [`InputCapture`] installs the global hooks on a background thread and hands normalized
//! [`InputEvent`]s to the UI thread through [`InputEvents`], which the UI drains every frame into
//! an [`OverlayState`]. [`InputEvents`] also implements [`Stream`](futures::Stream), so the
//! pipeline can be consumed without a window.
//!
//! # Example
//!
//! Print every recognized event to stdout. Installing the hooks may require accessibility
//! permissions (macOS) or an X11 session (Linux).
//!
//! ```no_run
//! use futures::StreamExt;
//! use input_overlay::{InputCapture, OverlayError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), OverlayError> {
//!     let (_capture, mut events) = InputCapture::start()?;
//!
//!     while let Some(ev) = events.next().await {
//!         println!("[{}] {}", ev.ts, ev.kind);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod app;
mod assets;
mod capture;
pub mod config;
mod error;
mod event;
pub mod layout;
pub mod logging;
mod overlay;
mod render;

pub use capture::{InputCapture, InputEvents};
pub use config::OverlayConfig;
pub use error::OverlayError;
pub use event::{InputEvent, InputKind, KeyToken, MouseButton, ScrollDirection};
pub use overlay::{arrow_angle, CursorPosition, MouseIcon, OverlayState, ScreenCenter, ScreenRect};

pub type OverlayResult<T> = Result<T, OverlayError>;
