use mcg_core::{InputEvent, InputKind};

use crate::surface::ImageRef;

/// Capabilities the game needs from its host environment.
///
/// One implementation is chosen by the integration layer before the game
/// starts. Errors are human-readable messages; the game wraps them with the
/// resource that failed.
pub trait Host {
    fn fetch_text(&mut self, url: &str) -> Result<String, String>;

    /// Load an image and report its natural size.
    fn load_image(&mut self, name: &str, url: &str) -> Result<ImageRef, String>;

    /// Block until the next frame is due. Returns `false` once the host is
    /// shutting down and no further frames will be served.
    fn request_next_frame(&mut self) -> bool;

    fn bind_input(&mut self, kind: InputKind);

    fn unbind_input(&mut self, kind: InputKind);

    /// Normalized events for bound kinds received since the previous call.
    fn poll_input(&mut self) -> Vec<InputEvent>;
}
