//! Host integration seams.
//!
//! The game core never inspects which platform it runs on. Everything it needs
//! from the outside world comes through two traits selected once at startup:
//! [`Surface`] for drawing and [`Host`] for text/image fetching, frame timing
//! and input binding. [`headless::HeadlessHost`] and
//! [`surface::RecordingSurface`] are the file-backed and in-memory
//! implementations used by the demo and by tests.

pub mod config;
pub mod headless;
pub mod host;
pub mod script;
pub mod surface;

pub use config::PlatformConfig;
pub use headless::HeadlessHost;
pub use host::Host;
pub use surface::{DrawOp, ImageRef, RecordingSurface, Surface, TextAlign};
