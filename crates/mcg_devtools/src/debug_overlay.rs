//! Debug overlay drawn on top of the scene at the end of every tick.
//!
//! It identifies where the loop is (frame number and active scene) and nothing
//! else; errors are reported through the log, never on the canvas.

use mcg_core::RunMode;
use mcg_platform::Surface;

pub const OVERLAY_FONT: &str = "20px serif";
pub const OVERLAY_FILL: &str = "black";

#[derive(Debug, Clone, Default)]
pub struct OverlayStats<'a> {
    pub frame: u64,
    /// Name of the active scene, if one has been entered.
    pub scene_name: Option<&'a str>,
}

pub struct DebugOverlay {
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    pub fn for_mode(mode: RunMode) -> Self {
        Self::new(mode.shows_debug_overlay())
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug overlay: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn draw(&self, surface: &mut dyn Surface, stats: &OverlayStats<'_>) {
        if !self.visible {
            return;
        }
        surface.set_font(OVERLAY_FONT);
        surface.set_fill_style(OVERLAY_FILL);
        surface.fill_text(&format!("Fno: {}", stats.frame), 5.0, 20.0);
        surface.fill_text(
            &format!("Scene: {}", stats.scene_name.unwrap_or("-")),
            5.0,
            40.0,
        );
    }
}
