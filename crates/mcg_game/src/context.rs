//! Per-call view of the game handed to scenes, actors and callbacks.

use std::collections::VecDeque;

use mcg_core::Size;
use mcg_platform::Surface;

use crate::atlas::SpriteAtlas;
use crate::callbacks::DeferredQueue;
use crate::error::GameError;
use crate::registry::ActorRegistry;

/// A deferred unit of work. It receives the context of the tick it fires in
/// and the actor registry, so it can look actors up by key.
pub type Callback =
    Box<dyn FnOnce(&mut GameContext<'_>, &mut ActorRegistry) -> Result<(), GameError>>;

/// Loop control requested during a step. The game applies commands in order
/// once the step that queued them has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Enter(String),
    Pause,
    Resume,
}

pub struct GameContext<'a> {
    /// Frame being produced; 0 before the first tick.
    pub frame: u64,
    pub canvas: Size,
    pub surface: &'a mut dyn Surface,
    pub atlas: &'a mut SpriteAtlas,
    callbacks: &'a mut DeferredQueue<Callback>,
    commands: &'a mut VecDeque<Command>,
}

impl<'a> GameContext<'a> {
    pub(crate) fn new(
        frame: u64,
        surface: &'a mut dyn Surface,
        atlas: &'a mut SpriteAtlas,
        callbacks: &'a mut DeferredQueue<Callback>,
        commands: &'a mut VecDeque<Command>,
    ) -> Self {
        Self {
            frame,
            canvas: atlas.canvas(),
            surface,
            atlas,
            callbacks,
            commands,
        }
    }

    /// Run `callback` `frames` ticks from now. Returns the absolute frame.
    pub fn schedule<F>(&mut self, frames: u64, callback: F) -> u64
    where
        F: FnOnce(&mut GameContext<'_>, &mut ActorRegistry) -> Result<(), GameError> + 'static,
    {
        self.callbacks.schedule(self.frame, frames, Box::new(callback))
    }

    pub fn enter(&mut self, scene: &str) {
        self.commands.push_back(Command::Enter(scene.to_string()));
    }

    pub fn pause(&mut self) {
        self.commands.push_back(Command::Pause);
    }

    pub fn resume(&mut self) {
        self.commands.push_back(Command::Resume);
    }

    /// Draw a sprite with its top-left corner at `(x, y)`, keeping the size of
    /// its previous placement.
    pub fn draw_sprite(&mut self, name: &str, x: f32, y: f32) -> Result<(), GameError> {
        let frame = self.atlas.place_at(name, x, y, None, None)?;
        self.surface.draw_image(&frame.image, frame.src, frame.dst);
        Ok(())
    }

    pub fn draw_sprite_sized(
        &mut self,
        name: &str,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    ) -> Result<(), GameError> {
        let frame = self.atlas.place_at(name, x, y, Some(w), Some(h))?;
        self.surface.draw_image(&frame.image, frame.src, frame.dst);
        Ok(())
    }

    /// Draw a sprite centered horizontally on the canvas at height `y`.
    pub fn draw_sprite_centered(&mut self, name: &str, y: f32) -> Result<(), GameError> {
        let frame = self.atlas.place_centered(name, y, None, None)?;
        self.surface.draw_image(&frame.image, frame.src, frame.dst);
        Ok(())
    }

    pub fn draw_sprite_full_screen(&mut self, name: &str) -> Result<(), GameError> {
        let frame = self.atlas.place_full_screen(name)?;
        self.surface.draw_image(&frame.image, frame.src, frame.dst);
        Ok(())
    }
}
