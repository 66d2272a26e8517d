//! Actors: the things a scene updates, renders and routes input to.

use mcg_core::{InputEvent, InputKind, Rect, Size};

use crate::context::GameContext;
use crate::error::GameError;

/// Position and size shared by every actor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActorBody {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ActorBody {
    /// Body at the origin. Without a size the actor is expected to set one in
    /// `reset` or when it first renders.
    pub fn new(size: Option<(f32, f32)>) -> Self {
        let (w, h) = size.unwrap_or((0.0, 0.0));
        Self {
            x: 0.0,
            y: 0.0,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        self.rect().overlaps(&Rect::new(x, y, w, h))
    }

    /// Strictly inside; points on the border are outside.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.rect().contains_point(x, y)
    }

    /// Whether the body has left the playing field. A body may hang fully
    /// off the left edge before it counts, but crossing the right or bottom
    /// edge with its top-left corner, or the top edge at all, is enough.
    pub fn is_off_field(&self, canvas: Size) -> bool {
        self.x < -self.w
            || (canvas.w as f32) < self.x
            || (canvas.h as f32) < self.y
            || self.y < 0.0
    }
}

/// Behaviour attached to an [`ActorBody`].
///
/// `render` is the only required behaviour. Input handlers default to doing
/// nothing, which is how an actor opts out of an input kind.
///
/// Construct actors through [`spawn`] so `reset` runs once before first use.
/// Registering an actor in an [`ActorRegistry`](crate::ActorRegistry) does
/// not reset it.
pub trait Actor {
    fn body(&self) -> &ActorBody;

    fn body_mut(&mut self) -> &mut ActorBody;

    /// Restore initial state. Called once by [`spawn`] and again whenever the
    /// game wants a fresh round.
    fn reset(&mut self) {}

    fn update(&mut self, _ctx: &mut GameContext<'_>) -> Result<(), GameError> {
        Ok(())
    }

    fn render(&mut self, ctx: &mut GameContext<'_>) -> Result<(), GameError>;

    fn on_click(&mut self, _x: f32, _y: f32, _ctx: &mut GameContext<'_>) -> Result<(), GameError> {
        Ok(())
    }

    fn on_press(&mut self, _x: f32, _y: f32, _ctx: &mut GameContext<'_>) -> Result<(), GameError> {
        Ok(())
    }

    fn on_release(
        &mut self,
        _x: f32,
        _y: f32,
        _ctx: &mut GameContext<'_>,
    ) -> Result<(), GameError> {
        Ok(())
    }

    fn on_move(&mut self, _x: f32, _y: f32, _ctx: &mut GameContext<'_>) -> Result<(), GameError> {
        Ok(())
    }

    fn bounds_overlap(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        self.body().overlaps(x, y, w, h)
    }

    fn contains_point(&self, x: f32, y: f32) -> bool {
        self.body().contains_point(x, y)
    }

    fn is_off_field(&self, canvas: Size) -> bool {
        self.body().is_off_field(canvas)
    }

    fn handle_input(
        &mut self,
        event: &InputEvent,
        ctx: &mut GameContext<'_>,
    ) -> Result<(), GameError> {
        let (x, y) = (event.x, event.y);
        match event.kind {
            InputKind::Click => self.on_click(x, y, ctx),
            InputKind::Press => self.on_press(x, y, ctx),
            InputKind::Release => self.on_release(x, y, ctx),
            InputKind::Move => self.on_move(x, y, ctx),
        }
    }
}

/// Finish constructing an actor by running its `reset` once.
pub fn spawn<A: Actor>(mut actor: A) -> A {
    actor.reset();
    actor
}
