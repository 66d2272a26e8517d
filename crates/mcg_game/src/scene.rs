//! Scenes own an ordered roster of actor keys and drive those actors.

use mcg_core::InputEvent;

use crate::actor::Actor;
use crate::context::GameContext;
use crate::error::GameError;
use crate::registry::ActorRegistry;

/// A scene's name plus the actor keys it drives, in order.
///
/// Keys are looked up in the registry on every pass. A key with no actor is
/// skipped; the same key may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRoster {
    name: String,
    actors: Vec<String>,
}

impl SceneRoster {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            actors: Vec::new(),
        }
    }

    pub fn with_actors(mut self, keys: &[&str]) -> Self {
        self.actors.extend(keys.iter().map(|key| key.to_string()));
        self
    }

    pub fn push(&mut self, key: &str) {
        self.actors.push(key.to_string());
    }

    pub fn keys(&self) -> &[String] {
        &self.actors
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn update(
        &self,
        ctx: &mut GameContext<'_>,
        actors: &mut ActorRegistry,
    ) -> Result<(), GameError> {
        self.for_each_actor(actors, |actor| actor.update(ctx))
    }

    pub fn render(
        &self,
        ctx: &mut GameContext<'_>,
        actors: &mut ActorRegistry,
    ) -> Result<(), GameError> {
        self.for_each_actor(actors, |actor| actor.render(ctx))
    }

    /// Hand `event` to every rostered actor. Actors without a handler for
    /// the event's kind ignore it.
    pub fn dispatch_input(
        &self,
        event: &InputEvent,
        ctx: &mut GameContext<'_>,
        actors: &mut ActorRegistry,
    ) -> Result<(), GameError> {
        self.for_each_actor(actors, |actor| actor.handle_input(event, ctx))
    }

    fn for_each_actor<F>(&self, actors: &mut ActorRegistry, mut f: F) -> Result<(), GameError>
    where
        F: FnMut(&mut dyn Actor) -> Result<(), GameError>,
    {
        for key in &self.actors {
            match actors.get_mut(key) {
                Some(slot) => slot.for_each_mut(&mut f)?,
                None => log::trace!("Scene '{}' skipped missing actor '{}'", self.name, key),
            }
        }
        Ok(())
    }
}

/// A named phase of the game.
///
/// `enter` runs every time the game switches to the scene and usually
/// resets actors or rebuilds the roster. The remaining hooks default to
/// driving the roster.
pub trait Scene {
    fn roster(&self) -> &SceneRoster;

    fn roster_mut(&mut self) -> &mut SceneRoster;

    fn name(&self) -> &str {
        self.roster().name()
    }

    fn enter(
        &mut self,
        ctx: &mut GameContext<'_>,
        actors: &mut ActorRegistry,
    ) -> Result<(), GameError>;

    fn update(
        &mut self,
        ctx: &mut GameContext<'_>,
        actors: &mut ActorRegistry,
    ) -> Result<(), GameError> {
        self.roster().update(ctx, actors)
    }

    fn render(
        &mut self,
        ctx: &mut GameContext<'_>,
        actors: &mut ActorRegistry,
    ) -> Result<(), GameError> {
        self.roster().render(ctx, actors)
    }

    fn on_input(
        &mut self,
        event: &InputEvent,
        ctx: &mut GameContext<'_>,
        actors: &mut ActorRegistry,
    ) -> Result<(), GameError> {
        self.roster().dispatch_input(event, ctx, actors)
    }
}
