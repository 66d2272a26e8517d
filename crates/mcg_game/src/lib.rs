//! Frame-driven 2D game runtime: a loop that ticks the active scene, a sprite
//! atlas for sheet-backed drawing, frame-delayed callbacks and the actor and
//! scene model they operate on.

pub mod actor;
pub mod atlas;
pub mod callbacks;
pub mod context;
pub mod error;
pub mod game;
pub mod loader;
pub mod registry;
pub mod scene;

#[cfg(test)]
mod testing;

pub use actor::{spawn, Actor, ActorBody};
pub use atlas::{SpriteAtlas, SpriteFrame};
pub use callbacks::DeferredQueue;
pub use context::{Callback, Command, GameContext};
pub use error::GameError;
pub use game::{Game, LoopState, START_SCENE};
pub use loader::{load_resource_list_from_path, ResourceDescriptor};
pub use registry::{ActorRegistry, ActorSlot};
pub use scene::{Scene, SceneRoster};
