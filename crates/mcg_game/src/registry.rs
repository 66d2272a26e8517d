use std::collections::HashMap;

use crate::actor::Actor;
use crate::error::GameError;

/// One registry entry: a lone actor or an ordered group sharing a key.
pub enum ActorSlot {
    Single(Box<dyn Actor>),
    Group(Vec<Box<dyn Actor>>),
}

impl ActorSlot {
    pub fn single(actor: impl Actor + 'static) -> Self {
        Self::Single(Box::new(actor))
    }

    pub fn group(actors: Vec<Box<dyn Actor>>) -> Self {
        Self::Group(actors)
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Group(actors) => actors.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every actor in order, stopping at the first error.
    pub fn for_each_mut<F>(&mut self, mut f: F) -> Result<(), GameError>
    where
        F: FnMut(&mut dyn Actor) -> Result<(), GameError>,
    {
        match self {
            Self::Single(actor) => f(actor.as_mut()),
            Self::Group(actors) => actors.iter_mut().try_for_each(|actor| f(actor.as_mut())),
        }
    }
}

impl std::fmt::Debug for ActorSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(_) => f.write_str("Single"),
            Self::Group(actors) => write!(f, "Group({})", actors.len()),
        }
    }
}

/// Actors by key. Scenes resolve their keys here on every pass, so an
/// actor registered or removed mid-game is picked up on the next tick.
#[derive(Debug, Default)]
pub struct ActorRegistry {
    slots: HashMap<String, ActorSlot>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `slot` under `key`, returning whatever it replaced. Actors are
    /// stored as given; use [`spawn`](crate::spawn) to reset them first.
    pub fn insert(&mut self, key: &str, slot: ActorSlot) -> Option<ActorSlot> {
        let previous = self.slots.insert(key.to_string(), slot);
        if previous.is_some() {
            log::debug!("Replaced actor slot '{}'", key);
        }
        previous
    }

    pub fn insert_single(&mut self, key: &str, actor: impl Actor + 'static) -> Option<ActorSlot> {
        self.insert(key, ActorSlot::single(actor))
    }

    pub fn insert_group(&mut self, key: &str, actors: Vec<Box<dyn Actor>>) -> Option<ActorSlot> {
        self.insert(key, ActorSlot::group(actors))
    }

    /// Append to the group under `key`. A missing key starts a new group; a
    /// single actor becomes the first member of the group.
    pub fn push_to_group(&mut self, key: &str, actor: Box<dyn Actor>) {
        let slot = self
            .slots
            .remove(key)
            .unwrap_or_else(|| ActorSlot::Group(Vec::new()));
        let group = match slot {
            ActorSlot::Single(first) => vec![first, actor],
            ActorSlot::Group(mut actors) => {
                actors.push(actor);
                actors
            }
        };
        self.slots.insert(key.to_string(), ActorSlot::Group(group));
    }

    pub fn get(&self, key: &str) -> Option<&ActorSlot> {
        self.slots.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ActorSlot> {
        self.slots.get_mut(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ActorSlot> {
        self.slots.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = self.slots.keys().map(String::as_str).collect::<Vec<_>>();
        keys.sort_unstable();
        keys
    }
}
