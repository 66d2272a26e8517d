//! Normalized pointer input.
//!
//! Hosts translate whatever their platform produces (mouse clicks, touch
//! lists, mini-program tap events) into a single `InputEvent { kind, x, y }`.
//! The game only ever sees that shape and routes it by `kind` to the matching
//! actor handler.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Click,
    Press,
    Release,
    Move,
}

impl InputKind {
    pub const ALL: &'static [InputKind] = &[
        InputKind::Click,
        InputKind::Press,
        InputKind::Release,
        InputKind::Move,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Press => "press",
            Self::Release => "release",
            Self::Move => "move",
        }
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub kind: InputKind,
    pub x: f32,
    pub y: f32,
}

impl InputEvent {
    pub fn new(kind: InputKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }

    /// Build an event from a raw pointer sample, preferring touch data.
    pub fn from_pointer(
        kind: InputKind,
        changed_touches: &[(f32, f32)],
        client: Option<(f32, f32)>,
    ) -> Option<Self> {
        resolve_pointer(changed_touches, client).map(|(x, y)| Self::new(kind, x, y))
    }
}

/// Pick the coordinate of an interaction: the first changed touch when the
/// platform reported any, otherwise the mouse client position.
pub fn resolve_pointer(
    changed_touches: &[(f32, f32)],
    client: Option<(f32, f32)>,
) -> Option<(f32, f32)> {
    changed_touches.first().copied().or(client)
}
