//! Scripted input for headless runs.
//!
//! A script lists pointer events against the frame on which the host should
//! deliver them, so demo and test runs replay the same interaction every time.

use mcg_core::{InputEvent, InputKind};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct InputScript {
    pub events: Vec<ScriptedEvent>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScriptedEvent {
    pub frame: u64,
    pub kind: InputKind,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    /// Deliver the event again on each of the following `repeat - 1` frames.
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl InputScript {
    /// Flatten into `(frame, event)` pairs ordered by frame; events sharing a
    /// frame keep script order.
    pub fn expanded_events(&self) -> Vec<(u64, InputEvent)> {
        let mut out = Vec::new();
        for scripted in &self.events {
            for offset in 0..u64::from(scripted.repeat.max(1)) {
                out.push((
                    scripted.frame.saturating_add(offset),
                    InputEvent::new(scripted.kind, scripted.x, scripted.y),
                ));
            }
        }
        out.sort_by_key(|(frame, _)| *frame);
        out
    }
}

pub fn load_input_script_from_path(path: &Path) -> Result<InputScript, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let script: InputScript = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse input script JSON {}: {e}", path.display()))?;
    validate_input_script(&script)?;
    Ok(script)
}

fn validate_input_script(script: &InputScript) -> Result<(), String> {
    if script.events.is_empty() {
        return Err("Input script validation failed: events list is empty".to_string());
    }
    for (index, event) in script.events.iter().enumerate() {
        if event.repeat == 0 {
            return Err(format!(
                "Input script validation failed: event {index} has repeat 0"
            ));
        }
        if !event.x.is_finite() || !event.y.is_finite() {
            return Err(format!(
                "Input script validation failed: event {index} has a non-finite coordinate"
            ));
        }
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}
