//! File-backed host without a window.
//!
//! URLs are resolved relative to a root directory, images are decoded with the
//! `image` crate, frames are paced with [`FramePacer`] at the fallback interval
//! (no vsync is observable here), and input comes from an [`InputScript`].

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use mcg_core::time::FramePacer;
use mcg_core::{InputEvent, InputKind};

use crate::host::Host;
use crate::script::InputScript;
use crate::surface::ImageRef;

pub struct HeadlessHost {
    root: PathBuf,
    pacer: Option<FramePacer>,
    max_frames: Option<u64>,
    frames_served: u64,
    bound: HashSet<InputKind>,
    scripted: VecDeque<(u64, InputEvent)>,
}

impl HeadlessHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pacer: Some(FramePacer::fallback()),
            max_frames: None,
            frames_served: 0,
            bound: HashSet::new(),
            scripted: VecDeque::new(),
        }
    }

    /// Serve frames back to back without sleeping.
    pub fn unpaced(mut self) -> Self {
        self.pacer = None;
        self
    }

    /// Stop serving frames after `frames`.
    pub fn with_frame_budget(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn with_script(mut self, script: &InputScript) -> Self {
        self.scripted = script.expanded_events().into();
        self
    }

    /// Queue an event for delivery on `frame` (1-based, as served).
    pub fn push_input(&mut self, frame: u64, event: InputEvent) {
        let index = self
            .scripted
            .iter()
            .position(|(at, _)| *at > frame)
            .unwrap_or(self.scripted.len());
        self.scripted.insert(index, (frame, event));
    }

    pub fn frames_served(&self) -> u64 {
        self.frames_served
    }

    pub fn is_bound(&self, kind: InputKind) -> bool {
        self.bound.contains(&kind)
    }

    pub fn smoothed_fps(&self) -> Option<f64> {
        self.pacer.as_ref().map(|pacer| pacer.smoothed_fps)
    }

    fn resolve(&self, url: &str) -> PathBuf {
        let path = Path::new(url);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Host for HeadlessHost {
    fn fetch_text(&mut self, url: &str) -> Result<String, String> {
        let path = self.resolve(url);
        fs::read_to_string(&path).map_err(|e| format!("Failed to read {}: {e}", path.display()))
    }

    fn load_image(&mut self, name: &str, url: &str) -> Result<ImageRef, String> {
        let path = self.resolve(url);
        let pixels = image::open(&path)
            .map_err(|e| format!("Failed to open '{}': {e}", path.display()))?
            .to_rgba8();
        log::debug!(
            "Loaded image '{}' ({}x{}) from {}",
            name,
            pixels.width(),
            pixels.height(),
            path.display()
        );
        Ok(ImageRef::with_pixels(name, pixels))
    }

    fn request_next_frame(&mut self) -> bool {
        if self.max_frames.is_some_and(|max| self.frames_served >= max) {
            return false;
        }
        if let Some(pacer) = self.pacer.as_mut() {
            let wait = pacer.time_until_next(Instant::now());
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
            pacer.mark_frame(Instant::now());
        }
        self.frames_served += 1;
        true
    }

    fn bind_input(&mut self, kind: InputKind) {
        self.bound.insert(kind);
    }

    fn unbind_input(&mut self, kind: InputKind) {
        self.bound.remove(&kind);
    }

    fn poll_input(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Some(&(frame, event)) = self.scripted.front() {
            if frame > self.frames_served {
                break;
            }
            self.scripted.pop_front();
            if self.bound.contains(&event.kind) {
                events.push(event);
            } else {
                log::trace!("Dropping unbound {} event at frame {}", event.kind, frame);
            }
        }
        events
    }
}
