//! Fixtures shared by the unit tests of this crate.

use std::collections::{HashMap, HashSet, VecDeque};

use mcg_core::{InputEvent, InputKind, Size};
use mcg_platform::{Host, ImageRef, RecordingSurface};

use crate::atlas::SpriteAtlas;
use crate::callbacks::DeferredQueue;
use crate::context::{Callback, Command, GameContext};

/// Owned backing storage for a [`GameContext`].
pub(crate) struct TestBench {
    pub surface: RecordingSurface,
    pub atlas: SpriteAtlas,
    pub callbacks: DeferredQueue<Callback>,
    pub commands: VecDeque<Command>,
}

impl TestBench {
    pub fn new(canvas: Size) -> Self {
        Self {
            surface: RecordingSurface::new(),
            atlas: SpriteAtlas::new(canvas),
            callbacks: DeferredQueue::new(),
            commands: VecDeque::new(),
        }
    }

    pub fn context(&mut self, frame: u64) -> GameContext<'_> {
        GameContext::new(
            frame,
            &mut self.surface,
            &mut self.atlas,
            &mut self.callbacks,
            &mut self.commands,
        )
    }
}

/// In-memory host: images and texts by url, a fixed frame budget and input
/// queued per frame.
#[derive(Default)]
pub(crate) struct StubHost {
    pub images: HashMap<String, (u32, u32)>,
    pub texts: HashMap<String, String>,
    pub frame_budget: u64,
    pub frames_served: u64,
    pub bound: HashSet<InputKind>,
    pub input: VecDeque<(u64, InputEvent)>,
    pub loaded: Vec<String>,
}

impl StubHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, url: &str, width: u32, height: u32) -> Self {
        self.images.insert(url.to_string(), (width, height));
        self
    }

    pub fn with_text(mut self, url: &str, text: &str) -> Self {
        self.texts.insert(url.to_string(), text.to_string());
        self
    }

    pub fn with_frames(mut self, frames: u64) -> Self {
        self.frame_budget = frames;
        self
    }

    pub fn with_input(mut self, frame: u64, event: InputEvent) -> Self {
        self.input.push_back((frame, event));
        self
    }
}

impl Host for StubHost {
    fn fetch_text(&mut self, url: &str) -> Result<String, String> {
        self.texts
            .get(url)
            .cloned()
            .ok_or_else(|| format!("no text at {url}"))
    }

    fn load_image(&mut self, name: &str, url: &str) -> Result<ImageRef, String> {
        let (width, height) = self
            .images
            .get(url)
            .copied()
            .ok_or_else(|| format!("no image at {url}"))?;
        self.loaded.push(name.to_string());
        Ok(ImageRef::new(name, width, height))
    }

    fn request_next_frame(&mut self) -> bool {
        if self.frames_served >= self.frame_budget {
            return false;
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
        while let Some(&(frame, event)) = self.input.front() {
            if frame > self.frames_served {
                break;
            }
            self.input.pop_front();
            if self.bound.contains(&event.kind) {
                events.push(event);
            }
        }
        events
    }
}
