//! The frame scheduler: owns every registry and drives the active scene once
//! per host frame.

use std::collections::{HashMap, VecDeque};

use mcg_core::{InputEvent, InputKind, RunMode, Size};
use mcg_devtools::{DebugOverlay, OverlayStats};
use mcg_platform::{Host, ImageRef, PlatformConfig, Surface};

use crate::atlas::SpriteAtlas;
use crate::callbacks::DeferredQueue;
use crate::context::{Callback, Command, GameContext};
use crate::error::GameError;
use crate::loader::{self, ResourceDescriptor};
use crate::registry::ActorRegistry;
use crate::scene::Scene;

/// Scene entered by [`Game::start`].
pub const START_SCENE: &str = "start";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Loading,
    Running,
    Paused,
}

pub struct Game<S: Surface> {
    mode: RunMode,
    frame: u64,
    state: LoopState,
    surface: S,
    atlas: SpriteAtlas,
    images: HashMap<String, ImageRef>,
    actors: ActorRegistry,
    scenes: HashMap<String, Box<dyn Scene>>,
    active: Option<String>,
    callbacks: DeferredQueue<Callback>,
    commands: VecDeque<Command>,
    overlay: DebugOverlay,
}

impl<S: Surface> Game<S> {
    pub fn new(config: &PlatformConfig, surface: S) -> Self {
        let canvas = config.canvas_size();
        log::info!(
            "Canvas {}x{} (requested {}x{}), mode {}",
            canvas.w,
            canvas.h,
            config.width,
            config.height,
            config.mode
        );
        Self {
            mode: config.mode,
            frame: 0,
            state: LoopState::Uninitialized,
            surface,
            atlas: SpriteAtlas::new(canvas),
            images: HashMap::new(),
            actors: ActorRegistry::new(),
            scenes: HashMap::new(),
            active: None,
            callbacks: DeferredQueue::new(),
            commands: VecDeque::new(),
            overlay: DebugOverlay::for_mode(config.mode),
        }
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Frames produced so far. Paused ticks do not count.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn canvas(&self) -> Size {
        self.atlas.canvas()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn atlas(&self) -> &SpriteAtlas {
        &self.atlas
    }

    pub fn atlas_mut(&mut self) -> &mut SpriteAtlas {
        &mut self.atlas
    }

    /// A loaded image by resource name.
    pub fn image(&self, name: &str) -> Option<&ImageRef> {
        self.images.get(name)
    }

    pub fn actors(&self) -> &ActorRegistry {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut ActorRegistry {
        &mut self.actors
    }

    pub fn overlay_mut(&mut self) -> &mut DebugOverlay {
        &mut self.overlay
    }

    pub fn active_scene(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Register `scene` under its own name. An existing scene with that name
    /// is replaced.
    pub fn register_scene(&mut self, scene: impl Scene + 'static) {
        let name = scene.name().to_string();
        if self.scenes.insert(name.clone(), Box::new(scene)).is_some() {
            log::warn!("Scene '{}' registered twice; keeping the newer one", name);
        }
    }

    pub fn has_scene(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    /// Make `name` the active scene and run its `enter`. Loop control queued
    /// by `enter` is applied before returning.
    pub fn enter(&mut self, name: &str) -> Result<(), GameError> {
        self.enter_scene(name)?;
        self.apply_commands()
    }

    /// Run `callback` `frames` ticks after the current frame.
    pub fn schedule<F>(&mut self, frames: u64, callback: F) -> u64
    where
        F: FnOnce(&mut GameContext<'_>, &mut ActorRegistry) -> Result<(), GameError> + 'static,
    {
        self.callbacks.schedule(self.frame, frames, Box::new(callback))
    }

    pub fn pending_callbacks(&self) -> usize {
        self.callbacks.len()
    }

    pub fn pause(&mut self) {
        if self.state == LoopState::Running {
            self.state = LoopState::Paused;
            log::info!("Paused at frame {}", self.frame);
        }
    }

    pub fn resume(&mut self) {
        if self.state == LoopState::Paused {
            self.state = LoopState::Running;
            log::info!("Resumed at frame {}", self.frame);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state == LoopState::Paused
    }

    /// Load every image resource into the atlas. On failure the game returns
    /// to `Uninitialized`; sprites registered before the failure are kept.
    pub fn load_resources(
        &mut self,
        host: &mut dyn Host,
        list: &[ResourceDescriptor],
    ) -> Result<usize, GameError> {
        self.state = LoopState::Loading;
        let loaded = loader::load_resources(
            host,
            list,
            &mut self.atlas,
            &mut self.images,
            &mut self.surface,
        );
        if loaded.is_err() {
            self.state = LoopState::Uninitialized;
        }
        loaded
    }

    /// Enter the start scene, bind every input kind and begin running.
    pub fn start(&mut self, host: &mut dyn Host) -> Result<(), GameError> {
        let previous = self.state;
        self.state = LoopState::Running;
        if let Err(err) = self.enter(START_SCENE) {
            self.state = previous;
            return Err(err);
        }
        for &kind in InputKind::ALL {
            host.bind_input(kind);
        }
        log::info!(
            "Game started with {} scenes and {} actor keys",
            self.scenes.len(),
            self.actors.len()
        );
        Ok(())
    }

    /// Load resources, let `setup` create actors and scenes, then start.
    pub fn init<F>(
        &mut self,
        host: &mut dyn Host,
        resources: &[ResourceDescriptor],
        setup: F,
    ) -> Result<(), GameError>
    where
        F: FnOnce(&mut Self) -> Result<(), GameError>,
    {
        self.load_resources(host, resources)?;
        setup(self)?;
        self.start(host)
    }

    /// Produce one frame: clear, update and render the active scene, run due
    /// callbacks, draw the debug overlay, then apply queued loop control.
    ///
    /// Does nothing unless running. An error aborts the rest of the frame;
    /// callbacks that were due then run on the next frame.
    pub fn tick(&mut self) -> Result<(), GameError> {
        if self.state != LoopState::Running {
            return Ok(());
        }
        self.frame += 1;
        self.surface.clear_rect(self.atlas.canvas().as_rect());

        self.with_active_scene(|scene, ctx, actors| {
            scene.update(ctx, actors)?;
            scene.render(ctx, actors)
        })?;
        self.run_due_callbacks()?;
        self.draw_overlay();
        self.apply_commands()
    }

    /// Route `event` to the active scene. Input is delivered while paused so
    /// a scene can resume on a click.
    pub fn dispatch_input(&mut self, event: &InputEvent) -> Result<(), GameError> {
        if !matches!(self.state, LoopState::Running | LoopState::Paused) {
            log::trace!("Ignoring {} before start", event.kind);
            return Ok(());
        }
        self.with_active_scene(|scene, ctx, actors| scene.on_input(event, ctx, actors))?;
        self.apply_commands()
    }

    /// Drive the game until the host stops serving frames. Failed frames are
    /// logged and the loop carries on. Returns the number of frames served.
    pub fn run(&mut self, host: &mut dyn Host) -> u64 {
        let mut served = 0;
        while host.request_next_frame() {
            served += 1;
            for event in host.poll_input() {
                if let Err(err) = self.dispatch_input(&event) {
                    log::error!("{} input at frame {} failed: {err}", event.kind, self.frame);
                }
            }
            if let Err(err) = self.tick() {
                log::error!("Frame {} failed: {err}", self.frame);
            }
        }
        log::info!("Host stopped after {served} frames (game frame {})", self.frame);
        served
    }

    fn enter_scene(&mut self, name: &str) -> Result<(), GameError> {
        if name.is_empty() || !self.scenes.contains_key(name) {
            return Err(GameError::SceneNotFound {
                name: name.to_string(),
            });
        }
        self.active = Some(name.to_string());
        log::info!("Entering scene '{}' at frame {}", name, self.frame);
        self.with_active_scene(|scene, ctx, actors| scene.enter(ctx, actors))
    }

    /// Apply queued loop control in order. Commands queued while applying
    /// (by a scene's `enter`) are applied in the same pass. On error the
    /// remaining commands stay queued.
    fn apply_commands(&mut self) -> Result<(), GameError> {
        while let Some(command) = self.commands.pop_front() {
            match command {
                Command::Enter(name) => self.enter_scene(&name)?,
                Command::Pause => self.pause(),
                Command::Resume => self.resume(),
            }
        }
        Ok(())
    }

    fn run_due_callbacks(&mut self) -> Result<(), GameError> {
        loop {
            let due = self.callbacks.drain(self.frame);
            if due.is_empty() {
                return Ok(());
            }
            let mut ctx = GameContext::new(
                self.frame,
                &mut self.surface,
                &mut self.atlas,
                &mut self.callbacks,
                &mut self.commands,
            );
            let mut first_error = None;
            for callback in due {
                if let Err(err) = callback(&mut ctx, &mut self.actors) {
                    log::warn!("Callback at frame {} failed: {err}", ctx.frame);
                    first_error.get_or_insert(err);
                }
            }
            if let Some(err) = first_error {
                return Err(err);
            }
        }
    }

    fn draw_overlay(&mut self) {
        if !self.overlay.visible {
            return;
        }
        let stats = OverlayStats {
            frame: self.frame,
            scene_name: self.active.as_deref(),
        };
        self.surface.save();
        self.overlay.draw(&mut self.surface, &stats);
        self.surface.restore();
    }

    fn with_active_scene<F>(&mut self, f: F) -> Result<(), GameError>
    where
        F: FnOnce(
            &mut dyn Scene,
            &mut GameContext<'_>,
            &mut ActorRegistry,
        ) -> Result<(), GameError>,
    {
        let Some(name) = self.active.as_deref() else {
            return Ok(());
        };
        let Some(scene) = self.scenes.get_mut(name) else {
            return Ok(());
        };
        let mut ctx = GameContext::new(
            self.frame,
            &mut self.surface,
            &mut self.atlas,
            &mut self.callbacks,
            &mut self.commands,
        );
        f(scene.as_mut(), &mut ctx, &mut self.actors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Actor, ActorBody};
    use crate::scene::SceneRoster;
    use crate::testing::StubHost;
    use mcg_platform::{DrawOp, RecordingSurface};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Trace = Rc<RefCell<Vec<String>>>;

    /// Actor that notes its lifecycle and asks for a scene change on click.
    struct Bird {
        body: ActorBody,
        trace: Trace,
        click_target: Option<&'static str>,
    }

    impl Bird {
        fn new(trace: &Trace) -> Self {
            Self {
                body: ActorBody::new(Some((34.0, 24.0))),
                trace: trace.clone(),
                click_target: None,
            }
        }
    }

    impl Actor for Bird {
        fn body(&self) -> &ActorBody {
            &self.body
        }

        fn body_mut(&mut self) -> &mut ActorBody {
            &mut self.body
        }

        fn update(&mut self, ctx: &mut GameContext<'_>) -> Result<(), GameError> {
            self.body.y += 1.0;
            self.trace.borrow_mut().push(format!("update@{}", ctx.frame));
            Ok(())
        }

        fn render(&mut self, ctx: &mut GameContext<'_>) -> Result<(), GameError> {
            self.trace.borrow_mut().push(format!("render@{}", ctx.frame));
            Ok(())
        }

        fn on_click(
            &mut self,
            _x: f32,
            _y: f32,
            ctx: &mut GameContext<'_>,
        ) -> Result<(), GameError> {
            if let Some(target) = self.click_target {
                ctx.enter(target);
            }
            Ok(())
        }
    }

    /// Actor that draws a sprite nobody registered.
    struct Ghost {
        body: ActorBody,
    }

    impl Actor for Ghost {
        fn body(&self) -> &ActorBody {
            &self.body
        }

        fn body_mut(&mut self) -> &mut ActorBody {
            &mut self.body
        }

        fn render(&mut self, ctx: &mut GameContext<'_>) -> Result<(), GameError> {
            ctx.draw_sprite("ghost", self.body.x, self.body.y)
        }
    }

    struct Stage {
        roster: SceneRoster,
        trace: Trace,
        pause_on_enter: bool,
    }

    impl Stage {
        fn new(name: &str, actors: &[&str], trace: &Trace) -> Self {
            Self {
                roster: SceneRoster::new(name).with_actors(actors),
                trace: trace.clone(),
                pause_on_enter: false,
            }
        }
    }

    impl Scene for Stage {
        fn roster(&self) -> &SceneRoster {
            &self.roster
        }

        fn roster_mut(&mut self) -> &mut SceneRoster {
            &mut self.roster
        }

        fn enter(
            &mut self,
            ctx: &mut GameContext<'_>,
            _actors: &mut ActorRegistry,
        ) -> Result<(), GameError> {
            self.trace
                .borrow_mut()
                .push(format!("enter:{}", self.roster.name()));
            if self.pause_on_enter {
                ctx.pause();
            }
            Ok(())
        }
    }

    fn config(mode: RunMode) -> PlatformConfig {
        PlatformConfig {
            width: 320,
            height: 480,
            mode,
            ..PlatformConfig::default()
        }
    }

    fn running_game(trace: &Trace, mode: RunMode) -> Game<RecordingSurface> {
        let mut game = Game::new(&config(mode), RecordingSurface::new());
        game.actors_mut().insert_single("bird", Bird::new(trace));
        game.register_scene(Stage::new(START_SCENE, &["bird"], trace));
        game.register_scene(Stage::new("over", &[], trace));
        game.start(&mut StubHost::new()).expect("start scene exists");
        game
    }

    #[test]
    fn canvas_is_clamped_from_config() {
        let config = PlatformConfig {
            width: 500,
            height: 300,
            width_range: Some([320, 414]),
            height_range: Some([320, 900]),
            ..PlatformConfig::default()
        };
        let game = Game::new(&config, RecordingSurface::new());
        assert_eq!(game.canvas(), Size::new(414, 320));
        assert_eq!(game.state(), LoopState::Uninitialized);
        assert_eq!(game.frame(), 0);
    }

    #[test]
    fn unknown_or_empty_scene_keeps_active_scene() {
        let trace = Trace::default();
        let mut game = running_game(&trace, RunMode::Production);

        for name in ["", "missing"] {
            let err = game.enter(name).expect_err("unregistered scene should fail");
            assert_eq!(
                err,
                GameError::SceneNotFound {
                    name: name.to_string()
                }
            );
            assert_eq!(game.active_scene(), Some(START_SCENE));
        }
    }

    #[test]
    fn start_enters_start_scene_and_binds_input() {
        let trace = Trace::default();
        let mut host = StubHost::new();
        let mut game = Game::new(&config(RunMode::Production), RecordingSurface::new());
        game.register_scene(Stage::new(START_SCENE, &[], &trace));

        game.start(&mut host).expect("start scene exists");
        assert_eq!(game.state(), LoopState::Running);
        assert_eq!(game.active_scene(), Some(START_SCENE));
        assert_eq!(*trace.borrow(), vec!["enter:start"]);
        for kind in InputKind::ALL {
            assert!(host.bound.contains(kind), "{kind} should be bound");
        }
    }

    #[test]
    fn start_without_start_scene_fails() {
        let mut host = StubHost::new();
        let mut game = Game::new(&config(RunMode::Production), RecordingSurface::new());
        let err = game.start(&mut host).expect_err("no start scene");
        assert!(matches!(err, GameError::SceneNotFound { .. }));
        assert_eq!(game.state(), LoopState::Uninitialized);
        assert!(host.bound.is_empty());
    }

    #[test]
    fn tick_updates_then_renders_active_scene() {
        let trace = Trace::default();
        let mut game = running_game(&trace, RunMode::Production);
        trace.borrow_mut().clear();

        game.tick().expect("tick succeeds");
        game.tick().expect("tick succeeds");
        assert_eq!(game.frame(), 2);
        assert_eq!(
            *trace.borrow(),
            vec!["update@1", "render@1", "update@2", "render@2"]
        );
        assert!(matches!(game.surface().ops()[0], DrawOp::Clear(_)));
    }

    #[test]
    fn tick_before_start_does_nothing() {
        let mut game = Game::new(&config(RunMode::Development), RecordingSurface::new());
        game.tick().expect("idle tick succeeds");
        assert_eq!(game.frame(), 0);
        assert!(game.surface().ops().is_empty());
    }

    #[test]
    fn pause_freezes_frame_counter() {
        let trace = Trace::default();
        let mut game = running_game(&trace, RunMode::Production);
        game.tick().expect("tick succeeds");

        game.pause();
        assert!(game.is_paused());
        for _ in 0..5 {
            game.tick().expect("paused tick succeeds");
        }
        assert_eq!(game.frame(), 1);

        game.resume();
        game.tick().expect("tick succeeds");
        assert_eq!(game.frame(), 2);
    }

    #[test]
    fn scheduled_callbacks_fire_on_their_frame_in_order() {
        let trace = Trace::default();
        let mut game = running_game(&trace, RunMode::Production);
        let fired: Trace = Rc::default();

        for label in ["a", "b"] {
            let fired = fired.clone();
            game.schedule(2, move |ctx, _| {
                fired.borrow_mut().push(format!("{label}@{}", ctx.frame));
                Ok(())
            });
        }
        game.tick().expect("tick succeeds");
        assert!(fired.borrow().is_empty());
        game.tick().expect("tick succeeds");
        assert_eq!(*fired.borrow(), vec!["a@2", "b@2"]);
        assert_eq!(game.pending_callbacks(), 0);
    }

    #[test]
    fn zero_delay_from_callback_fires_in_same_tick() {
        let trace = Trace::default();
        let mut game = running_game(&trace, RunMode::Production);
        let fired: Trace = Rc::default();

        let outer = fired.clone();
        game.schedule(1, move |ctx, _| {
            outer.borrow_mut().push(format!("outer@{}", ctx.frame));
            let inner = outer.clone();
            ctx.schedule(0, move |ctx, _| {
                inner.borrow_mut().push(format!("inner@{}", ctx.frame));
                Ok(())
            });
            Ok(())
        });

        game.tick().expect("tick succeeds");
        assert_eq!(*fired.borrow(), vec!["outer@1", "inner@1"]);
    }

    #[test]
    fn callbacks_can_reach_actors() {
        let trace = Trace::default();
        let mut game = running_game(&trace, RunMode::Production);
        game.schedule(1, |_, actors| {
            let slot = actors.get_mut("bird").expect("bird registered");
            slot.for_each_mut(|bird| {
                bird.body_mut().x = 99.0;
                Ok(())
            })
        });
        game.tick().expect("tick succeeds");

        let mut x = 0.0;
        game.actors_mut()
            .get_mut("bird")
            .expect("bird registered")
            .for_each_mut(|bird| {
                x = bird.body().x;
                Ok(())
            })
            .expect("visit succeeds");
        assert_eq!(x, 99.0);
    }

    #[test]
    fn click_queues_scene_change_applied_after_dispatch() {
        let trace = Trace::default();
        let mut game = Game::new(&config(RunMode::Production), RecordingSurface::new());
        let mut bird = Bird::new(&trace);
        bird.click_target = Some("over");
        game.actors_mut().insert_single("bird", bird);
        game.register_scene(Stage::new(START_SCENE, &["bird"], &trace));
        game.register_scene(Stage::new("over", &[], &trace));
        game.start(&mut StubHost::new()).expect("start scene exists");

        game.dispatch_input(&InputEvent::new(InputKind::Click, 10.0, 10.0))
            .expect("click succeeds");
        assert_eq!(game.active_scene(), Some("over"));
        assert_eq!(*trace.borrow(), vec!["enter:start", "enter:over"]);
    }

    #[test]
    fn input_reaches_scene_while_paused() {
        let trace = Trace::default();
        let mut game = Game::new(&config(RunMode::Production), RecordingSurface::new());
        let mut bird = Bird::new(&trace);
        bird.click_target = Some("over");
        game.actors_mut().insert_single("bird", bird);
        game.register_scene(Stage::new(START_SCENE, &["bird"], &trace));
        game.register_scene(Stage::new("over", &[], &trace));
        game.start(&mut StubHost::new()).expect("start scene exists");

        game.pause();
        game.dispatch_input(&InputEvent::new(InputKind::Click, 1.0, 1.0))
            .expect("click succeeds");
        assert_eq!(game.active_scene(), Some("over"));
        assert!(game.is_paused());
    }

    #[test]
    fn scene_can_pause_on_enter() {
        let trace = Trace::default();
        let mut game = running_game(&trace, RunMode::Production);
        let mut paused = Stage::new("menu", &[], &trace);
        paused.pause_on_enter = true;
        game.register_scene(paused);

        game.enter("menu").expect("menu registered");
        assert!(game.is_paused());
    }

    #[test]
    fn overlay_shows_frame_and_scene_in_development() {
        let trace = Trace::default();
        let mut game = running_game(&trace, RunMode::Development);
        game.tick().expect("tick succeeds");
        game.tick().expect("tick succeeds");
        assert_eq!(
            game.surface().texts(),
            vec!["Fno: 1", "Scene: start", "Fno: 2", "Scene: start"]
        );
        assert_eq!(game.surface().style().font, "10px sans-serif");

        game.overlay_mut().toggle();
        game.surface_mut().take_ops();
        game.tick().expect("tick succeeds");
        assert!(game.surface().texts().is_empty());
    }

    #[test]
    fn init_loads_sets_up_and_starts() {
        let trace = Trace::default();
        let mut host = StubHost::new()
            .with_image("sheet.png", 64, 32)
            .with_text("sheet.txt", "bird 0 0 34 24");
        let resources = vec![ResourceDescriptor::image("sheet", "sheet.png").with_map("sheet.txt")];
        let mut game = Game::new(&config(RunMode::Production), RecordingSurface::new());

        game.init(&mut host, &resources, |game| {
            assert!(game.atlas().contains("bird"), "setup runs after loading");
            game.register_scene(Stage::new(START_SCENE, &[], &trace));
            Ok(())
        })
        .expect("init succeeds");

        assert_eq!(game.state(), LoopState::Running);
        assert!(game.image("sheet").is_some());
    }

    #[test]
    fn failed_load_leaves_game_uninitialized() {
        let mut host = StubHost::new();
        let resources = vec![ResourceDescriptor::image("sheet", "sheet.png")];
        let mut game = Game::new(&config(RunMode::Production), RecordingSurface::new());

        let err = game
            .init(&mut host, &resources, |_| panic!("setup must not run"))
            .expect_err("missing image should fail");
        assert!(matches!(err, GameError::ResourceLoad { .. }));
        assert_eq!(game.state(), LoopState::Uninitialized);
    }

    #[test]
    fn run_serves_every_frame_and_delivers_input() {
        let trace = Trace::default();
        let mut game = Game::new(&config(RunMode::Production), RecordingSurface::new());
        let mut bird = Bird::new(&trace);
        bird.click_target = Some("over");
        game.actors_mut().insert_single("bird", bird);
        game.register_scene(Stage::new(START_SCENE, &["bird"], &trace));
        game.register_scene(Stage::new("over", &[], &trace));

        let mut host = StubHost::new()
            .with_frames(4)
            .with_input(2, InputEvent::new(InputKind::Click, 5.0, 5.0));
        game.start(&mut host).expect("start scene exists");

        assert_eq!(game.run(&mut host), 4);
        assert_eq!(game.frame(), 4);
        assert_eq!(game.active_scene(), Some("over"));
        let updates = trace
            .borrow()
            .iter()
            .filter(|entry| entry.starts_with("update"))
            .count();
        assert_eq!(updates, 1, "the bird only updates before the click");
    }

    #[test]
    fn run_keeps_going_after_failed_frames() {
        let mut game = Game::new(&config(RunMode::Production), RecordingSurface::new());
        game.actors_mut().insert_single(
            "ghost",
            Ghost {
                body: ActorBody::new(None),
            },
        );
        let trace = Trace::default();
        game.register_scene(Stage::new(START_SCENE, &["ghost"], &trace));
        let mut host = StubHost::new().with_frames(3);
        game.start(&mut host).expect("start scene exists");

        assert_eq!(game.run(&mut host), 3);
        assert_eq!(game.frame(), 3);
    }

    #[test]
    fn run_serves_frames_while_paused_without_advancing() {
        let trace = Trace::default();
        let mut game = running_game(&trace, RunMode::Production);
        game.tick().expect("tick succeeds");
        game.pause();
        let fired: Trace = Rc::default();
        let hit = fired.clone();
        game.schedule(1, move |_, _| {
            hit.borrow_mut().push("fired".to_string());
            Ok(())
        });

        let mut host = StubHost::new().with_frames(5);
        assert_eq!(game.run(&mut host), 5);
        assert_eq!(game.frame(), 1);
        assert!(game.is_paused());
        assert!(fired.borrow().is_empty());
        assert_eq!(game.pending_callbacks(), 1);
    }

    #[test]
    fn callbacks_due_on_failed_frame_fire_on_next_frame() {
        let mut game = Game::new(&config(RunMode::Production), RecordingSurface::new());
        game.actors_mut().insert_single(
            "ghost",
            Ghost {
                body: ActorBody::new(None),
            },
        );
        let trace = Trace::default();
        game.register_scene(Stage::new(START_SCENE, &["ghost"], &trace));
        game.start(&mut StubHost::new()).expect("start scene exists");

        let fired: Trace = Rc::default();
        for label in ["a", "b"] {
            let fired = fired.clone();
            game.schedule(1, move |ctx, _| {
                fired.borrow_mut().push(format!("{label}@{}", ctx.frame));
                Ok(())
            });
        }

        let err = game.tick().expect_err("ghost sprite is missing");
        assert!(matches!(err, GameError::SpriteNotFound(_)));
        assert!(fired.borrow().is_empty());
        assert_eq!(game.pending_callbacks(), 2);

        game.actors_mut().remove("ghost");
        game.tick().expect("tick succeeds");
        assert_eq!(*fired.borrow(), vec!["a@2", "b@2"]);
        assert_eq!(game.pending_callbacks(), 0);
    }
}
