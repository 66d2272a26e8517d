//! Headless demo: a three-scene coin game (start -> play -> over) driven by a
//! scripted input file and rendered into a PNG.
//!
//! Assets are generated on the fly into a temp directory: a sprite sheet with
//! its `name x y w h` manifest, a background image, the resource list and the
//! input script. The run then goes through the same path a real host would:
//! load resources, create actors and scenes, enter `start`, tick until the
//! frame budget is spent.
//!
//! Usage: `mcg_game [frames]`. Set `MCG_CONFIG` to a platform config JSON to
//! override the canvas size or run mode.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::{Rgba, RgbaImage};
use mcg_core::Size;
use mcg_game::{
    load_resource_list_from_path, spawn, Actor, ActorBody, ActorRegistry, Game, GameContext,
    GameError, Scene, SceneRoster, START_SCENE,
};
use mcg_platform::config::load_platform_config_from_path;
use mcg_platform::script::load_input_script_from_path;
use mcg_platform::{HeadlessHost, PlatformConfig};
use mcg_render::PixelSurface;

const DEFAULT_FRAMES: u64 = 240;
const PLAY_FRAMES: u64 = 150;
const COIN_COUNT: usize = 3;
const COIN_SPEED: f32 = 3.0;
const BUTTON_Y: f32 = 300.0;

/// (name, x, y, w, h, colour) for every sprite on the generated sheet.
const SHEET: &[(&str, u32, u32, u32, u32, [u8; 4])] = &[
    ("title", 0, 0, 160, 32, [40, 90, 200, 255]),
    ("button", 0, 33, 96, 24, [40, 170, 80, 255]),
    ("coin", 97, 33, 16, 16, [240, 200, 40, 255]),
    ("gameover", 0, 58, 160, 32, [200, 50, 50, 255]),
];

type Score = Rc<Cell<u32>>;

struct Backdrop {
    body: ActorBody,
}

impl Actor for Backdrop {
    fn body(&self) -> &ActorBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut ActorBody {
        &mut self.body
    }

    fn render(&mut self, ctx: &mut GameContext<'_>) -> Result<(), GameError> {
        ctx.draw_sprite_full_screen("bg")
    }
}

/// A centered sprite that optionally switches scene when clicked.
struct Banner {
    body: ActorBody,
    sprite: &'static str,
    y: f32,
    click_target: Option<&'static str>,
}

impl Banner {
    fn new(sprite: &'static str, size: (f32, f32), y: f32) -> Self {
        Self {
            body: ActorBody::new(Some(size)),
            sprite,
            y,
            click_target: None,
        }
    }

    fn on_click_enter(mut self, scene: &'static str) -> Self {
        self.click_target = Some(scene);
        self
    }
}

impl Actor for Banner {
    fn body(&self) -> &ActorBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut ActorBody {
        &mut self.body
    }

    fn render(&mut self, ctx: &mut GameContext<'_>) -> Result<(), GameError> {
        self.body.x = ((ctx.canvas.w as f32 - self.body.w) / 2.0).floor();
        self.body.y = self.y;
        ctx.draw_sprite_centered(self.sprite, self.y)
    }

    fn on_click(&mut self, x: f32, y: f32, ctx: &mut GameContext<'_>) -> Result<(), GameError> {
        if let Some(scene) = self.click_target {
            if self.contains_point(x, y) {
                ctx.enter(scene);
            }
        }
        Ok(())
    }
}

struct Coin {
    body: ActorBody,
    lane: usize,
    score: Score,
}

impl Coin {
    fn new(lane: usize, score: &Score) -> Self {
        spawn(Self {
            body: ActorBody::new(Some((16.0, 16.0))),
            lane,
            score: score.clone(),
        })
    }
}

impl Actor for Coin {
    fn body(&self) -> &ActorBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut ActorBody {
        &mut self.body
    }

    fn reset(&mut self) {
        self.body.x = 40.0 + self.lane as f32 * 100.0;
        self.body.y = self.lane as f32 * 40.0;
    }

    fn update(&mut self, ctx: &mut GameContext<'_>) -> Result<(), GameError> {
        self.body.y += COIN_SPEED;
        if self.is_off_field(ctx.canvas) {
            self.body.y = 0.0;
        }
        Ok(())
    }

    fn render(&mut self, ctx: &mut GameContext<'_>) -> Result<(), GameError> {
        ctx.draw_sprite("coin", self.body.x, self.body.y)
    }

    fn on_click(&mut self, x: f32, y: f32, _ctx: &mut GameContext<'_>) -> Result<(), GameError> {
        if self.contains_point(x, y) {
            self.score.set(self.score.get() + 1);
            log::info!("Coin {} caught, score {}", self.lane, self.score.get());
            self.body.y = 0.0;
        }
        Ok(())
    }
}

struct ScoreLabel {
    body: ActorBody,
    score: Score,
}

impl Actor for ScoreLabel {
    fn body(&self) -> &ActorBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut ActorBody {
        &mut self.body
    }

    fn render(&mut self, ctx: &mut GameContext<'_>) -> Result<(), GameError> {
        ctx.surface.save();
        ctx.surface.set_font("16px sans-serif");
        ctx.surface
            .fill_text(&format!("Score: {}", self.score.get()), self.body.x, self.body.y);
        ctx.surface.restore();
        Ok(())
    }
}

struct StartScene {
    roster: SceneRoster,
}

impl Scene for StartScene {
    fn roster(&self) -> &SceneRoster {
        &self.roster
    }

    fn roster_mut(&mut self) -> &mut SceneRoster {
        &mut self.roster
    }

    fn enter(
        &mut self,
        _ctx: &mut GameContext<'_>,
        _actors: &mut ActorRegistry,
    ) -> Result<(), GameError> {
        Ok(())
    }
}

/// Coins fall for a fixed number of frames, then the game is over.
struct PlayScene {
    roster: SceneRoster,
    score: Score,
}

impl Scene for PlayScene {
    fn roster(&self) -> &SceneRoster {
        &self.roster
    }

    fn roster_mut(&mut self) -> &mut SceneRoster {
        &mut self.roster
    }

    fn enter(
        &mut self,
        ctx: &mut GameContext<'_>,
        actors: &mut ActorRegistry,
    ) -> Result<(), GameError> {
        self.score.set(0);
        if let Some(coins) = actors.get_mut("coins") {
            coins.for_each_mut(|coin| {
                coin.reset();
                Ok(())
            })?;
        }
        let due = ctx.schedule(PLAY_FRAMES, |ctx, _| {
            ctx.enter("over");
            Ok(())
        });
        log::info!("Round started; ends at frame {due}");
        Ok(())
    }
}

struct OverScene {
    roster: SceneRoster,
    score: Score,
}

impl Scene for OverScene {
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
        log::info!("Game over at frame {} with score {}", ctx.frame, self.score.get());
        Ok(())
    }
}

fn setup(game: &mut Game<PixelSurface>, score: &Score) -> Result<(), GameError> {
    let canvas = game.canvas();
    let actors = game.actors_mut();
    actors.insert_single(
        "bg",
        spawn(Backdrop {
            body: ActorBody::new(Some((canvas.w as f32, canvas.h as f32))),
        }),
    );
    actors.insert_single("title", spawn(Banner::new("title", (160.0, 32.0), 80.0)));
    actors.insert_single(
        "start_button",
        spawn(Banner::new("button", (96.0, 24.0), BUTTON_Y).on_click_enter("play")),
    );
    actors.insert_single(
        "gameover",
        spawn(Banner::new("gameover", (160.0, 32.0), 80.0).on_click_enter(START_SCENE)),
    );
    for lane in 0..COIN_COUNT {
        actors.push_to_group("coins", Box::new(Coin::new(lane, score)));
    }
    let mut label = spawn(ScoreLabel {
        body: ActorBody::new(None),
        score: score.clone(),
    });
    label.body.x = 8.0;
    label.body.y = canvas.h as f32 - 12.0;
    actors.insert_single("score", label);

    game.register_scene(StartScene {
        roster: SceneRoster::new(START_SCENE).with_actors(&["bg", "title", "start_button"]),
    });
    game.register_scene(PlayScene {
        roster: SceneRoster::new("play").with_actors(&["bg", "coins", "score"]),
        score: score.clone(),
    });
    game.register_scene(OverScene {
        roster: SceneRoster::new("over").with_actors(&["bg", "gameover", "score"]),
        score: score.clone(),
    });
    Ok(())
}

fn write_png(image: &RgbaImage, path: &Path) -> Result<(), String> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| format!("Failed to write '{}': {e}", path.display()))
}

fn write_text(path: &Path, text: &str) -> Result<(), String> {
    fs::write(path, text).map_err(|e| format!("Failed to write '{}': {e}", path.display()))
}

/// Write the sheet, manifest, background, resource list and input script.
fn generate_assets(dir: &Path, canvas: Size) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|e| format!("Failed to create '{}': {e}", dir.display()))?;

    let mut sheet = RgbaImage::new(256, 128);
    let mut manifest = String::new();
    for &(name, x, y, w, h, colour) in SHEET {
        for py in y..y + h {
            for px in x..x + w {
                sheet.put_pixel(px, py, Rgba(colour));
            }
        }
        manifest.push_str(&format!("{name} {x} {y} {w} {h}\n"));
    }
    write_png(&sheet, &dir.join("sheet.png"))?;
    write_text(&dir.join("sheet.txt"), &manifest)?;
    write_png(
        &RgbaImage::from_pixel(4, 4, Rgba([230, 240, 250, 255])),
        &dir.join("bg.png"),
    )?;

    let resources = r#"[
  { "type": "image", "name": "sheet", "url": "sheet.png", "map": "sheet.txt" },
  { "type": "image", "name": "bg", "url": "bg.png" },
  { "type": "audio", "name": "theme", "url": "theme.ogg" }
]"#;
    write_text(&dir.join("resources.json"), resources)?;

    let button_x = canvas.w as f32 / 2.0;
    let button_y = BUTTON_Y + 12.0;
    let script = format!(
        r#"{{
  "events": [
    {{ "frame": 5, "kind": "click", "x": {button_x}, "y": {button_y} }},
    {{ "frame": 30, "kind": "click", "x": 48, "y": 83 }},
    {{ "frame": 40, "kind": "move", "x": 148, "y": 200, "repeat": 3 }},
    {{ "frame": 60, "kind": "click", "x": 148, "y": 203 }},
    {{ "frame": 200, "kind": "click", "x": {button_x}, "y": 96 }}
  ]
}}"#
    );
    write_text(&dir.join("input.json"), &script)
}

fn demo_dir() -> PathBuf {
    std::env::temp_dir().join(format!("mcg_demo_{}", std::process::id()))
}

fn run_demo(frames: u64) -> Result<PathBuf, String> {
    let config = match std::env::var_os("MCG_CONFIG") {
        Some(path) => load_platform_config_from_path(Path::new(&path))?,
        None => PlatformConfig::default(),
    };
    let canvas = config.canvas_size();
    let dir = demo_dir();
    generate_assets(&dir, canvas)?;
    log::info!("Demo assets written to {}", dir.display());

    let resources = load_resource_list_from_path(&dir.join("resources.json"))?;
    let script = load_input_script_from_path(&dir.join("input.json"))?;
    let mut host = HeadlessHost::new(&dir)
        .with_frame_budget(frames)
        .with_script(&script);

    let score = Score::default();
    let mut game = Game::new(&config, PixelSurface::new(canvas));
    game.init(&mut host, &resources, |game| setup(game, &score))
        .map_err(|e| format!("Failed to start demo: {e}"))?;

    let served = game.run(&mut host);
    log::info!(
        "Served {} frames, final scene {:?}, score {}, smoothed fps {:?}",
        served,
        game.active_scene(),
        score.get(),
        host.smoothed_fps()
    );

    let surface = game.into_surface();
    if surface.skipped_images() > 0 {
        log::warn!("{} draws had no pixel data", surface.skipped_images());
    }
    let out = dir.join("final_frame.png");
    surface.save_png(&out)?;
    Ok(out)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let frames = match std::env::args().nth(1) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(frames) => frames,
            Err(e) => {
                eprintln!("Invalid frame count '{raw}': {e}");
                eprintln!("Usage: mcg_game [frames]");
                std::process::exit(2);
            }
        },
        None => DEFAULT_FRAMES,
    };

    log::info!("mcg demo starting ({frames} frames)...");
    match run_demo(frames) {
        Ok(out) => log::info!("Final frame written to {}", out.display()),
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}
