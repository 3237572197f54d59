//! Start / Playing / GameOver state machine
//!
//! Owns the world and drives one displayed frame per [`Game::tick`]: read the
//! switches and the button, erase what the back buffer held two ticks ago,
//! simulate, draw, report the score, then block on the buffer swap.

use serde::{Deserialize, Serialize};

use crate::color::{Rgb565, ball_color};
use crate::consts::RESTART_GATE_FRAMES;
use crate::platform::{BufferId, ColorSelect, Display, Input, ScoreDisplay};
use crate::renderer::scene::{self, RESTART_PROMPT, START_PROMPT};
use crate::renderer::{Canvas, Ink};
use crate::sim::{
    self, Body, GameOverReason, Indicator, Phase, Preview, ScoreState, TerrainWindow, TickInput,
    World,
};

/// The hardware a game runs against, borrowed for one tick
pub struct Peripherals<'a> {
    pub display: &'a mut dyn Display,
    pub input: &'a mut dyn Input,
    pub color_select: &'a mut dyn ColorSelect,
    pub score_display: &'a mut dyn ScoreDisplay,
}

/// Button state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Currently held (drives the throttle)
    pub held: bool,
    /// Went down since the previous poll (drives screen transitions)
    pub pressed: bool,
}

/// Turns the level-triggered button into press edges
#[derive(Debug, Clone, Copy, Default)]
pub struct InputLatch {
    was_held: bool,
}

impl InputLatch {
    pub fn poll(&mut self, held: bool) -> ButtonState {
        let pressed = held && !self.was_held;
        self.was_held = held;
        ButtonState { held, pressed }
    }
}

/// Serializable summary of a running game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ticks: u64,
    pub phase: Phase,
    pub game_over_reason: Option<GameOverReason>,
    pub game_over_frames: u32,
    pub terrain_seed: u64,
    pub scroll_offset: f32,
    pub body: Body,
    pub indicator: Indicator,
    pub score: ScoreState,
    pub window: TerrainWindow,
}

pub struct Game {
    phase: Phase,
    world: World,
    preview: Preview,
    latch: InputLatch,
    game_over_frames: u32,
    game_over_reason: Option<GameOverReason>,
    ticks: u64,
}

impl Game {
    /// A game on its start screen. `seed` fixes every terrain this game will generate.
    pub fn new(seed: u64) -> Self {
        Self {
            phase: Phase::Start,
            world: World::new(seed),
            preview: Preview::new(),
            latch: InputLatch::default(),
            game_over_frames: 0,
            game_over_reason: None,
            ticks: 0,
        }
    }

    /// Point the display at a known buffer and paint the sky into both
    pub fn power_on(&mut self, display: &mut dyn Display) {
        display.set_back_buffer(BufferId::Primary);
        Canvas::new(display).fill_background();
        display.swap_buffers();
        display.set_back_buffer(BufferId::Secondary);
        Canvas::new(display).fill_background();
        log::info!("Display initialised, terrain seed {}", self.world.terrain.seed());
    }

    /// Run one frame. Returns the phase after the frame.
    pub fn tick(&mut self, io: &mut Peripherals) -> Phase {
        let color = ball_color(io.color_select.switches());
        let button = self.latch.poll(io.input.accelerate());

        match self.phase {
            Phase::Start => self.start_frame(io.display, button, color),
            Phase::Playing => self.play_frame(io.display, button, color),
            Phase::GameOver => self.game_over_frame(io.display, button, color),
        }

        io.score_display.show(self.world.score.points);
        io.display.swap_buffers();
        self.ticks += 1;
        self.phase
    }

    fn start_frame(&mut self, display: &mut dyn Display, button: ButtonState, color: Rgb565) {
        let preview = &mut self.preview;
        preview.body.color = color;
        {
            let mut canvas = Canvas::new(display);
            let radius = preview.body.radius;
            if let Some(center) = preview.body.footprints.two_ago() {
                scene::ball(&mut canvas, center, radius, Ink::Background);
            }
            scene::terrain_full(&mut canvas, &preview.window);
            scene::title(&mut canvas);
            scene::prompt(&mut canvas, START_PROMPT);
            let center = preview.body.screen_center();
            scene::ball(&mut canvas, center, radius, color.into());
            preview.body.footprints.record(Some(center));
        }
        preview.step();

        if button.pressed {
            log::info!("Start -> Playing (terrain seed {})", self.world.terrain.seed());
            self.phase = Phase::Playing;
            Self::clear_both_buffers(display);
        }
    }

    fn play_frame(&mut self, display: &mut dyn Display, button: ButtonState, color: Rgb565) {
        let world = &mut self.world;
        world.body.color = color;
        let mut canvas = Canvas::new(display);

        // Erase this buffer's frame from two ticks ago
        scene::erase_score(&mut canvas);
        if let Some(center) = world.body.footprints.two_ago() {
            scene::ball(&mut canvas, center, world.body.radius, Ink::Background);
        }
        if let Some(size) = world.indicator.footprints.two_ago() {
            scene::arrow(&mut canvas, world.indicator.tip, size, Ink::Background);
        }
        if world.score.bonus.take_clear() {
            scene::erase_bonus(&mut canvas);
        }

        let report = sim::tick(world, &TickInput { accelerate: button.held });

        let terrain = &world.terrain;
        scene::terrain_delta(&mut canvas, terrain.current(), terrain.two_ticks_ago());
        scene::terrain_under_ball(&mut canvas, terrain.current());
        scene::score_line(&mut canvas);
        scene::score_readout(&mut canvas, world.score.points);

        if world.body.visible() {
            let center = world.body.screen_center();
            scene::ball(&mut canvas, center, world.body.radius, color.into());
            world.body.footprints.record(Some(center));
            world.indicator.footprints.record(None);
        } else {
            let arrow = &mut world.indicator;
            scene::arrow(&mut canvas, arrow.tip, arrow.size, arrow.color.into());
            arrow.footprints.record(Some(arrow.size));
            world.body.footprints.record(None);
        }

        if world.score.bonus.overlay_step() {
            scene::bonus(&mut canvas);
        }

        if let Some(reason) = report.game_over {
            log::info!(
                "Playing -> GameOver ({:?}) with score {}",
                reason,
                self.world.score.points
            );
            self.phase = Phase::GameOver;
            self.game_over_reason = Some(reason);
            self.game_over_frames = 0;
        }
    }

    fn game_over_frame(&mut self, display: &mut dyn Display, button: ButtonState, color: Rgb565) {
        self.world.body.color = color;
        {
            let mut canvas = Canvas::new(display);
            scene::redraw(&mut canvas, &self.world);
            scene::game_over_banner(&mut canvas);
            if self.game_over_frames % 2 == 1 {
                scene::prompt(&mut canvas, RESTART_PROMPT);
            }
        }
        self.game_over_frames += 1;

        if button.pressed && self.game_over_frames >= RESTART_GATE_FRAMES {
            self.world.reset();
            log::info!(
                "GameOver -> Playing (terrain seed {})",
                self.world.terrain.seed()
            );
            self.phase = Phase::Playing;
            self.game_over_reason = None;
            self.game_over_frames = 0;
            Self::clear_both_buffers(display);
        }
    }

    /// Sky into the back buffer, present it, sky into the other one
    fn clear_both_buffers(display: &mut dyn Display) {
        Canvas::new(display).fill_background();
        display.swap_buffers();
        Canvas::new(display).fill_background();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for scripted scenarios
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn game_over_frames(&self) -> u32 {
        self.game_over_frames
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    /// Frames run since construction
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ticks: self.ticks,
            phase: self.phase,
            game_over_reason: self.game_over_reason,
            game_over_frames: self.game_over_frames,
            terrain_seed: self.world.terrain.seed(),
            scroll_offset: self.world.terrain.offset(),
            body: self.world.body.clone(),
            indicator: self.world.indicator.clone(),
            score: self.world.score,
            window: self.world.terrain.current().clone(),
        }
    }
}
