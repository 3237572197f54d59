//! One simulation tick of active play
//!
//! Scrolls the terrain by the ball's horizontal speed, integrates the ball,
//! then settles scoring. Rendering happens afterwards in `game`.

use super::contact::{ContactRule, Throttle};
use super::state::{GameOverReason, World};
use crate::consts::SCORE_LINE_Y;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Accelerate held (boost instead of coast)
    pub accelerate: bool,
}

/// What a tick did, for the state machine and logs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Columns the terrain scrolled (also the score gained before truncation)
    pub scroll: f32,
    pub contact: Option<ContactRule>,
    /// The ball crossed the score line going up
    pub bonus: bool,
    pub game_over: Option<GameOverReason>,
}

/// Advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput) -> TickReport {
    let throttle = Throttle::from_input(input.accelerate);
    let scroll = world.body.vel.x;
    world.terrain.advance(scroll);

    let prev_y = world.body.pos.y;
    let step = world.body.step(world.terrain.current(), throttle);

    let line = SCORE_LINE_Y as f32;
    let bonus = prev_y > line && world.body.pos.y < line;
    if bonus {
        world.score.award_bonus();
        log::debug!("Bonus awarded, score now {}", world.score.points);
    }
    world.score.accrue(scroll);

    if !world.body.visible() {
        let center = world.body.screen_center();
        world.indicator.update(center.y, world.body.radius);
    }

    let game_over = if step.launched {
        Some(GameOverReason::Crashed)
    } else if world.score.is_saturated() {
        Some(GameOverReason::ScoreCapped)
    } else {
        None
    };

    TickReport {
        scroll,
        contact: step.contact,
        bonus,
        game_over,
    }
}
