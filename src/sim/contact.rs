//! Ball/terrain contact response
//!
//! The tricky part of Dune Roll: when the ball touches the dunes its velocity
//! is re-expressed along the local slope. Which response applies is decided by
//! a small table keyed on the slope direction, the direction of travel and
//! whether the ball is coasting backward. The rules are tuned for feel, not
//! derived from a physical model.
//!
//! Screen rows grow downward, so a positive slope angle is a surface dropping
//! to the right (downhill) and a negative travel angle is upward motion.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use crate::consts::{MAX_SPEED, STALL_NUDGE_DX};

/// Throttle state for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Throttle {
    /// Accelerate input held
    Boost,
    /// Input released
    Coast,
}

impl Throttle {
    pub fn from_input(accelerate: bool) -> Self {
        if accelerate { Self::Boost } else { Self::Coast }
    }

    /// Acceleration applied this tick
    #[inline]
    pub fn acceleration(self) -> f32 {
        match self {
            Self::Boost => crate::consts::MAX_ACCELERATION,
            Self::Coast => crate::consts::MIN_ACCELERATION,
        }
    }
}

/// Direction of the terrain surface under the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slope {
    /// Negative angle: the surface climbs to the right
    Rising,
    Flat,
    /// Positive angle: the surface drops to the right
    Falling,
}

impl Slope {
    pub fn of(angle: f32) -> Self {
        if angle < 0.0 {
            Self::Rising
        } else if angle > 0.0 {
            Self::Falling
        } else {
            Self::Flat
        }
    }
}

/// Sign of the travel angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Travel {
    /// Negative travel angle
    Upward,
    /// Zero or positive travel angle
    Downward,
}

impl Travel {
    pub fn of(angle: f32) -> Self {
        if angle < 0.0 { Self::Upward } else { Self::Downward }
    }
}

/// Travel angle `atan(dy/dx)`, with a vertical asymptote at `dx == 0`
#[inline]
pub fn travel_angle(vel: Vec2) -> f32 {
    if vel.x == 0.0 {
        if vel.y < 0.0 { -FRAC_PI_2 } else { FRAC_PI_2 }
    } else {
        (vel.y / vel.x).atan()
    }
}

/// Lookup key for the response table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactKey {
    pub slope: Slope,
    pub travel: Travel,
    /// Moving left with the throttle at minimum
    pub coasting_backward: bool,
}

impl ContactKey {
    pub fn new(vel: Vec2, slope_angle: f32, throttle: Throttle) -> Self {
        Self {
            slope: Slope::of(slope_angle),
            travel: Travel::of(travel_angle(vel)),
            coasting_backward: vel.x < 0.0 && throttle == Throttle::Coast,
        }
    }
}

/// Velocity response to a terrain contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactRule {
    /// Coasting backward onto a rising surface: velocity untouched
    PassThrough,
    /// Falling surface, travelling level or down: roll along it, gaining the throttle
    RollDownhill,
    /// Rising surface, travelling up: roll along it
    RollUphill,
    /// Rising surface hit while travelling level or down: roll along it, and a
    /// steep enough approach above top speed launches the ball off the crest
    Crest,
    /// Flat surface: bounce and keep a minimum forward speed
    FlatBounce,
    /// Falling surface while travelling up: only vertical acceleration
    Coast,
}

impl ContactRule {
    /// The response table
    pub fn select(key: ContactKey) -> Self {
        match (key.slope, key.travel, key.coasting_backward) {
            (Slope::Rising, _, true) => Self::PassThrough,
            (Slope::Falling, Travel::Downward, _) => Self::RollDownhill,
            (Slope::Rising, Travel::Upward, false) => Self::RollUphill,
            (Slope::Rising, Travel::Downward, false) => Self::Crest,
            (Slope::Flat, _, _) => Self::FlatBounce,
            (Slope::Falling, Travel::Upward, _) => Self::Coast,
        }
    }

    /// Apply this rule to the incoming velocity
    pub fn apply(self, vel: Vec2, slope_angle: f32, accel: f32) -> ContactOutcome {
        let travel = travel_angle(vel);
        let speed = vel.length();

        match self {
            Self::PassThrough => ContactOutcome::keep(vel),
            Self::RollDownhill | Self::RollUphill => {
                ContactOutcome::keep(roll_along(speed, travel, slope_angle, accel))
            }
            Self::Crest => ContactOutcome {
                vel: roll_along(speed, travel, slope_angle, accel),
                launched: travel >= FRAC_PI_2 - slope_angle.abs() && speed > MAX_SPEED,
            },
            Self::FlatBounce => {
                let dy = -vel.y.trunc() + accel;
                let dx = if vel.x < 1.0 { accel } else { vel.x };
                ContactOutcome::keep(Vec2::new(dx, dy))
            }
            Self::Coast => ContactOutcome::keep(Vec2::new(vel.x, vel.y + accel)),
        }
    }

    /// Whether a stalled ball may be nudged backward after this rule.
    /// The uphill rules measure the slope flipped, so they never qualify.
    pub fn allows_stall_nudge(self) -> bool {
        !matches!(self, Self::RollUphill | Self::Crest)
    }
}

/// Outcome of a contact rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactOutcome {
    pub vel: Vec2,
    /// The ball left a crest too fast: the run is over
    pub launched: bool,
}

impl ContactOutcome {
    fn keep(vel: Vec2) -> Self {
        Self {
            vel,
            launched: false,
        }
    }
}

/// Project the incoming speed onto the slope tangent and add the throttle
#[inline]
fn roll_along(speed: f32, travel: f32, slope_angle: f32, accel: f32) -> Vec2 {
    let along = speed * (travel - slope_angle).cos() + accel;
    Vec2::new(along * slope_angle.cos(), along * slope_angle.sin())
}

/// Final clean-up after a rule: cap the speed, rebuild the velocity from the
/// travel angle, then nudge a stalled ball back down a rising slope.
///
/// The travel angle is an `atan`, so the rebuilt velocity always points
/// forward: leftward drift comes out of a contact as rightward motion.
pub fn settle(rule: ContactRule, vel: Vec2, slope_angle: f32) -> Vec2 {
    let speed = vel.length().min(MAX_SPEED);
    let travel = travel_angle(vel);
    let mut vel = Vec2::new(speed * travel.cos(), speed * travel.sin());
    if vel.x.trunc() == 0.0 && slope_angle < 0.0 && rule.allows_stall_nudge() {
        vel.x = STALL_NUDGE_DX;
    }
    vel
}

/// Select, apply and settle in one go
pub fn resolve(vel: Vec2, slope_angle: f32, throttle: Throttle) -> (ContactRule, ContactOutcome) {
    let rule = ContactRule::select(ContactKey::new(vel, slope_angle, throttle));
    let mut outcome = rule.apply(vel, slope_angle, throttle.acceleration());
    outcome.vel = settle(rule, outcome.vel, slope_angle);
    (rule, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_ACCELERATION, MIN_ACCELERATION};
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_4;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_travel_angle_vertical() {
        assert_eq!(travel_angle(Vec2::new(0.0, 3.0)), FRAC_PI_2);
        assert_eq!(travel_angle(Vec2::new(0.0, -3.0)), -FRAC_PI_2);
        assert_eq!(travel_angle(Vec2::ZERO), FRAC_PI_2);
        assert!((travel_angle(Vec2::new(2.0, 2.0)) - FRAC_PI_4).abs() < EPS);
        // atan, not atan2: leftward travel folds into (-90°, 90°)
        assert!((travel_angle(Vec2::new(-2.0, 2.0)) + FRAC_PI_4).abs() < EPS);
    }

    #[test]
    fn test_table_covers_documented_cases() {
        let key = |slope, travel, coasting_backward| ContactKey {
            slope,
            travel,
            coasting_backward,
        };
        use ContactRule::*;
        assert_eq!(ContactRule::select(key(Slope::Rising, Travel::Upward, true)), PassThrough);
        assert_eq!(ContactRule::select(key(Slope::Rising, Travel::Downward, true)), PassThrough);
        assert_eq!(ContactRule::select(key(Slope::Falling, Travel::Downward, false)), RollDownhill);
        assert_eq!(ContactRule::select(key(Slope::Falling, Travel::Downward, true)), RollDownhill);
        assert_eq!(ContactRule::select(key(Slope::Rising, Travel::Upward, false)), RollUphill);
        assert_eq!(ContactRule::select(key(Slope::Rising, Travel::Downward, false)), Crest);
        assert_eq!(ContactRule::select(key(Slope::Flat, Travel::Upward, true)), FlatBounce);
        assert_eq!(ContactRule::select(key(Slope::Flat, Travel::Downward, false)), FlatBounce);
        assert_eq!(ContactRule::select(key(Slope::Falling, Travel::Upward, false)), Coast);
        assert_eq!(ContactRule::select(key(Slope::Falling, Travel::Upward, true)), Coast);
    }

    #[test]
    fn test_backward_drift_only_passes_through_when_coasting() {
        let vel = Vec2::new(-2.0, 1.0);
        let coasting = ContactKey::new(vel, -0.3, Throttle::Coast);
        let boosting = ContactKey::new(vel, -0.3, Throttle::Boost);
        assert_eq!(ContactRule::select(coasting), ContactRule::PassThrough);
        assert_ne!(ContactRule::select(boosting), ContactRule::PassThrough);
    }

    #[test]
    fn test_pass_through_leaves_velocity() {
        let vel = Vec2::new(-3.0, 2.0);
        let res = ContactRule::PassThrough.apply(vel, -0.4, MIN_ACCELERATION);
        assert_eq!(res.vel, vel);
        assert!(!res.launched);
    }

    #[test]
    fn test_pass_through_turns_backward_drift_forward() {
        let (rule, res) = resolve(Vec2::new(-3.0, 2.0), -0.4, Throttle::Coast);
        assert_eq!(rule, ContactRule::PassThrough);
        assert!((res.vel - Vec2::new(3.0, -2.0)).length() < EPS);
    }

    #[test]
    fn test_coast_turns_backward_drift_forward() {
        let (rule, res) = resolve(Vec2::new(-3.0, 2.0), 0.3, Throttle::Coast);
        assert_eq!(rule, ContactRule::Coast);
        assert!((res.vel - Vec2::new(3.0, -3.0)).length() < EPS);
    }

    #[test]
    fn test_rest_on_flat_bounces_forward() {
        let (rule, res) = resolve(Vec2::ZERO, 0.0, Throttle::Coast);
        assert_eq!(rule, ContactRule::FlatBounce);
        assert!((res.vel.y - MIN_ACCELERATION).abs() < EPS);
        assert!(res.vel.x >= MIN_ACCELERATION - EPS);
    }

    #[test]
    fn test_flat_bounce_reflects_fall() {
        let res = ContactRule::FlatBounce.apply(Vec2::new(4.0, 6.7), 0.0, MIN_ACCELERATION);
        assert_eq!(res.vel, Vec2::new(4.0, -6.0 + MIN_ACCELERATION));
    }

    #[test]
    fn test_roll_downhill_follows_tangent() {
        let slope = 0.5;
        let res = ContactRule::RollDownhill.apply(Vec2::new(5.0, 1.0), slope, MAX_ACCELERATION);
        // Velocity is parallel to the surface
        assert!((travel_angle(res.vel) - slope).abs() < EPS);
        // And gained the throttle on top of the projected speed
        let projected = Vec2::new(5.0, 1.0).length() * (travel_angle(Vec2::new(5.0, 1.0)) - slope).cos();
        assert!((res.vel.length() - (projected + MAX_ACCELERATION)).abs() < EPS);
    }

    #[test]
    fn test_roll_uphill_points_up_the_slope() {
        let res = ContactRule::RollUphill.apply(Vec2::new(6.0, -1.0), -0.4, MIN_ACCELERATION);
        assert!(res.vel.x > 0.0);
        assert!(res.vel.y < 0.0);
        assert!(!res.launched);
    }

    #[test]
    fn test_crest_launch_needs_steep_fast_approach() {
        let slope = -0.6;
        // Steep downward travel over the cap
        let fast = MAX_SPEED + 0.5;
        let steep = Vec2::from_angle(FRAC_PI_2 - 0.5) * fast;
        assert!(ContactRule::Crest.apply(steep, slope, MIN_ACCELERATION).launched);
        // Same angle, below the cap
        assert!(!ContactRule::Crest.apply(steep * 0.5, slope, MIN_ACCELERATION).launched);
        // Fast enough, but shallow
        let shallow = Vec2::from_angle(0.2) * fast;
        assert!(!ContactRule::Crest.apply(shallow, slope, MIN_ACCELERATION).launched);
    }

    #[test]
    fn test_crest_launch_needs_more_than_top_speed() {
        let slope = -0.7;
        // Exactly MAX_SPEED long
        let at_cap = Vec2::new(15.0, 20.0);
        assert_eq!(at_cap.length(), MAX_SPEED);
        assert!(!ContactRule::Crest.apply(at_cap, slope, MIN_ACCELERATION).launched);
        assert!(ContactRule::Crest.apply(Vec2::new(15.0, 20.1), slope, MIN_ACCELERATION).launched);
    }

    #[test]
    fn test_coast_adds_vertical_acceleration() {
        let res = ContactRule::Coast.apply(Vec2::new(3.0, -2.0), 0.3, MAX_ACCELERATION);
        assert_eq!(res.vel, Vec2::new(3.0, 1.0));
    }

    #[test]
    fn test_settle_nudges_stalled_ball_back_down() {
        use ContactRule::*;
        let v = settle(PassThrough, Vec2::new(0.4, -2.0), -0.2);
        assert_eq!(v.x, STALL_NUDGE_DX);
        assert!((v.y + 2.0).abs() < EPS);
        // Not on a falling or flat surface
        assert!((settle(Coast, Vec2::new(0.4, -2.0), 0.2).x - 0.4).abs() < EPS);
        assert!((settle(FlatBounce, Vec2::new(0.4, -2.0), 0.0).x - 0.4).abs() < EPS);
    }

    #[test]
    fn test_uphill_rules_are_never_nudged() {
        for rule in [ContactRule::RollUphill, ContactRule::Crest] {
            let v = settle(rule, Vec2::new(0.4, -2.0), -0.2);
            assert!((v.x - 0.4).abs() < EPS);
        }
        let (rule, res) = resolve(Vec2::new(0.1, -0.1), -1.2, Throttle::Coast);
        assert_eq!(rule, ContactRule::RollUphill);
        assert!(res.vel.x > 0.0 && res.vel.x < 1.0);
        assert!(res.vel.y < 0.0);
    }

    #[test]
    fn test_settle_caps_speed_and_points_forward() {
        let v = settle(ContactRule::Coast, Vec2::new(-30.0, 40.0), 0.1);
        assert!((v.length() - MAX_SPEED).abs() < EPS);
        assert!((v - Vec2::new(15.0, -20.0)).length() < 1e-3);

        let forward = settle(ContactRule::Coast, Vec2::new(30.0, 40.0), 0.1);
        assert!((forward - Vec2::new(15.0, 20.0)).length() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_speed_capped_after_resolution(
            dx in -60.0f32..60.0,
            dy in -60.0f32..60.0,
            slope in -1.2f32..1.2,
            boost in any::<bool>(),
        ) {
            let (_, res) = resolve(Vec2::new(dx, dy), slope, Throttle::from_input(boost));
            prop_assert!(res.vel.is_finite());
            prop_assert!(res.vel.y.abs() <= MAX_SPEED + 1e-3);
            // A stall nudge replaces a sub-pixel dx after the cap
            if res.vel.x != STALL_NUDGE_DX {
                prop_assert!(res.vel.length() <= MAX_SPEED + 1e-3);
                prop_assert!(res.vel.x >= -1e-3);
            }
        }
    }
}
