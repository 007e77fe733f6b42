use crate::config::{
    FLAP_VELOCITY, GRAVITY, PLAYER_X_FRACTION, ROT_MAX_DEG, ROT_MIN_DEG, ROT_VEL_SCALE,
};
use crate::game::Field;

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    /// Vertical velocity, positive is downward.
    pub v: f64,
    /// Tilt in degrees, derived from `v` each step.
    pub rot: f64,
}

impl Player {
    pub fn new(field: Field) -> Self {
        Self {
            x: field.width * PLAYER_X_FRACTION,
            y: field.height / 2.0,
            v: 0.0,
            rot: 0.0,
        }
    }

    /// One frame of gravity.
    pub fn integrate(&mut self) {
        self.v += GRAVITY;
        self.y += self.v;
        self.rot = rotation_for(self.v);
    }

    /// Replaces the velocity with the upward impulse.
    pub fn flap(&mut self) {
        self.v = FLAP_VELOCITY;
    }
}

pub fn rotation_for(v: f64) -> f64 {
    (v * ROT_VEL_SCALE).clamp(ROT_MIN_DEG, ROT_MAX_DEG)
}
