//! Cosmetic particle bursts. Nothing here feeds back into collisions or score.

use crate::color::Rgb;
use crate::config::{
    CONFETTI, CONFETTI_LIFE, CONFETTI_PARTICLES, CONFETTI_V_RANGE, FLAP_LIFE, FLAP_PARTICLES,
    FLAP_VX_MIN, FLAP_VX_RANGE, FLAP_VY_RANGE, FLAP_X_OFFSET, YELLOW,
};
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Frames left.
    pub life: u32,
    pub color: Rgb,
}

/// Puffs trailing behind the player on a flap.
pub fn flap_trail<R: Rng>(x: f64, y: f64, rng: &mut R) -> Vec<Particle> {
    (0..FLAP_PARTICLES)
        .map(|_| Particle {
            x: x - FLAP_X_OFFSET,
            y,
            vx: -rng.random::<f64>() * FLAP_VX_RANGE - FLAP_VX_MIN,
            vy: (rng.random::<f64>() - 0.5) * FLAP_VY_RANGE,
            life: FLAP_LIFE,
            color: YELLOW,
        })
        .collect()
}

/// Confetti scattered in every direction from a collected pickup.
pub fn confetti<R: Rng>(x: f64, y: f64, rng: &mut R) -> Vec<Particle> {
    (0..CONFETTI_PARTICLES)
        .map(|_| Particle {
            x,
            y,
            vx: (rng.random::<f64>() - 0.5) * CONFETTI_V_RANGE,
            vy: (rng.random::<f64>() - 0.5) * CONFETTI_V_RANGE,
            life: CONFETTI_LIFE,
            color: CONFETTI[rng.random_range(0..CONFETTI.len())],
        })
        .collect()
}

/// Moves every particle one frame and drops the expired ones.
pub fn advance(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.x += p.vx;
        p.y += p.vy;
        p.life = p.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}
