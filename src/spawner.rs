//! Timed spawning of obstacles and pickups at the right edge of the field.

use crate::config::{
    GAP, GAP_MIN_MARGIN, GAP_Y_OFFSET_MIN, OBSTACLE_EVERY, OBSTACLE_W, OBSTACLES, ObstacleKind,
    PICKUP_EVERY, PICKUP_SIZE, PICKUP_Y_MARGIN, PICKUP_Y_OFFSET,
};
use crate::game::Field;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    /// Top edge of the gap.
    pub gap_y: f64,
    pub w: f64,
    /// Index into [`OBSTACLES`].
    pub kind: usize,
}

impl Obstacle {
    pub fn kind(&self) -> &'static ObstacleKind {
        &OBSTACLES[self.kind % OBSTACLES.len()]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pickup {
    /// Centre.
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub rot: f64,
    pub collected: bool,
}

impl Pickup {
    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spawner {
    last_kind: Option<usize>,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_kind(&self) -> Option<usize> {
        self.last_kind
    }

    pub fn obstacle_due(frame: u64) -> bool {
        frame % OBSTACLE_EVERY == 0
    }

    pub fn pickup_due(frame: u64) -> bool {
        frame % PICKUP_EVERY == 0
    }

    pub fn spawn_obstacle<R: Rng>(&mut self, field: Field, rng: &mut R) -> Obstacle {
        let kind = pick_kind(rng, OBSTACLES.len(), self.last_kind);
        self.last_kind = Some(kind);

        let span = (field.height - GAP - GAP_MIN_MARGIN).max(0.0);
        let gap_y = rng.random::<f64>() * span + GAP_Y_OFFSET_MIN;
        log::debug!(
            "spawn obstacle {} gap_y={gap_y:.1}",
            OBSTACLES[kind].name
        );
        Obstacle {
            x: field.width,
            gap_y,
            w: OBSTACLE_W,
            kind,
        }
    }

    pub fn spawn_pickup<R: Rng>(&mut self, field: Field, rng: &mut R) -> Pickup {
        let span = (field.height - PICKUP_Y_MARGIN).max(0.0);
        let y = rng.random::<f64>() * span + PICKUP_Y_OFFSET;
        log::debug!("spawn pickup y={y:.1}");
        Pickup {
            x: field.width,
            y,
            size: PICKUP_SIZE,
            rot: 0.0,
            collected: false,
        }
    }
}

/// Uniform draw from `0..len` that never repeats `last` when `len > 1`.
pub fn pick_kind<R: Rng>(rng: &mut R, len: usize, last: Option<usize>) -> usize {
    loop {
        let idx = rng.random_range(0..len);
        if len == 1 || Some(idx) != last {
            return idx;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const FIELD: Field = Field::new(900.0, 640.0);

    #[test]
    fn due_frames() {
        assert!(Spawner::obstacle_due(150));
        assert!(Spawner::obstacle_due(300));
        assert!(!Spawner::obstacle_due(149));
        assert!(!Spawner::obstacle_due(151));
        assert!(Spawner::pickup_due(100));
        assert!(!Spawner::pickup_due(150));
    }

    #[test]
    fn obstacles_never_repeat_kind() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut spawner = Spawner::new();
        let kinds: Vec<usize> = (0..500)
            .map(|_| spawner.spawn_obstacle(FIELD, &mut rng).kind)
            .collect();
        assert!(kinds.windows(2).all(|w| w[0] != w[1]));
        assert_eq!(spawner.last_kind(), kinds.last().copied());
    }

    #[test]
    fn two_kind_catalog_alternates() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut last = None;
        for _ in 0..200 {
            let k = pick_kind(&mut rng, 2, last);
            assert_ne!(Some(k), last);
            last = Some(k);
        }
    }

    #[test]
    fn single_kind_catalog_terminates() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(pick_kind(&mut rng, 1, Some(0)), 0);
        }
    }

    #[test]
    fn obstacle_gap_fits_field() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut spawner = Spawner::new();
        for _ in 0..500 {
            let o = spawner.spawn_obstacle(FIELD, &mut rng);
            assert!(o.gap_y >= 100.0);
            assert!(o.gap_y < FIELD.height - GAP - 200.0 + 100.0);
            assert_eq!(o.x, FIELD.width);
            assert_eq!(o.w, OBSTACLE_W);
        }
    }

    #[test]
    fn short_field_pins_gap_to_offset() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let o = Spawner::new().spawn_obstacle(Field::new(300.0, 200.0), &mut rng);
        assert_eq!(o.gap_y, GAP_Y_OFFSET_MIN);
    }

    #[test]
    fn pickup_stays_on_screen() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut spawner = Spawner::new();
        for _ in 0..500 {
            let p = spawner.spawn_pickup(FIELD, &mut rng);
            assert!(p.y >= 50.0);
            assert!(p.y < FIELD.height - 100.0 + 50.0);
            assert!(!p.collected);
            assert_eq!(p.radius(), 15.0);
        }
    }

    #[test]
    fn obstacle_kind_lookup() {
        let o = Obstacle {
            x: 0.0,
            gap_y: 0.0,
            w: OBSTACLE_W,
            kind: 4,
        };
        assert_eq!(o.kind().name, "Kernel");
    }
}
