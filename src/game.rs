//! Lifecycle and per-frame orchestration.

use crate::collision::{obstacle_rects, out_of_bounds, player_hitbox};
use crate::config::{DEATH_MESSAGES, PICKUP_SCROLL_FACTOR, PICKUP_SPIN, SCROLL};
use crate::particles::{self, Particle};
use crate::physics::Player;
use crate::score::Scoreboard;
use crate::spawner::{Obstacle, Pickup, Spawner};
use rand::Rng;

/// Logical play-field size, supplied fresh by the host every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field {
    pub width: f64,
    pub height: f64,
}

impl Field {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Running,
    Ended,
}

/// Player intents, consumed at tick boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Flap,
    StartOrRetry,
    ReturnToMenu,
}

/// Things that happened during a tick, for the audio side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    RunStarted,
    Flapped,
    PickupCollected,
    Crashed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOver {
    pub score: u32,
    pub message: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    player: Player,
    obstacles: Vec<Obstacle>,
    pickups: Vec<Pickup>,
    particles: Vec<Particle>,
    scoreboard: Scoreboard,
    frame: u64,
    phase: Phase,
    spawner: Spawner,
    game_over: Option<GameOver>,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(field: Field) -> Self {
        Self {
            player: Player::new(field),
            obstacles: Vec::new(),
            pickups: Vec::new(),
            particles: Vec::new(),
            scoreboard: Scoreboard::default(),
            frame: 0,
            phase: Phase::Menu,
            spawner: Spawner::new(),
            game_over: None,
            events: Vec::new(),
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────────────────

    /// Fresh player, no entities, zero score and frame. Leaves the phase at `Menu`.
    pub fn reset(&mut self, field: Field) {
        let events = std::mem::take(&mut self.events);
        *self = Game {
            events,
            ..Game::new(field)
        };
    }

    pub fn start(&mut self, field: Field) {
        self.reset(field);
        self.phase = Phase::Running;
        self.events.push(GameEvent::RunStarted);
        log::info!("run started on {:.0}x{:.0} field", field.width, field.height);
    }

    pub fn menu(&mut self, field: Field) {
        self.reset(field);
    }

    /// Ends the run. Only the first call of a run has any effect.
    pub fn end<R: Rng>(&mut self, rng: &mut R) {
        if self.phase != Phase::Running {
            return;
        }
        self.phase = Phase::Ended;
        let message = DEATH_MESSAGES[rng.random_range(0..DEATH_MESSAGES.len())];
        self.game_over = Some(GameOver {
            score: self.score(),
            message,
        });
        self.events.push(GameEvent::Crashed);
        log::info!("run ended at frame {} with score {}", self.frame, self.score());
    }

    pub fn flap<R: Rng>(&mut self, rng: &mut R) {
        if self.phase != Phase::Running {
            return;
        }
        self.player.flap();
        self.events.push(GameEvent::Flapped);
        self.particles
            .extend(particles::flap_trail(self.player.x, self.player.y, rng));
    }

    pub fn handle<R: Rng>(&mut self, cmd: Command, field: Field, rng: &mut R) {
        match (cmd, self.phase) {
            (Command::Flap, Phase::Running) => self.flap(rng),
            (Command::StartOrRetry, Phase::Menu | Phase::Ended) => self.start(field),
            (Command::ReturnToMenu, Phase::Ended) => self.menu(field),
            _ => log::trace!("ignored {cmd:?} in {:?}", self.phase),
        }
    }

    /// Advances one frame if a run is in progress.
    pub fn tick<R: Rng>(&mut self, field: Field, rng: &mut R) {
        if self.phase == Phase::Running {
            self.update(field, rng);
        }
    }

    // ── Frame update ────────────────────────────────────────────────────────

    fn update<R: Rng>(&mut self, field: Field, rng: &mut R) {
        self.frame += 1;

        self.player.integrate();

        if Spawner::obstacle_due(self.frame) {
            let o = self.spawner.spawn_obstacle(field, rng);
            self.obstacles.push(o);
        }
        if Spawner::pickup_due(self.frame) {
            let p = self.spawner.spawn_pickup(field, rng);
            self.pickups.push(p);
        }

        for o in &mut self.obstacles {
            o.x -= SCROLL;
        }
        self.obstacles.retain(|o| o.x > -o.w);

        for p in &mut self.pickups {
            p.x -= SCROLL * PICKUP_SCROLL_FACTOR;
            p.rot += PICKUP_SPIN;
        }
        self.pickups.retain(|p| p.x > -p.size && !p.collected);

        particles::advance(&mut self.particles);

        self.check_collisions(field, rng);
    }

    fn check_collisions<R: Rng>(&mut self, field: Field, rng: &mut R) {
        if out_of_bounds(self.player.y, field.height) {
            return self.end(rng);
        }

        let hitbox = player_hitbox(self.player.x, self.player.y);
        let hit = self
            .obstacles
            .iter()
            .any(|o| obstacle_rects(o, field.height).iter().any(|r| hitbox.overlaps(r)));
        if hit {
            return self.end(rng);
        }

        for p in &mut self.pickups {
            if p.collected || !hitbox.overlaps_circle(p.x, p.y, p.radius()) {
                continue;
            }
            p.collected = true;
            self.scoreboard.award_pickup();
            self.events.push(GameEvent::PickupCollected);
            self.particles.extend(particles::confetti(p.x, p.y, rng));
            log::debug!("pickup collected, score {}", self.scoreboard.get());
        }
    }

    // ── Read side ───────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.get()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn game_over(&self) -> Option<&GameOver> {
        self.game_over.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        FLAP_PARTICLES, FLAP_VELOCITY, GAP, GRAVITY, OBSTACLE_EVERY, OBSTACLE_W, PICKUP_BONUS,
        PICKUP_SIZE,
    };
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const FIELD: Field = Field::new(900.0, 640.0);

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn running() -> Game {
        let mut g = Game::new(FIELD);
        g.start(FIELD);
        g.drain_events();
        g
    }

    /// Ticks while pinning the player mid-field so nothing but obstacles can kill it.
    fn hover(g: &mut Game, rng: &mut ChaCha8Rng, frames: u64) {
        for _ in 0..frames {
            g.player.y = FIELD.height / 2.0;
            g.player.v = -GRAVITY;
            g.tick(FIELD, rng);
        }
    }

    fn pickup_at(x: f64, y: f64) -> Pickup {
        Pickup {
            x,
            y,
            size: PICKUP_SIZE,
            rot: 0.0,
            collected: false,
        }
    }

    #[test]
    fn starts_in_menu() {
        let mut g = Game::new(FIELD);
        let mut rng = rng();
        assert_eq!(g.phase(), Phase::Menu);
        let before = g.clone();
        g.tick(FIELD, &mut rng);
        assert_eq!(g, before);
    }

    #[test]
    fn flap_ignored_outside_run() {
        let mut rng = rng();
        let mut g = Game::new(FIELD);
        g.handle(Command::Flap, FIELD, &mut rng);
        assert_eq!(g.player().v, 0.0);
        assert!(g.drain_events().is_empty());

        let mut g = running();
        g.end(&mut rng);
        g.drain_events();
        let v = g.player().v;
        g.handle(Command::Flap, FIELD, &mut rng);
        assert_eq!(g.player().v, v);
        assert!(g.particles().is_empty());
        assert!(g.drain_events().is_empty());
    }

    #[test]
    fn start_resets_everything() {
        let mut rng = rng();
        let mut g = running();
        hover(&mut g, &mut rng, 160);
        g.scoreboard.award_pickup();
        g.end(&mut rng);

        g.handle(Command::StartOrRetry, FIELD, &mut rng);
        assert_eq!(g.phase(), Phase::Running);
        assert_eq!(g.score(), 0);
        assert_eq!(g.frame(), 0);
        assert!(g.obstacles().is_empty() && g.pickups().is_empty() && g.particles().is_empty());
        assert!(g.game_over().is_none());
        assert_eq!(g.player(), &Player::new(FIELD));
        assert_eq!(g.drain_events().last(), Some(&GameEvent::RunStarted));
    }

    #[test]
    fn start_ignored_while_running() {
        let mut rng = rng();
        let mut g = running();
        hover(&mut g, &mut rng, 10);
        g.handle(Command::StartOrRetry, FIELD, &mut rng);
        assert_eq!(g.frame(), 10);
    }

    #[test]
    fn return_to_menu_from_ended() {
        let mut rng = rng();
        let mut g = running();
        g.handle(Command::ReturnToMenu, FIELD, &mut rng);
        assert_eq!(g.phase(), Phase::Running);

        g.end(&mut rng);
        g.handle(Command::ReturnToMenu, FIELD, &mut rng);
        assert_eq!(g.phase(), Phase::Menu);
        assert!(g.game_over().is_none());
    }

    #[test]
    fn velocity_accumulates_gravity() {
        let mut rng = rng();
        let mut g = running();
        let mut prev = g.player().v;
        for _ in 0..20 {
            g.tick(FIELD, &mut rng);
            assert_eq!(g.phase(), Phase::Running);
            assert_relative_eq!(g.player().v - prev, GRAVITY, epsilon = 1e-9);
            prev = g.player().v;
        }
    }

    #[test]
    fn flap_sets_impulse_and_trail() {
        let mut rng = rng();
        let mut g = running();
        g.player.v = 12.0;
        g.handle(Command::Flap, FIELD, &mut rng);
        assert_eq!(g.player().v, FLAP_VELOCITY);
        g.handle(Command::Flap, FIELD, &mut rng);
        assert_eq!(g.player().v, FLAP_VELOCITY);
        assert_eq!(g.particles().len(), 2 * FLAP_PARTICLES);
        assert_eq!(g.drain_events(), vec![GameEvent::Flapped, GameEvent::Flapped]);
    }

    #[test]
    fn falling_off_the_bottom_ends_run() {
        let mut rng = rng();
        let mut g = running();
        for _ in 0..100 {
            g.tick(FIELD, &mut rng);
        }
        assert_eq!(g.phase(), Phase::Ended);
        assert!(g.player().y > FIELD.height - 20.0);
    }

    #[test]
    fn above_the_top_ends_immediately() {
        for v in [-50.0, 0.0, 50.0] {
            let mut rng = rng();
            let mut g = running();
            g.player.y = -1.0;
            g.player.v = v;
            g.check_collisions(FIELD, &mut rng);
            assert_eq!(g.phase(), Phase::Ended);
        }
    }

    #[test]
    fn end_is_idempotent() {
        let mut rng = rng();
        let mut g = running();
        g.scoreboard.award_pickup();
        g.end(&mut rng);
        let once = g.clone();
        g.end(&mut rng);
        assert_eq!(g, once);
        assert_eq!(g.drain_events(), vec![GameEvent::Crashed]);
        let over = g.game_over().unwrap();
        assert_eq!(over.score, PICKUP_BONUS);
        assert!(DEATH_MESSAGES.contains(&over.message));
    }

    #[test]
    fn first_obstacle_at_frame_150() {
        let mut rng = rng();
        let mut g = running();
        hover(&mut g, &mut rng, OBSTACLE_EVERY - 1);
        assert!(g.obstacles().is_empty());
        hover(&mut g, &mut rng, 1);
        assert_eq!(g.obstacles().len(), 1);
        let o = &g.obstacles()[0];
        assert!(o.gap_y >= 100.0 && o.gap_y < FIELD.height - GAP - 200.0 + 100.0);
        assert_relative_eq!(o.x, FIELD.width - SCROLL);
    }

    #[test]
    fn first_pickup_at_frame_100() {
        let mut rng = rng();
        let mut g = running();
        hover(&mut g, &mut rng, 99);
        assert!(g.pickups().is_empty());
        hover(&mut g, &mut rng, 1);
        assert_eq!(g.pickups().len(), 1);
        assert!(g.obstacles().is_empty());
        let p = &g.pickups()[0];
        assert!(p.y >= 50.0 && p.y < FIELD.height - 100.0 + 50.0);
    }

    #[test]
    fn obstacles_spawn_only_on_interval() {
        let mut rng = rng();
        let mut g = running();
        // park the player left of the cull line so no obstacle can reach it
        g.player.x = -1000.0;
        let mut kinds = Vec::new();
        for _ in 0..1200 {
            let before = g.spawner.last_kind();
            hover(&mut g, &mut rng, 1);
            let spawned = g
                .obstacles()
                .last()
                .is_some_and(|o| o.x == FIELD.width - SCROLL);
            assert_eq!(spawned, g.frame() % OBSTACLE_EVERY == 0, "frame {}", g.frame());
            if spawned {
                kinds.push(g.obstacles().last().unwrap().kind);
            } else {
                assert_eq!(g.spawner.last_kind(), before);
            }
        }
        assert_eq!(kinds.len(), 8);
        assert!(kinds.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn offscreen_entities_are_dropped() {
        let mut rng = rng();
        let mut g = running();
        g.obstacles.push(Obstacle {
            x: -OBSTACLE_W + 1.0,
            gap_y: 200.0,
            w: OBSTACLE_W,
            kind: 0,
        });
        g.pickups.push(pickup_at(-PICKUP_SIZE + 1.0, 100.0));
        hover(&mut g, &mut rng, 1);
        assert!(g.obstacles().is_empty());
        assert!(g.pickups().is_empty());
    }

    #[test]
    fn hitbox_in_barrier_ends_run() {
        let mut rng = rng();
        let mut g = running();
        let (x, y) = (g.player().x, g.player().y);
        // gap entirely below the player
        g.obstacles.push(Obstacle {
            x: x - 30.0,
            gap_y: y + 100.0,
            w: OBSTACLE_W,
            kind: 0,
        });
        g.check_collisions(FIELD, &mut rng);
        assert_eq!(g.phase(), Phase::Ended);

        let mut g = running();
        // gap entirely above the player
        g.obstacles.push(Obstacle {
            x: x - 30.0,
            gap_y: y - 300.0,
            w: OBSTACLE_W,
            kind: 1,
        });
        g.check_collisions(FIELD, &mut rng);
        assert_eq!(g.phase(), Phase::Ended);
    }

    #[test]
    fn hitbox_in_gap_survives() {
        let mut rng = rng();
        let mut g = running();
        let (x, y) = (g.player().x, g.player().y);
        g.obstacles.push(Obstacle {
            x: x - 30.0,
            gap_y: y - GAP / 2.0,
            w: OBSTACLE_W,
            kind: 0,
        });
        g.obstacles.push(Obstacle {
            x: x + 200.0,
            gap_y: 100.0,
            w: OBSTACLE_W,
            kind: 1,
        });
        g.check_collisions(FIELD, &mut rng);
        assert_eq!(g.phase(), Phase::Running);
    }

    #[test]
    fn pickup_collected_once() {
        let mut rng = rng();
        let mut g = running();
        let (x, y) = (g.player().x, g.player().y);
        g.pickups.push(pickup_at(x, y));
        g.check_collisions(FIELD, &mut rng);
        assert_eq!(g.score(), PICKUP_BONUS);
        assert!(g.pickups()[0].collected);
        assert_eq!(g.drain_events(), vec![GameEvent::PickupCollected]);
        assert_eq!(g.particles().len(), crate::config::CONFETTI_PARTICLES);

        g.check_collisions(FIELD, &mut rng);
        assert_eq!(g.score(), PICKUP_BONUS);
        assert!(g.drain_events().is_empty());

        hover(&mut g, &mut rng, 1);
        assert!(g.pickups().is_empty());
        assert_eq!(g.score(), PICKUP_BONUS);
    }

    #[test]
    fn several_pickups_in_one_frame() {
        let mut rng = rng();
        let mut g = running();
        let (x, y) = (g.player().x, g.player().y);
        g.pickups.push(pickup_at(x - 10.0, y));
        g.pickups.push(pickup_at(x + 10.0, y));
        g.pickups.push(pickup_at(x + 300.0, y));
        g.check_collisions(FIELD, &mut rng);
        assert_eq!(g.score(), 2 * PICKUP_BONUS);
        assert_eq!(g.phase(), Phase::Running);
        assert!(!g.pickups()[2].collected);
    }

    #[test]
    fn spawns_follow_current_field() {
        let mut rng = rng();
        let mut g = running();
        let wide = Field::new(1500.0, 640.0);
        for _ in 0..OBSTACLE_EVERY {
            g.player.y = wide.height / 2.0;
            g.player.v = -GRAVITY;
            g.tick(wide, &mut rng);
        }
        assert_relative_eq!(g.obstacles()[0].x, wide.width - SCROLL);
    }
}
