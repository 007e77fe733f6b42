//! Tuning constants. Distances are logical play-field units, times are frames
//! unless the name says otherwise.

use crate::color::Rgb;
use std::time::Duration;

// ── Physics ─────────────────────────────────────────────────────────────────

pub const GRAVITY: f64 = 0.4;
pub const FLAP_VELOCITY: f64 = -8.0;
pub const SCROLL: f64 = 3.0;
pub const PICKUP_SCROLL_FACTOR: f64 = 0.8;
pub const PICKUP_SPIN: f64 = 2.0;

pub const ROT_VEL_SCALE: f64 = 3.0;
pub const ROT_MIN_DEG: f64 = -30.0;
pub const ROT_MAX_DEG: f64 = 45.0;

// ── Geometry ────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f64 = 40.0;
/// How far each hitbox edge sits inside the drawn sprite.
pub const HITBOX_INSET: f64 = 5.0;
pub const PLAYER_X_FRACTION: f64 = 0.2;

pub const GAP: f64 = 180.0;
pub const OBSTACLE_W: f64 = 60.0;
pub const PICKUP_SIZE: f64 = 30.0;

// ── Spawning ────────────────────────────────────────────────────────────────

pub const OBSTACLE_EVERY: u64 = 150;
pub const PICKUP_EVERY: u64 = 100;

pub const GAP_MIN_MARGIN: f64 = 200.0;
pub const GAP_Y_OFFSET_MIN: f64 = 100.0;
pub const PICKUP_Y_MARGIN: f64 = 100.0;
pub const PICKUP_Y_OFFSET: f64 = 50.0;

// ── Scoring ─────────────────────────────────────────────────────────────────

pub const PICKUP_BONUS: u32 = 10;

// ── Particles ───────────────────────────────────────────────────────────────

pub const FLAP_PARTICLES: usize = 3;
pub const FLAP_LIFE: u32 = 20;
pub const FLAP_X_OFFSET: f64 = 10.0;
pub const FLAP_VX_MIN: f64 = 1.0;
pub const FLAP_VX_RANGE: f64 = 2.0;
pub const FLAP_VY_RANGE: f64 = 2.0;

pub const CONFETTI_PARTICLES: usize = 10;
pub const CONFETTI_LIFE: u32 = 30;
pub const CONFETTI_V_RANGE: f64 = 6.0;

/// Life at which a particle is drawn fully opaque.
pub const PARTICLE_ALPHA_DIV: f64 = 30.0;

// ── Timing ──────────────────────────────────────────────────────────────────

pub const FRAME: Duration = Duration::from_millis(16);
pub const GAME_OVER_DELAY: Duration = Duration::from_millis(500);

// ── Palette ─────────────────────────────────────────────────────────────────

pub const YELLOW: Rgb = Rgb::hex(0xffcc00);
pub const WHITE: Rgb = Rgb::hex(0xffffff);
pub const TUX_BODY: Rgb = Rgb::hex(0x1a1a1a);
pub const TUX_FACE: Rgb = Rgb::hex(0xf5f5f5);
pub const TUX_BEAK: Rgb = Rgb::hex(0xf4a423);
pub const BG_FILL: Rgb = Rgb::hex(0x11504b);
pub const GRID_STROKE: Rgb = Rgb::hex(0x4c7c78);
pub const PIPE_STROKE: Rgb = Rgb::hex(0xdddddd);
pub const SHADOW: Rgb = Rgb(30, 30, 30);

pub const CONFETTI: [Rgb; 4] = [
    Rgb::hex(0x00a1f1),
    Rgb::hex(0x7fba00),
    Rgb::hex(0xf25022),
    Rgb::hex(0xffb900),
];

// ── Catalogs ────────────────────────────────────────────────────────────────

/// Cosmetic identity of an obstacle.
#[derive(Debug, PartialEq, Eq)]
pub struct ObstacleKind {
    pub name: &'static str,
    pub color: Rgb,
    pub icon: &'static str,
    pub tag: &'static str,
}

pub static OBSTACLES: [ObstacleKind; 8] = [
    ObstacleKind {
        name: "Systemd",
        color: Rgb::hex(0x9b59b6),
        icon: "⚙",
        tag: "PID 1",
    },
    ObstacleKind {
        name: "Wayland",
        color: Rgb::hex(0xe74c3c),
        icon: "🖥",
        tag: "It's Different",
    },
    ObstacleKind {
        name: "Drivers",
        color: Rgb::hex(0x3498db),
        icon: "🧩",
        tag: "Out of Tree",
    },
    ObstacleKind {
        name: "Permissions",
        color: Rgb::hex(0xe67e22),
        icon: "🔒",
        tag: "Access Denied",
    },
    ObstacleKind {
        name: "Kernel",
        color: Rgb::hex(0x2ecc71),
        icon: "🐧",
        tag: "Panic!",
    },
    ObstacleKind {
        name: "Package Manager",
        color: Rgb::hex(0x00a1f1),
        icon: "📦",
        tag: "Dependency Hell",
    },
    ObstacleKind {
        name: "GRUB",
        color: Rgb::hex(0xf39c12),
        icon: "📜",
        tag: "Which OS?",
    },
    ObstacleKind {
        name: "Arch Wiki",
        color: Rgb::hex(0xff6b9d),
        icon: "📖",
        tag: "RTFM",
    },
];

pub const DEATH_MESSAGES: [&str; 8] = [
    "Kernel panic. Not syncing. Your penguin has left the chat.",
    "Copilot suggests: 'Have you tried recompiling the kernel?'",
    "Recall captured 47 screenshots, but X11 dropped half of them.",
    "Telemetry collected: nothing. Absolutely nothing. Also you still crashed.",
    "A reboot is required. The init system is arguing about how.",
    "Your default editor was vim. You couldn't figure out how to quit.",
    "Installing updates: pacman, apt, dnf, snap, flatpak… choose wisely.",
    "This system requires sudo. You were not in the sudoers file.",
];
