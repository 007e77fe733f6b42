//! Hit-testing between the player hitbox and obstacles or pickups.

use crate::config::{GAP, HITBOX_INSET, PLAYER_SIZE};
use crate::spawner::Obstacle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Axis-aligned overlap. Touching edges do not count.
    pub fn overlaps(&self, b: &Rect) -> bool {
        self.x < b.x + b.w && self.x + self.w > b.x && self.y < b.y + b.h && self.y + self.h > b.y
    }

    /// Circle overlap via the nearest point of the rect to the circle centre.
    pub fn overlaps_circle(&self, cx: f64, cy: f64, r: f64) -> bool {
        let nx = cx.clamp(self.x, self.x + self.w);
        let ny = cy.clamp(self.y, self.y + self.h);
        let dx = cx - nx;
        let dy = cy - ny;
        dx * dx + dy * dy < r * r
    }
}

/// Square hitbox centred on the player, inset from the sprite on every side.
pub fn player_hitbox(x: f64, y: f64) -> Rect {
    let half = PLAYER_SIZE / 2.0;
    Rect::new(
        x - half + HITBOX_INSET,
        y - half + HITBOX_INSET,
        PLAYER_SIZE - 2.0 * HITBOX_INSET,
        PLAYER_SIZE - 2.0 * HITBOX_INSET,
    )
}

/// Top and bottom barrier rects of an obstacle in a field `height` tall.
pub fn obstacle_rects(o: &Obstacle, height: f64) -> [Rect; 2] {
    let bottom = o.gap_y + GAP;
    [
        Rect::new(o.x, 0.0, o.w, o.gap_y),
        Rect::new(o.x, bottom, o.w, height - bottom),
    ]
}

/// Player centre left the field through the top or sank past the bottom.
pub fn out_of_bounds(y: f64, height: f64) -> bool {
    y < 0.0 || y > height - PLAYER_SIZE / 2.0
}
