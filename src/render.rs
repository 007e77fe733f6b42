//! Half-block terminal renderer. Reads the game, never mutates it.

use crate::color::Rgb;
use crate::config::{
    BG_FILL, CONFETTI, GAME_OVER_DELAY, GAP, GRID_STROKE, PARTICLE_ALPHA_DIV, PIPE_STROKE,
    PLAYER_SIZE, SHADOW, TUX_BEAK, TUX_BODY, TUX_FACE, WHITE,
};
use crate::game::{Field, Game, Phase};
use crate::spawner::{Obstacle, Pickup};
use crossterm::{cursor, queue, style};
use std::io::{self, Write};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

/// Logical height of the play field regardless of terminal size.
pub const FIELD_HEIGHT: f64 = 640.0;

const GRID_STEP: f64 = 30.0;
const CAP_H: f64 = 25.0;
const CAP_OVERHANG: f64 = 5.0;
const LOGO_SCALE: f64 = 0.4;
const LOGO_GAP: f64 = 2.0;

fn ccolor(c: Rgb) -> style::Color {
    style::Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Layout ──────────────────────────────────────────────────────────────────

/// Maps the terminal grid onto the logical field. One cell holds two pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub pw: usize,
    pub ph: usize,
    /// Logical units per pixel.
    pub scale: f64,
}

impl Layout {
    pub fn from_terminal(cols: u16, rows: u16) -> Self {
        let pw = (cols as usize).max(1);
        let ph = (rows as usize * 2).max(2);
        Self {
            pw,
            ph,
            scale: FIELD_HEIGHT / ph as f64,
        }
    }

    pub fn field(&self) -> Field {
        Field::new(self.pw as f64 * self.scale, FIELD_HEIGHT)
    }

    fn px(&self, logical: f64) -> i32 {
        (logical / self.scale).floor() as i32
    }

    fn cols(&self) -> usize {
        self.pw
    }

    fn rows(&self) -> usize {
        self.ph / 2
    }
}

// ── Pixel buffer with half-block rendering ──────────────────────────────────

pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![BG_FILL; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, BG_FILL);
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = None;
        let mut prev_bg = None;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if prev_bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(ccolor(bot)))?;
                    prev_bg = Some(bot);
                }
                if top == bot {
                    queue!(out, style::Print(' '))?;
                } else {
                    if prev_fg != Some(top) {
                        queue!(out, style::SetForegroundColor(ccolor(top)))?;
                        prev_fg = Some(top);
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                prev_fg = None;
                prev_bg = None;
            }
        }
        queue!(out, style::ResetColor)
    }
}

// ── 3x5 bitmap digits ──────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

fn draw_digit(buf: &mut PixelBuf, x: i32, y: i32, d: u8, fg: Rgb) {
    let glyph = &DIGITS[d as usize % 10];
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                let px = x + col as i32;
                let py = y + row as i32;
                buf.set(px + 1, py + 1, SHADOW);
                buf.set(px, py, fg);
            }
        }
    }
}

fn draw_number(buf: &mut PixelBuf, cx: i32, y: i32, n: u32, fg: Rgb) {
    let s = n.to_string();
    let total_w = s.len() as i32 * 4 - 1; // 3px per digit + 1px spacing
    let start_x = cx - total_w / 2;
    for (i, ch) in s.bytes().enumerate() {
        draw_digit(buf, start_x + i as i32 * 4, y, ch - b'0', fg);
    }
}

// ── Text labels printed over the pixels ─────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub col: u16,
    pub row: u16,
    pub text: String,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// Holds the game-over panel back until the run has been over for [`GAME_OVER_DELAY`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GameOverDelay {
    ended_at: Option<Instant>,
}

impl GameOverDelay {
    /// Feeds the current phase and returns whether the panel is due.
    pub fn observe(&mut self, phase: Phase, now: Instant) -> bool {
        self.ended_at = match phase {
            Phase::Ended => self.ended_at.or(Some(now)),
            Phase::Menu | Phase::Running => None,
        };
        self.ended_at.is_some_and(|t| now.duration_since(t) >= GAME_OVER_DELAY)
    }
}

// ── Renderer ────────────────────────────────────────────────────────────────

pub struct Renderer {
    layout: Layout,
    buf: PixelBuf,
    labels: Vec<Label>,
}

impl Renderer {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            buf: PixelBuf::new(layout.pw, layout.ph),
            labels: Vec::new(),
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn resize(&mut self, layout: Layout) {
        self.layout = layout;
        self.buf.resize(layout.pw, layout.ph);
    }

    pub fn pixels(&self) -> &PixelBuf {
        &self.buf
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Paints one frame. `show_game_over` gates the end-of-run panel.
    pub fn draw(&mut self, game: &Game, show_game_over: bool) {
        self.labels.clear();
        self.draw_background();
        self.draw_particles(game);
        for p in game.pickups() {
            self.draw_pickup(p);
        }
        for o in game.obstacles() {
            self.draw_obstacle(o);
        }
        self.draw_player(game);

        match game.phase() {
            Phase::Menu => self.draw_menu(),
            Phase::Running => self.draw_score(game.score()),
            Phase::Ended => {
                self.draw_score(game.score());
                if show_game_over {
                    // pipe labels would print through the dimmed field
                    self.labels.clear();
                    self.draw_game_over(game);
                }
            }
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        self.buf.render(out)?;
        for l in &self.labels {
            queue!(
                out,
                cursor::MoveTo(l.col, l.row),
                style::SetForegroundColor(ccolor(l.fg)),
                style::SetBackgroundColor(ccolor(l.bg)),
                style::Print(&l.text),
            )?;
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }

    fn draw_background(&mut self) {
        let (pw, ph) = (self.layout.pw as i32, self.layout.ph as i32);
        self.buf.fill_rect(0, 0, pw, ph, BG_FILL);

        let field = self.layout.field();
        let mut x = 0.0;
        while x < field.width {
            let px = self.layout.px(x);
            for y in 0..ph {
                self.buf.set(px, y, GRID_STROKE);
            }
            x += GRID_STEP;
        }
        let mut y = 0.0;
        while y < field.height {
            let py = self.layout.px(y);
            for x in 0..pw {
                self.buf.set(x, py, GRID_STROKE);
            }
            y += GRID_STEP;
        }
    }

    fn draw_particles(&mut self, game: &Game) {
        for p in game.particles() {
            let (x, y) = (self.layout.px(p.x), self.layout.px(p.y));
            let bg = self.pixel(x, y).unwrap_or(BG_FILL);
            let alpha = p.life as f64 / PARTICLE_ALPHA_DIV;
            self.buf.set(x, y, p.color.over(bg, alpha));
        }
    }

    fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        let inside =
            x >= 0 && y >= 0 && (x as usize) < self.layout.pw && (y as usize) < self.layout.ph;
        inside.then(|| self.buf.get(x as usize, y as usize))
    }

    /// Paints every pixel near (`cx`, `cy`) for which `shade` returns a color.
    /// `shade` sees sprite-local logical coordinates with the rotation undone.
    fn fill_rotated(
        &mut self,
        cx: f64,
        cy: f64,
        extent: f64,
        rot_deg: f64,
        shade: impl Fn(f64, f64) -> Option<Rgb>,
    ) {
        let s = self.layout.scale;
        let (sin, cos) = rot_deg.to_radians().sin_cos();
        let (x0, x1) = (self.layout.px(cx - extent), self.layout.px(cx + extent));
        let (y0, y1) = (self.layout.px(cy - extent), self.layout.px(cy + extent));
        for iy in y0..=y1 {
            for ix in x0..=x1 {
                let dx = (ix as f64 + 0.5) * s - cx;
                let dy = (iy as f64 + 0.5) * s - cy;
                let lx = dx * cos + dy * sin;
                let ly = -dx * sin + dy * cos;
                if let Some(c) = shade(lx, ly) {
                    self.buf.set(ix, iy, c);
                }
            }
        }
    }

    fn draw_pickup(&mut self, p: &Pickup) {
        let s = p.size;
        let ellipse = |x: f64, y: f64, cx: f64, cy: f64, rx: f64, ry: f64| {
            let (ex, ey) = ((x - cx) / rx, (y - cy) / ry);
            ex * ex + ey * ey <= 1.0
        };
        let beak = |x: f64, y: f64| {
            let side = x.abs() / (0.15 * s);
            if y <= -0.05 * s {
                side + (-0.05 * s - y) / (0.07 * s) <= 1.0
            } else {
                side + (y + 0.05 * s) / (0.10 * s) <= 1.0
            }
        };
        self.fill_rotated(p.x, p.y, s * 0.6, p.rot, |x, y| {
            if beak(x, y) {
                Some(TUX_BEAK)
            } else if ellipse(x, y, -0.08 * s, -0.25 * s, 0.06 * s, 0.06 * s)
                || ellipse(x, y, 0.16 * s, -0.25 * s, 0.06 * s, 0.06 * s)
            {
                Some(TUX_BODY)
            } else if ellipse(x, y, -0.12 * s, -0.25 * s, 0.12 * s, 0.14 * s)
                || ellipse(x, y, 0.12 * s, -0.25 * s, 0.12 * s, 0.14 * s)
            {
                Some(WHITE)
            } else if ellipse(x, y, 0.0, 0.05 * s, 0.30 * s, 0.40 * s) {
                Some(TUX_FACE)
            } else if ellipse(x, y, 0.0, 0.0, 0.42 * s, 0.52 * s) {
                Some(TUX_BODY)
            } else {
                None
            }
        });
    }

    fn draw_obstacle(&mut self, o: &Obstacle) {
        let h = self.layout.field().height;
        let bottom = o.gap_y + GAP;
        self.draw_pipe(o, 0.0, o.gap_y, false);
        self.draw_pipe(o, bottom, h - bottom, true);
    }

    fn draw_pipe(&mut self, o: &Obstacle, y: f64, h: f64, is_bottom: bool) {
        let kind = o.kind();
        let hi = kind.color.lighten(30.0);
        let l = self.layout;

        let (x0, x1) = (l.px(o.x), l.px(o.x + o.w));
        let (y0, y1) = (l.px(y), l.px(y + h));
        let span = (x1 - x0).max(1);
        for px in x0..x1 {
            // color at the edges, lightened in the middle
            let t = ((px - x0) as f64 / span as f64 * 2.0 - 1.0).abs();
            let c = Rgb::lerp(hi, kind.color, (t * 256.0) as u16);
            for py in y0..y1 {
                self.buf.set(px, py, c);
            }
        }

        let cap_y = if is_bottom { y } else { y + h - CAP_H };
        let (cx0, cx1) = (l.px(o.x - CAP_OVERHANG), l.px(o.x + o.w + CAP_OVERHANG));
        let (cy0, cy1) = (l.px(cap_y), l.px(cap_y + CAP_H).max(l.px(cap_y) + 1));
        self.buf.fill_rect(cx0, cy0, cx1 - cx0, cy1 - cy0, kind.color);
        let edge = if is_bottom { cy0 } else { cy1 - 1 };
        for px in cx0..cx1 {
            self.buf.set(px, edge, PIPE_STROKE);
        }

        let cap_cols = (cx1 - cx0).max(0) as usize;
        let cap_row = (cy0 + cy1) / 4;
        self.label_in(kind.name, cx0, cap_row, cap_cols, WHITE, kind.color);

        let (icon_y, tag_y) = if is_bottom {
            (y + 40.0, y + 55.0)
        } else {
            (y + h - 40.0, y + h - 25.0)
        };
        let body_cols = (x1 - x0).max(0) as usize;
        self.label_in(kind.icon, x0, l.px(icon_y) / 2, body_cols, WHITE, kind.color);
        self.label_in(kind.tag, x0, l.px(tag_y) / 2, body_cols, WHITE, kind.color);
    }

    /// Centres `text` in the `cols` cells starting at pixel column `x`, if it fits on screen.
    /// Widths are terminal cells, so wide glyphs count double.
    fn label_in(&mut self, text: &str, x: i32, row: i32, cols: usize, fg: Rgb, bg: Rgb) {
        let len = text.width();
        if len == 0 || len > cols || row < 0 || row as usize >= self.layout.rows() {
            return;
        }
        let col = x + ((cols - len) / 2) as i32;
        if col < 0 || col as usize + len > self.layout.cols() {
            return;
        }
        self.labels.push(Label {
            col: col as u16,
            row: row as u16,
            text: text.to_string(),
            fg,
            bg,
        });
    }

    fn draw_player(&mut self, game: &Game) {
        let p = game.player();
        let z = PLAYER_SIZE * LOGO_SCALE;
        let g = LOGO_GAP / 2.0;
        self.fill_rotated(p.x, p.y, PLAYER_SIZE * 0.6, p.rot, |x, y| {
            let pane = |v: f64| {
                if (-z - g..-g).contains(&v) {
                    Some(0)
                } else if (g..z + g).contains(&v) {
                    Some(1)
                } else {
                    None
                }
            };
            match (pane(x), pane(y)) {
                (Some(col), Some(row)) => Some(CONFETTI[row * 2 + col]),
                _ => None,
            }
        });
    }

    fn draw_score(&mut self, score: u32) {
        draw_number(&mut self.buf, self.layout.pw as i32 / 2, 2, score, WHITE);
    }

    fn centered(&mut self, row: usize, text: &str, fg: Rgb, bg: Rgb) {
        let cols = self.layout.cols();
        let mut text = text.to_string();
        while text.width() > cols {
            text.pop();
        }
        let col = (cols - text.width()) / 2;
        if row < self.layout.rows() {
            self.labels.push(Label {
                col: col as u16,
                row: row as u16,
                text,
                fg,
                bg,
            });
        }
    }

    fn draw_menu(&mut self) {
        let rows = self.layout.rows();
        let mid = rows / 3;
        self.centered(mid, " FLAPPY OS ", TUX_BODY, CONFETTI[3]);
        self.centered(mid + 2, "Dodge the Linux pain points, grab the penguins.", WHITE, BG_FILL);
        self.centered(mid + 4, "ENTER start   SPACE flap   Q quit", WHITE, BG_FILL);
    }

    fn draw_game_over(&mut self, game: &Game) {
        for y in 0..self.layout.ph {
            for x in 0..self.layout.pw {
                let c = self.buf.get(x, y);
                self.buf.set(x as i32, y as i32, Rgb(c.0 / 2, c.1 / 2, c.2 / 2));
            }
        }

        let Some(over) = game.game_over() else { return };
        let rows = self.layout.rows();
        let mid = rows / 2;
        let panel_w = (self.layout.pw * 3 / 4).max(20) as i32;
        let panel_h = 14;
        let px = (self.layout.pw as i32 - panel_w) / 2;
        let py = (mid as i32 - 3) * 2;
        self.buf.fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, SHADOW);
        self.buf.fill_rect(px, py, panel_w, panel_h, TUX_BODY);

        self.centered(mid.saturating_sub(2), " GAME OVER ", WHITE, CONFETTI[2]);
        self.centered(mid, &format!("Score: {}", over.score), CONFETTI[3], TUX_BODY);
        self.centered(mid + 1, over.message, WHITE, TUX_BODY);
        self.centered(mid + 3, "ENTER retry   M menu   Q quit", WHITE, TUX_BODY);
    }
}
