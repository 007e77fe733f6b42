#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(v: u32) -> Rgb {
        Rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    /// Adds `pct` percent of full scale to every channel, saturating at 255.
    pub fn lighten(self, pct: f64) -> Rgb {
        let a = (2.55 * pct).round() as i32;
        let ch = |v: u8| (v as i32 + a).clamp(0, 255) as u8;
        Rgb(ch(self.0), ch(self.1), ch(self.2))
    }

    /// Blends toward `bg`; `alpha` 1.0 keeps `self`, 0.0 gives `bg`.
    pub fn over(self, bg: Rgb, alpha: f64) -> Rgb {
        let t = ((1.0 - alpha.clamp(0.0, 1.0)) * 256.0) as u16;
        Rgb::lerp(self, bg, t)
    }
}
