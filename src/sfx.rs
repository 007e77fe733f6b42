use crate::game::GameEvent;
use fundsp::audiounit::AudioUnit;
use fundsp::prelude::{saw_hz, sine_hz, square_hz};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamBuilder, Sink};

pub const SAMPLE_RATE: u32 = 44_100;

/// Level every tone decays to by the end of its duration.
const TAIL_GAIN: f32 = 0.01;

// ── Cues ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Wave {
    Sine,
    Square,
    Saw,
}

/// A decaying oscillator burst, `at` seconds into its cue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub at: f32,
    pub freq: f32,
    pub dur: f32,
    pub wave: Wave,
    pub vol: f32,
}

const fn tone(at: f32, freq: f32, dur: f32, wave: Wave, vol: f32) -> Tone {
    Tone {
        at,
        freq,
        dur,
        wave,
        vol,
    }
}

pub const FLAP: [Tone; 2] = [
    tone(0.0, 420.0, 0.10, Wave::Sine, 0.22),
    tone(0.05, 520.0, 0.10, Wave::Sine, 0.16),
];

pub const EAT: [Tone; 3] = [
    tone(0.0, 600.0, 0.08, Wave::Square, 0.20),
    tone(0.0, 850.0, 0.08, Wave::Square, 0.20),
    tone(0.08, 1050.0, 0.12, Wave::Square, 0.24),
];

pub const CRASH: [Tone; 3] = [
    tone(0.0, 200.0, 0.30, Wave::Saw, 0.40),
    tone(0.10, 150.0, 0.30, Wave::Saw, 0.30),
    tone(0.20, 100.0, 0.40, Wave::Saw, 0.20),
];

/// Exponential ramp from `vol` down to [`TAIL_GAIN`] as `progress` goes 0..1.
fn envelope(vol: f32, progress: f32) -> f32 {
    vol * (TAIL_GAIN / vol).powf(progress)
}

fn oscillator(wave: Wave, freq: f32) -> Box<dyn AudioUnit> {
    match wave {
        Wave::Sine => Box::new(sine_hz::<f32>(freq)),
        Wave::Square => Box::new(square_hz(freq)),
        Wave::Saw => Box::new(saw_hz(freq)),
    }
}

/// Mixes a cue down to mono samples at [`SAMPLE_RATE`].
pub fn render_cue(tones: &[Tone]) -> Vec<f32> {
    let sr = SAMPLE_RATE as f32;
    let len = tones
        .iter()
        .map(|t| ((t.at + t.dur) * sr).ceil() as usize)
        .max()
        .unwrap_or(0);
    let mut out = vec![0.0; len];

    for t in tones {
        let mut osc = oscillator(t.wave, t.freq);
        osc.set_sample_rate(SAMPLE_RATE as f64);
        let start = (t.at * sr) as usize;
        let n = (t.dur * sr) as usize;
        for (i, s) in out.iter_mut().skip(start).take(n).enumerate() {
            *s += osc.get_mono() * envelope(t.vol, i as f32 / n as f32);
        }
    }
    out
}

// ── Playback ────────────────────────────────────────────────────────────────

struct Cues {
    flap: Vec<f32>,
    eat: Vec<f32>,
    crash: Vec<f32>,
}

/// Fire-and-forget sound effects. Every trigger is a no-op until [`Sfx::init`]
/// has opened an output device.
pub struct Sfx {
    stream: Option<OutputStream>,
    cues: Option<Cues>,
}

impl Default for Sfx {
    fn default() -> Self {
        Self::new()
    }
}

impl Sfx {
    pub fn new() -> Self {
        Self {
            stream: None,
            cues: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.stream.is_some()
    }

    pub fn init(&mut self) {
        if self.stream.is_some() {
            return;
        }
        match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                stream.log_on_drop(false);
                self.stream = Some(stream);
                self.cues = Some(Cues {
                    flap: render_cue(&FLAP),
                    eat: render_cue(&EAT),
                    crash: render_cue(&CRASH),
                });
                log::info!("audio output opened");
            }
            Err(e) => log::warn!("audio disabled: {e}"),
        }
    }

    fn play(&self, samples: impl FnOnce(&Cues) -> Vec<f32>) {
        let (Some(stream), Some(cues)) = (&self.stream, &self.cues) else {
            return;
        };
        let sink = Sink::connect_new(stream.mixer());
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples(cues)));
        sink.detach(); // Play in background
    }

    pub fn flap(&self) {
        self.play(|c| c.flap.clone());
    }

    pub fn eat(&self) {
        self.play(|c| c.eat.clone());
    }

    pub fn crash(&self) {
        self.play(|c| c.crash.clone());
    }

    pub fn on_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::RunStarted => self.init(),
            GameEvent::Flapped => self.flap(),
            GameEvent::PickupCollected => self.eat(),
            GameEvent::Crashed => self.crash(),
        }
    }
}
