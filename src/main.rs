use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute, terminal,
};
use flappy_os::config::FRAME;
use flappy_os::input::{self, Input};
use flappy_os::render::{GameOverDelay, Layout, Renderer};
use flappy_os::sfx::Sfx;
use flappy_os::{Error, Game, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, stdout};
use std::time::{Duration, Instant};

const LOG_FILE: &str = "flappy-os.log";

/// Logging is opt-in through `RUST_LOG` and goes to a file, since stderr is the screen.
fn init_logging() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = std::fs::File::create(LOG_FILE).map_err(|source| Error::LogFile {
        path: LOG_FILE.to_string(),
        source,
    })?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn game_rng() -> Result<StdRng> {
    match std::env::var("FLAPPY_OS_SEED") {
        Ok(s) => {
            let seed: u64 = s.trim().parse().map_err(|_| Error::Seed(s.clone()))?;
            log::info!("seeded rng with {seed}");
            Ok(StdRng::seed_from_u64(seed))
        }
        Err(_) => Ok(StdRng::from_os_rng()),
    }
}

fn run(out: &mut io::Stdout) -> Result<()> {
    let mut rng = game_rng()?;
    let (cols, rows) = terminal::size()?;
    let mut renderer = Renderer::new(Layout::from_terminal(cols, rows));
    let mut game = Game::new(renderer.layout().field());
    let mut sfx = Sfx::new();
    let mut game_over_delay = GameOverDelay::default();

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match input::map_event(&event::read()?) {
                Some(Input::Quit) => return Ok(()),
                Some(Input::Resize(c, r)) => {
                    log::debug!("resize to {c}x{r}");
                    renderer.resize(Layout::from_terminal(c, r));
                }
                Some(Input::Command(cmd)) => game.handle(cmd, renderer.layout().field(), &mut rng),
                None => {}
            }
        }

        // Update
        game.tick(renderer.layout().field(), &mut rng);
        for ev in game.drain_events() {
            sfx.on_event(ev);
        }
        let show_game_over = game_over_delay.observe(game.phase(), Instant::now());

        // Render
        renderer.draw(&game, show_game_over);
        renderer.render(out)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

fn main() -> Result<()> {
    init_logging()?;

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        EnableMouseCapture,
    )?;

    let result = run(&mut out);

    execute!(
        out,
        DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()?;
    result
}
