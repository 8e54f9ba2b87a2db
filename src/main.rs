//! Dobble entry point
//!
//! Loads the deck, then runs the game from terminal commands:
//! `click X Y`, `move X Y`, `tick`, `show`, `quit`. Input is read on a
//! separate thread; the loop waits for it with a timeout so the countdown
//! keeps ticking (and can end the game) while the player is idle.
//!
//! Exit status: 0 after a game, 2 card file missing, 3 card file malformed,
//! 4 card file violates the one-shared-icon rule, 1 anything else.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};

use dobble::platform::{Command, TickClock, parse_command};
use dobble::renderer::{Renderer, TextRenderer, render_scene};
use dobble::sim::{GamePhase, GameState, handle_input, on_timer_tick};
use dobble::{DeckError, Settings, load_deck};

/// Command-line options
#[derive(Debug, Default)]
struct Args {
    deck: Option<PathBuf>,
    config: Option<PathBuf>,
    seed: Option<u64>,
    save_config: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => {
                args.config = Some(it.next().context("--config needs a path")?.into());
            }
            "--seed" => {
                let value = it.next().context("--seed needs a number")?;
                args.seed = Some(value.parse().with_context(|| format!("bad seed `{}`", value))?);
            }
            "--save-config" => args.save_config = true,
            flag if flag.starts_with("--") => bail!("unknown option `{}`", flag),
            path => {
                if args.deck.is_some() {
                    bail!("only one card file may be given");
                }
                args.deck = Some(path.into());
            }
        }
    }
    Ok(args)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Read stdin on its own thread so the countdown keeps ticking while the
/// player is idle. The channel closes on end of input.
fn spawn_line_reader() -> Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn draw<R: Renderer>(settings: &Settings, state: &GameState, renderer: &mut R) {
    if settings.show_frames {
        render_scene(state, renderer);
    }
}

fn run() -> Result<()> {
    let args = parse_args()?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(Settings::FILE_NAME));
    let mut settings = Settings::load(&config_path);
    if let Some(deck) = args.deck {
        settings.deck_path = deck;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if args.save_config {
        settings
            .save(&config_path)
            .with_context(|| format!("saving settings to {}", config_path.display()))?;
    }

    let deck = load_deck(&settings.deck_path)?;
    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut state = GameState::new(deck, seed).context("cannot start a game with this deck")?;

    let mut renderer = TextRenderer::new(io::stdout().lock());
    eprintln!("Commands: click X Y | move X Y | tick | show | quit");
    draw(&settings, &state, &mut renderer);

    let mut clock = TickClock::new(Duration::from_millis(settings.tick_interval_ms()));
    let mut last = Instant::now();
    let lines = spawn_line_reader();
    let mut input_open = true;

    loop {
        // Wait for a command, but never past the next countdown tick
        let timeout = clock.until_next_tick().saturating_sub(last.elapsed());
        let line = if input_open {
            match lines.recv_timeout(timeout) {
                Ok(line) => Some(line.context("reading terminal input")?),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => {
                    input_open = false;
                    None
                }
            }
        } else if state.phase == GamePhase::Running {
            // No more input: let the countdown run out
            thread::sleep(timeout);
            None
        } else {
            break;
        };

        let now = Instant::now();
        let due = clock.advance(now - last);
        last = now;
        if state.phase == GamePhase::Running && due > 0 {
            for _ in 0..due {
                if on_timer_tick(&mut state).game_over() {
                    break;
                }
            }
            draw(&settings, &state, &mut renderer);
        }
        if state.is_over() {
            break;
        }

        let Some(line) = line else {
            continue;
        };
        match parse_command(&line) {
            None => eprintln!("Unknown command `{}`", line.trim()),
            Some(Command::Quit) => break,
            Some(Command::Show) => render_scene(&state, &mut renderer),
            Some(Command::Input(input)) => {
                let was_idle = state.phase == GamePhase::Idle;
                let response = handle_input(&mut state, input);
                if was_idle && state.phase != GamePhase::Idle {
                    clock.reset();
                }
                if response.redraw {
                    draw(&settings, &state, &mut renderer);
                }
            }
        }
        if state.is_over() {
            break;
        }
    }

    drop(renderer);
    let summary = state.summary();
    if state.is_over() {
        println!("Final score: {}\nThanks for playing!", summary.score);
    } else {
        println!("Game abandoned with score {}", summary.score);
    }
    if settings.json_summary {
        println!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Dobble starting...");

    let code = match run() {
        Ok(()) => 0,
        Err(err) => match err.downcast_ref::<DeckError>() {
            Some(deck_err) => {
                log::error!("{}", deck_err);
                eprintln!("dobble: {}", deck_err);
                deck_err.exit_code()
            }
            None => {
                eprintln!("dobble: {:#}", err);
                1
            }
        },
    };
    std::process::exit(code);
}
