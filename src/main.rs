mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use portal_shooter::compute::{init_state, tick};
use portal_shooter::config::GameConfig;
use portal_shooter::entities::{GameState, InputState, Level};

use display::Viewport;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

const DEFAULT_CONFIG_PATH: &str = "assets/game.toml";
const DEFAULT_LOG_PATH: &str = "portal_shooter.log";

// ── Held keys ─────────────────────────────────────────────────────────────────

/// Min frames between shots while Space is held.
const SHOOT_COOLDOWN: u32 = 10;

/// Frames a press or repeat event keeps a key down.  Terminals without
/// release events re-send repeats at 15 Hz or more, which refreshes the
/// entry well inside 8 frames.
const HOLD_WINDOW: u64 = 8;

/// Last frame each key was seen pressed.  Lets several keys count as held at
/// once even though the terminal delivers one event at a time.
#[derive(Default)]
struct HeldKeys {
    last_seen: HashMap<KeyCode, u64>,
}

impl HeldKeys {
    fn press(&mut self, code: KeyCode, frame: u64) {
        self.last_seen.insert(code, frame);
    }

    fn release(&mut self, code: &KeyCode) {
        self.last_seen.remove(code);
    }

    fn clear(&mut self) {
        self.last_seen.clear();
    }

    fn is_held(&self, code: &KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(code)
            .is_some_and(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    /// Identifiers of every still-fresh key the simulation understands.
    fn pressed_names(&self, frame: u64) -> Vec<&'static str> {
        self.last_seen
            .keys()
            .filter(|code| self.is_held(code, frame))
            .filter_map(key_name)
            .collect()
    }
}

/// Browser-style identifier for a terminal key, if the game cares about it.
fn key_name(code: &KeyCode) -> Option<&'static str> {
    match code {
        KeyCode::Up => Some("ArrowUp"),
        KeyCode::Down => Some("ArrowDown"),
        KeyCode::Left => Some("ArrowLeft"),
        KeyCode::Right => Some("ArrowRight"),
        KeyCode::Char('w') | KeyCode::Char('W') => Some("KeyW"),
        KeyCode::Char('a') | KeyCode::Char('A') => Some("KeyA"),
        KeyCode::Char('s') | KeyCode::Char('S') => Some("KeyS"),
        KeyCode::Char('d') | KeyCode::Char('D') => Some("KeyD"),
        _ => None,
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Logs go to a file: stdout is the game screen.
fn init_logging() {
    let path = std::env::var("PORTAL_SHOOTER_LOG").unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string());
    let Ok(file) = File::create(&path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Level),
    Quit,
}

/// Block until a difficulty is picked or the player quits.
fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    let (width, height) = terminal::size()?;
    display::draw_menu(out, Viewport { width, height })?;

    while let Ok(event) = rx.recv() {
        let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = event else {
            continue;
        };
        let choice = match code {
            KeyCode::Char('1') => MenuResult::Start(Level::Easy),
            KeyCode::Char('2') => MenuResult::Start(Level::Medium),
            KeyCode::Char('3') => MenuResult::Start(Level::Hard),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => MenuResult::Quit,
            _ => continue,
        };
        return Ok(choice);
    }
    // Input thread gone: nothing left to read.
    Ok(MenuResult::Quit)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Menu,
}

/// One session at a fixed frame rate until the player quits or asks for the
/// menu.  Restarting keeps the chosen level and config.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<LoopExit> {
    let mut rng = thread_rng();
    let mut keys = HeldKeys::default();
    let mut shoot_cooldown: u32 = 0;
    let mut frame: u64 = 0;

    loop {
        let started = Instant::now();
        frame += 1;

        for event in rx.try_iter() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
                continue;
            };
            match kind {
                KeyEventKind::Release => keys.release(&code),
                KeyEventKind::Repeat => keys.press(code, frame),
                KeyEventKind::Press => {
                    keys.press(code, frame);
                    let quit = matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
                        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL));
                    if quit {
                        return Ok(LoopExit::Quit);
                    }
                    if state.is_over() {
                        match code {
                            KeyCode::Char('r') | KeyCode::Char('R') => {
                                tracing::info!(level = ?state.level, "restart");
                                *state = init_state(state.level, state.config.clone());
                                keys.clear();
                            }
                            KeyCode::Char('m') | KeyCode::Char('M') => return Ok(LoopExit::Menu),
                            _ => {}
                        }
                    }
                }
            }
        }

        let fire = shoot_cooldown == 0 && keys.is_held(&KeyCode::Char(' '), frame);
        if fire {
            shoot_cooldown = SHOOT_COOLDOWN;
        }
        shoot_cooldown = shoot_cooldown.saturating_sub(1);

        let input = InputState::from_pressed(keys.pressed_names(frame), fire);
        *state = tick(state, &input, &mut rng);

        let (width, height) = terminal::size()?;
        display::render(out, state, Viewport { width, height })?;

        if let Some(rest) = FRAME.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
}

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Raw mode plus alternate screen for as long as it lives.  Dropping it puts
/// the terminal back, also when the game loop bails out with an error.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        // Kitty-protocol terminals report key releases; others fall back to
        // the hold window.
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        Ok(TerminalGuard { keyboard_enhanced })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Forward terminal events on a dedicated thread so the frame loop only ever
/// polls the channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });
    rx
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    let config_path =
        std::env::var("PORTAL_SHOOTER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = GameConfig::load_or_default(&config_path);

    let mut out = BufWriter::new(stdout());
    let _guard = TerminalGuard::enter(&mut out)?;
    let rx = spawn_input_thread();

    run(&mut out, &rx, &config)
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: &GameConfig) -> std::io::Result<()> {
    while let MenuResult::Start(level) = show_menu(out, rx)? {
        tracing::info!(?level, "new game");
        let mut state = init_state(level, config.clone());
        if let LoopExit::Quit = game_loop(out, &mut state, rx)? {
            break;
        }
    }
    Ok(())
}
