//! Terminal front-end: every byte written to the screen goes through here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module replays the core's
//! draw list, scaled from world pixels down to terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use portal_shooter::collision::Rect;
use portal_shooter::entities::{CollectableKind, EnemyKind, GameState, GameStatus, Level};
use portal_shooter::render::{draw_list, BarColor, DrawCommand, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Green;
const C_HUD_EFFECT: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_PORTAL: Color = Color::Magenta;
const C_BOSS: Color = Color::Red;
const C_BOSS_FADED: Color = Color::DarkRed;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_BOSS: Color = Color::Magenta;
const C_COLLECTABLE: Color = Color::Yellow;
const C_BAR_EMPTY: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

const CONTROLS: &str = "WASD / arrows : Move   SPACE : Shoot   Q : Quit";

/// Terminal size in cells.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// Cell rectangle inside the bordered play area.
struct Cells {
    col: u16,
    row: u16,
    cols: u16,
    rows: u16,
}

impl Viewport {
    /// Map a world rectangle onto the play area (columns 1..w-1, rows 2..h-2).
    /// Every visible box covers at least one cell.
    fn cells(&self, rect: Rect, state: &GameState) -> Option<Cells> {
        let play_w = self.width.saturating_sub(2) as f32;
        let play_h = self.height.saturating_sub(4) as f32;
        let sx = play_w / state.config.world_width;
        let sy = play_h / state.config.world_height;

        let left = (rect.x * sx).floor().max(0.0);
        let top = (rect.y * sy).floor().max(0.0);
        let right = (rect.right() * sx).ceil().min(play_w);
        let bottom = (rect.bottom() * sy).ceil().min(play_h);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Cells {
            col: 1 + left as u16,
            row: 2 + top as u16,
            cols: (right - left) as u16,
            rows: (bottom - top) as u16,
        })
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    for cmd in draw_list(state) {
        draw_command(out, &cmd, state, view)?;
    }

    draw_controls_hint(out, view)?;

    if state.status != GameStatus::Playing {
        draw_game_over(out, state, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Difficulty menu ───────────────────────────────────────────────────────────

const MENU_ENTRIES: [(char, &str, Color, &str); 3] = [
    ('1', "Easy", Color::Green, "slow portals, 500 HP boss"),
    ('2', "Medium", Color::Yellow, "800 HP boss"),
    ('3', "Hard", Color::Red, "crowded skies, 1200 HP boss"),
];

/// Title screen with the three difficulty choices.
pub fn draw_menu<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mid = view.height / 2;
    let left = (view.width / 2).saturating_sub(18);

    print_centered(out, view, mid.saturating_sub(6), "◎  PORTAL  SHOOTER  ◎", Color::Cyan)?;
    print_centered(out, view, mid.saturating_sub(4), "Choose a difficulty", Color::White)?;

    for (row, (key, name, color, blurb)) in (mid.saturating_sub(2)..).zip(MENU_ENTRIES) {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("{key})  ")))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(format!("{name:<7}")))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!(" {blurb}")))?;
    }

    print_centered(out, view, mid + 2, "Close every portal, then take down the boss.", C_HINT)?;
    print_centered(out, view, mid + 4, CONTROLS, C_HINT)?;

    out.queue(style::ResetColor)?;
    out.flush()
}

fn print_centered<W: Write>(
    out: &mut W,
    view: Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let snap = state.snapshot();

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", snap.score)))?;

    let (level_str, level_color) = match state.level {
        Level::Easy => ("[ EASY ]", Color::Green),
        Level::Medium => ("[ MEDIUM ]", Color::Yellow),
        Level::Hard => ("[ HARD ]", Color::Red),
    };
    let lx = (view.width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(level_color))?;
    out.queue(Print(level_str))?;

    let fx = &state.effects;
    let mut tags = String::new();
    for (frames, tag) in [
        (fx.speed_boost, "SPEED"),
        (fx.slowdown, "SLOW"),
        (fx.double_shot, "DOUBLE"),
    ] {
        if frames > 0 {
            tags.push_str(&format!("[{} {:>2}s] ", tag, frames / 60 + 1));
        }
    }
    let health_str = format!("HP:{:>3}", snap.player_health);
    let right_len = tags.chars().count() + health_str.chars().count();
    let rx = view.width.saturating_sub(right_len as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    if !tags.is_empty() {
        out.queue(style::SetForegroundColor(C_HUD_EFFECT))?;
        out.queue(Print(&tags))?;
    }
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&health_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn sprite_style(sprite: Sprite, flip_x: bool, opacity: f32) -> (char, Color) {
    match sprite {
        Sprite::Player if flip_x => ('◀', C_PLAYER),
        Sprite::Player => ('▶', C_PLAYER),
        Sprite::Enemy(EnemyKind::Scout) => ('▒', Color::Green),
        Sprite::Enemy(EnemyKind::Raider) => ('▓', Color::Yellow),
        Sprite::Enemy(EnemyKind::Juggernaut) => ('█', Color::DarkYellow),
        Sprite::Portal => ('◎', C_PORTAL),
        Sprite::Boss if opacity < 0.5 => ('░', C_BOSS_FADED),
        Sprite::Boss => ('█', C_BOSS),
        Sprite::PlayerBullet => ('─', C_BULLET_PLAYER),
        Sprite::BossBullet => ('•', C_BULLET_BOSS),
        Sprite::Collectable(kind) => {
            let glyph = match kind {
                CollectableKind::Health => '♥',
                CollectableKind::Ammo => '‼',
                CollectableKind::Score => '$',
                CollectableKind::Speed => '»',
                CollectableKind::Ignite => '✸',
                CollectableKind::Slowdown => '◷',
            };
            (glyph, C_COLLECTABLE)
        }
    }
}

fn draw_command<W: Write>(
    out: &mut W,
    cmd: &DrawCommand,
    state: &GameState,
    view: Viewport,
) -> std::io::Result<()> {
    match *cmd {
        DrawCommand::Sprite {
            sprite,
            rect,
            flip_x,
            opacity,
        } => {
            let Some(cells) = view.cells(rect, state) else {
                return Ok(());
            };
            let (glyph, color) = sprite_style(sprite, flip_x, opacity);
            let line: String = std::iter::repeat(glyph).take(cells.cols as usize).collect();
            out.queue(style::SetForegroundColor(color))?;
            for r in 0..cells.rows {
                out.queue(cursor::MoveTo(cells.col, cells.row + r))?;
                out.queue(Print(&line))?;
            }
        }
        DrawCommand::HealthBar {
            rect,
            fraction,
            color,
        } => {
            let Some(cells) = view.cells(rect, state) else {
                return Ok(());
            };
            let filled = (cells.cols as f32 * fraction).round() as usize;
            let empty = (cells.cols as usize).saturating_sub(filled);
            let bar_color = match color {
                BarColor::Green => Color::Green,
                BarColor::Red => Color::Red,
                BarColor::Purple => Color::Magenta,
            };
            out.queue(cursor::MoveTo(cells.col, cells.row))?;
            out.queue(style::SetForegroundColor(bar_color))?;
            out.queue(Print("━".repeat(filled)))?;
            out.queue(style::SetForegroundColor(C_BAR_EMPTY))?;
            out.queue(Print("─".repeat(empty)))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let (title, color) = match state.status {
        GameStatus::Victory => ("║      VICTORY!      ║", Color::Green),
        _ => ("║     GAME  OVER     ║", Color::Red),
    };
    let top = (view.height / 2).saturating_sub(2);

    print_centered(out, view, top, "╔════════════════════╗", color)?;
    print_centered(out, view, top + 1, title, color)?;
    print_centered(out, view, top + 2, "╚════════════════════╝", color)?;
    print_centered(out, view, top + 3, &format!("Final Score: {:>6}", state.score), Color::Yellow)?;
    print_centered(out, view, top + 4, "R - Restart  M - Menu  Q - Quit", Color::White)?;
    Ok(())
}
