//! Draw calls for one frame.
//!
//! The core never touches a drawing surface.  [`draw_list`] turns the state
//! into an ordered list of [`DrawCommand`]s (back to front) that any
//! front-end can replay: the terminal renderer in the binary, or a test.

use crate::collision::{Bounds, Rect};
use crate::entities::{Boss, BossPhase, Charge, CollectableKind, EnemyKind, Facing, GameState, Health};

/// Which image a sprite stands for.  Front-ends map these to their own
/// assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Player,
    Enemy(EnemyKind),
    Portal,
    Boss,
    PlayerBullet,
    BossBullet,
    Collectable(CollectableKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarColor {
    Green,
    Red,
    Purple,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Sprite {
        sprite: Sprite,
        rect: Rect,
        flip_x: bool,
        /// 1.0 is fully opaque.
        opacity: f32,
    },
    HealthBar {
        /// Outline of the full bar.
        rect: Rect,
        /// Filled share in `[0, 1]`.
        fraction: f32,
        color: BarColor,
    },
}

const BAR_HEIGHT: f32 = 6.0;
const BAR_GAP: f32 = 12.0;
const SHAKE_PIXELS: f32 = 4.0;

/// Everything to draw this frame, back to front: portals, enemies,
/// collectables, boss, bullets, player.
pub fn draw_list(state: &GameState) -> Vec<DrawCommand> {
    let mut cmds = Vec::new();

    for portal in &state.portals {
        push_sprite(&mut cmds, Sprite::Portal, portal.rect(), false, 1.0);
        push_bar(&mut cmds, portal.rect(), &portal.health, BarColor::Purple);
    }
    for enemy in &state.enemies {
        push_sprite(&mut cmds, Sprite::Enemy(enemy.kind), enemy.rect(), false, 1.0);
        push_bar(&mut cmds, enemy.rect(), &enemy.health, BarColor::Red);
    }
    for item in state.collectables.iter().filter(|c| c.active) {
        push_sprite(&mut cmds, Sprite::Collectable(item.kind), item.rect(), false, 1.0);
    }
    if let Some(boss) = &state.boss {
        draw_boss(&mut cmds, boss);
    }
    for bullet in state.player_bullets.active() {
        push_sprite(&mut cmds, Sprite::PlayerBullet, bullet.rect(), false, 1.0);
    }
    for bullet in state.boss_bullets.active() {
        push_sprite(&mut cmds, Sprite::BossBullet, bullet.rect(), false, 1.0);
    }

    let p = &state.player;
    push_sprite(&mut cmds, Sprite::Player, p.rect(), p.facing == Facing::Left, 1.0);
    push_bar(&mut cmds, p.rect(), &p.health, BarColor::Green);

    cmds
}

fn draw_boss(cmds: &mut Vec<DrawCommand>, boss: &Boss) {
    let (dx, opacity) = boss_animation(boss);
    if opacity <= 0.0 {
        return;
    }
    let mut rect = boss.rect();
    rect.x += dx;
    push_sprite(cmds, Sprite::Boss, rect, false, opacity);
    if !boss.is_dying() {
        push_bar(cmds, boss.rect(), &boss.health, BarColor::Red);
    }
}

/// Horizontal shake offset and opacity for the boss this frame.  The shake
/// is a function of the phase's frame count, so replays draw identically.
pub fn boss_animation(boss: &Boss) -> (f32, f32) {
    let shake = if boss.phase_frames % 2 == 0 {
        SHAKE_PIXELS
    } else {
        -SHAKE_PIXELS
    };
    match boss.phase {
        BossPhase::Normal | BossPhase::Charging(Charge::Dash { .. }) => (0.0, 1.0),
        BossPhase::Charging(Charge::Telegraph { .. }) => (shake, 1.0),
        BossPhase::Dying { frames_left } => {
            let total = (boss.phase_frames + frames_left).max(1) as f32;
            (shake, frames_left as f32 / total)
        }
        BossPhase::Victory => (0.0, 0.0),
    }
}

fn push_sprite(cmds: &mut Vec<DrawCommand>, sprite: Sprite, rect: Rect, flip_x: bool, opacity: f32) {
    cmds.push(DrawCommand::Sprite {
        sprite,
        rect,
        flip_x,
        opacity,
    });
}

fn push_bar(cmds: &mut Vec<DrawCommand>, owner: Rect, health: &Health, color: BarColor) {
    cmds.push(DrawCommand::HealthBar {
        rect: Rect::new(owner.x, owner.y - BAR_GAP, owner.width, BAR_HEIGHT),
        fraction: health.fraction().clamp(0.0, 1.0),
        color,
    });
}
