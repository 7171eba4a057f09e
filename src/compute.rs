//! Game-logic entry points.
//!
//! Public transitions take an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and return a brand-new
//! `GameState`.  Internally each frame works on one owned copy through
//! `&mut` helpers.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::boss::run_boss_phase;
use crate::collectable::{maybe_drop, update_collectables};
use crate::collision::overlaps;
use crate::config::{EdgePolicy, GameConfig};
use crate::entities::{
    ActiveEffects, Facing, GameState, GameStatus, InputState, Level, Player,
};
use crate::pool::BulletPool;
use crate::spawner::{layout_portals, resolve_portal_hits, try_spawn_boss, update_portals};

// ── Difficulty tables ────────────────────────────────────────────────────────

pub fn boss_max_health(level: &Level) -> f32 {
    match level {
        Level::Easy => 500.0,
        Level::Medium => 800.0,
        Level::Hard => 1200.0,
    }
}

/// Frames between two spawns of the same portal.
pub fn spawn_period(level: &Level) -> u32 {
    match level {
        Level::Easy => 210,
        Level::Medium => 180,
        Level::Hard => 150,
    }
}

/// Portals stop spawning while this many enemies are alive.
pub fn enemy_cap(level: &Level) -> usize {
    match level {
        Level::Easy => 6,
        Level::Medium => 8,
        Level::Hard => 10,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: player on the left, a full row of portals
/// on the right, no enemies and no boss.
pub fn init_state(level: Level, config: GameConfig) -> GameState {
    if let Err(e) = config.validate() {
        tracing::warn!("{e}; probabilities will be clamped to [0, 1]");
    }
    let player_bullets = BulletPool::new(
        config.player_pool_capacity,
        config.bullet_width,
        config.bullet_height,
        config.bullet_speed,
    );
    let boss_bullets = BulletPool::new(
        config.boss_pool_capacity,
        config.boss_bullet_width,
        config.boss_bullet_height,
        config.boss_bullet_speed,
    );
    GameState {
        player: Player::new(&config),
        enemies: Vec::new(),
        portals: layout_portals(&config),
        player_bullets,
        boss_bullets,
        collectables: Vec::new(),
        boss: None,
        boss_spawned: false,
        effects: ActiveEffects::default(),
        speed_multiplier: 1.0,
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        level,
        config,
    }
}

/// Bernoulli roll that tolerates out-of-range probabilities: values are
/// clamped to `[0, 1]` and NaN never succeeds.
pub(crate) fn roll(rng: &mut impl Rng, probability: f64) -> bool {
    if probability.is_nan() {
        return false;
    }
    rng.gen_bool(probability.clamp(0.0, 1.0))
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Move the player by its speed along every held direction.  Both axes are
/// clamped to the world; once the boss exists the player also stays left of
/// the boss, wherever it currently is.
pub fn move_player(state: &GameState, input: &InputState) -> GameState {
    let mut next = state.clone();
    apply_movement(&mut next, input);
    next
}

fn apply_movement(state: &mut GameState, input: &InputState) {
    let cfg = &state.config;
    let p = &mut state.player;

    if input.up {
        p.y -= p.speed;
    }
    if input.down {
        p.y += p.speed;
    }
    if input.left {
        p.x -= p.speed;
        p.facing = Facing::Left;
    }
    if input.right {
        p.x += p.speed;
        p.facing = Facing::Right;
    }

    let mut max_x = cfg.world_width - p.width;
    if let Some(boss) = &state.boss {
        max_x = max_x.min(boss.x - p.width);
    }
    p.x = p.x.min(max_x).max(0.0);
    p.y = p.y.clamp(0.0, (cfg.world_height - p.height).max(0.0));
}

/// Fire from the player's facing side.  With double shot active two bullets
/// leave at once.  Shots that find no free pool slot are dropped.
pub fn player_shoot(state: &GameState) -> GameState {
    let mut next = state.clone();
    apply_shot(&mut next);
    next
}

fn apply_shot(state: &mut GameState) {
    let cfg = &state.config;
    let p = &state.player;
    let x = match p.facing {
        Facing::Right => p.x + p.width,
        Facing::Left => p.x - cfg.bullet_width,
    };
    let y = p.y + p.height / 2.0 - cfg.bullet_height / 2.0;

    if state.effects.double_shot > 0 {
        let spread = cfg.double_shot_spread;
        state.player_bullets.acquire(x, y - spread, p.facing);
        state.player_bullets.acquire(x, y + spread, p.facing);
    } else {
        state.player_bullets.acquire(x, y, p.facing);
    }
}

// ── Per-frame tick (RNG injected) ─────────────────────────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism.  A finished game is returned unchanged.
pub fn tick(state: &GameState, input: &InputState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    if !next.is_over() {
        advance_frame(&mut next, input, rng);
    }
    next
}

/// Advance by `dt` whole frames holding the same input.  The fire trigger
/// only applies to the first frame.  Stops early once the game is over.
pub fn step(state: &GameState, input: &InputState, dt: u32, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    let mut input = *input;
    for _ in 0..dt {
        if next.is_over() {
            break;
        }
        advance_frame(&mut next, &input, rng);
        input.fire = false;
    }
    next
}

fn advance_frame(state: &mut GameState, input: &InputState, rng: &mut impl Rng) {
    state.frame += 1;

    // ── 1. Player ─────────────────────────────────────────────────────────────
    apply_movement(state, input);
    if input.fire {
        apply_shot(state);
    }

    // ── 2. Bullets ────────────────────────────────────────────────────────────
    let world_width = state.config.world_width;
    state.player_bullets.update(world_width);
    state.boss_bullets.update(world_width);

    // ── 3. Collectables and timed effects ─────────────────────────────────────
    update_collectables(state);

    // ── 4/5. Wave or boss ─────────────────────────────────────────────────────
    if state.boss.is_none() {
        run_wave_phase(state, rng);
        try_spawn_boss(state);
    } else {
        run_boss_phase(state, rng);
    }

    // ── 6. Terminal check ─────────────────────────────────────────────────────
    if state.status == GameStatus::Playing && state.player.health.is_depleted() {
        tracing::info!(score = state.score, frame = state.frame, "player defeated");
        state.status = GameStatus::Defeat;
    }
}

// ── Wave phase ───────────────────────────────────────────────────────────────

/// Step (4) of the frame: enemies move, hurt the player on contact, take
/// bullet hits and die; then portals spawn and take hits.
fn run_wave_phase(state: &mut GameState, rng: &mut impl Rng) {
    advance_enemies(state);
    apply_contact_damage(state);
    resolve_enemy_hits(state);
    remove_dead_enemies(state, rng);
    update_portals(state, rng);
    resolve_portal_hits(state);
}

fn advance_enemies(state: &mut GameState) {
    let cfg = &state.config;
    let multiplier = state.speed_multiplier;

    for i in (0..state.enemies.len()).rev() {
        let enemy = &mut state.enemies[i];
        enemy.x -= enemy.kind.stats().base_speed * multiplier;
        enemy.phase += cfg.wave_frequency;
        enemy.y = enemy.base_y + cfg.wave_amplitude * enemy.phase.sin();

        if enemy.x + enemy.width < 0.0 {
            match cfg.enemy_edge {
                EdgePolicy::Despawn => {
                    state.enemies.swap_remove(i);
                }
                EdgePolicy::Wrap => enemy.x = cfg.world_width,
            }
        }
    }
}

/// Every overlapping enemy drains a little health each frame.
fn apply_contact_damage(state: &mut GameState) {
    let touching = state
        .enemies
        .iter()
        .filter(|e| overlaps(*e, &state.player))
        .count();
    state
        .player
        .health
        .damage(state.config.enemy_contact_damage * touching as f32);
}

/// Each active bullet hits at most one enemy and is spent doing so.
fn resolve_enemy_hits(state: &mut GameState) {
    let damage = state.config.bullet_damage;
    for bi in state.player_bullets.active_indices() {
        let Some(bullet) = state.player_bullets.get(bi) else {
            continue;
        };
        let hit = state
            .enemies
            .iter_mut()
            .find(|e| !e.health.is_depleted() && overlaps(bullet, &**e));
        if let Some(enemy) = hit {
            enemy.health.damage(damage);
            state.player_bullets.deactivate(bi);
        }
    }
}

fn remove_dead_enemies(state: &mut GameState, rng: &mut impl Rng) {
    for i in (0..state.enemies.len()).rev() {
        if !state.enemies[i].health.is_depleted() {
            continue;
        }
        let enemy = state.enemies.swap_remove(i);
        state.score = state.score.saturating_add(enemy.kind.stats().award);
        let cx = enemy.x + enemy.width / 2.0;
        let cy = enemy.y + enemy.height / 2.0;
        maybe_drop(state, cx, cy, rng);
    }
}
