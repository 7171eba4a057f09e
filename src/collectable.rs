//! Power-ups dropped by enemies, their lifetime, and the timed effects they
//! grant.  Timed effects are plain frame counters in
//! [`ActiveEffects`](crate::entities::ActiveEffects), so they freeze with the
//! simulation and replay identically.

use rand::Rng;

use crate::collision::overlaps;
use crate::compute::roll;
use crate::config::GameConfig;
use crate::entities::{Collectable, CollectableKind, GameState};

/// A fresh collectable centred on `(cx, cy)`.
pub fn new_collectable(kind: CollectableKind, cx: f32, cy: f32, config: &GameConfig) -> Collectable {
    let size = config.collectable_size;
    Collectable {
        kind,
        x: cx - size / 2.0,
        y: cy - size / 2.0,
        width: size,
        height: size,
        ttl: config.collectable_ttl,
        active: true,
    }
}

/// Which kind to drop.  A player low on health always gets a health pack;
/// otherwise every kind is equally likely.
pub fn choose_drop(state: &GameState, rng: &mut impl Rng) -> CollectableKind {
    if state.player.health.current() < state.config.low_health_threshold {
        CollectableKind::Health
    } else {
        CollectableKind::ALL[rng.gen_range(0..CollectableKind::ALL.len())]
    }
}

/// Roll for a drop where an enemy died.
pub fn maybe_drop(state: &mut GameState, cx: f32, cy: f32, rng: &mut impl Rng) {
    if !roll(rng, state.config.drop_chance) {
        return;
    }
    let kind = choose_drop(state, rng);
    tracing::debug!(?kind, "collectable dropped");
    let drop = new_collectable(kind, cx, cy, &state.config);
    state.collectables.push(drop);
}

/// Apply one pickup.  Timed effects restart at full duration.
pub fn apply_effect(state: &mut GameState, kind: CollectableKind) {
    let cfg = &state.config;
    match kind {
        CollectableKind::Health => state.player.health.heal(cfg.heal_amount),
        CollectableKind::Ammo => state.effects.double_shot = cfg.double_shot_frames,
        CollectableKind::Score => state.score = state.score.saturating_add(cfg.score_bonus),
        CollectableKind::Speed => {
            state.player.speed = cfg.player_boosted_speed;
            state.effects.speed_boost = cfg.speed_boost_frames;
        }
        CollectableKind::Ignite => {
            for enemy in &mut state.enemies {
                enemy.health.damage(cfg.ignite_damage);
            }
        }
        CollectableKind::Slowdown => {
            state.speed_multiplier = cfg.slowdown_multiplier;
            state.effects.slowdown = cfg.slowdown_frames;
        }
    }
}

/// Count down running effects and undo those that just ran out.
pub fn tick_effects(state: &mut GameState) {
    let effects = &mut state.effects;

    if effects.speed_boost > 0 {
        effects.speed_boost -= 1;
        if effects.speed_boost == 0 {
            state.player.speed = state.player.base_speed;
        }
    }
    if effects.slowdown > 0 {
        effects.slowdown -= 1;
        if effects.slowdown == 0 {
            state.speed_multiplier = 1.0;
        }
    }
    effects.double_shot = effects.double_shot.saturating_sub(1);
}

/// Step (3) of the frame: timers, pickups, expiry and cleanup.
pub fn update_collectables(state: &mut GameState) {
    tick_effects(state);

    for i in 0..state.collectables.len() {
        let item = &state.collectables[i];
        if !item.active {
            continue;
        }
        if overlaps(item, &state.player) {
            let kind = item.kind;
            state.collectables[i].active = false;
            tracing::debug!(?kind, "collectable picked up");
            apply_effect(state, kind);
            continue;
        }
        let item = &mut state.collectables[i];
        item.ttl = item.ttl.saturating_sub(1);
        if item.ttl == 0 {
            item.active = false;
        }
    }

    for i in (0..state.collectables.len()).rev() {
        if !state.collectables[i].active {
            state.collectables.swap_remove(i);
        }
    }
}
