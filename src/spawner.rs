//! Portals: where they sit, when they spawn enemies, how they die, and the
//! wave-clear check that brings in the boss.

use rand::Rng;

use crate::boss::spawn_boss;
use crate::collision::overlaps;
use crate::compute::{enemy_cap, spawn_period};
use crate::config::GameConfig;
use crate::entities::{Enemy, EnemyKind, GameState, Health, Portal};

/// `config.portal_count` portals near the right edge, spread evenly down
/// the world's height.
pub fn layout_portals(config: &GameConfig) -> Vec<Portal> {
    let n = config.portal_count;
    let size = config.portal_size;
    let x = config.world_width - size - config.portal_margin;
    (0..n)
        .map(|i| {
            let centre = (i + 1) as f32 * config.world_height / (n + 1) as f32;
            Portal {
                x,
                y: centre - size / 2.0,
                width: size,
                height: size,
                health: Health::full(config.portal_health),
                spawn_timer: 0,
            }
        })
        .collect()
}

/// A new enemy of uniformly random type, vertically centred on `portal`.
pub fn spawn_enemy(portal: &Portal, config: &GameConfig, rng: &mut impl Rng) -> Enemy {
    let kind = EnemyKind::ALL[rng.gen_range(0..EnemyKind::ALL.len())];
    let y = portal.y + portal.height / 2.0 - config.enemy_height / 2.0;
    Enemy::new(kind, portal.x, y, config)
}

/// Advance every portal's timer.  A portal whose timer reached the spawn
/// period produces one enemy if the enemy cap allows it; otherwise it keeps
/// waiting and tries again next frame.
pub fn update_portals(state: &mut GameState, rng: &mut impl Rng) {
    let period = spawn_period(&state.level);
    let cap = enemy_cap(&state.level);

    for i in 0..state.portals.len() {
        let portal = &mut state.portals[i];
        portal.spawn_timer = portal.spawn_timer.saturating_add(1);
        if portal.spawn_timer < period || state.enemies.len() >= cap {
            continue;
        }
        portal.spawn_timer = 0;
        let enemy = spawn_enemy(&state.portals[i], &state.config, rng);
        tracing::debug!(kind = enemy.kind.type_id(), portal = i, "enemy spawned");
        state.enemies.push(enemy);
    }
}

/// Player bullets against portals.  A bullet is spent on the first portal
/// it touches.  Destroyed portals award score and are removed.
pub fn resolve_portal_hits(state: &mut GameState) {
    let damage = state.config.bullet_damage;
    for bi in state.player_bullets.active_indices() {
        let Some(bullet) = state.player_bullets.get(bi) else {
            continue;
        };
        let hit = state
            .portals
            .iter_mut()
            .find(|p| !p.health.is_depleted() && overlaps(bullet, &**p));
        if let Some(portal) = hit {
            portal.health.damage(damage);
            state.player_bullets.deactivate(bi);
        }
    }

    // Reverse order so swap_remove never skips an element.
    for i in (0..state.portals.len()).rev() {
        if state.portals[i].health.is_depleted() {
            state.portals.swap_remove(i);
            state.score = state.score.saturating_add(state.config.portal_award);
            tracing::info!(remaining = state.portals.len(), "portal destroyed");
        }
    }
}

/// Both the enemy and the portal collections are empty.
pub fn wave_cleared(state: &GameState) -> bool {
    state.enemies.is_empty() && state.portals.is_empty()
}

/// Spawn the boss if the wave is cleared and no boss has appeared yet.
/// Returns true when this call spawned it.
pub fn try_spawn_boss(state: &mut GameState) -> bool {
    if state.boss_spawned || state.boss.is_some() || !wave_cleared(state) {
        return false;
    }
    let boss = spawn_boss(&state.config, &state.level);
    tracing::info!(health = boss.health.max(), "wave cleared; boss spawned");
    state.boss = Some(boss);
    state.boss_spawned = true;
    true
}
