//! The boss encounter.
//!
//! ```text
//!   Normal ──(random roll, cooldown 0)──▶ Charging ──(back home)──▶ Normal
//!     │                                      │
//!     └──────────(health ≤ 0, once)──────────┴──▶ Dying ──(timer)──▶ Victory
//! ```
//!
//! [`update_boss`] only moves the boss and decides what it wants to do.
//! Effects on the rest of the session (bullets, score, victory) are handed
//! back in a [`BossOutcome`] and applied by [`run_boss_phase`], so the boss
//! borrow never overlaps the rest of the state.

use rand::Rng;

use crate::collision::overlaps;
use crate::compute::{boss_max_health, roll};
use crate::config::GameConfig;
use crate::entities::{Boss, BossPhase, Charge, Facing, GameState, GameStatus, Health, Level};

/// What the boss did this frame that the session has to react to.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BossOutcome {
    /// Muzzle position (left edge, vertical centre) of a shot fired this frame.
    pub shot: Option<(f32, f32)>,
    /// The boss entered Dying during this update.
    pub defeated: bool,
    /// The death animation finished.
    pub victory: bool,
}

/// The boss at its home position: right side of the world, vertically
/// centred, with a full charge cooldown.
pub fn spawn_boss(config: &GameConfig, level: &Level) -> Boss {
    let home_x = config.world_width - config.boss_width - config.boss_margin;
    let y = config.world_height / 2.0 - config.boss_height / 2.0;
    Boss {
        x: home_x,
        y,
        width: config.boss_width,
        height: config.boss_height,
        home_x,
        health: Health::full(boss_max_health(level)),
        phase: BossPhase::Normal,
        target_y: y,
        retarget_timer: 0,
        shoot_timer: 0,
        charge_cooldown: config.charge_cooldown,
        phase_frames: 0,
    }
}

/// Below the enrage threshold the boss charges more often and faster.
pub fn is_enraged(boss: &Boss, config: &GameConfig) -> bool {
    boss.health.fraction() < config.enrage_threshold
}

/// Move the boss into Dying.  Does nothing if it is already dying or dead.
/// Returns true when the transition happened.
pub fn enter_dying(boss: &mut Boss, config: &GameConfig) -> bool {
    if boss.is_dying() {
        return false;
    }
    boss.phase = BossPhase::Dying {
        frames_left: config.dying_frames,
    };
    boss.phase_frames = 0;
    tracing::info!("boss defeated; death animation started");
    true
}

/// Apply damage unless the boss is already dying.  Returns true when this
/// hit started the death animation.
pub fn damage_boss(boss: &mut Boss, amount: f32, config: &GameConfig) -> bool {
    if boss.is_dying() {
        return false;
    }
    boss.health.damage(amount);
    boss.health.is_depleted() && enter_dying(boss, config)
}

/// Advance the state machine by one frame.
pub fn update_boss(boss: &mut Boss, config: &GameConfig, rng: &mut impl Rng) -> BossOutcome {
    let mut outcome = BossOutcome::default();

    if boss.health.is_depleted() && enter_dying(boss, config) {
        outcome.defeated = true;
        return outcome;
    }

    boss.phase_frames = boss.phase_frames.saturating_add(1);
    match boss.phase {
        BossPhase::Normal => update_normal(boss, config, rng, &mut outcome),
        BossPhase::Charging(charge) => update_charge(boss, charge, config),
        BossPhase::Dying { frames_left } => {
            let frames_left = frames_left.saturating_sub(1);
            if frames_left == 0 {
                boss.phase = BossPhase::Victory;
                outcome.victory = true;
            } else {
                boss.phase = BossPhase::Dying { frames_left };
            }
        }
        BossPhase::Victory => {}
    }
    outcome
}

fn update_normal(boss: &mut Boss, config: &GameConfig, rng: &mut impl Rng, outcome: &mut BossOutcome) {
    boss.charge_cooldown = boss.charge_cooldown.saturating_sub(1);

    // Patrol: new random target every interval, constant-speed approach.
    boss.retarget_timer += 1;
    if boss.retarget_timer >= config.boss_retarget_interval {
        boss.retarget_timer = 0;
        let max_y = (config.world_height - boss.height).max(0.0);
        boss.target_y = rng.gen_range(0.0..=max_y);
    }
    let dy = boss.target_y - boss.y;
    if dy.abs() <= config.boss_patrol_speed {
        boss.y = boss.target_y;
    } else {
        boss.y += config.boss_patrol_speed * dy.signum();
    }

    boss.shoot_timer += 1;
    if boss.shoot_timer >= config.boss_shoot_interval {
        boss.shoot_timer = 0;
        outcome.shot = Some((boss.x, boss.y + boss.height / 2.0));
    }

    if boss.charge_cooldown == 0 {
        let chance = if is_enraged(boss, config) {
            config.enraged_charge_probability
        } else {
            config.charge_probability
        };
        if roll(rng, chance) {
            boss.phase = BossPhase::Charging(Charge::Telegraph {
                frames_left: config.telegraph_frames,
            });
            boss.phase_frames = 0;
            tracing::debug!(enraged = is_enraged(boss, config), "boss charge telegraphed");
        }
    }
}

fn update_charge(boss: &mut Boss, charge: Charge, config: &GameConfig) {
    match charge {
        Charge::Telegraph { frames_left } => {
            if frames_left <= 1 {
                let speed = if is_enraged(boss, config) {
                    config.enraged_charge_speed
                } else {
                    config.charge_speed
                };
                boss.phase = BossPhase::Charging(Charge::Dash {
                    direction: Facing::Left,
                    speed,
                });
            } else {
                boss.phase = BossPhase::Charging(Charge::Telegraph {
                    frames_left: frames_left - 1,
                });
            }
        }
        Charge::Dash { direction, speed } => {
            boss.x += speed * direction.sign();
            let mut direction = direction;
            match direction {
                Facing::Left if boss.x <= 0.0 => {
                    boss.x = 0.0;
                    direction = direction.reversed();
                }
                Facing::Right if boss.x >= boss.home_x => {
                    boss.x = boss.home_x;
                    boss.phase = BossPhase::Normal;
                    boss.phase_frames = 0;
                    boss.charge_cooldown = config.charge_cooldown;
                    tracing::debug!("boss charge finished");
                    return;
                }
                Facing::Right if boss.x + boss.width >= config.world_width => {
                    boss.x = config.world_width - boss.width;
                    direction = direction.reversed();
                }
                _ => {}
            }
            boss.phase = BossPhase::Charging(Charge::Dash { direction, speed });
        }
    }
}

/// Step (5) of the frame: run the state machine and resolve every
/// boss-related collision.
pub fn run_boss_phase(state: &mut GameState, rng: &mut impl Rng) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let outcome = update_boss(boss, &state.config, rng);

    if let Some((x, y)) = outcome.shot {
        let cfg = &state.config;
        state.boss_bullets.acquire(
            x - cfg.boss_bullet_width,
            y - cfg.boss_bullet_height / 2.0,
            Facing::Left,
        );
    }
    if outcome.defeated {
        state.score = state.score.saturating_add(state.config.boss_award);
    }
    if outcome.victory {
        tracing::info!(score = state.score, "victory");
        state.status = GameStatus::Victory;
        return;
    }

    resolve_boss_collisions(state);
}

/// Boss bullets against the player, player bullets against the boss, and
/// contact damage during a charge.  A dying boss is intangible.
pub fn resolve_boss_collisions(state: &mut GameState) {
    let cfg = &state.config;

    for bi in state.boss_bullets.active_indices() {
        let hit = state
            .boss_bullets
            .get(bi)
            .is_some_and(|b| overlaps(b, &state.player));
        if hit {
            state.player.health.damage(cfg.boss_bullet_damage);
            state.boss_bullets.deactivate(bi);
        }
    }

    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    for bi in state.player_bullets.active_indices() {
        if boss.is_dying() {
            break;
        }
        let hit = state.player_bullets.get(bi).is_some_and(|b| overlaps(b, &*boss));
        if hit {
            state.player_bullets.deactivate(bi);
            if damage_boss(boss, cfg.bullet_damage, cfg) {
                state.score = state.score.saturating_add(cfg.boss_award);
            }
        }
    }

    if matches!(boss.phase, BossPhase::Charging(_)) && overlaps(&*boss, &state.player) {
        state.player.health.damage(cfg.charge_contact_damage);
    }
}
