use portal_shooter::boss::*;
use portal_shooter::compute::init_state;
use portal_shooter::config::GameConfig;
use portal_shooter::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn calm_config() -> GameConfig {
    GameConfig {
        charge_probability: 0.0,
        enraged_charge_probability: 0.0,
        ..GameConfig::default()
    }
}

fn eager_config() -> GameConfig {
    GameConfig {
        charge_probability: 1.0,
        enraged_charge_probability: 1.0,
        ..GameConfig::default()
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A state already in the boss fight.
fn boss_state(config: GameConfig) -> GameState {
    let mut s = init_state(Level::Easy, config);
    s.portals.clear();
    s.boss = Some(spawn_boss(&s.config, &s.level));
    s.boss_spawned = true;
    s
}

// ── spawn ─────────────────────────────────────────────────────────────────────

#[test]
fn boss_spawns_at_home_with_level_health() {
    let cfg = GameConfig::default();
    let easy = spawn_boss(&cfg, &Level::Easy);
    assert_eq!(easy.health.max(), 500.0);
    assert_eq!(easy.x, 680.0); // 900 - 200 - 20
    assert_eq!(easy.home_x, 680.0);
    assert_eq!(easy.y, 150.0);
    assert_eq!(easy.width, 200.0);
    assert_eq!(easy.height, 200.0);
    assert_eq!(easy.phase, BossPhase::Normal);

    let hard = spawn_boss(&cfg, &Level::Hard);
    assert_eq!(hard.health.max(), 1200.0);
    assert_eq!(hard.health.current(), 1200.0);
}

// ── Normal ────────────────────────────────────────────────────────────────────

#[test]
fn patrol_eases_toward_target() {
    let cfg = calm_config();
    let mut boss = spawn_boss(&cfg, &Level::Easy);
    boss.target_y = 100.0;
    update_boss(&mut boss, &cfg, &mut seeded_rng());
    assert_eq!(boss.y, 148.0);

    boss.target_y = 147.0;
    update_boss(&mut boss, &cfg, &mut seeded_rng());
    assert_eq!(boss.y, 147.0); // within one step: snaps
}

#[test]
fn patrol_picks_targets_inside_the_world() {
    let cfg = calm_config();
    let mut boss = spawn_boss(&cfg, &Level::Easy);
    let mut rng = seeded_rng();
    for _ in 0..2000 {
        update_boss(&mut boss, &cfg, &mut rng);
        assert!(boss.target_y >= 0.0 && boss.target_y <= 300.0);
        assert!(boss.y >= 0.0 && boss.y <= 300.0);
        assert_eq!(boss.x, boss.home_x);
    }
}

#[test]
fn boss_shoots_on_interval() {
    let cfg = calm_config();
    let mut boss = spawn_boss(&cfg, &Level::Easy);
    let mut rng = seeded_rng();
    let shots: Vec<usize> = (1..=180)
        .filter(|_| update_boss(&mut boss, &cfg, &mut rng).shot.is_some())
        .collect();
    assert_eq!(shots, vec![90, 180]);
}

#[test]
fn no_charge_during_cooldown() {
    let cfg = eager_config();
    let mut boss = spawn_boss(&cfg, &Level::Easy);
    boss.charge_cooldown = 5;
    let mut rng = seeded_rng();
    for _ in 0..4 {
        update_boss(&mut boss, &cfg, &mut rng);
        assert_eq!(boss.phase, BossPhase::Normal);
    }
    update_boss(&mut boss, &cfg, &mut rng);
    assert!(matches!(boss.phase, BossPhase::Charging(Charge::Telegraph { .. })));
}

// ── Charging ──────────────────────────────────────────────────────────────────

#[test]
fn charge_telegraphs_then_dashes_and_returns_home() {
    let cfg = eager_config();
    let mut boss = spawn_boss(&cfg, &Level::Easy);
    boss.charge_cooldown = 0;
    let mut rng = seeded_rng();

    update_boss(&mut boss, &cfg, &mut rng);
    assert_eq!(
        boss.phase,
        BossPhase::Charging(Charge::Telegraph { frames_left: 30 })
    );

    // Telegraph: no movement
    for _ in 0..29 {
        update_boss(&mut boss, &cfg, &mut rng);
        assert_eq!(boss.x, boss.home_x);
        assert!(matches!(boss.phase, BossPhase::Charging(Charge::Telegraph { .. })));
    }
    update_boss(&mut boss, &cfg, &mut rng);
    assert_eq!(
        boss.phase,
        BossPhase::Charging(Charge::Dash {
            direction: Facing::Left,
            speed: 10.0
        })
    );

    let mut min_x = boss.x;
    let mut frames = 0;
    while boss.phase != BossPhase::Normal {
        update_boss(&mut boss, &cfg, &mut rng);
        min_x = min_x.min(boss.x);
        frames += 1;
        assert!(frames < 1000, "charge never finished");
    }
    assert_eq!(min_x, 0.0); // bounced off the left edge
    assert_eq!(boss.x, boss.home_x);
    assert_eq!(boss.charge_cooldown, cfg.charge_cooldown);
    assert_eq!(frames, 136); // 68 frames out, 68 back
}

#[test]
fn out_of_range_charge_probability_is_clamped() {
    let cfg = GameConfig {
        charge_probability: 2.5,
        ..GameConfig::default()
    };
    let mut boss = spawn_boss(&cfg, &Level::Easy);
    boss.charge_cooldown = 0;
    update_boss(&mut boss, &cfg, &mut seeded_rng());
    assert!(matches!(boss.phase, BossPhase::Charging(Charge::Telegraph { .. })));

    let cfg = GameConfig {
        charge_probability: f64::NAN,
        ..GameConfig::default()
    };
    let mut boss = spawn_boss(&cfg, &Level::Easy);
    boss.charge_cooldown = 0;
    update_boss(&mut boss, &cfg, &mut seeded_rng());
    assert_eq!(boss.phase, BossPhase::Normal);
}

#[test]
fn enraged_boss_dashes_faster() {
    let cfg = eager_config();
    let mut boss = spawn_boss(&cfg, &Level::Easy);
    boss.charge_cooldown = 0;
    boss.health.set(200.0); // 40 % of 500
    assert!(is_enraged(&boss, &cfg));
    let mut rng = seeded_rng();
    for _ in 0..31 {
        update_boss(&mut boss, &cfg, &mut rng);
    }
    assert_eq!(
        boss.phase,
        BossPhase::Charging(Charge::Dash {
            direction: Facing::Left,
            speed: 14.0
        })
    );
}

#[test]
fn healthy_boss_is_not_enraged() {
    let cfg = GameConfig::default();
    let mut boss = spawn_boss(&cfg, &Level::Easy);
    assert!(!is_enraged(&boss, &cfg));
    boss.health.set(250.0); // exactly half
    assert!(!is_enraged(&boss, &cfg));
}

#[test]
fn charge_hurts_player_on_contact() {
    let mut s = boss_state(calm_config());
    if let Some(boss) = s.boss.as_mut() {
        boss.phase = BossPhase::Charging(Charge::Dash {
            direction: Facing::Left,
            speed: 10.0,
        });
        boss.x = s.player.x;
        boss.y = s.player.y;
    }
    resolve_boss_collisions(&mut s);
    assert_eq!(s.player.health.current(), 99.0);
}

#[test]
fn no_contact_damage_outside_a_charge() {
    let mut s = boss_state(calm_config());
    if let Some(boss) = s.boss.as_mut() {
        boss.x = s.player.x;
        boss.y = s.player.y;
    }
    resolve_boss_collisions(&mut s);
    assert_eq!(s.player.health.current(), 100.0);
}

// ── Bullets ───────────────────────────────────────────────────────────────────

#[test]
fn boss_bullet_hurts_player() {
    let mut s = boss_state(calm_config());
    s.boss_bullets.acquire(60.0, 200.0, Facing::Left);
    resolve_boss_collisions(&mut s);
    assert_eq!(s.player.health.current(), 90.0);
    assert_eq!(s.boss_bullets.active_count(), 0);
}

#[test]
fn player_bullet_hurts_boss() {
    let mut s = boss_state(calm_config());
    s.player_bullets.acquire(700.0, 200.0, Facing::Right);
    resolve_boss_collisions(&mut s);
    assert_eq!(s.boss.as_ref().unwrap().health.current(), 475.0);
    assert_eq!(s.player_bullets.active_count(), 0);
}

#[test]
fn boss_fires_into_its_pool() {
    let mut s = boss_state(calm_config());
    if let Some(boss) = s.boss.as_mut() {
        boss.shoot_timer = 89;
    }
    run_boss_phase(&mut s, &mut seeded_rng());
    let shot: Vec<&Bullet> = s.boss_bullets.active().collect();
    assert_eq!(shot.len(), 1);
    assert_eq!(shot[0].direction, Facing::Left);
    assert_eq!(shot[0].x, 664.0); // 680 - 16
}

// ── Dying ─────────────────────────────────────────────────────────────────────

#[test]
fn killing_blow_enters_dying_once() {
    let cfg = calm_config();
    let mut boss = spawn_boss(&cfg, &Level::Easy);
    boss.health.set(25.0);
    assert!(damage_boss(&mut boss, 25.0, &cfg));
    assert_eq!(boss.phase, BossPhase::Dying { frames_left: 120 });

    assert!(!damage_boss(&mut boss, 25.0, &cfg));
    assert!(!enter_dying(&mut boss, &cfg));
    assert_eq!(boss.phase, BossPhase::Dying { frames_left: 120 });
}

#[test]
fn dying_boss_ignores_damage() {
    let cfg = calm_config();
    let mut boss = spawn_boss(&cfg, &Level::Easy);
    boss.health.set(100.0);
    enter_dying(&mut boss, &cfg);
    damage_boss(&mut boss, 25.0, &cfg);
    assert_eq!(boss.health.current(), 100.0);
}

#[test]
fn dying_boss_is_intangible() {
    let mut s = boss_state(calm_config());
    let cfg = s.config.clone();
    if let Some(boss) = s.boss.as_mut() {
        enter_dying(boss, &cfg);
    }
    s.player_bullets.acquire(700.0, 200.0, Facing::Right);
    resolve_boss_collisions(&mut s);
    assert_eq!(s.player_bullets.active_count(), 1);
}

#[test]
fn charge_can_be_cut_short_by_death() {
    let cfg = eager_config();
    let mut boss = spawn_boss(&cfg, &Level::Easy);
    boss.phase = BossPhase::Charging(Charge::Dash {
        direction: Facing::Left,
        speed: 10.0,
    });
    boss.health.set(0.0);
    let outcome = update_boss(&mut boss, &cfg, &mut seeded_rng());
    assert!(outcome.defeated);
    assert_eq!(boss.phase, BossPhase::Dying { frames_left: 120 });
}

#[test]
fn dying_ends_in_victory_after_animation() {
    let cfg = calm_config();
    let mut boss = spawn_boss(&cfg, &Level::Easy);
    enter_dying(&mut boss, &cfg);
    let mut rng = seeded_rng();
    for _ in 0..119 {
        assert!(!update_boss(&mut boss, &cfg, &mut rng).victory);
    }
    assert!(update_boss(&mut boss, &cfg, &mut rng).victory);
    assert_eq!(boss.phase, BossPhase::Victory);
}
