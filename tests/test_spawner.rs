use portal_shooter::compute::{enemy_cap, init_state, spawn_period};
use portal_shooter::config::GameConfig;
use portal_shooter::entities::*;
use portal_shooter::spawner::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    let config = GameConfig {
        drop_chance: 0.0,
        ..GameConfig::default()
    };
    init_state(Level::Easy, config)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── layout ────────────────────────────────────────────────────────────────────

#[test]
fn portals_are_spread_evenly_on_the_right() {
    let portals = layout_portals(&GameConfig::default());
    assert_eq!(portals.len(), 3);
    let ys: Vec<f32> = portals.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![75.0, 200.0, 325.0]);
    for p in &portals {
        assert_eq!(p.x, 780.0); // 900 - 100 - 20
        assert_eq!(p.width, 100.0);
        assert_eq!(p.height, 100.0);
        assert_eq!(p.health.current(), 150.0);
        assert_eq!(p.health.max(), 150.0);
        assert_eq!(p.spawn_timer, 0);
    }
}

#[test]
fn zero_portals_is_allowed() {
    let config = GameConfig {
        portal_count: 0,
        ..GameConfig::default()
    };
    assert!(layout_portals(&config).is_empty());
}

// ── spawning ──────────────────────────────────────────────────────────────────

#[test]
fn spawned_enemy_is_centred_on_portal() {
    let cfg = GameConfig::default();
    let portal = &layout_portals(&cfg)[0];
    let enemy = spawn_enemy(portal, &cfg, &mut seeded_rng());
    assert_eq!(enemy.x, 780.0);
    assert_eq!(enemy.y, 65.0); // 75 + 50 - 60
    assert_eq!(enemy.base_y, 65.0);
}

#[test]
fn spawn_picks_every_type_eventually() {
    let cfg = GameConfig::default();
    let portal = &layout_portals(&cfg)[0];
    let mut rng = seeded_rng();
    let mut seen = [false; 3];
    for _ in 0..200 {
        let kind = spawn_enemy(portal, &cfg, &mut rng).kind;
        seen[kind.type_id() as usize - 1] = true;
    }
    assert_eq!(seen, [true, true, true]);
}

#[test]
fn portal_spawns_when_timer_reaches_period() {
    let mut s = make_state();
    s.portals.truncate(1);
    s.portals[0].spawn_timer = spawn_period(&Level::Easy) - 1;
    update_portals(&mut s, &mut seeded_rng());
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.portals[0].spawn_timer, 0);
}

#[test]
fn portal_waits_before_period() {
    let mut s = make_state();
    s.portals.truncate(1);
    s.portals[0].spawn_timer = spawn_period(&Level::Easy) - 2;
    update_portals(&mut s, &mut seeded_rng());
    assert!(s.enemies.is_empty());
    assert_eq!(s.portals[0].spawn_timer, spawn_period(&Level::Easy) - 1);
}

#[test]
fn enemy_cap_blocks_spawning() {
    let mut s = make_state();
    s.portals.truncate(1);
    for _ in 0..enemy_cap(&Level::Easy) {
        let e = Enemy::new(EnemyKind::Scout, 400.0, 100.0, &s.config);
        s.enemies.push(e);
    }
    s.portals[0].spawn_timer = spawn_period(&Level::Easy) - 1;
    update_portals(&mut s, &mut seeded_rng());
    assert_eq!(s.enemies.len(), enemy_cap(&Level::Easy));
    // Timer keeps its value so the portal fires as soon as there is room
    assert_eq!(s.portals[0].spawn_timer, spawn_period(&Level::Easy));

    s.enemies.pop();
    update_portals(&mut s, &mut seeded_rng());
    assert_eq!(s.enemies.len(), enemy_cap(&Level::Easy));
    assert_eq!(s.portals[0].spawn_timer, 0);
}

// ── portal damage ─────────────────────────────────────────────────────────────

#[test]
fn bullet_damages_portal_and_is_spent() {
    let mut s = make_state();
    s.player_bullets.acquire(790.0, 110.0, Facing::Right);
    resolve_portal_hits(&mut s);
    assert_eq!(s.portals[0].health.current(), 125.0);
    assert_eq!(s.player_bullets.active_count(), 0);
    assert_eq!(s.score, 0);
}

#[test]
fn destroyed_portal_awards_score_and_is_removed() {
    let mut s = make_state();
    s.portals[1].health.set(25.0);
    s.player_bullets.acquire(790.0, 240.0, Facing::Right);
    resolve_portal_hits(&mut s);
    assert_eq!(s.portals.len(), 2);
    assert_eq!(s.score, 50);
    assert!(s.portals.iter().all(|p| p.y != 200.0));
}

#[test]
fn several_portals_can_die_in_one_pass() {
    let mut s = make_state();
    for p in &mut s.portals {
        p.health.set(10.0);
    }
    s.player_bullets.acquire(790.0, 110.0, Facing::Right);
    s.player_bullets.acquire(790.0, 240.0, Facing::Right);
    s.player_bullets.acquire(790.0, 360.0, Facing::Right);
    resolve_portal_hits(&mut s);
    assert!(s.portals.is_empty());
    assert_eq!(s.score, 150);
}

// ── wave clear ────────────────────────────────────────────────────────────────

#[test]
fn boss_waits_while_portals_remain() {
    let mut s = make_state();
    assert!(!wave_cleared(&s));
    assert!(!try_spawn_boss(&mut s));
    assert!(s.boss.is_none());
}

#[test]
fn boss_waits_while_enemies_remain() {
    let mut s = make_state();
    s.portals.clear();
    let e = Enemy::new(EnemyKind::Scout, 400.0, 100.0, &s.config);
    s.enemies.push(e);
    assert!(!try_spawn_boss(&mut s));
    assert!(s.boss.is_none());
}

#[test]
fn boss_spawns_exactly_once() {
    let mut s = make_state();
    s.portals.clear();
    assert!(try_spawn_boss(&mut s));
    assert!(s.boss.is_some());
    assert!(s.boss_spawned);
    assert!(!try_spawn_boss(&mut s));

    // Even with the boss gone the wave-clear trigger stays spent
    s.boss = None;
    assert!(!try_spawn_boss(&mut s));
    assert!(s.boss.is_none());
}
