use portal_shooter::compute::init_state;
use portal_shooter::config::GameConfig;
use portal_shooter::entities::*;

// ── Health ────────────────────────────────────────────────────────────────────

#[test]
fn health_starts_full() {
    let h = Health::full(100.0);
    assert_eq!(h.current(), 100.0);
    assert_eq!(h.max(), 100.0);
    assert_eq!(h.fraction(), 1.0);
}

#[test]
fn damage_saturates_at_zero() {
    let mut h = Health::full(50.0);
    assert!(!h.damage(30.0));
    assert!(h.damage(30.0)); // this hit empties the bar
    assert_eq!(h.current(), 0.0);
    assert!(!h.damage(10.0)); // already empty
    assert_eq!(h.current(), 0.0);
}

#[test]
fn heal_clamps_at_max() {
    let mut h = Health::full(100.0);
    h.set(90.0);
    h.heal(25.0);
    assert_eq!(h.current(), 100.0);
}

#[test]
fn set_is_clamped_both_ways() {
    let mut h = Health::full(100.0);
    h.set(-5.0);
    assert_eq!(h.current(), 0.0);
    h.set(500.0);
    assert_eq!(h.current(), 100.0);
}

#[test]
fn health_stays_in_range_under_any_sequence() {
    let mut h = Health::full(80.0);
    for i in 0..200 {
        if i % 3 == 0 {
            h.heal(i as f32 * 0.7);
        } else {
            h.damage(i as f32 * 0.4);
        }
        assert!(h.current() >= 0.0 && h.current() <= h.max());
    }
}

// ── Enemy table ───────────────────────────────────────────────────────────────

#[test]
fn type_one_enemy_stats() {
    let stats = EnemyKind::Scout.stats();
    assert_eq!(stats.base_speed, 4.0);
    assert_eq!(stats.max_health, 50.0);
    assert_eq!(stats.award, 10);
}

#[test]
fn enemy_type_ids_are_one_two_three() {
    let ids: Vec<u8> = EnemyKind::ALL.iter().map(|k| k.type_id()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn new_enemy_has_full_health_and_baseline() {
    let cfg = GameConfig::default();
    let e = Enemy::new(EnemyKind::Raider, 300.0, 120.0, &cfg);
    assert_eq!(e.health.current(), e.health.max());
    assert_eq!(e.health.max(), EnemyKind::Raider.stats().max_health);
    assert_eq!(e.base_y, 120.0);
    assert_eq!(e.width, cfg.enemy_width);
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_starts_with_defaults() {
    let p = Player::new(&GameConfig::default());
    assert_eq!(p.health.current(), 100.0);
    assert_eq!(p.health.max(), 100.0);
    assert_eq!(p.speed, 5.0);
    assert_eq!(p.x, 40.0);
    assert_eq!(p.y, 190.0); // 500 / 2 - 120 / 2
    assert_eq!(p.facing, Facing::Right);
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[test]
fn input_maps_known_keys() {
    let input = InputState::from_pressed(["KeyW", "ArrowRight"], true);
    assert!(input.up);
    assert!(input.right);
    assert!(!input.down);
    assert!(!input.left);
    assert!(input.fire);
}

#[test]
fn input_ignores_unknown_keys() {
    let input = InputState::from_pressed(["KeyQ", "F13", ""], false);
    assert_eq!(input, InputState::default());
}

// ── Session ───────────────────────────────────────────────────────────────────

#[test]
fn snapshot_floors_health() {
    let mut s = init_state(Level::Easy, GameConfig::default());
    s.player.health.set(42.7);
    s.score = 30;
    let snap = s.snapshot();
    assert_eq!(snap.player_health, 42);
    assert_eq!(snap.score, 30);
    assert!(!snap.game_over);
    assert!(!snap.victory);
}

#[test]
fn snapshot_reports_terminal_states() {
    let mut s = init_state(Level::Easy, GameConfig::default());
    s.status = GameStatus::Victory;
    let snap = s.snapshot();
    assert!(snap.game_over);
    assert!(snap.victory);

    s.status = GameStatus::Defeat;
    let snap = s.snapshot();
    assert!(snap.game_over);
    assert!(!snap.victory);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(Level::Medium, GameConfig::default());
    let mut cloned = original.clone();

    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.enemies.push(Enemy::new(EnemyKind::Scout, 5.0, 5.0, &cloned.config));
    cloned.player_bullets.acquire(1.0, 1.0, Facing::Right);

    assert_eq!(original.player.x, 40.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
    assert_eq!(original.player_bullets.active_count(), 0);
}
