//! All game entity types.  Mostly plain data: behaviour lives in
//! `compute`, `spawner`, `boss` and `collectable`.

use crate::collision::{Bounds, Rect};
use crate::config::GameConfig;
use crate::pool::BulletPool;

// ── Shared pieces ─────────────────────────────────────────────────────────────

/// Horizontal direction for facing and projectile travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1 for left, +1 for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn reversed(self) -> Facing {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Hit points kept within `[0, max]` by every mutation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    pub fn full(max: f32) -> Self {
        Health { current: max, max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Set the value directly; still clamped.
    pub fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }

    /// Subtract `amount`.  Returns true if this call emptied the bar.
    pub fn damage(&mut self, amount: f32) -> bool {
        let was_alive = self.current > 0.0;
        self.set(self.current - amount);
        was_alive && self.is_depleted()
    }

    pub fn heal(&mut self, amount: f32) {
        self.set(self.current + amount);
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Remaining share of the bar in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per frame.  Raised while a speed boost is active.
    pub speed: f32,
    pub base_speed: f32,
    pub health: Health,
    pub facing: Facing,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Player {
            x: config.player_start_x,
            y: config.world_height / 2.0 - config.player_height / 2.0,
            width: config.player_width,
            height: config.player_height,
            speed: config.player_speed,
            base_speed: config.player_speed,
            health: Health::full(config.player_max_health),
            facing: Facing::Right,
        }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// The three enemy types a portal can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// Type 1: fast and fragile.
    Scout,
    /// Type 2.
    Raider,
    /// Type 3: slow and tough.
    Juggernaut,
}

/// Fixed per-type numbers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub base_speed: f32,
    pub max_health: f32,
    pub award: u32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Scout, EnemyKind::Raider, EnemyKind::Juggernaut];

    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Scout => EnemyStats {
                base_speed: 4.0,
                max_health: 50.0,
                award: 10,
            },
            EnemyKind::Raider => EnemyStats {
                base_speed: 3.0,
                max_health: 80.0,
                award: 20,
            },
            EnemyKind::Juggernaut => EnemyStats {
                base_speed: 2.5,
                max_health: 120.0,
                award: 30,
            },
        }
    }

    /// Numeric type tag (1, 2 or 3).
    pub fn type_id(self) -> u8 {
        match self {
            EnemyKind::Scout => 1,
            EnemyKind::Raider => 2,
            EnemyKind::Juggernaut => 3,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Centre line of the vertical wave.
    pub base_y: f32,
    /// Current wave phase in radians.
    pub phase: f32,
    pub health: Health,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32, config: &GameConfig) -> Self {
        Enemy {
            kind,
            x,
            y,
            width: config.enemy_width,
            height: config.enemy_height,
            base_y: y,
            phase: 0.0,
            health: Health::full(kind.stats().max_health),
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// One slot of a [`BulletPool`].  An inactive bullet is free for reuse and
/// takes no part in movement, collision or drawing.
#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub direction: Facing,
    pub active: bool,
}

// ── Portals ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Portal {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub health: Health,
    /// Frames since the last spawn.
    pub spawn_timer: u32,
}

// ── Boss ──────────────────────────────────────────────────────────────────────

/// Sub-phase of a charge attack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Charge {
    /// Standing still and shaking before the dash.
    Telegraph { frames_left: u32 },
    /// Committed horizontal dash.
    Dash { direction: Facing, speed: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BossPhase {
    Normal,
    Charging(Charge),
    /// Death animation; the boss is intangible.
    Dying { frames_left: u32 },
    Victory,
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Resting x; charges start and end here.
    pub home_x: f32,
    pub health: Health,
    pub phase: BossPhase,
    pub target_y: f32,
    pub retarget_timer: u32,
    pub shoot_timer: u32,
    /// Frames before another charge may start.
    pub charge_cooldown: u32,
    /// Ticks since the current phase began; drives the shake animation.
    pub phase_frames: u32,
}

impl Boss {
    pub fn is_dying(&self) -> bool {
        matches!(self.phase, BossPhase::Dying { .. } | BossPhase::Victory)
    }
}

// ── Collectables ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectableKind {
    /// Restores a fixed amount of health.
    Health,
    /// Double shot for a while.
    Ammo,
    /// Flat score bonus.
    Score,
    /// Temporary player speed boost.
    Speed,
    /// Damages every living enemy once.
    Ignite,
    /// Slows every enemy for a while.
    Slowdown,
}

impl CollectableKind {
    pub const ALL: [CollectableKind; 6] = [
        CollectableKind::Health,
        CollectableKind::Ammo,
        CollectableKind::Score,
        CollectableKind::Speed,
        CollectableKind::Ignite,
        CollectableKind::Slowdown,
    ];
}

#[derive(Clone, Debug)]
pub struct Collectable {
    pub kind: CollectableKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Frames left before it disappears.
    pub ttl: u32,
    pub active: bool,
}

/// Frames remaining on each timed effect.  Zero means inactive.  Picking up
/// the same effect again refreshes its counter rather than stacking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActiveEffects {
    pub speed_boost: u32,
    pub slowdown: u32,
    pub double_shot: u32,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Everything the player asked for during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// One-shot trigger: fire once this frame.
    pub fire: bool,
}

impl InputState {
    /// Build from the identifiers of the keys currently held down.
    /// Unknown identifiers are ignored.
    pub fn from_pressed<'a>(keys: impl IntoIterator<Item = &'a str>, fire: bool) -> Self {
        let mut input = InputState {
            fire,
            ..InputState::default()
        };
        for key in keys {
            match key {
                "KeyW" | "ArrowUp" => input.up = true,
                "KeyS" | "ArrowDown" => input.down = true,
                "KeyA" | "ArrowLeft" => input.left = true,
                "KeyD" | "ArrowRight" => input.right = true,
                _ => {}
            }
        }
        input
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Player health reached zero.
    Defeat,
    /// The boss finished its death animation.
    Victory,
}

/// The entire session.  Cloneable so the per-frame update can return a new
/// copy without touching the original, and so independent simulations can
/// run side by side.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub level: Level,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub portals: Vec<Portal>,
    pub player_bullets: BulletPool,
    pub boss_bullets: BulletPool,
    pub collectables: Vec<Collectable>,
    pub boss: Option<Boss>,
    /// Set the moment the boss appears; it never appears twice.
    pub boss_spawned: bool,
    pub effects: ActiveEffects,
    /// Global factor on enemy speed.  1.0 unless a slowdown is running.
    pub speed_multiplier: f32,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
}

/// Read-only view for the score/health display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub score: u32,
    pub player_health: u32,
    pub game_over: bool,
    pub victory: bool,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            player_health: self.player.health.current().max(0.0).floor() as u32,
            game_over: self.is_over(),
            victory: self.status == GameStatus::Victory,
        }
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

macro_rules! impl_bounds {
    ($($ty:ty),*) => {
        $(impl Bounds for $ty {
            fn rect(&self) -> Rect {
                Rect::new(self.x, self.y, self.width, self.height)
            }
        })*
    };
}

impl_bounds!(Player, Enemy, Bullet, Portal, Boss, Collectable);
