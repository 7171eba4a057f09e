//! Runtime tunables loaded from a TOML file.
//!
//! [`GameConfig::default`] is the authoritative set of numbers.  A TOML file
//! only needs the keys it wants to change; everything else falls back to the
//! compiled default thanks to `#[serde(default)]`.
//!
//! ```toml
//! drop_chance = 0.5
//! enemy_edge = "wrap"
//! ```
//!
//! Numbers that depend on the chosen difficulty (boss health, spawn period,
//! enemy cap) live in the lookup tables in [`crate::compute`] instead.

use std::path::Path;

use serde::Deserialize;

use crate::error::{GameError, GameResult};

/// What happens to an enemy whose box leaves the left edge of the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Remove it without awarding score.
    Despawn,
    /// Re-enter from the right edge.
    Wrap,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World ────────────────────────────────────────────────────────────────
    pub world_width: f32,
    pub world_height: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_width: f32,
    pub player_height: f32,
    pub player_start_x: f32,
    pub player_speed: f32,
    pub player_boosted_speed: f32,
    pub player_max_health: f32,

    // ── Player bullets ───────────────────────────────────────────────────────
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub bullet_damage: f32,
    pub player_pool_capacity: usize,
    /// Vertical distance of each double-shot bullet from the centre line.
    pub double_shot_spread: f32,

    // ── Boss bullets ─────────────────────────────────────────────────────────
    pub boss_bullet_width: f32,
    pub boss_bullet_height: f32,
    pub boss_bullet_speed: f32,
    pub boss_bullet_damage: f32,
    pub boss_pool_capacity: usize,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub enemy_width: f32,
    pub enemy_height: f32,
    /// Damage per frame while an enemy overlaps the player.
    pub enemy_contact_damage: f32,
    pub wave_amplitude: f32,
    /// Phase advance of the vertical wave, in radians per frame.
    pub wave_frequency: f32,
    pub enemy_edge: EdgePolicy,

    // ── Portals ──────────────────────────────────────────────────────────────
    pub portal_count: usize,
    pub portal_size: f32,
    pub portal_health: f32,
    pub portal_award: u32,
    /// Gap between a portal and the right edge of the world.
    pub portal_margin: f32,

    // ── Boss ─────────────────────────────────────────────────────────────────
    pub boss_width: f32,
    pub boss_height: f32,
    pub boss_award: u32,
    pub boss_margin: f32,
    pub boss_patrol_speed: f32,
    pub boss_retarget_interval: u32,
    pub boss_shoot_interval: u32,
    pub charge_probability: f64,
    pub enraged_charge_probability: f64,
    pub charge_speed: f32,
    pub enraged_charge_speed: f32,
    /// Fraction of max health below which the boss becomes more aggressive.
    pub enrage_threshold: f32,
    pub telegraph_frames: u32,
    pub charge_cooldown: u32,
    pub charge_contact_damage: f32,
    pub dying_frames: u32,

    // ── Collectables ─────────────────────────────────────────────────────────
    pub collectable_size: f32,
    pub collectable_ttl: u32,
    pub drop_chance: f64,
    /// Below this player health every drop is a health pack.
    pub low_health_threshold: f32,
    pub heal_amount: f32,
    pub score_bonus: u32,
    pub speed_boost_frames: u32,
    pub ignite_damage: f32,
    pub slowdown_multiplier: f32,
    pub slowdown_frames: u32,
    pub double_shot_frames: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            world_width: 900.0,
            world_height: 500.0,

            player_width: 80.0,
            player_height: 120.0,
            player_start_x: 40.0,
            player_speed: 5.0,
            player_boosted_speed: 8.0,
            player_max_health: 100.0,

            bullet_width: 10.0,
            bullet_height: 6.0,
            bullet_speed: 9.0,
            bullet_damage: 25.0,
            player_pool_capacity: 30,
            double_shot_spread: 8.0,

            boss_bullet_width: 16.0,
            boss_bullet_height: 8.0,
            boss_bullet_speed: 7.0,
            boss_bullet_damage: 10.0,
            boss_pool_capacity: 20,

            enemy_width: 80.0,
            enemy_height: 120.0,
            enemy_contact_damage: 0.5,
            wave_amplitude: 20.0,
            wave_frequency: 0.05,
            enemy_edge: EdgePolicy::Despawn,

            portal_count: 3,
            portal_size: 100.0,
            portal_health: 150.0,
            portal_award: 50,
            portal_margin: 20.0,

            boss_width: 200.0,
            boss_height: 200.0,
            boss_award: 500,
            boss_margin: 20.0,
            boss_patrol_speed: 2.0,
            boss_retarget_interval: 120,
            boss_shoot_interval: 90,
            charge_probability: 0.004,
            enraged_charge_probability: 0.01,
            charge_speed: 10.0,
            enraged_charge_speed: 14.0,
            enrage_threshold: 0.5,
            telegraph_frames: 30,
            charge_cooldown: 180,
            charge_contact_damage: 1.0,
            dying_frames: 120,

            collectable_size: 50.0,
            collectable_ttl: 600,
            drop_chance: 0.3,
            low_health_threshold: 30.0,
            heal_amount: 25.0,
            score_bonus: 50,
            speed_boost_frames: 300,
            ignite_damage: 30.0,
            slowdown_multiplier: 0.5,
            slowdown_frames: 300,
            double_shot_frames: 300,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(contents: &str, path: &str) -> GameResult<GameConfig> {
        let config: GameConfig = toml::from_str(contents).map_err(|source| GameError::ConfigParse {
            path: path.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> GameResult<GameConfig> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: display.clone(),
            source,
        })?;
        Self::from_toml_str(&contents, &display)
    }

    /// Like [`GameConfig::load`], but any failure falls back to the defaults.
    /// A missing file is expected and only logged at info level.
    pub fn load_or_default(path: impl AsRef<Path>) -> GameConfig {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file found; using compiled defaults");
            return GameConfig::default();
        }
        match Self::load(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded game config");
                config
            }
            Err(e) => {
                tracing::warn!("{e}; using compiled defaults");
                GameConfig::default()
            }
        }
    }

    /// Reject values that would make the simulation meaningless.
    pub fn validate(&self) -> GameResult<()> {
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        positive("player_max_health", self.player_max_health)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("boss_bullet_speed", self.boss_bullet_speed)?;
        positive("player_pool_capacity", self.player_pool_capacity as f32)?;
        positive("boss_pool_capacity", self.boss_pool_capacity as f32)?;
        positive("boss_width", self.boss_width)?;
        positive("boss_height", self.boss_height)?;
        positive("charge_speed", self.charge_speed)?;
        positive("enraged_charge_speed", self.enraged_charge_speed)?;
        positive("dying_frames", self.dying_frames as f32)?;
        positive("collectable_ttl", self.collectable_ttl as f32)?;
        probability("drop_chance", self.drop_chance)?;
        probability("charge_probability", self.charge_probability)?;
        probability("enraged_charge_probability", self.enraged_charge_probability)?;
        fraction("enrage_threshold", self.enrage_threshold)?;
        fraction("slowdown_multiplier", self.slowdown_multiplier)?;
        if self.slowdown_multiplier <= 0.0 {
            return Err(GameError::InvalidSetting {
                name: "slowdown_multiplier",
                value: self.slowdown_multiplier as f64,
                expected: "(0.0, 1.0]",
            });
        }
        Ok(())
    }
}

// ── Validation helpers ────────────────────────────────────────────────────────

fn positive(name: &'static str, value: f32) -> GameResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidSetting {
            name,
            value: value as f64,
            expected: "(0, ∞)",
        })
    }
}

fn probability(name: &'static str, value: f64) -> GameResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GameError::InvalidSetting {
            name,
            value,
            expected: "[0.0, 1.0]",
        })
    }
}

fn fraction(name: &'static str, value: f32) -> GameResult<()> {
    probability(name, value as f64)
}
