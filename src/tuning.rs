//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON file can rebalance the game
//! without recompiling. `Default` is the shipped balance.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Gameplay constants shared by every level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_force: f32,

    // === Player ===
    pub player_size: Vec2,
    /// Where the player (re)appears when a level is built
    pub spawn_point: Vec2,
    pub player_max_health: i32,
    /// Pixels per tick per unit of input
    pub player_speed: f32,
    pub player_speed_upgraded: f32,
    /// Ticks between shots while fire is held
    pub player_shoot_rate: u32,
    pub player_shoot_rate_upgraded: u32,
    pub starting_lives: u32,

    // === Enemies ===
    pub enemy_size: Vec2,
    pub enemy_max_health: i32,
    pub enemy_patrol_speed: f32,
    /// Score awarded per enemy killed
    pub kill_bonus: u64,
    /// Chance an enemy patrols its platform instead of standing guard
    pub patrol_chance: f64,

    // === Projectiles ===
    pub bullet_size: Vec2,
    pub bullet_speed: f32,

    // === Goal ===
    pub goal_size: Vec2,

    // === Shop ===
    pub faster_shooting_cost: u64,
    pub faster_movement_cost: u64,
    pub shield_cost: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            jump_force: -15.0,

            player_size: Vec2::new(35.0, 35.0),
            spawn_point: Vec2::new(100.0, 100.0),
            player_max_health: 100,
            player_speed: 5.0,
            player_speed_upgraded: 7.0,
            player_shoot_rate: 10,
            player_shoot_rate_upgraded: 5,
            starting_lives: 3,

            enemy_size: Vec2::new(35.0, 35.0),
            enemy_max_health: 30,
            enemy_patrol_speed: 2.0,
            kill_bonus: 50,
            patrol_chance: 0.5,

            bullet_size: Vec2::new(10.0, 5.0),
            bullet_speed: 10.0,

            goal_size: Vec2::new(40.0, 60.0),

            faster_shooting_cost: 1400,
            faster_movement_cost: 1200,
            shield_cost: 1600,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        let sizes = [
            ("player_size", self.player_size),
            ("enemy_size", self.enemy_size),
            ("bullet_size", self.bullet_size),
            ("goal_size", self.goal_size),
        ];
        for (name, size) in sizes {
            if size.x <= 0.0 || size.y <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {}x{}",
                    size.x, size.y
                )));
            }
        }

        if self.player_speed <= 0.0 || self.player_speed_upgraded <= 0.0 {
            return Err(ConfigError::Invalid("player speeds must be positive".into()));
        }
        if self.bullet_speed <= 0.0 {
            return Err(ConfigError::Invalid("bullet_speed must be positive".into()));
        }
        if self.player_shoot_rate == 0 || self.player_shoot_rate_upgraded == 0 {
            return Err(ConfigError::Invalid("shoot rates must be non-zero".into()));
        }
        if self.player_max_health <= 0 || self.enemy_max_health <= 0 {
            return Err(ConfigError::Invalid("max health must be positive".into()));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid("starting_lives must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.patrol_chance) {
            return Err(ConfigError::Invalid(format!(
                "patrol_chance must be within 0..=1, got {}",
                self.patrol_chance
            )));
        }
        Ok(())
    }
}
