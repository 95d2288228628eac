//! Level catalog
//!
//! Two hand-built stages. Coordinates are world space at `scroll_x == 0`,
//! which is also view space when a level is freshly built.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelId {
    /// Opening desert stage
    First,
    /// Final stage: more enemies shoot faster and take more hits
    Final,
}

impl LevelId {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelId::First => "Level 1",
            LevelId::Final => "Final Level",
        }
    }

    /// The level reached by touching this level's goal, if any
    pub fn next(&self) -> Option<LevelId> {
        match self {
            LevelId::First => Some(LevelId::Final),
            LevelId::Final => None,
        }
    }

    pub fn layout(&self) -> LevelLayout {
        match self {
            LevelId::First => first_level(),
            LevelId::Final => final_level(),
        }
    }
}

/// Everything needed to (re)build a level from scratch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub id: LevelId,
    pub platforms: Vec<Aabb>,
    /// Top-left corners of the enemies, in spawn order
    pub enemy_spawns: Vec<Vec2>,
    /// Top-left corner of the goal
    pub goal: Vec2,
    /// Health a player bullet removes from an enemy
    pub player_bullet_damage: i32,
    /// Health an enemy bullet removes from the player
    pub enemy_bullet_damage: i32,
    /// Ticks between enemy shots
    pub enemy_shoot_rate: u32,
}

fn platform_row(specs: &[(f32, f32)], width: f32, height: f32) -> Vec<Aabb> {
    specs
        .iter()
        .map(|&(x, y)| Aabb::new(x, y, width, height))
        .collect()
}

fn spawn_points(specs: &[(f32, f32)]) -> Vec<Vec2> {
    specs.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
}

fn first_level() -> LevelLayout {
    LevelLayout {
        id: LevelId::First,
        platforms: platform_row(
            &[
                (100.0, 150.0),
                (300.0, 200.0),
                (500.0, 150.0),
                (700.0, 250.0),
                (900.0, 200.0),
                (1100.0, 300.0),
                (1300.0, 250.0),
                (1500.0, 200.0),
                (1700.0, 300.0),
                (1900.0, 250.0),
                (2100.0, 350.0),
                (2300.0, 300.0),
                (2500.0, 400.0),
                (2800.0, 500.0),
            ],
            150.0,
            20.0,
        ),
        enemy_spawns: spawn_points(&[
            (300.0, 160.0),
            (500.0, 110.0),
            (700.0, 210.0),
            (900.0, 160.0),
            (1100.0, 260.0),
            (1300.0, 210.0),
            (1500.0, 160.0),
            (1700.0, 260.0),
            (1900.0, 210.0),
            (2100.0, 310.0),
            (2300.0, 260.0),
            (2500.0, 360.0),
        ]),
        goal: Vec2::new(2800.0, 450.0),
        player_bullet_damage: 20,
        enemy_bullet_damage: 10,
        enemy_shoot_rate: 120,
    }
}

fn final_level() -> LevelLayout {
    LevelLayout {
        id: LevelId::Final,
        platforms: platform_row(
            &[
                (100.0, 200.0),
                (350.0, 180.0),
                (600.0, 220.0),
                (850.0, 200.0),
                (1100.0, 240.0),
                (1400.0, 220.0),
                (1700.0, 260.0),
                (2000.0, 240.0),
                (2300.0, 280.0),
                (2600.0, 300.0),
                (2900.0, 450.0),
            ],
            200.0,
            20.0,
        ),
        enemy_spawns: spawn_points(&[
            (350.0, 140.0),
            (600.0, 180.0),
            (850.0, 160.0),
            (1100.0, 200.0),
            (1400.0, 180.0),
            (1700.0, 220.0),
            (2000.0, 200.0),
            (2300.0, 240.0),
        ]),
        goal: Vec2::new(2900.0, 400.0),
        player_bullet_damage: 10,
        enemy_bullet_damage: 10,
        enemy_shoot_rate: 60,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_level_shape() {
        let layout = LevelId::First.layout();
        assert_eq!(layout.platforms.len(), 14);
        assert_eq!(layout.enemy_spawns.len(), 12);
        assert_eq!(layout.player_bullet_damage, 20);
        assert_eq!(layout.enemy_shoot_rate, 120);
        assert_eq!(layout.goal, Vec2::new(2800.0, 450.0));
    }

    #[test]
    fn test_final_level_shape() {
        let layout = LevelId::Final.layout();
        assert_eq!(layout.platforms.len(), 11);
        assert_eq!(layout.enemy_spawns.len(), 8);
        assert_eq!(layout.player_bullet_damage, 10);
        assert_eq!(layout.enemy_shoot_rate, 60);
        assert!(layout.platforms.iter().all(|p| p.size == Vec2::new(200.0, 20.0)));
    }

    #[test]
    fn test_level_progression() {
        assert_eq!(LevelId::First.next(), Some(LevelId::Final));
        assert_eq!(LevelId::Final.next(), None);
    }
}
