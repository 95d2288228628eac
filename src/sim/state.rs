//! Game state and core simulation types
//!
//! Entities are plain rectangles plus kind-specific state. All positions are
//! in view space: scrolling moves the scenery, not the camera.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::{Aabb, clamp_into};
use super::collision::{Bounded, VerticalResolution, integrate_vertical};
use super::level::{LevelId, LevelLayout};
use super::session::{Loadout, Screen, Session, Upgrade};
use crate::consts::*;
use crate::tuning::Tuning;

/// Who fired a bullet; fixes what it can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A horizontally travelling projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub bounds: Aabb,
    /// +1 moves right, -1 moves left
    pub direction: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(pos: Vec2, size: Vec2, direction: f32, owner: BulletOwner) -> Self {
        Self {
            bounds: Aabb::from_pos_size(pos, size),
            direction,
            owner,
        }
    }

    pub fn advance(&mut self, speed: f32) {
        self.bounds.pos.x += self.direction * speed;
    }

    /// Fully outside the visible window on either side
    pub fn is_off_screen(&self, view_width: f32) -> bool {
        self.bounds.right() < 0.0 || self.bounds.left() > view_width
    }
}

/// Static ledge the player and enemies can stand on
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Platform {
    pub bounds: Aabb,
}

/// Level exit
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Goal {
    pub bounds: Aabb,
}

/// The player's ninja
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub bounds: Aabb,
    pub velocity_y: f32,
    /// Set by a jump, cleared on landing. Blocks jumping again mid-air.
    pub jumping: bool,
    /// Decides which edge bullets leave from and which way they fly
    pub facing_right: bool,
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    /// Ticks between shots while fire is held
    pub shoot_rate: u32,
    /// Ticks left before the next shot
    pub shoot_cooldown: u32,
    pub shield_active: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            bounds: Aabb::from_pos_size(tuning.spawn_point, tuning.player_size),
            velocity_y: 0.0,
            jumping: false,
            facing_right: false,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            speed: tuning.player_speed,
            shoot_rate: tuning.player_shoot_rate,
            shoot_cooldown: 0,
            shield_active: false,
        }
    }

    /// Fall under gravity, land on or bump off platforms, then stay on screen
    pub fn apply_gravity_and_platforms(
        &mut self,
        platforms: &[Platform],
        gravity: f32,
        viewport: &Aabb,
    ) -> VerticalResolution {
        let result = integrate_vertical(&mut self.bounds, &mut self.velocity_y, gravity, platforms);
        if result.landed() {
            self.jumping = false;
        }
        self.bounds = clamp_into(self.bounds, viewport);
        result
    }

    /// Start a jump unless one is already in progress. Does not require
    /// standing on anything: walking off a ledge still allows one jump.
    pub fn jump(&mut self, jump_force: f32) {
        if !self.jumping {
            self.velocity_y = jump_force;
            self.jumping = true;
        }
    }

    /// Displace by `(dx, dy) * speed` and turn to face the horizontal input
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.bounds.translate(Vec2::new(dx, dy) * self.speed);
        if dx > 0.0 && !self.facing_right {
            self.facing_right = true;
        } else if dx < 0.0 && self.facing_right {
            self.facing_right = false;
        }
    }

    /// Called every tick fire is held. Fires when the cooldown has run out,
    /// otherwise counts it down by one.
    pub fn shoot(&mut self, bullet_size: Vec2) -> Option<Bullet> {
        if self.shoot_cooldown == 0 {
            let (x, direction) = if self.facing_right {
                (self.bounds.right(), 1.0)
            } else {
                (self.bounds.left(), -1.0)
            };
            let pos = Vec2::new(x, self.bounds.center().y);
            self.shoot_cooldown = self.shoot_rate;
            Some(Bullet::new(pos, bullet_size, direction, BulletOwner::Player))
        } else {
            self.shoot_cooldown -= 1;
            None
        }
    }

    /// Gate a damage event through the shield. Returns true if the damage
    /// goes through; an active shield is consumed instead.
    pub fn take_damage(&mut self) -> bool {
        if self.shield_active {
            self.shield_active = false;
            return false;
        }
        true
    }

    /// Back to the spawn point at full health, motionless
    pub fn reset_to_spawn(&mut self, spawn: Vec2) {
        self.bounds.pos = spawn;
        self.velocity_y = 0.0;
        self.health = self.max_health;
    }

    pub fn apply_loadout(&mut self, loadout: &Loadout) {
        self.speed = loadout.speed;
        self.shoot_rate = loadout.shoot_rate;
        if loadout.shield {
            self.shield_active = true;
        }
    }
}

/// A sheriff guarding a platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub bounds: Aabb,
    pub health: i32,
    pub max_health: i32,
    pub velocity_y: f32,
    pub shoot_timer: u32,
    pub shoot_rate: u32,
    /// Walks back and forth along its platform
    pub can_patrol: bool,
    /// +1 or -1
    pub patrol_direction: f32,
    /// Index into the world's platforms of the last platform landed on
    pub platform: Option<usize>,
}

impl Enemy {
    pub fn new(pos: Vec2, tuning: &Tuning, shoot_rate: u32, can_patrol: bool) -> Self {
        Self {
            bounds: Aabb::from_pos_size(pos, tuning.enemy_size),
            health: tuning.enemy_max_health,
            max_health: tuning.enemy_max_health,
            velocity_y: 0.0,
            shoot_timer: 0,
            shoot_rate,
            can_patrol,
            patrol_direction: 1.0,
            platform: None,
        }
    }

    /// Fall, patrol, and maybe fire at the player. Returns the bullet fired
    /// this tick, if any.
    pub fn update(&mut self, platforms: &[Platform], player: &Aabb, tuning: &Tuning) -> Option<Bullet> {
        let result = integrate_vertical(&mut self.bounds, &mut self.velocity_y, tuning.gravity, platforms);
        if let Some(index) = result.landed_on {
            self.platform = Some(index);
        }

        if self.can_patrol {
            if let Some(ledge) = self.platform.and_then(|i| platforms.get(i)) {
                self.bounds.pos.x += self.patrol_direction * tuning.enemy_patrol_speed;
                if self.bounds.right() > ledge.bounds.right() {
                    self.patrol_direction = -1.0;
                } else if self.bounds.left() < ledge.bounds.left() {
                    self.patrol_direction = 1.0;
                }
            }
        }

        self.shoot_timer += 1;
        if self.shoot_timer >= self.shoot_rate {
            self.shoot_timer = 0;
            // Aim is decided once, at the moment of firing
            let direction = if player.left() < self.bounds.left() { -1.0 } else { 1.0 };
            return Some(Bullet::new(
                self.bounds.center(),
                tuning.bullet_size,
                direction,
                BulletOwner::Enemy,
            ));
        }
        None
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

impl Bounded for Platform {
    fn bounds(&self) -> Aabb {
        self.bounds
    }
}

impl Bounded for Goal {
    fn bounds(&self) -> Aabb {
        self.bounds
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Aabb {
        self.bounds
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Aabb {
        self.bounds
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Aabb {
        self.bounds
    }
}

/// Entities of the level being played
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub level: LevelId,
    pub player: Player,
    /// Spawn order; stable across ticks
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub platforms: Vec<Platform>,
    /// Consumed when reached
    pub goal: Option<Goal>,
    /// How far the scenery has been shifted left, `0..=MAX_SCROLL`
    pub scroll_x: f32,
    /// Damage per player bullet hit on an enemy (level-specific)
    pub player_bullet_damage: i32,
    /// Damage per enemy bullet hit on the player (level-specific)
    pub enemy_bullet_damage: i32,
}

impl World {
    /// An empty world holding only the player at the spawn point
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            level: LevelId::First,
            player: Player::new(tuning),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            platforms: Vec::new(),
            goal: None,
            scroll_x: 0.0,
            player_bullet_damage: 0,
            enemy_bullet_damage: 0,
        }
    }

    /// Throw away every entity except the player and lay out `layout` from
    /// scratch. The player is respawned and re-equipped, not recreated.
    pub fn build<R: Rng>(&mut self, layout: &LevelLayout, loadout: &Loadout, tuning: &Tuning, rng: &mut R) {
        self.level = layout.id;
        self.scroll_x = 0.0;
        // `random_bool` panics outside 0..=1
        let patrol_chance = if tuning.patrol_chance.is_nan() {
            0.0
        } else {
            tuning.patrol_chance.clamp(0.0, 1.0)
        };
        self.platforms = layout
            .platforms
            .iter()
            .map(|&bounds| Platform { bounds })
            .collect();
        self.enemies = layout
            .enemy_spawns
            .iter()
            .map(|&pos| {
                let can_patrol = rng.random_bool(patrol_chance);
                Enemy::new(pos, tuning, layout.enemy_shoot_rate, can_patrol)
            })
            .collect();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.goal = Some(Goal {
            bounds: Aabb::from_pos_size(layout.goal, tuning.goal_size),
        });
        self.player_bullet_damage = layout.player_bullet_damage;
        self.enemy_bullet_damage = layout.enemy_bullet_damage;

        self.player.reset_to_spawn(tuning.spawn_point);
        self.player.apply_loadout(loadout);
    }

    /// The visible window in view space
    pub fn viewport() -> Aabb {
        Aabb::new(0.0, 0.0, VIEW_WIDTH, VIEW_HEIGHT)
    }

    /// Move everything except the player horizontally
    pub fn shift_scenery(&mut self, dx: f32) {
        let delta = Vec2::new(dx, 0.0);
        for platform in &mut self.platforms {
            platform.bounds.translate(delta);
        }
        for enemy in &mut self.enemies {
            enemy.bounds.translate(delta);
        }
        for bullet in self.player_bullets.iter_mut().chain(self.enemy_bullets.iter_mut()) {
            bullet.bounds.translate(delta);
        }
        if let Some(goal) = &mut self.goal {
            goal.bounds.translate(delta);
        }
    }

    /// Camera follow. Walking right past the middle of the screen scrolls
    /// the world by the player's speed and pins the player to the middle;
    /// any other input moves the player directly. Returns true if the world
    /// scrolled.
    pub fn scroll_or_move(&mut self, dx: f32, dy: f32) -> bool {
        let midpoint = VIEW_WIDTH / 2.0;
        let scrolled = if dx > 0.0 && self.player.bounds.left() > midpoint && self.scroll_x < MAX_SCROLL {
            let step = self.player.speed;
            self.scroll_x += step;
            self.player.bounds.pos.x = midpoint;
            self.shift_scenery(-step);
            true
        } else {
            self.player.move_by(dx, dy);
            false
        };
        self.clamp_scroll();
        scrolled
    }

    /// Keep `scroll_x` in range; undo the part of a shift that overshot so
    /// scenery stays consistent with the scroll offset.
    pub fn clamp_scroll(&mut self) {
        let clamped = self.scroll_x.clamp(0.0, MAX_SCROLL);
        let overshoot = self.scroll_x - clamped;
        if overshoot != 0.0 {
            self.scroll_x = clamped;
            self.shift_scenery(overshoot);
        }
    }

    /// Drop enemies and bullets that scrolled past the left edge
    pub fn cull_left(&mut self) {
        self.enemies.retain(|e| e.bounds.right() >= 0.0);
        self.player_bullets.retain(|b| b.bounds.right() >= 0.0);
        self.enemy_bullets.retain(|b| b.bounds.right() >= 0.0);
    }
}

/// Semantic events for the presentation layer (sound, effects, HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelLoaded { level: LevelId },
    PlayerFired,
    EnemyFired,
    EnemyHit { remaining: i32 },
    EnemyKilled { bonus: u64 },
    PlayerHit { damage: i32, health: i32 },
    ShieldAbsorbed,
    LifeLost { lives_left: u32 },
    GoalReached { level: LevelId },
    GameOver { total_score: u64 },
    Victory { total_score: u64 },
    ScreenChanged { from: Screen, to: Screen },
    UpgradePurchased { upgrade: Upgrade, cost: u64 },
}

/// Complete game state: session bookkeeping plus the live level
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Drives enemy patrol assignment
    rng: Pcg32,
    pub tuning: Tuning,
    pub session: Session,
    pub world: World,
    /// Simulated gameplay ticks
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and the default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            session: Session::new(tuning.starting_lives),
            world: World::new(&tuning),
            tuning,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Rebuild `level` from scratch with the current upgrades applied
    pub fn rebuild_level(&mut self, level: LevelId) {
        let layout = level.layout();
        let loadout = self.session.upgrades.loadout(&self.tuning);
        self.world.build(&layout, &loadout, &self.tuning, &mut self.rng);
        log::info!(
            "{} built: {} platforms, {} enemies",
            level.as_str(),
            self.world.platforms.len(),
            self.world.enemies.len()
        );
        self.events.push(GameEvent::LevelLoaded { level });
    }

    /// Fresh attempt at `level`: score and lives reset, level rebuilt
    pub fn start_level(&mut self, level: LevelId) {
        self.session.begin_attempt(self.tuning.starting_lives);
        self.rebuild_level(level);
        self.set_screen(Screen::for_level(level));
    }

    pub fn set_screen(&mut self, to: Screen) {
        let from = self.session.screen;
        if from == to {
            return;
        }
        log::info!("Screen {:?} -> {:?}", from, to);
        self.session.screen = to;
        self.events.push(GameEvent::ScreenChanged { from, to });
    }

    /// Hand the accumulated events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
