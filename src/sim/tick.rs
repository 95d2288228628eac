//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call to
//! [`tick`] is one frame: input, movement, physics, combat, then level
//! outcome. Menu screens only react to discrete actions via [`apply_action`].

use super::collision::{Bounded, any_overlap, overlapping_indices};
use super::level::LevelId;
use super::session::{PurchaseResult, Screen, Transition, UiAction, transition_for};
use super::state::{GameEvent, GameState, World};
use crate::consts::*;

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key went down this tick
    pub jump: bool,
    /// Escape went down: abandon the level and return to the menu
    pub escape: bool,
    /// Confirm went down (leaves story/credits/game over/win screens)
    pub confirm: bool,
    /// Window closed or quit requested
    pub quit: bool,
    /// Held keys
    pub left: bool,
    pub right: bool,
    pub down: bool,
    /// Fire is level-triggered: holding it keeps shooting at the fire rate
    pub fire: bool,
    /// Demo mode - the autopilot plays the level
    pub autopilot: bool,
}

impl TickInput {
    /// Horizontal and vertical movement axis from the held keys
    pub fn axis(&self) -> (f32, f32) {
        let mut dx = 0.0;
        if self.left {
            dx -= 1.0;
        }
        if self.right {
            dx += 1.0;
        }
        let dy = if self.down { 1.0 } else { 0.0 };
        (dx, dy)
    }
}

/// What a tick or action did to the level/session, for the caller's loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing level-changing happened
    Continue,
    /// A life was lost and the level restarted
    LifeLost { lives_left: u32 },
    /// Goal reached; the next level has been built
    LevelComplete { next: LevelId },
    /// Last life lost; score banked
    GameOver,
    /// Final goal reached; score banked
    Victory,
    /// Escape pressed mid-level
    Abandoned,
    /// Process should exit
    Quit,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if input.quit {
        return TickOutcome::Quit;
    }

    let Some(level) = state.session.screen.level() else {
        if input.confirm {
            return apply_action(state, UiAction::Confirm);
        }
        return TickOutcome::Continue;
    };

    state.time_ticks += 1;

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }

    let outcome = step_level(state, &input, level);
    debug_check_invariants(state);
    outcome
}

/// Apply a menu action token
pub fn apply_action(state: &mut GameState, action: UiAction) -> TickOutcome {
    match transition_for(state.session.screen, action) {
        Transition::Ignore => {
            log::debug!("Ignoring {:?} on {:?}", action, state.session.screen);
        }
        Transition::Goto(screen) => state.set_screen(screen),
        Transition::StartLevel(level) => state.start_level(level),
        Transition::Purchase(upgrade) => {
            if let PurchaseResult::Purchased { cost } = state.session.purchase(upgrade, &state.tuning) {
                state.events.push(GameEvent::UpgradePurchased { upgrade, cost });
            }
        }
        Transition::Quit => return TickOutcome::Quit,
    }
    TickOutcome::Continue
}

/// Demo driver: run right, keep firing, jump whenever standing still vertically
fn autopilot(state: &GameState, input: &mut TickInput) {
    let player = &state.world.player;
    input.right = true;
    input.left = false;
    input.fire = true;
    input.jump = !player.jumping && player.velocity_y == 0.0;
}

/// One gameplay tick on a level screen. Stage order matters: later checks
/// see post-movement, post-collision state.
fn step_level(state: &mut GameState, input: &TickInput, level: LevelId) -> TickOutcome {
    // 1. Discrete and held input
    if input.escape {
        log::info!("{} abandoned", level.as_str());
        state.set_screen(Screen::Menu);
        return TickOutcome::Abandoned;
    }
    if input.jump {
        state.world.player.jump(state.tuning.jump_force);
    }
    if input.fire {
        if let Some(bullet) = state.world.player.shoot(state.tuning.bullet_size) {
            state.world.player_bullets.push(bullet);
            state.events.push(GameEvent::PlayerFired);
        }
    }

    // 2. Scroll the world or move the player
    let (dx, dy) = input.axis();
    state.world.scroll_or_move(dx, dy);

    // 3. Physics: player, then enemies, then bullets
    {
        let GameState {
            world,
            tuning,
            events,
            ..
        } = &mut *state;

        world
            .player
            .apply_gravity_and_platforms(&world.platforms, tuning.gravity, &World::viewport());

        let player_bounds = world.player.bounds;
        for enemy in &mut world.enemies {
            if let Some(bullet) = enemy.update(&world.platforms, &player_bounds, tuning) {
                world.enemy_bullets.push(bullet);
                events.push(GameEvent::EnemyFired);
            }
        }

        for bullet in world.player_bullets.iter_mut().chain(world.enemy_bullets.iter_mut()) {
            bullet.advance(tuning.bullet_speed);
        }
        world.player_bullets.retain(|b| !b.is_off_screen(VIEW_WIDTH));
        world.enemy_bullets.retain(|b| !b.is_off_screen(VIEW_WIDTH));

        // 4. Anything that scrolled off the left edge is gone
        world.cull_left();
    }

    // 5. Damage to the player
    let mut outcome = TickOutcome::Continue;
    if let Some(result) = resolve_player_damage(state, level) {
        if result == TickOutcome::GameOver {
            return result;
        }
        outcome = result;
    }

    // 6. Player bullets against enemies
    resolve_player_bullets(state);

    // 7. Goal
    if let Some(result) = resolve_goal(state, level) {
        outcome = result;
    }
    outcome
}

/// Contact and gunfire damage. Returns `Some` if a life was lost.
fn resolve_player_damage(state: &mut GameState, level: LevelId) -> Option<TickOutcome> {
    let mut outcome = None;

    // Ground or enemy contact: one event no matter how many enemies touch,
    // and it costs a whole life
    let player = state.world.player.bounds();
    let on_ground = player.bottom() >= GROUND_LEVEL;
    if on_ground || any_overlap(&player, &state.world.enemies) {
        if state.world.player.take_damage() {
            let result = lose_life(state, level);
            if result == TickOutcome::GameOver {
                return Some(result);
            }
            outcome = Some(result);
        } else {
            state.events.push(GameEvent::ShieldAbsorbed);
        }
    }

    // Enemy bullets: each one hitting is consumed and deals fixed damage
    let player = state.world.player.bounds();
    let hits = overlapping_indices(&player, &state.world.enemy_bullets);
    if hits.is_empty() {
        return outcome;
    }
    let mut index = 0;
    state.world.enemy_bullets.retain(|_| {
        let keep = !hits.contains(&index);
        index += 1;
        keep
    });

    // Hits already counted still land after a respawn, on the fresh player
    for _ in &hits {
        if !state.world.player.take_damage() {
            state.events.push(GameEvent::ShieldAbsorbed);
            continue;
        }
        let damage = state.world.enemy_bullet_damage;
        let player = &mut state.world.player;
        player.health -= damage;
        state.events.push(GameEvent::PlayerHit {
            damage,
            health: player.health,
        });
        if player.health <= 0 {
            let result = lose_life(state, level);
            if result == TickOutcome::GameOver {
                return Some(result);
            }
            outcome = Some(result);
        }
    }
    outcome
}

/// Spend a life, restart the level from scratch, and end the run when no
/// lives remain.
fn lose_life(state: &mut GameState, level: LevelId) -> TickOutcome {
    let lives_left = state.session.lose_life();
    log::debug!("Life lost on {}, {} left", level.as_str(), lives_left);
    state.rebuild_level(level);
    state.events.push(GameEvent::LifeLost { lives_left });

    if lives_left == 0 {
        state.session.bank_score();
        let total_score = state.session.total_score;
        log::info!("Game over, total score {}", total_score);
        state.set_screen(Screen::GameOver);
        state.events.push(GameEvent::GameOver { total_score });
        return TickOutcome::GameOver;
    }
    TickOutcome::LifeLost { lives_left }
}

/// Bullets damage every enemy they overlap and are then spent. Removal is
/// deferred until every bullet has been checked.
fn resolve_player_bullets(state: &mut GameState) {
    let GameState {
        world,
        session,
        tuning,
        events,
        ..
    } = &mut *state;

    if world.player_bullets.is_empty() || world.enemies.is_empty() {
        return;
    }

    let damage = world.player_bullet_damage;
    let mut spent = vec![false; world.player_bullets.len()];
    let mut dead = vec![false; world.enemies.len()];

    for (bullet_index, bullet) in world.player_bullets.iter().enumerate() {
        for enemy_index in overlapping_indices(&bullet.bounds, &world.enemies) {
            if dead[enemy_index] {
                continue;
            }
            spent[bullet_index] = true;
            let enemy = &mut world.enemies[enemy_index];
            enemy.health -= damage;
            if enemy.is_dead() {
                dead[enemy_index] = true;
                session.score += tuning.kill_bonus;
                events.push(GameEvent::EnemyKilled {
                    bonus: tuning.kill_bonus,
                });
            } else {
                events.push(GameEvent::EnemyHit {
                    remaining: enemy.health,
                });
            }
        }
    }

    let mut index = 0;
    world.player_bullets.retain(|_| {
        let keep = !spent[index];
        index += 1;
        keep
    });
    let mut index = 0;
    world.enemies.retain(|_| {
        let keep = !dead[index];
        index += 1;
        keep
    });
}

/// Touching the goal consumes it and moves to the next level, or wins
fn resolve_goal(state: &mut GameState, level: LevelId) -> Option<TickOutcome> {
    let goal = state.world.goal?;
    if !goal.bounds().overlaps(&state.world.player.bounds()) {
        return None;
    }
    state.world.goal = None;
    state.events.push(GameEvent::GoalReached { level });

    match level.next() {
        Some(next) => {
            log::info!("{} cleared, advancing to {}", level.as_str(), next.as_str());
            state.rebuild_level(next);
            state.set_screen(Screen::for_level(next));
            Some(TickOutcome::LevelComplete { next })
        }
        None => {
            state.session.bank_score();
            let total_score = state.session.total_score;
            log::info!("Victory, total score {}", total_score);
            state.set_screen(Screen::Win);
            state.events.push(GameEvent::Victory { total_score });
            Some(TickOutcome::Victory)
        }
    }
}

fn debug_check_invariants(state: &GameState) {
    let world = &state.world;
    debug_assert!(
        (0.0..=MAX_SCROLL).contains(&world.scroll_x),
        "scroll_x out of range: {}",
        world.scroll_x
    );
    debug_assert!(
        world.player.health <= world.player.max_health,
        "player health {} above max {}",
        world.player.health,
        world.player.max_health
    );
    debug_assert!(
        world.enemies.iter().all(|e| e.health <= e.max_health),
        "enemy health above max"
    );
}
