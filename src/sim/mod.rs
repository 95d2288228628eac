//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod aabb;
pub mod collision;
pub mod level;
pub mod session;
pub mod state;
pub mod tick;

pub use aabb::{Aabb, clamp_into, overlaps};
pub use collision::{Bounded, VerticalResolution, any_overlap, integrate_vertical, overlapping_indices};
pub use level::{LevelId, LevelLayout};
pub use session::{
    Loadout, PurchaseResult, Screen, Session, Transition, UiAction, Upgrade, Upgrades, transition_for,
};
pub use state::{Bullet, BulletOwner, Enemy, GameEvent, GameState, Goal, Platform, Player, World};
pub use tick::{TickInput, TickOutcome, apply_action, tick};
