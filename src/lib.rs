//! Shuriken Sundown - A side-scrolling ninja platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, combat, session state)
//! - `audio`: Translates simulation events into audio cues
//! - `settings`: Player preferences (volumes, seed, demo length)
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration errors

pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Visible window dimensions
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;
    /// Full level width; the camera scrolls over `WORLD_WIDTH - VIEW_WIDTH`
    pub const WORLD_WIDTH: f32 = 3000.0;
    /// Touching this line with the player's feet costs a life
    pub const GROUND_LEVEL: f32 = 560.0;

    /// Furthest the world can scroll
    pub const MAX_SCROLL: f32 = WORLD_WIDTH - VIEW_WIDTH;
}
