//! Session state: screens, score, lives and purchased upgrades
//!
//! Lives for the whole run of the program. Level attempts reset `score` and
//! `lives`; `total_score` and `upgrades` survive until the process exits.

use serde::{Deserialize, Serialize};

use super::level::LevelId;
use crate::tuning::Tuning;

/// Coarse game screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Menu,
    LevelSelect,
    Shop,
    /// Story screen
    Context,
    Playing,
    FinalLevel,
    GameOver,
    Win,
    Credits,
}

impl Screen {
    /// Level simulated on this screen, if any
    pub fn level(&self) -> Option<LevelId> {
        match self {
            Screen::Playing => Some(LevelId::First),
            Screen::FinalLevel => Some(LevelId::Final),
            _ => None,
        }
    }

    /// Screen that simulates `level`
    pub fn for_level(level: LevelId) -> Self {
        match level {
            LevelId::First => Screen::Playing,
            LevelId::Final => Screen::FinalLevel,
        }
    }

    pub fn is_gameplay(&self) -> bool {
        self.level().is_some()
    }

    /// Screens that return to the menu on confirm
    pub fn awaits_confirm(&self) -> bool {
        matches!(
            self,
            Screen::GameOver | Screen::Win | Screen::Credits | Screen::Context
        )
    }
}

/// Discrete action tokens produced by the menu screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiAction {
    Play,
    Levels,
    Shop,
    Credits,
    Context,
    Quit,
    Level1,
    Level2,
    Back,
    Buy(Upgrade),
    Confirm,
}

/// What an action asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Action has no meaning on the current screen
    Ignore,
    Goto(Screen),
    /// Reset score and lives, build the level and enter its screen
    StartLevel(LevelId),
    Purchase(Upgrade),
    Quit,
}

/// Map an action on a screen to a transition. Pure.
pub fn transition_for(screen: Screen, action: UiAction) -> Transition {
    use UiAction as A;
    match (screen, action) {
        (Screen::Menu, A::Play) => Transition::StartLevel(LevelId::First),
        (Screen::Menu, A::Levels) => Transition::Goto(Screen::LevelSelect),
        (Screen::Menu, A::Shop) => Transition::Goto(Screen::Shop),
        (Screen::Menu, A::Credits) => Transition::Goto(Screen::Credits),
        (Screen::Menu, A::Context) => Transition::Goto(Screen::Context),
        (Screen::Menu, A::Quit) => Transition::Quit,

        (Screen::LevelSelect, A::Level1) => Transition::StartLevel(LevelId::First),
        (Screen::LevelSelect, A::Level2) => Transition::StartLevel(LevelId::Final),
        (Screen::LevelSelect, A::Back) => Transition::Goto(Screen::Menu),

        (Screen::Shop, A::Buy(upgrade)) => Transition::Purchase(upgrade),
        (Screen::Shop, A::Back) => Transition::Goto(Screen::Menu),

        (s, A::Confirm) if s.awaits_confirm() => Transition::Goto(Screen::Menu),

        _ => Transition::Ignore,
    }
}

/// Shop items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Upgrade {
    FasterShooting,
    FasterMovement,
    Shield,
}

impl Upgrade {
    pub fn key(&self) -> &'static str {
        match self {
            Upgrade::FasterShooting => "faster_shooting",
            Upgrade::FasterMovement => "faster_movement",
            Upgrade::Shield => "shield",
        }
    }

    pub fn cost(&self, tuning: &Tuning) -> u64 {
        match self {
            Upgrade::FasterShooting => tuning.faster_shooting_cost,
            Upgrade::FasterMovement => tuning.faster_movement_cost,
            Upgrade::Shield => tuning.shield_cost,
        }
    }
}

/// Owned upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Upgrades {
    pub faster_shooting: bool,
    pub faster_movement: bool,
    pub shield: bool,
}

impl Upgrades {
    pub fn has(&self, upgrade: Upgrade) -> bool {
        match upgrade {
            Upgrade::FasterShooting => self.faster_shooting,
            Upgrade::FasterMovement => self.faster_movement,
            Upgrade::Shield => self.shield,
        }
    }

    fn grant(&mut self, upgrade: Upgrade) {
        match upgrade {
            Upgrade::FasterShooting => self.faster_shooting = true,
            Upgrade::FasterMovement => self.faster_movement = true,
            Upgrade::Shield => self.shield = true,
        }
    }

    /// Player parameters these upgrades produce
    pub fn loadout(&self, tuning: &Tuning) -> Loadout {
        Loadout {
            speed: if self.faster_movement {
                tuning.player_speed_upgraded
            } else {
                tuning.player_speed
            },
            shoot_rate: if self.faster_shooting {
                tuning.player_shoot_rate_upgraded
            } else {
                tuning.player_shoot_rate
            },
            shield: self.shield,
        }
    }
}

/// Upgrade-derived player parameters, applied at every level build
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loadout {
    pub speed: f32,
    pub shoot_rate: u32,
    /// Arm the shield on (re)spawn
    pub shield: bool,
}

/// Outcome of a shop purchase attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseResult {
    Purchased { cost: u64 },
    AlreadyOwned,
    InsufficientFunds { cost: u64, available: u64 },
}

/// Score, lives and upgrades for the running program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Score of the current level attempt
    pub score: u64,
    /// Banked score across attempts; spent in the shop
    pub total_score: u64,
    pub lives: u32,
    pub upgrades: Upgrades,
    pub screen: Screen,
}

impl Session {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            score: 0,
            total_score: 0,
            lives: starting_lives,
            upgrades: Upgrades::default(),
            screen: Screen::Menu,
        }
    }

    /// Fresh attempt: score and lives reset, banked score and upgrades kept
    pub fn begin_attempt(&mut self, starting_lives: u32) {
        self.score = 0;
        self.lives = starting_lives;
    }

    /// Move the attempt's score into the bank
    pub fn bank_score(&mut self) {
        self.total_score += self.score;
    }

    /// Remove one life, returning how many remain
    pub fn lose_life(&mut self) -> u32 {
        debug_assert!(self.lives > 0, "lost a life with none left");
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Buy an upgrade. All-or-nothing: either it is marked owned and the
    /// cost deducted, or nothing changes.
    pub fn purchase(&mut self, upgrade: Upgrade, tuning: &Tuning) -> PurchaseResult {
        if self.upgrades.has(upgrade) {
            return PurchaseResult::AlreadyOwned;
        }
        let cost = upgrade.cost(tuning);
        if self.total_score < cost {
            return PurchaseResult::InsufficientFunds {
                cost,
                available: self.total_score,
            };
        }
        self.upgrades.grant(upgrade);
        self.total_score -= cost;
        log::info!("Purchased {} for {} (balance {})", upgrade.key(), cost, self.total_score);
        PurchaseResult::Purchased { cost }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_deducts_once() {
        let tuning = Tuning::default();
        let mut session = Session::new(3);
        session.total_score = 2000;

        let first = session.purchase(Upgrade::FasterMovement, &tuning);
        assert_eq!(first, PurchaseResult::Purchased { cost: 1200 });
        assert_eq!(session.total_score, 800);
        assert!(session.upgrades.faster_movement);

        let again = session.purchase(Upgrade::FasterMovement, &tuning);
        assert_eq!(again, PurchaseResult::AlreadyOwned);
        assert_eq!(session.total_score, 800);
        assert!(session.upgrades.faster_movement);
    }

    #[test]
    fn test_purchase_requires_funds() {
        let tuning = Tuning::default();
        let mut session = Session::new(3);
        session.total_score = 1599;

        let result = session.purchase(Upgrade::Shield, &tuning);
        assert_eq!(
            result,
            PurchaseResult::InsufficientFunds {
                cost: 1600,
                available: 1599
            }
        );
        assert_eq!(session.total_score, 1599);
        assert!(!session.upgrades.shield);
    }

    #[test]
    fn test_exact_funds_suffice() {
        let tuning = Tuning::default();
        let mut session = Session::new(3);
        session.total_score = 1400;
        assert!(matches!(
            session.purchase(Upgrade::FasterShooting, &tuning),
            PurchaseResult::Purchased { .. }
        ));
        assert_eq!(session.total_score, 0);
    }

    #[test]
    fn test_begin_attempt_keeps_bank_and_upgrades() {
        let mut session = Session::new(3);
        session.score = 300;
        session.total_score = 900;
        session.lives = 1;
        session.upgrades.shield = true;

        session.begin_attempt(3);
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 3);
        assert_eq!(session.total_score, 900);
        assert!(session.upgrades.shield);
    }

    #[test]
    fn test_loadout_from_upgrades() {
        let tuning = Tuning::default();
        let base = Upgrades::default().loadout(&tuning);
        assert_eq!(base.speed, 5.0);
        assert_eq!(base.shoot_rate, 10);
        assert!(!base.shield);

        let all = Upgrades {
            faster_shooting: true,
            faster_movement: true,
            shield: true,
        }
        .loadout(&tuning);
        assert_eq!(all.speed, 7.0);
        assert_eq!(all.shoot_rate, 5);
        assert!(all.shield);
    }

    #[test]
    fn test_menu_transitions() {
        assert_eq!(
            transition_for(Screen::Menu, UiAction::Play),
            Transition::StartLevel(LevelId::First)
        );
        assert_eq!(
            transition_for(Screen::LevelSelect, UiAction::Level2),
            Transition::StartLevel(LevelId::Final)
        );
        assert_eq!(
            transition_for(Screen::Shop, UiAction::Buy(Upgrade::Shield)),
            Transition::Purchase(Upgrade::Shield)
        );
        assert_eq!(transition_for(Screen::Menu, UiAction::Quit), Transition::Quit);
        // Buying only works inside the shop
        assert_eq!(
            transition_for(Screen::Menu, UiAction::Buy(Upgrade::Shield)),
            Transition::Ignore
        );
    }

    #[test]
    fn test_confirm_returns_to_menu_from_terminal_screens() {
        for screen in [Screen::GameOver, Screen::Win, Screen::Credits, Screen::Context] {
            assert_eq!(
                transition_for(screen, UiAction::Confirm),
                Transition::Goto(Screen::Menu)
            );
        }
        assert_eq!(transition_for(Screen::Playing, UiAction::Confirm), Transition::Ignore);
        assert_eq!(transition_for(Screen::Menu, UiAction::Confirm), Transition::Ignore);
    }
}
