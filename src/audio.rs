//! Audio cue selection
//!
//! Turns simulation events and screen changes into playback commands. No
//! sound is produced here; a frontend feeds the commands to its mixer.

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{GameEvent, Screen};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoundEffect {
    /// Shuriken thrown by the player
    PlayerShot,
    /// Enemy fires at the player
    EnemyShot,
    /// Enemy hit but still standing
    EnemyHit,
    /// Enemy destroyed
    EnemyDown,
    /// Player takes bullet damage
    PlayerHurt,
    /// Shield soaks a hit
    ShieldBreak,
    LifeLost,
    /// Goal reached
    LevelClear,
    GameOver,
    Victory,
    /// Shop purchase
    Purchase,
}

impl SoundEffect {
    /// Per-effect gain relative to the sfx volume
    fn gain(&self) -> f32 {
        match self {
            // Fires every few ticks while held
            SoundEffect::PlayerShot => 0.5,
            SoundEffect::EnemyShot => 0.4,
            _ => 1.0,
        }
    }

    fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerFired => Some(SoundEffect::PlayerShot),
            GameEvent::EnemyFired => Some(SoundEffect::EnemyShot),
            GameEvent::EnemyHit { .. } => Some(SoundEffect::EnemyHit),
            GameEvent::EnemyKilled { .. } => Some(SoundEffect::EnemyDown),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::PlayerHurt),
            GameEvent::ShieldAbsorbed => Some(SoundEffect::ShieldBreak),
            GameEvent::LifeLost { .. } => Some(SoundEffect::LifeLost),
            GameEvent::GoalReached { .. } => Some(SoundEffect::LevelClear),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::Victory { .. } => Some(SoundEffect::Victory),
            GameEvent::UpgradePurchased { .. } => Some(SoundEffect::Purchase),
            GameEvent::LevelLoaded { .. } | GameEvent::ScreenChanged { .. } => None,
        }
    }
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MusicTrack {
    Menu,
    Gameplay,
    /// Plays under the story screen
    Story,
}

impl MusicTrack {
    /// Track for a screen; `None` means silence
    pub fn for_screen(screen: Screen) -> Option<Self> {
        match screen {
            Screen::Menu | Screen::LevelSelect | Screen::Shop => Some(MusicTrack::Menu),
            Screen::Playing | Screen::FinalLevel => Some(MusicTrack::Gameplay),
            Screen::Context => Some(MusicTrack::Story),
            Screen::Credits | Screen::GameOver | Screen::Win => None,
        }
    }
}

/// Playback instruction for the frontend
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AudioCommand {
    /// Start looping `track`, replacing whatever plays
    PlayMusic { track: MusicTrack, volume: f32 },
    StopMusic,
    PlaySfx { effect: SoundEffect, volume: f32 },
}

/// Tracks which music is playing and emits commands when it must change
#[derive(Debug, Default)]
pub struct AudioDirector {
    current: Option<MusicTrack>,
}

impl AudioDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track currently playing, if any
    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current
    }

    /// Commands for one frame. Music changes come first, then one effect per
    /// event in the order the events were raised.
    pub fn update(
        &mut self,
        screen: Screen,
        events: &[GameEvent],
        settings: &Settings,
    ) -> Vec<AudioCommand> {
        let mut commands = Vec::new();

        let wanted = MusicTrack::for_screen(screen);
        if wanted != self.current {
            match wanted {
                Some(track) => commands.push(AudioCommand::PlayMusic {
                    track,
                    volume: settings.effective_music_volume(),
                }),
                None => commands.push(AudioCommand::StopMusic),
            }
            self.current = wanted;
        }

        let sfx_volume = settings.effective_sfx_volume();
        commands.extend(events.iter().filter_map(SoundEffect::for_event).map(|effect| {
            AudioCommand::PlaySfx {
                effect,
                volume: sfx_volume * effect.gain(),
            }
        }));

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::LevelId;

    #[test]
    fn test_music_follows_screen() {
        let settings = Settings::default();
        let mut director = AudioDirector::new();

        let cmds = director.update(Screen::Menu, &[], &settings);
        assert_eq!(
            cmds,
            vec![AudioCommand::PlayMusic {
                track: MusicTrack::Menu,
                volume: settings.effective_music_volume()
            }]
        );

        // Same track across menu screens: no restart
        assert!(director.update(Screen::Shop, &[], &settings).is_empty());
        assert!(director.update(Screen::LevelSelect, &[], &settings).is_empty());

        let cmds = director.update(Screen::Playing, &[], &settings);
        assert!(matches!(
            cmds[0],
            AudioCommand::PlayMusic {
                track: MusicTrack::Gameplay,
                ..
            }
        ));

        // Level 1 to final level keeps the gameplay track running
        assert!(director.update(Screen::FinalLevel, &[], &settings).is_empty());

        assert_eq!(
            director.update(Screen::Win, &[], &settings),
            vec![AudioCommand::StopMusic]
        );
        assert_eq!(director.current_track(), None);
    }

    #[test]
    fn test_story_music_on_context() {
        let mut director = AudioDirector::new();
        director.update(Screen::Context, &[], &Settings::default());
        assert_eq!(director.current_track(), Some(MusicTrack::Story));
    }

    #[test]
    fn test_events_map_to_effects_in_order() {
        let settings = Settings::default();
        let mut director = AudioDirector::new();
        director.update(Screen::Playing, &[], &settings);

        let events = [
            GameEvent::PlayerFired,
            GameEvent::LevelLoaded {
                level: LevelId::First,
            },
            GameEvent::EnemyKilled { bonus: 50 },
        ];
        let cmds = director.update(Screen::Playing, &events, &settings);
        assert_eq!(cmds.len(), 2);
        assert_eq!(
            cmds[0],
            AudioCommand::PlaySfx {
                effect: SoundEffect::PlayerShot,
                volume: settings.effective_sfx_volume() * 0.5
            }
        );
        assert!(matches!(
            cmds[1],
            AudioCommand::PlaySfx {
                effect: SoundEffect::EnemyDown,
                ..
            }
        ));
    }

    #[test]
    fn test_muted_emits_silent_commands() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let mut director = AudioDirector::new();
        let cmds = director.update(Screen::Playing, &[GameEvent::ShieldAbsorbed], &settings);
        for cmd in cmds {
            match cmd {
                AudioCommand::PlayMusic { volume, .. } | AudioCommand::PlaySfx { volume, .. } => {
                    assert_eq!(volume, 0.0)
                }
                AudioCommand::StopMusic => {}
            }
        }
    }
}
