//! Shuriken Sundown headless runner
//!
//! Loads settings, lets the autopilot play from level 1 and prints a JSON
//! summary of the session. Usage: `shuriken-sundown [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use serde::Serialize;

    use shuriken_sundown::audio::{AudioCommand, AudioDirector, MusicTrack};
    use shuriken_sundown::consts::*;
    use shuriken_sundown::sim::{
        GameEvent, GameState, Screen, Session, TickInput, TickOutcome, UiAction, apply_action, tick,
    };
    use shuriken_sundown::{ConfigError, Settings};

    /// Wall-clock time the runner pretends passes per rendered frame
    const FRAME_DT: f32 = 1.0 / 30.0;

    #[derive(Debug, Serialize)]
    struct Summary {
        seed: u64,
        ticks: u64,
        screen: Screen,
        session: Session,
        kills: u32,
        lives_lost: u32,
        shots_fired: u32,
        audio_commands: usize,
        /// Music left playing when the run stopped
        music: Option<MusicTrack>,
        outcome: String,
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    struct Runner {
        state: GameState,
        audio: AudioDirector,
        settings: Settings,
        accumulator: f32,
        kills: u32,
        lives_lost: u32,
        shots_fired: u32,
        audio_commands: usize,
    }

    impl Runner {
        fn new(settings: Settings, seed: u64) -> Self {
            Self {
                state: GameState::with_tuning(seed, settings.tuning.clone()),
                audio: AudioDirector::new(),
                settings,
                accumulator: 0.0,
                kills: 0,
                lives_lost: 0,
                shots_fired: 0,
                audio_commands: 0,
            }
        }

        /// Hand this frame's events to the audio director
        fn flush_events(&mut self) {
            let events = self.state.drain_events();
            for event in &events {
                match event {
                    GameEvent::EnemyKilled { .. } => self.kills += 1,
                    GameEvent::LifeLost { .. } => self.lives_lost += 1,
                    GameEvent::PlayerFired => self.shots_fired += 1,
                    GameEvent::ScreenChanged { .. } | GameEvent::LevelLoaded { .. } => {
                        log::info!("{:?}", event)
                    }
                    _ => log::trace!("{:?}", event),
                }
            }
            let commands = self
                .audio
                .update(self.state.session.screen, &events, &self.settings);
            for command in &commands {
                match command {
                    AudioCommand::PlaySfx { .. } => log::trace!("audio: {:?}", command),
                    _ => log::debug!("audio: {:?}", command),
                }
            }
            self.audio_commands += commands.len();
        }

        /// Advance one frame in fixed substeps. Returns the first outcome that
        /// ends the run.
        fn frame(&mut self, input: &TickInput) -> Option<TickOutcome> {
            self.accumulator += FRAME_DT;
            let mut substeps = 0;
            let mut ended = None;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let outcome = tick(&mut self.state, input);
                self.accumulator -= SIM_DT;
                substeps += 1;
                match outcome {
                    TickOutcome::Continue => {}
                    TickOutcome::LifeLost { lives_left } => {
                        log::debug!("Life lost, {} left", lives_left)
                    }
                    TickOutcome::LevelComplete { next } => {
                        log::info!("Advancing to {}", next.as_str())
                    }
                    TickOutcome::GameOver
                    | TickOutcome::Victory
                    | TickOutcome::Abandoned
                    | TickOutcome::Quit => {
                        ended = Some(outcome);
                        break;
                    }
                }
            }
            // Drop leftover time if we hit the substep cap
            if substeps >= MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }
            self.flush_events();
            ended
        }
    }

    pub fn run() -> Result<(), ConfigError> {
        env_logger::init();
        log::info!("Shuriken Sundown (headless) starting...");

        let settings_path = std::env::args().nth(1).map(PathBuf::from);
        let settings = Settings::load(settings_path.as_deref());
        let seed = settings.seed.unwrap_or_else(clock_seed);
        let demo_ticks = u64::from(settings.demo_ticks);
        log::info!("Seed {}, running {} ticks", seed, demo_ticks);

        let mut runner = Runner::new(settings, seed);
        runner.flush_events();
        apply_action(&mut runner.state, UiAction::Play);
        runner.flush_events();

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let mut outcome = None;
        while runner.state.time_ticks < demo_ticks && runner.state.session.screen.is_gameplay() {
            if let Some(ended) = runner.frame(&input) {
                outcome = Some(ended);
                break;
            }
        }

        let summary = Summary {
            seed,
            ticks: runner.state.time_ticks,
            screen: runner.state.session.screen,
            session: runner.state.session.clone(),
            kills: runner.kills,
            lives_lost: runner.lives_lost,
            shots_fired: runner.shots_fired,
            audio_commands: runner.audio_commands,
            music: runner.audio.current_track(),
            outcome: match outcome {
                Some(o) => format!("{:?}", o),
                None => "TimeLimit".to_string(),
            },
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), shuriken_sundown::ConfigError> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web frontend; the library is the wasm surface
}
