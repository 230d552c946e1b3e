//! Game driver
//!
//! Owns the session, the RNG and the presenter. Runs the tick task on a
//! virtual clock, toggles pause, and on a crash tears the session down and
//! rebuilds it after the reset delay.

use std::collections::HashMap;
use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::driver::{OneShot, RepeatingTask};
use crate::present::{EntityHandle, Presenter};
use crate::settings::{Settings, SettingsError, Tuning};
use crate::sim::{
    Collision, Entity, Key, SessionState, SimEvent, TickOutcome, tick, wants_thrust,
};

/// Whether the tick task is live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClockState {
    Running,
    Paused,
}

/// Counters across every session of a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub ticks: u64,
    pub sessions: u32,
    pub crashes: u32,
    pub best_score: u32,
    /// Ticks skipped because the host fell too far behind
    pub dropped_ticks: u64,
}

pub struct Game<P: Presenter> {
    settings: Settings,
    presenter: P,
    seed: u64,
    rng: Pcg32,
    /// `None` while waiting out the reset delay
    session: Option<SessionState>,
    clock: ClockState,
    now: Duration,
    tick_task: RepeatingTask,
    restart: OneShot,
    handles: HashMap<Entity, EntityHandle>,
    /// Pause toggles on press, not on key repeat
    pause_held: bool,
    stats: RunStats,
}

impl<P: Presenter> Game<P> {
    /// Validate the settings and start the first session
    pub fn new(settings: Settings, presenter: P) -> Result<Self, SettingsError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Starting game with seed {seed}");

        let mut game = Self {
            tick_task: RepeatingTask::new(settings.tick_interval()),
            settings,
            presenter,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            session: None,
            clock: ClockState::Running,
            now: Duration::ZERO,
            restart: OneShot::default(),
            handles: HashMap::new(),
            pause_held: false,
            stats: RunStats::default(),
        };
        game.start_session(Duration::ZERO);
        Ok(game)
    }

    /// Let `elapsed` of wall time pass, running whatever falls due
    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;

        let mut substeps = 0;
        loop {
            if let Some(due) = self.restart.take_due(self.now) {
                self.start_session(due);
                continue;
            }
            let Some(due) = self.tick_task.take_due(self.now) else {
                break;
            };
            if substeps == self.settings.max_substeps {
                self.drop_backlog(due);
                break;
            }
            substeps += 1;
            self.run_tick(due);
        }
    }

    pub fn key_down(&mut self, key: Key) {
        // Input is detached between a crash and the next session
        let Some(state) = self.session.as_mut() else {
            return;
        };
        match key {
            Key::Pause => {
                if !self.pause_held {
                    self.pause_held = true;
                    self.toggle_pause();
                }
            }
            _ => state.input.press(key),
        }
    }

    pub fn key_up(&mut self, key: Key) {
        let Some(state) = self.session.as_mut() else {
            return;
        };
        match key {
            Key::Pause => self.pause_held = false,
            _ => state.input.release(key),
        }
    }

    /// Feed a raw key code; unrecognized codes are ignored
    pub fn handle_key_code(&mut self, code: u32, pressed: bool) {
        match (Key::from_code(code), pressed) {
            (Some(key), true) => self.key_down(key),
            (Some(key), false) => self.key_up(key),
            (None, _) => {}
        }
    }

    /// Hold or release ascend as the autopilot sees fit
    pub fn steer_with_autopilot(&mut self) {
        let Some(state) = self.session.as_ref() else {
            return;
        };
        if wants_thrust(state, &self.settings.tuning) {
            self.key_down(Key::Ascend);
        } else {
            self.key_up(Key::Ascend);
        }
    }

    fn toggle_pause(&mut self) {
        match self.clock {
            ClockState::Running => {
                self.clock = ClockState::Paused;
                self.tick_task.cancel();
                log::info!("Paused");
            }
            ClockState::Paused => {
                self.clock = ClockState::Running;
                self.tick_task.start(self.now);
                log::info!("Resumed");
            }
        }
        self.presenter.toggle_pause_indicator();
    }

    fn start_session(&mut self, at: Duration) {
        let state = SessionState::new(self.settings.board, &self.settings.tuning, &mut self.rng);
        sync_scene(&mut self.presenter, &mut self.handles, &state, &self.settings.tuning);
        self.presenter.display_score(state.score.points());

        self.session = Some(state);
        self.clock = ClockState::Running;
        self.pause_held = false;
        self.tick_task.start(at);
        self.stats.sessions += 1;
        log::info!("Session {} started", self.stats.sessions);
    }

    fn run_tick(&mut self, at: Duration) {
        let Some(state) = self.session.as_mut() else {
            self.tick_task.cancel();
            return;
        };
        let outcome = tick(state, &self.settings.tuning, &mut self.rng);
        self.stats.ticks += 1;
        self.stats.best_score = self.stats.best_score.max(state.score.points());
        sync_scene(&mut self.presenter, &mut self.handles, state, &self.settings.tuning);

        if let TickOutcome::Crashed(collision) = outcome {
            self.crash(at, collision);
        }
    }

    fn crash(&mut self, at: Duration, collision: Collision) {
        let score = self.score().unwrap_or_default();
        log::info!("Crashed into {collision:?} with score {score}");

        self.tick_task.cancel();
        self.session = None;
        self.pause_held = false;
        for (_, handle) in self.handles.drain() {
            self.presenter.destroy(handle);
        }
        self.restart.schedule(at, self.settings.reset_delay());
        self.stats.crashes += 1;
    }

    fn drop_backlog(&mut self, due: Duration) {
        let interval = self.tick_task.interval();
        let behind = (self.now - due).as_nanos() / interval.as_nanos().max(1) + 1;
        self.stats.dropped_ticks += behind as u64;
        self.tick_task.start(self.now);
        log::warn!("Fell {behind} ticks behind, skipping ahead");
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// Current score, or `None` while waiting to restart
    pub fn score(&self) -> Option<u32> {
        self.session.as_ref().map(|s| s.score.points())
    }

    pub fn clock(&self) -> ClockState {
        self.clock
    }

    pub fn is_restarting(&self) -> bool {
        self.restart.is_pending()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}

/// Push the tick's changes to the presenter: removals, score, then every
/// live entity's current position (creating any it has not seen yet)
fn sync_scene<P: Presenter>(
    presenter: &mut P,
    handles: &mut HashMap<Entity, EntityHandle>,
    state: &SessionState,
    tuning: &Tuning,
) {
    for event in &state.events {
        match *event {
            SimEvent::Despawned(entity) => {
                if let Some(handle) = handles.remove(&entity) {
                    presenter.destroy(handle);
                }
            }
            SimEvent::Scored(total) => presenter.display_score(total),
            SimEvent::Spawned(entity) => log::trace!("Spawned {entity:?}"),
        }
    }

    for r in state.renderables(tuning) {
        let handle = *handles
            .entry(r.entity)
            .or_insert_with(|| presenter.create(r.kind, r.rect.size));
        presenter.move_to(handle, r.rect.pos.x, r.rect.pos.y);
    }
}
