//! Lifecycle transitions
//!
//! Every place the loop or the spawn timers are armed or cancelled is in
//! this file. Transitions requested from the wrong phase are ignored.

use super::{Game, MissionReport, Phase};
use crate::audio::AudioCue;
use crate::persistence::{keys, write_or_warn};
use crate::sim::{ElapsedClock, GameState, TickInput};
use crate::story::StoryProgress;

impl Game {
    /// Play button on the main menu
    pub fn play(&mut self, now: f64) {
        if self.phase != Phase::Menu {
            return;
        }
        if self.story_played() {
            self.start_run(now);
        } else {
            log::info!("Showing mission briefing");
            self.story = Some(StoryProgress::first_run());
            self.phase = Phase::Story;
        }
    }

    /// Replay the briefing from the menu (only once it has been seen)
    pub fn replay_story(&mut self) -> bool {
        if self.phase != Phase::Menu || !self.story_played() {
            return false;
        }
        self.story = Some(StoryProgress::replay());
        self.phase = Phase::Story;
        true
    }

    /// Advance the briefing. Past the last slide a first run starts the
    /// game and a replay returns to the menu.
    pub fn story_next(&mut self, now: f64) {
        if self.phase != Phase::Story {
            return;
        }
        let Some(story) = self.story.as_mut() else {
            return;
        };
        if !story.advance() {
            return;
        }
        if story.replay {
            self.story = None;
            self.phase = Phase::Menu;
        } else {
            self.mark_story_played();
            self.start_run(now);
        }
    }

    /// Skip the rest of a first-run briefing
    pub fn story_skip(&mut self, now: f64) {
        if self.phase != Phase::Story || !self.story.is_some_and(|s| s.can_skip()) {
            return;
        }
        self.mark_story_played();
        self.start_run(now);
    }

    /// Start over after a mission ended
    pub fn play_again(&mut self, now: f64) {
        if self.phase == Phase::MissionEnd {
            self.start_run(now);
        }
    }

    /// Pause a running game. Returns false if there was nothing to pause.
    pub fn pause(&mut self, now: f64) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.phase = Phase::Paused;
        self.clock.pause(now);
        self.frame_loop.cancel();
        self.cancel_spawners();
        // Releases may be missed while paused
        self.input = TickInput::default();
        self.audio.pause_all();
        log::info!("Paused at {:.1}s", self.clock.elapsed_secs(now));
        true
    }

    /// Resume a paused game. Refused while the orientation is incompatible.
    pub fn resume(&mut self, now: f64) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        if !self.orientation_ok {
            log::debug!("Resume blocked until orientation is fixed");
            return false;
        }
        self.clock.resume(now);
        self.phase = Phase::Playing;
        self.frame_loop.arm();
        self.schedule_asteroids(now);
        self.schedule_power_up(now);
        self.audio.resume_all();
        log::info!("Resumed at {:.1}s", self.clock.elapsed_secs(now));
        true
    }

    pub fn toggle_pause(&mut self, now: f64) -> bool {
        match self.phase {
            Phase::Playing => self.pause(now),
            Phase::Paused => self.resume(now),
            _ => false,
        }
    }

    /// Tab hidden or window blurred
    pub fn visibility_lost(&mut self, now: f64) {
        self.pause(now);
    }

    /// Viewport orientation changed. Going incompatible forces a pause;
    /// becoming compatible again only re-enables resume.
    pub fn set_orientation(&mut self, compatible: bool, now: f64) {
        if self.orientation_ok != compatible {
            log::info!(
                "Orientation {}",
                if compatible { "compatible" } else { "incompatible" }
            );
        }
        self.orientation_ok = compatible;
        if !compatible {
            self.pause(now);
        }
    }

    /// Abandon the run (or leave the mission-end screen) for the main menu
    pub fn exit_to_menu(&mut self) {
        if !matches!(
            self.phase,
            Phase::Playing | Phase::Paused | Phase::MissionEnd
        ) {
            return;
        }
        self.frame_loop.cancel();
        self.cancel_spawners();
        self.state = GameState::new();
        self.clock = ElapsedClock::default();
        self.input = TickInput::default();
        self.story = None;
        self.report = None;
        self.audio.stop_all();
        self.phase = Phase::Menu;
        log::info!("Exited to menu");
    }

    /// Ship health hit zero during a tick
    pub(super) fn enter_exploding(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.phase = Phase::Exploding;
        self.cancel_spawners();
        self.input = TickInput::default();
        self.audio.play(AudioCue::Explosion);
        log::info!("Drone destroyed with score {}", self.state.score);
    }

    /// Explosion animation finished
    pub(super) fn finish_mission(&mut self) {
        if self.phase != Phase::Exploding {
            return;
        }
        self.frame_loop.cancel();
        self.cancel_spawners();

        let score = self.state.score;
        let new_high_score = self.high_score.record(score);
        if new_high_score {
            self.high_score.save(self.store.as_mut());
        }
        self.report = Some(MissionReport {
            score,
            high_score: self.high_score.best,
            new_high_score,
        });
        self.phase = Phase::MissionEnd;

        self.audio.play(AudioCue::MissionEnd);
        if new_high_score {
            self.audio.play(AudioCue::NewHighScore);
        }
        log::info!(
            "Mission ended: score {} (best {}{})",
            score,
            self.high_score.best,
            if new_high_score { ", new record" } else { "" }
        );
    }

    fn start_run(&mut self, now: f64) {
        self.cancel_spawners();
        self.state = GameState::new();
        self.clock.start(now);
        self.input = TickInput::default();
        self.story = None;
        self.report = None;
        self.phase = Phase::Playing;
        self.frame_loop.arm();
        self.schedule_asteroids(now);
        self.schedule_power_up(now);
        log::info!("Run started");

        if !self.orientation_ok {
            self.pause(now);
        }
    }

    fn cancel_spawners(&mut self) {
        self.asteroid_timer.cancel();
        self.power_up_timer.cancel();
    }

    fn mark_story_played(&mut self) {
        self.story_played = true;
        write_or_warn(self.store.as_mut(), keys::STORY_PLAYED, "true");
    }
}
