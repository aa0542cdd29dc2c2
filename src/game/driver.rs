//! Host-facing pumps: spawn timers, the frame loop, and input
//!
//! Timestamps are host milliseconds. Simulation events are routed here,
//! the only place they turn into audio cues or lifecycle transitions.

use super::{Game, Phase};
use crate::audio::AudioCue;
use crate::renderer::{Renderer, present};
use crate::sim::{GameEvent, asteroid_delay, power_up_delay, spawn_asteroid, spawn_power_up, tick};

impl Game {
    fn spawning_allowed(&self) -> bool {
        self.phase == Phase::Playing && !self.state.game_over
    }

    /// Arm the asteroid timer with a delay derived from elapsed time
    pub(super) fn schedule_asteroids(&mut self, now: f64) {
        if !self.spawning_allowed() {
            return;
        }
        let delay = asteroid_delay(self.clock.elapsed_secs(now), &self.tuning);
        self.asteroid_timer.schedule(now, delay);
    }

    pub(super) fn schedule_power_up(&mut self, now: f64) {
        if !self.spawning_allowed() {
            return;
        }
        let delay = power_up_delay(&self.tuning, &mut self.rng);
        self.power_up_timer.schedule(now, delay);
    }

    /// Fire any due spawn timers; each one re-arms itself after spawning
    pub fn pump_timers(&mut self, now: f64) {
        if self.asteroid_timer.take_due(now) && self.spawning_allowed() {
            let t = self.clock.elapsed_secs(now);
            spawn_asteroid(&mut self.state, t, &self.tuning, &mut self.rng);
            self.schedule_asteroids(now);
        }
        if self.power_up_timer.take_due(now) && self.spawning_allowed() {
            spawn_power_up(&mut self.state, &mut self.rng);
            self.schedule_power_up(now);
        }
    }

    /// One display refresh: exactly one simulation step, then present.
    ///
    /// Returns false once the loop has stopped; the host should stop
    /// requesting frames until a transition re-arms it.
    pub fn frame(&mut self, now: f64, renderer: &mut dyn Renderer) -> bool {
        if !self.frame_loop.is_armed() {
            return false;
        }
        if !matches!(self.phase, Phase::Playing | Phase::Exploding) {
            self.frame_loop.cancel();
            return false;
        }

        let events = tick(&mut self.state, &self.input, now);
        self.input.fire_pulse = false;
        for event in events {
            self.route(event);
        }

        present(&self.state, renderer);
        self.frame_loop.is_armed()
    }

    fn route(&mut self, event: GameEvent) {
        match event {
            GameEvent::BulletFired => self.audio.play(AudioCue::Fire),
            GameEvent::AsteroidHit => self.audio.play(AudioCue::AsteroidHit),
            GameEvent::AsteroidDestroyed { .. } => self.audio.play(AudioCue::AsteroidDestroyed),
            GameEvent::ShipHit { .. } => self.audio.play(AudioCue::ShipHit),
            GameEvent::PowerUpCollected(_) => self.audio.play(AudioCue::PowerUp),
            GameEvent::ShipDestroyed => self.enter_exploding(),
            GameEvent::ExplosionFinished => self.finish_mission(),
        }
    }

    fn accepts_press(&self, pressed: bool) -> bool {
        !pressed || self.phase == Phase::Playing
    }

    pub fn set_move_up(&mut self, pressed: bool) {
        if self.accepts_press(pressed) {
            self.input.move_up = pressed;
        }
    }

    pub fn set_move_down(&mut self, pressed: bool) {
        if self.accepts_press(pressed) {
            self.input.move_down = pressed;
        }
    }

    /// Continuous fire held or released
    pub fn set_firing(&mut self, pressed: bool) {
        if self.accepts_press(pressed) {
            self.input.firing = pressed;
        }
    }

    /// Single shot on the next tick
    pub fn fire_pulse(&mut self) {
        if self.phase == Phase::Playing {
            self.input.fire_pulse = true;
        }
    }

    /// Touch drag: center the ship on `y` (playfield coordinates)
    pub fn touch_move(&mut self, y: f32) {
        if self.phase == Phase::Playing {
            self.state.ship.center_on(y);
        }
    }
}
