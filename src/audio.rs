//! Audio cues
//!
//! The core only announces cues; sinks decide how to sound them. The browser
//! sink synthesizes effects with the Web Audio API, no external files needed.

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Laser shot
    Fire,
    /// Bullet hit an asteroid that survived
    AsteroidHit,
    /// Asteroid broke apart
    AsteroidDestroyed,
    /// Asteroid rammed the ship
    ShipHit,
    /// Power-up collected
    PowerUp,
    /// Ship exploded
    Explosion,
    /// Run over
    MissionEnd,
    /// New high score
    NewHighScore,
}

/// Receiver of cues and pause/resume notifications
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
    /// Halt everything while paused
    fn pause_all(&mut self) {}
    fn resume_all(&mut self) {}
    /// Silence everything (exit to menu)
    fn stop_all(&mut self) {}
}

/// Sink that drops every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioCue, AudioSink};
    use crate::settings::Settings;

    /// Audio manager for the browser
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
        paused: bool,
    }

    impl WebAudio {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_sfx_volume(),
                paused: false,
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Single enveloped tone sweeping from `from` to `to` Hz
        fn sweep(
            &self,
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            gain_level: f32,
            duration: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(self.volume * gain_level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration + 0.02).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, cue: AudioCue) {
            if self.volume <= 0.0 || self.paused {
                return;
            }
            let Some(ctx) = self.ctx.clone() else { return };

            // Resume context if suspended (browsers require a user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                AudioCue::Fire => self.sweep(&ctx, OscillatorType::Square, 900.0, 300.0, 0.15, 0.08),
                AudioCue::AsteroidHit => {
                    self.sweep(&ctx, OscillatorType::Triangle, 300.0, 200.0, 0.25, 0.05)
                }
                AudioCue::AsteroidDestroyed => {
                    self.sweep(&ctx, OscillatorType::Sawtooth, 200.0, 40.0, 0.35, 0.2);
                    self.sweep(&ctx, OscillatorType::Sine, 80.0, 40.0, 0.3, 0.12);
                }
                AudioCue::ShipHit => self.sweep(&ctx, OscillatorType::Square, 150.0, 60.0, 0.5, 0.2),
                AudioCue::PowerUp => {
                    self.sweep(&ctx, OscillatorType::Sine, 400.0, 1200.0, 0.3, 0.25)
                }
                AudioCue::Explosion => {
                    self.sweep(&ctx, OscillatorType::Sawtooth, 120.0, 30.0, 0.6, 0.8);
                    self.sweep(&ctx, OscillatorType::Square, 60.0, 20.0, 0.4, 0.9);
                }
                AudioCue::MissionEnd => {
                    self.sweep(&ctx, OscillatorType::Triangle, 440.0, 110.0, 0.3, 1.0)
                }
                AudioCue::NewHighScore => {
                    self.sweep(&ctx, OscillatorType::Sine, 523.0, 1046.0, 0.35, 0.5)
                }
            }
        }

        fn pause_all(&mut self) {
            self.paused = true;
            if let Some(ctx) = &self.ctx {
                let _ = ctx.suspend();
            }
        }

        fn resume_all(&mut self) {
            self.paused = false;
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn stop_all(&mut self) {
            self.paused = false;
            if let Some(ctx) = &self.ctx {
                // Suspending drops anything still ringing; the next cue resumes
                let _ = ctx.suspend();
            }
        }
    }
}
