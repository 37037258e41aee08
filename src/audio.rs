//! Match sound cues
//!
//! `SoundEffect::for_event` maps match events to cues on every target.
//! The oscillator synth behind them only exists in the browser build.

use crate::sim::{GameEvent, Side};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits wall
    WallHit,
    /// Point scored by either side
    Score,
    /// Opponent took the match
    GameOver,
    /// Player took the match
    PlayerWin,
    /// Countdown 3, 2, 1
    CountdownBeep,
    /// Countdown reached "GO!"
    CountdownGo,
    /// New high score
    HighScore,
}

impl SoundEffect {
    /// Cue for a match event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::WallHit => SoundEffect::WallHit,
            GameEvent::PaddleHit(_) => SoundEffect::PaddleHit,
            GameEvent::PointScored(_) => SoundEffect::Score,
            GameEvent::MatchWon(Side::Player) => SoundEffect::PlayerWin,
            GameEvent::MatchWon(Side::Opponent) => SoundEffect::GameOver,
            GameEvent::CountdownTick(value) if *value > 0 => SoundEffect::CountdownBeep,
            GameEvent::CountdownTick(_) | GameEvent::CountdownGo => SoundEffect::CountdownGo,
            GameEvent::HighScore(_) => SoundEffect::HighScore,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::Settings;
    use crate::platform::NotificationSink;
    use crate::sim::{GameEvent, Side};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        /// Gain for every effect, from `Settings::effective_sfx_volume`
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::from_settings(&Settings::default())
        }
    }

    impl AudioManager {
        pub fn from_settings(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_sfx_volume(),
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_sfx_volume();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn cue(&self, event: GameEvent) {
            self.play(SoundEffect::for_event(&event));
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::PaddleHit => self.play_paddle_hit(ctx, vol),
                SoundEffect::WallHit => self.play_wall_hit(ctx, vol),
                SoundEffect::Score => self.play_score(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
                SoundEffect::PlayerWin => self.play_player_win(ctx, vol),
                SoundEffect::CountdownBeep => self.play_beep(ctx, vol, 440.0),
                SoundEffect::CountdownGo => self.play_beep(ctx, vol, 880.0),
                SoundEffect::HighScore => self.play_high_score(ctx, vol),
            }
        }

        // === Sound generators ===

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

        /// Short decaying tone
        fn pluck(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
            level: f32,
            start: f64,
            length: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            gain.gain().set_value_at_time(level, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + length)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + length + 0.05).ok();
        }

        /// Paddle hit - solid thump
        fn play_paddle_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(110.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Wall hit - higher ping
        fn play_wall_hit(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            self.pluck(ctx, 400.0, OscillatorType::Sine, vol * 0.3, t, 0.08);
        }

        /// Point scored - falling blip
        fn play_score(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 660.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(660.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(330.0, t + 0.25)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }

        /// Countdown beep
        fn play_beep(&self, ctx: &AudioContext, vol: f32, freq: f32) {
            let t = ctx.current_time();
            self.pluck(ctx, freq, OscillatorType::Sine, vol * 0.3, t, 0.15);
        }

        /// Game over - sad descending
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let start = t + i as f64 * 0.2;
                self.pluck(ctx, *freq, OscillatorType::Sine, vol * 0.3, start, 0.3);
            }
        }

        /// Player win - rising fanfare
        fn play_player_win(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].iter().enumerate() {
                let start = t + i as f64 * 0.12;
                self.pluck(ctx, *freq, OscillatorType::Square, vol * 0.2, start, 0.25);
            }
        }

        /// High score - celebratory
        fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
                let start = t + i as f64 * 0.08;
                self.pluck(ctx, *freq, OscillatorType::Triangle, vol * 0.25, start, 0.25);
            }
        }
    }

    impl NotificationSink for AudioManager {
        fn on_wall_hit(&mut self) {
            self.cue(GameEvent::WallHit);
        }

        fn on_paddle_hit(&mut self, side: Side) {
            self.cue(GameEvent::PaddleHit(side));
        }

        fn on_score(&mut self, scorer: Side) {
            self.cue(GameEvent::PointScored(scorer));
        }

        fn on_match_won(&mut self, winner: Side) {
            self.cue(GameEvent::MatchWon(winner));
        }

        fn on_countdown_tick(&mut self, value: i32) {
            self.cue(GameEvent::CountdownTick(value));
        }

        fn on_countdown_go(&mut self) {
            self.cue(GameEvent::CountdownGo);
        }

        fn on_high_score(&mut self, score: u32) {
            self.cue(GameEvent::HighScore(score));
        }
    }
}
