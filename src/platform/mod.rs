//! Platform abstraction layer
//!
//! The simulation talks to the outside world through three narrow seams:
//! - `NotificationSink` for discrete events (sound cues)
//! - `PresentationSink` for drawing a snapshot each frame
//! - `Persistence` for the best score
//!
//! `run_frame` is the one place they are wired together.

pub mod storage;

use crate::GameError;
use crate::sim::{GameEvent, MatchContext, Side, Snapshot};

/// Receives discrete match events. Every hook defaults to a no-op.
pub trait NotificationSink {
    fn on_wall_hit(&mut self) {}
    fn on_paddle_hit(&mut self, _side: Side) {}
    fn on_score(&mut self, _scorer: Side) {}
    fn on_match_won(&mut self, _winner: Side) {}
    fn on_countdown_tick(&mut self, _value: i32) {}
    fn on_countdown_go(&mut self) {}
    fn on_high_score(&mut self, _score: u32) {}
}

/// Draws the current frame
pub trait PresentationSink {
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), GameError>;
}

/// Stores the player's best score
pub trait Persistence {
    fn load_high_score(&self) -> u32;
    /// Returns whether `score` replaced the stored value
    fn save_high_score_if_greater(&mut self, score: u32) -> bool;
}

/// Route events to the sink, and high scores to persistence
pub fn dispatch<N, P>(events: &[GameEvent], notifications: &mut N, persistence: &mut P)
where
    N: NotificationSink + ?Sized,
    P: Persistence + ?Sized,
{
    for event in events {
        match *event {
            GameEvent::WallHit => notifications.on_wall_hit(),
            GameEvent::PaddleHit(side) => notifications.on_paddle_hit(side),
            GameEvent::PointScored(side) => notifications.on_score(side),
            GameEvent::MatchWon(side) => notifications.on_match_won(side),
            GameEvent::CountdownTick(value) => notifications.on_countdown_tick(value),
            GameEvent::CountdownGo => notifications.on_countdown_go(),
            GameEvent::HighScore(score) => {
                if persistence.save_high_score_if_greater(score) {
                    log::info!("New high score: {}", score);
                }
                notifications.on_high_score(score);
            }
        }
    }
}

/// Everything one display frame does: update, notify, render once
pub fn run_frame<N, P, R>(
    ctx: &mut MatchContext,
    now_ms: f64,
    notifications: &mut N,
    persistence: &mut P,
    presenter: &mut R,
) -> Result<Vec<GameEvent>, GameError>
where
    N: NotificationSink + ?Sized,
    P: Persistence + ?Sized,
    R: PresentationSink + ?Sized,
{
    let events = ctx.update(now_ms);
    dispatch(&events, notifications, persistence);
    presenter.render(&ctx.snapshot(now_ms))?;
    Ok(events)
}

/// Logs events and score changes. Used by the headless native runner.
#[derive(Debug, Default)]
pub struct LogSink {
    last_score: Option<(u32, u32)>,
    frames: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl NotificationSink for LogSink {
    fn on_paddle_hit(&mut self, side: Side) {
        log::debug!("Paddle hit: {:?}", side);
    }

    fn on_score(&mut self, scorer: Side) {
        log::info!("Point: {:?}", scorer);
    }

    fn on_match_won(&mut self, winner: Side) {
        log::info!("Match won by {:?}", winner);
    }

    fn on_countdown_tick(&mut self, value: i32) {
        log::debug!("Countdown: {}", value);
    }

    fn on_countdown_go(&mut self) {
        log::debug!("Countdown: GO!");
    }
}

impl PresentationSink for LogSink {
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), GameError> {
        self.frames += 1;
        let score = (snapshot.score.player, snapshot.score.opponent);
        if self.last_score != Some(score) {
            log::info!(
                "{} | {}",
                snapshot.score_label(Side::Player),
                snapshot.score_label(Side::Opponent)
            );
            self.last_score = Some(score);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Board, Difficulty};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl NotificationSink for Recorder {
        fn on_wall_hit(&mut self) {
            self.calls.push("wall".into());
        }
        fn on_countdown_tick(&mut self, value: i32) {
            self.calls.push(format!("tick {value}"));
        }
        fn on_countdown_go(&mut self) {
            self.calls.push("go".into());
        }
        fn on_high_score(&mut self, score: u32) {
            self.calls.push(format!("high {score}"));
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        best: u32,
        saves: usize,
    }

    impl Persistence for MemoryStore {
        fn load_high_score(&self) -> u32 {
            self.best
        }

        fn save_high_score_if_greater(&mut self, score: u32) -> bool {
            if score > self.best {
                self.best = score;
                self.saves += 1;
                true
            } else {
                false
            }
        }
    }

    #[derive(Default)]
    struct FrameCounter {
        snapshots: Vec<Snapshot>,
    }

    impl PresentationSink for FrameCounter {
        fn render(&mut self, snapshot: &Snapshot) -> Result<(), GameError> {
            self.snapshots.push(snapshot.clone());
            Ok(())
        }
    }

    #[test]
    fn test_dispatch_routes_events() {
        let mut sink = Recorder::default();
        let mut store = MemoryStore::default();
        dispatch(
            &[
                GameEvent::CountdownTick(3),
                GameEvent::WallHit,
                GameEvent::CountdownGo,
                GameEvent::HighScore(2),
                GameEvent::HighScore(1),
            ],
            &mut sink,
            &mut store,
        );
        assert_eq!(sink.calls, ["tick 3", "wall", "go", "high 2", "high 1"]);
        assert_eq!(store.best, 2);
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_run_frame_renders_once() {
        let mut ctx = MatchContext::new(Board::default(), Difficulty::Medium, 1);
        let mut sink = Recorder::default();
        let mut store = MemoryStore::default();
        let mut frames = FrameCounter::default();

        ctx.start("Ada", 0.0).unwrap();
        let events = run_frame(&mut ctx, 0.0, &mut sink, &mut store, &mut frames).unwrap();
        assert_eq!(events, vec![GameEvent::CountdownTick(3)]);
        assert_eq!(frames.snapshots.len(), 1);
        assert_eq!(frames.snapshots[0].countdown_value, Some(3));

        run_frame(&mut ctx, 16.0, &mut sink, &mut store, &mut frames).unwrap();
        assert_eq!(frames.snapshots.len(), 2);
        assert_eq!(sink.calls, ["tick 3"]);
    }

    #[test]
    fn test_log_sink_counts_frames() {
        let ctx = MatchContext::new(Board::default(), Difficulty::Easy, 1);
        let mut sink = LogSink::new();
        sink.render(&ctx.snapshot(0.0)).unwrap();
        sink.render(&ctx.snapshot(16.0)).unwrap();
        assert_eq!(sink.frames(), 2);
    }
}
