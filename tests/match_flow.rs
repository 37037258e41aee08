//! End-to-end match flow through the per-frame entry point

use glam::Vec2;
use pong_rally::consts::{BALL_RADIUS, GAME_OVER_REVEAL_MS, TICK_MS};
use pong_rally::platform::{self, NotificationSink, Persistence, PresentationSink};
use pong_rally::sim::{Ball, Board, Difficulty, GameEvent, MatchContext, MatchState, Side, Snapshot};
use pong_rally::{GameError, HighScoreStore};

#[derive(Default)]
struct Recorder {
    events: Vec<GameEvent>,
}

impl NotificationSink for Recorder {
    fn on_wall_hit(&mut self) {
        self.events.push(GameEvent::WallHit);
    }
    fn on_paddle_hit(&mut self, side: Side) {
        self.events.push(GameEvent::PaddleHit(side));
    }
    fn on_score(&mut self, scorer: Side) {
        self.events.push(GameEvent::PointScored(scorer));
    }
    fn on_match_won(&mut self, winner: Side) {
        self.events.push(GameEvent::MatchWon(winner));
    }
    fn on_countdown_tick(&mut self, value: i32) {
        self.events.push(GameEvent::CountdownTick(value));
    }
    fn on_countdown_go(&mut self) {
        self.events.push(GameEvent::CountdownGo);
    }
    fn on_high_score(&mut self, score: u32) {
        self.events.push(GameEvent::HighScore(score));
    }
}

#[derive(Default)]
struct Screen {
    frames: usize,
    last: Option<Snapshot>,
}

impl PresentationSink for Screen {
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), GameError> {
        self.frames += 1;
        self.last = Some(snapshot.clone());
        Ok(())
    }
}

struct Harness {
    ctx: MatchContext,
    sink: Recorder,
    store: HighScoreStore,
    screen: Screen,
    now: f64,
}

impl Harness {
    fn new(difficulty: Difficulty) -> Self {
        let board = Board::new(800.0, 400.0).unwrap();
        Self {
            ctx: MatchContext::new(board, difficulty, 7),
            sink: Recorder::default(),
            store: HighScoreStore::new(0),
            screen: Screen::default(),
            now: 0.0,
        }
    }

    fn frame(&mut self) -> Vec<GameEvent> {
        self.now += TICK_MS;
        platform::run_frame(
            &mut self.ctx,
            self.now,
            &mut self.sink,
            &mut self.store,
            &mut self.screen,
        )
        .unwrap()
    }

    /// Step frames until `done` holds, with a generous cap
    fn run_until(&mut self, done: impl Fn(MatchState) -> bool) {
        for _ in 0..10_000 {
            if done(self.ctx.state()) {
                return;
            }
            self.frame();
        }
        panic!("state never reached, stuck in {:?}", self.ctx.state());
    }

    /// Put the ball just short of the opponent's goal line, far from its paddle
    fn shoot_past_opponent(&mut self) {
        let board = *self.ctx.board();
        self.ctx.set_ball(Ball {
            pos: Vec2::new(board.width - 5.0, 20.0),
            vel: Vec2::new(30.0, 0.0),
            radius: BALL_RADIUS,
        });
    }

    fn shoot_past_player(&mut self) {
        self.ctx.set_ball(Ball {
            pos: Vec2::new(5.0, 20.0),
            vel: Vec2::new(-30.0, 0.0),
            radius: BALL_RADIUS,
        });
    }

    fn last_snapshot(&self) -> &Snapshot {
        self.screen.last.as_ref().unwrap()
    }
}

#[test]
fn player_wins_three_nil() {
    let mut h = Harness::new(Difficulty::Medium);
    h.ctx.start("Ada", h.now).unwrap();
    h.run_until(|s| s == MatchState::Playing);

    assert_eq!(
        h.sink.events,
        vec![
            GameEvent::CountdownTick(3),
            GameEvent::CountdownTick(2),
            GameEvent::CountdownTick(1),
            GameEvent::CountdownGo,
        ]
    );

    for point in 1..=3u32 {
        h.shoot_past_opponent();
        let events = h.frame();
        assert!(events.contains(&GameEvent::PointScored(Side::Player)));
        assert!(events.contains(&GameEvent::HighScore(point)));
        assert_eq!(h.ctx.score().player, point);
        if point < 3 {
            assert!(h.ctx.is_counting_down());
            h.run_until(|s| s == MatchState::Playing);
        }
    }

    assert_eq!(
        h.ctx.state(),
        MatchState::GameOver {
            winner: Side::Player
        }
    );
    assert!(h.sink.events.contains(&GameEvent::MatchWon(Side::Player)));
    assert_eq!(h.ctx.score().opponent, 0);
    assert_eq!(h.store.load_high_score(), 3);

    // Overlay appears after the reveal delay
    assert!(!h.last_snapshot().show_game_over);
    let reveal_frames = (GAME_OVER_REVEAL_MS / TICK_MS).ceil() as usize + 1;
    for _ in 0..reveal_frames {
        h.frame();
    }
    let snapshot = h.last_snapshot();
    assert!(snapshot.show_game_over);
    assert_eq!(snapshot.winner_banner().as_deref(), Some("Ada Wins!"));

    // One render per frame
    assert_eq!(h.screen.frames as f64, (h.now / TICK_MS).round());
}

#[test]
fn opponent_wins_and_play_again() {
    let mut h = Harness::new(Difficulty::Hard);
    h.ctx.start("", h.now).unwrap();
    assert_eq!(h.ctx.player_name(), "Player");

    for _ in 0..3 {
        h.run_until(|s| s == MatchState::Playing);
        h.shoot_past_player();
        h.frame();
    }

    assert_eq!(
        h.ctx.state(),
        MatchState::GameOver {
            winner: Side::Opponent
        }
    );
    assert!(!h.sink.events.iter().any(|e| matches!(e, GameEvent::HighScore(_))));
    assert_eq!(h.store.load_high_score(), 0);

    h.ctx.play_again(h.now).unwrap();
    h.frame();
    assert_eq!(h.ctx.score().opponent, 0);
    assert!(h.ctx.is_counting_down());
    assert_eq!(h.last_snapshot().winner_banner(), None);
}

#[test]
fn exit_during_countdown_never_starts_play() {
    let mut h = Harness::new(Difficulty::Easy);
    h.ctx.start("Ada", h.now).unwrap();
    for _ in 0..90 {
        h.frame();
    }
    h.ctx.exit();

    for _ in 0..600 {
        h.frame();
    }
    assert_eq!(h.ctx.state(), MatchState::Welcome);
    assert!(!h.sink.events.contains(&GameEvent::CountdownGo));
}

#[test]
fn focus_loss_pauses_and_freezes() {
    let mut h = Harness::new(Difficulty::Medium);
    h.ctx.start("Ada", h.now).unwrap();
    h.run_until(|s| s == MatchState::Playing);
    h.frame();

    assert!(h.ctx.focus_lost());
    let frozen = *h.ctx.ball();
    for _ in 0..120 {
        h.frame();
    }
    assert_eq!(*h.ctx.ball(), frozen);
    assert!(h.ctx.toggle_pause(h.now).is_ok());
    assert!(h.ctx.is_counting_down());
    h.run_until(|s| s == MatchState::Playing);
}

#[test]
fn difficulty_change_mid_match_restarts() {
    let mut h = Harness::new(Difficulty::Medium);
    h.ctx.start("Ada", h.now).unwrap();
    h.run_until(|s| s == MatchState::Playing);
    h.shoot_past_opponent();
    h.frame();
    assert_eq!(h.ctx.score().player, 1);

    h.ctx.set_difficulty(Difficulty::Easy, h.now);
    assert_eq!(h.ctx.score().player, 0);
    assert!(h.ctx.is_counting_down());
    h.run_until(|s| s == MatchState::Playing);
    assert_eq!(h.ctx.ball().vel.x.abs(), 5.0);
}

#[test]
fn autopilot_match_keeps_everything_on_the_board() {
    let mut h = Harness::new(Difficulty::Easy);
    h.ctx.set_autopilot(true);
    h.ctx.start("Bot", h.now).unwrap();
    let board = *h.ctx.board();

    for _ in 0..20_000 {
        h.frame();
        let snap = h.last_snapshot();
        for paddle in [snap.player, snap.opponent] {
            assert!(paddle.y_top >= 0.0 && paddle.y_top <= board.height - paddle.height);
        }
        if snap.state.is_playing() {
            assert!(snap.ball.pos.y >= snap.ball.radius - 1e-3);
            assert!(snap.ball.pos.y <= board.height - snap.ball.radius + 1e-3);
        }
        if let MatchState::GameOver { winner } = snap.state {
            assert_eq!(snap.score.winner(), Some(winner));
            break;
        }
    }
}
