use std::time::{Duration, Instant};

use crate::game::TickOutcome;

/// Statistics for one run of the program, kept in memory only
pub struct SessionStats {
    game_started: Instant,
    /// Time spent in the current game; frozen once it ends
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
    running: bool,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            game_started: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
            running: true,
        }
    }

    /// Refresh the clock of a running game
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.game_started.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.game_started = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    /// Record the result of a tick; only game-ending outcomes count
    pub fn record(&mut self, outcome: TickOutcome, score: u32) {
        if !outcome.ended_game() {
            return;
        }
        self.update();
        self.running = false;
        self.games_played += 1;
        self.best_score = self.best_score.max(score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CollisionType;

    const WALL: TickOutcome = TickOutcome::Collided(CollisionType::Wall);

    #[test]
    fn test_time_formatting() {
        let mut stats = SessionStats::new();
        stats.elapsed_time = Duration::from_secs(125);
        assert_eq!(stats.format_time(), "02:05");

        stats.elapsed_time = Duration::from_secs(0);
        assert_eq!(stats.format_time(), "00:00");

        stats.elapsed_time = Duration::from_secs(3661);
        assert_eq!(stats.format_time(), "61:01");
    }

    #[test]
    fn test_best_score_tracking() {
        let mut stats = SessionStats::new();

        stats.record(WALL, 10);
        assert_eq!(stats.best_score, 10);
        assert_eq!(stats.games_played, 1);

        stats.record(TickOutcome::Collided(CollisionType::SelfCollision), 5);
        assert_eq!(stats.best_score, 10);
        assert_eq!(stats.games_played, 2);

        stats.record(TickOutcome::BoardFull, 15);
        assert_eq!(stats.best_score, 15);
        assert_eq!(stats.games_played, 3);
    }

    #[test]
    fn test_ordinary_ticks_are_not_counted() {
        let mut stats = SessionStats::new();
        for outcome in [TickOutcome::Moved, TickOutcome::Ate, TickOutcome::Idle] {
            stats.record(outcome, 7);
        }
        assert_eq!(stats.games_played, 0);
        assert_eq!(stats.best_score, 0);
    }

    #[test]
    fn test_clock_freezes_at_game_over() {
        let mut stats = SessionStats::new();
        stats.record(WALL, 1);
        let frozen = stats.elapsed_time;

        std::thread::sleep(Duration::from_millis(20));
        stats.update();
        assert_eq!(stats.elapsed_time, frozen);

        stats.on_game_start();
        std::thread::sleep(Duration::from_millis(20));
        stats.update();
        assert!(stats.elapsed_time >= Duration::from_millis(20));
    }
}
