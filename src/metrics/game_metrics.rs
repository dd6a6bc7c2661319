use std::time::Duration;

use crate::game::SessionState;

/// Per-process counters shown in the header; nothing here is persisted.
pub struct GameMetrics {
    /// Time spent in `Playing` since the current game began
    pub play_time: Duration,
    pub games_played: u32,
    pub frames: u64,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            play_time: Duration::ZERO,
            games_played: 0,
            frames: 0,
        }
    }

    /// Record one frame; paused and finished frames do not count as play time
    pub fn on_frame(&mut self, elapsed: Duration, state: SessionState) {
        self.frames += 1;
        if state == SessionState::Playing {
            self.play_time += elapsed;
        }
    }

    pub fn on_game_start(&mut self) {
        self.play_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self) {
        self.games_played += 1;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.play_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.play_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.play_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.play_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_only_playing_frames_count() {
        let mut metrics = GameMetrics::new();
        let frame = Duration::from_millis(500);

        metrics.on_frame(frame, SessionState::Playing);
        metrics.on_frame(frame, SessionState::Paused);
        metrics.on_frame(frame, SessionState::GameOver);
        metrics.on_frame(frame, SessionState::Playing);

        assert_eq!(metrics.play_time, Duration::from_secs(1));
        assert_eq!(metrics.frames, 4);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        metrics.on_frame(Duration::from_secs(3), SessionState::Playing);
        metrics.on_game_over();

        metrics.on_game_start();

        assert_eq!(metrics.play_time, Duration::ZERO);
        assert_eq!(metrics.games_played, 1);
    }
}
