use core::time::Duration;
use web_time::Instant;

/// Wall clock for frontends that drive [`PairsEngine::tick`](crate::PairsEngine::tick) from
/// real time. Works on native targets and in the browser.
#[derive(Copy, Clone, Debug)]
pub struct GameClock {
    started_at: Instant,
}

impl GameClock {
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    /// Time since the game started, never decreasing.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_does_not_go_backwards() {
        let clock = GameClock::start();

        let first = clock.elapsed();
        let second = clock.elapsed();

        assert!(second >= first);
    }
}
