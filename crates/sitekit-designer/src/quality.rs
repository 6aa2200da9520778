//! Adaptive render quality.
//!
//! The render-loop driver owns the actual frame timing; the core only sees
//! per-frame statistics through this injected controller, so none of the
//! layout code depends on global performance state.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub frame_time_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QualityLevel {
    Low,
    Medium,
    High,
}

/// Maps observed frame statistics to a render quality level.
pub trait AdaptiveQuality {
    fn observe(&mut self, stats: FrameStats) -> QualityLevel;
}

/// Steps the level down after a sustained run of slow frames and back up
/// after a sustained run of fast ones. The two thresholds are deliberately
/// far apart so the level does not oscillate near a boundary.
#[derive(Debug)]
pub struct HysteresisQuality {
    level: QualityLevel,
    slow_streak: u32,
    fast_streak: u32,
}

const SLOW_FRAME_MS: f64 = 33.0;
const FAST_FRAME_MS: f64 = 16.0;
const STREAK_LEN: u32 = 30;

impl Default for HysteresisQuality {
    fn default() -> Self {
        Self {
            level: QualityLevel::High,
            slow_streak: 0,
            fast_streak: 0,
        }
    }
}

impl HysteresisQuality {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> QualityLevel {
        self.level
    }
}

impl AdaptiveQuality for HysteresisQuality {
    fn observe(&mut self, stats: FrameStats) -> QualityLevel {
        if stats.frame_time_ms > SLOW_FRAME_MS {
            self.slow_streak += 1;
            self.fast_streak = 0;
        } else if stats.frame_time_ms < FAST_FRAME_MS {
            self.fast_streak += 1;
            self.slow_streak = 0;
        } else {
            self.slow_streak = 0;
            self.fast_streak = 0;
        }

        if self.slow_streak >= STREAK_LEN {
            self.slow_streak = 0;
            self.level = match self.level {
                QualityLevel::High => QualityLevel::Medium,
                _ => QualityLevel::Low,
            };
            debug!(level = ?self.level, "quality stepped down");
        } else if self.fast_streak >= STREAK_LEN {
            self.fast_streak = 0;
            self.level = match self.level {
                QualityLevel::Low => QualityLevel::Medium,
                _ => QualityLevel::High,
            };
            debug!(level = ?self.level, "quality stepped up");
        }
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(quality: &mut HysteresisQuality, ms: f64, frames: u32) -> QualityLevel {
        let mut level = quality.level();
        for _ in 0..frames {
            level = quality.observe(FrameStats { frame_time_ms: ms });
        }
        level
    }

    #[test]
    fn sustained_slow_frames_step_down() {
        let mut quality = HysteresisQuality::new();
        assert_eq!(run(&mut quality, 40.0, STREAK_LEN), QualityLevel::Medium);
        assert_eq!(run(&mut quality, 40.0, STREAK_LEN), QualityLevel::Low);
        // Already at the floor.
        assert_eq!(run(&mut quality, 40.0, STREAK_LEN), QualityLevel::Low);
    }

    #[test]
    fn recovery_steps_back_up() {
        let mut quality = HysteresisQuality::new();
        run(&mut quality, 40.0, STREAK_LEN * 2);
        assert_eq!(quality.level(), QualityLevel::Low);
        assert_eq!(run(&mut quality, 10.0, STREAK_LEN), QualityLevel::Medium);
        assert_eq!(run(&mut quality, 10.0, STREAK_LEN), QualityLevel::High);
    }

    #[test]
    fn a_single_fast_frame_resets_the_slow_streak() {
        let mut quality = HysteresisQuality::new();
        run(&mut quality, 40.0, STREAK_LEN - 1);
        run(&mut quality, 10.0, 1);
        assert_eq!(run(&mut quality, 40.0, STREAK_LEN - 1), QualityLevel::High);
    }
}
