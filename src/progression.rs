use std::time::Duration;

use serde::Deserialize;

/// Score to level, level to speed and obstacle count.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Progression {
    pub points_per_level: u32,
    pub base_interval_ms: u64,
    pub interval_step_ms: u64,
    pub min_interval_ms: u64,
    /// First level that carries obstacles.
    pub obstacle_start_level: u32,
    pub obstacles_per_level: usize,
}

impl Default for Progression {
    fn default() -> Self {
        Progression {
            points_per_level: 50,
            base_interval_ms: 100,
            interval_step_ms: 10,
            min_interval_ms: 40,
            obstacle_start_level: 3,
            obstacles_per_level: 2,
        }
    }
}

impl Progression {
    pub fn level_for_score(&self, score: u32) -> u32 {
        (score / self.points_per_level.max(1)).saturating_add(1)
    }

    pub fn tick_interval(&self, level: u32) -> Duration {
        let reduction = u64::from(level.saturating_sub(1)).saturating_mul(self.interval_step_ms);
        let ms = self.base_interval_ms.saturating_sub(reduction).max(self.min_interval_ms);
        Duration::from_millis(ms)
    }

    /// How many obstacles the board should hold at `level`.
    pub fn obstacle_target(&self, level: u32) -> usize {
        let tiers = level.saturating_add(1).saturating_sub(self.obstacle_start_level) as usize;
        tiers.saturating_mul(self.obstacles_per_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_follows_score() {
        let p = Progression::default();

        assert_eq!(p.level_for_score(0), 1);
        assert_eq!(p.level_for_score(49), 1);
        assert_eq!(p.level_for_score(50), 2);
        assert_eq!(p.level_for_score(90), 2);
        assert_eq!(p.level_for_score(100), 3);
        assert_eq!(p.level_for_score(1234), 25);
    }

    #[test]
    fn interval_shrinks_down_to_the_floor() {
        let p = Progression::default();

        assert_eq!(p.tick_interval(1), Duration::from_millis(100));
        assert_eq!(p.tick_interval(2), Duration::from_millis(90));
        assert_eq!(p.tick_interval(7), Duration::from_millis(40));
        assert_eq!(p.tick_interval(8), Duration::from_millis(40));
        assert_eq!(p.tick_interval(500), Duration::from_millis(40));
    }

    #[test]
    fn obstacles_start_at_level_three() {
        let p = Progression::default();

        assert_eq!(p.obstacle_target(1), 0);
        assert_eq!(p.obstacle_target(2), 0);
        assert_eq!(p.obstacle_target(3), 2);
        assert_eq!(p.obstacle_target(4), 4);
        assert_eq!(p.obstacle_target(10), 16);
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        let p = Progression { points_per_level: 1, ..Progression::default() };

        assert_eq!(p.level_for_score(u32::MAX), u32::MAX);
        assert_eq!(p.tick_interval(u32::MAX), Duration::from_millis(40));
        assert!(p.obstacle_target(u32::MAX) > 0);
    }
}
