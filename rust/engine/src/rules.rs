use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Card distribution layout for one stretch of the cyclical difficulty mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Static,
    Conveyor,
    Falling,
}

/// Tunable constants behind the progression and scoring formulas.
///
/// Every field has a default matching the shipped game, so a partial TOML
/// table only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// `(under_seconds, bonus)` steps, ascending by seconds
    pub time_bonus_steps: Vec<(u32, u32)>,
    pub leftover_multiplier: u32,
    /// Goals for the first levels, one entry per level
    pub flat_goals: Vec<u32>,
    pub goal_step: u32,
    /// Last level that still uses `goal_step`
    pub goal_breakpoint: u32,
    pub late_goal_step: u32,
    pub cycle_length: u32,
    pub phase_length: u32,
    pub conveyor_base_speed: f64,
    pub conveyor_speed_step: f64,
    pub falling_base_speed: f64,
    pub falling_speed_step: f64,
    /// Minimum scores for 2..=5 stars
    pub star_thresholds: Vec<i64>,
    pub add_time_seconds: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            time_bonus_steps: vec![(60, 200), (90, 100), (120, 50)],
            leftover_multiplier: 10,
            flat_goals: vec![1000, 1500, 2000],
            goal_step: 300,
            goal_breakpoint: 15,
            late_goal_step: 200,
            cycle_length: 15,
            phase_length: 5,
            conveyor_base_speed: 0.4,
            conveyor_speed_step: 0.1,
            falling_base_speed: 0.6,
            falling_speed_step: 0.15,
            star_thresholds: vec![500, 1500, 3000, 5000],
            add_time_seconds: 15,
        }
    }
}

impl ScoringRules {
    /// Step function on elapsed time: the first step whose bound exceeds
    /// `seconds` wins, anything slower earns nothing.
    pub fn time_bonus(&self, seconds: u32) -> u32 {
        self.time_bonus_steps
            .iter()
            .find(|(under, _)| seconds < *under)
            .map(|(_, bonus)| *bonus)
            .unwrap_or(0)
    }

    pub fn leftover_penalty(&self, cards: &[Card]) -> u32 {
        cards
            .iter()
            .map(|c| c.value() as u32 * self.leftover_multiplier)
            .sum()
    }

    /// Score threshold for `level` (levels start at 1; 0 is treated as 1).
    /// Saturates at `u32::MAX` instead of wrapping for very deep levels.
    pub fn level_goal(&self, level: u32) -> u32 {
        let level = level.max(1);
        let flat = self.flat_goals.len() as u32;
        if level <= flat {
            return self.flat_goals[(level - 1) as usize];
        }
        let base = self.flat_goals.last().copied().unwrap_or(0);
        let breakpoint = self.goal_breakpoint.max(flat);
        if level <= breakpoint {
            return base.saturating_add((level - flat).saturating_mul(self.goal_step));
        }
        base.saturating_add((breakpoint - flat).saturating_mul(self.goal_step))
            .saturating_add((level - breakpoint).saturating_mul(self.late_goal_step))
    }

    fn cycle_position(&self, level: u32) -> u32 {
        let cycle = self.cycle_length.max(1);
        (level.max(1) - 1) % cycle + 1
    }

    pub fn phase(&self, level: u32) -> Phase {
        let pos = self.cycle_position(level);
        if pos <= self.phase_length {
            Phase::Static
        } else if pos <= self.phase_length * 2 {
            Phase::Conveyor
        } else {
            Phase::Falling
        }
    }

    /// Layout speed for `level`; grows linearly with the position inside its phase.
    pub fn speed(&self, level: u32) -> f64 {
        let pos = self.cycle_position(level);
        match self.phase(level) {
            Phase::Static => 0.0,
            Phase::Conveyor => {
                let step = pos - self.phase_length - 1;
                self.conveyor_base_speed + step as f64 * self.conveyor_speed_step
            }
            Phase::Falling => {
                let step = pos - self.phase_length * 2 - 1;
                self.falling_base_speed + step as f64 * self.falling_speed_step
            }
        }
    }

    pub fn star_rating(&self, score: i64) -> u8 {
        1 + self
            .star_thresholds
            .iter()
            .take(4)
            .filter(|&&min| score >= min)
            .count() as u8
    }

    /// Rejects tables that would make the formulas non-monotone.
    pub fn validate(&self) -> Result<(), String> {
        if self
            .time_bonus_steps
            .windows(2)
            .any(|w| w[0].0 >= w[1].0 || w[0].1 < w[1].1)
        {
            return Err("time_bonus_steps must have ascending seconds and non-increasing bonuses".into());
        }
        if self.flat_goals.is_empty() {
            return Err("flat_goals must name at least one level".into());
        }
        if self.flat_goals.windows(2).any(|w| w[0] > w[1]) {
            return Err("flat_goals must be non-decreasing".into());
        }
        if self.cycle_length == 0 || self.phase_length == 0 {
            return Err("cycle_length and phase_length must be >0".into());
        }
        if self.phase_length * 2 >= self.cycle_length {
            return Err("cycle_length must leave room for three phases".into());
        }
        if self.star_thresholds.windows(2).any(|w| w[0] > w[1]) {
            return Err("star_thresholds must be non-decreasing".into());
        }
        Ok(())
    }
}

/// Bonus for clearing a level in `seconds`: <60s 200, <90s 100, <120s 50, else 0.
///
/// # Examples
///
/// ```
/// use quickdraw_engine::rules::calculate_time_bonus;
///
/// assert_eq!(calculate_time_bonus(45), 200);
/// assert_eq!(calculate_time_bonus(119), 50);
/// assert_eq!(calculate_time_bonus(120), 0);
/// ```
pub fn calculate_time_bonus(seconds: u32) -> u32 {
    ScoringRules::default().time_bonus(seconds)
}

/// Ten points per value of every card still on the table.
pub fn calculate_leftover_penalty(cards: &[Card]) -> u32 {
    ScoringRules::default().leftover_penalty(cards)
}

/// Goal for a level: 1000, 1500, 2000, then +300 per level through 15 and +200 after.
///
/// # Examples
///
/// ```
/// use quickdraw_engine::rules::calculate_level_goal;
///
/// assert_eq!(calculate_level_goal(1), 1000);
/// assert_eq!(calculate_level_goal(4), 2300);
/// assert_eq!(calculate_level_goal(16), 5800);
/// ```
pub fn calculate_level_goal(level: u32) -> u32 {
    ScoringRules::default().level_goal(level)
}

pub fn cycle_phase(level: u32) -> Phase {
    ScoringRules::default().phase(level)
}

pub fn phase_speed(level: u32) -> f64 {
    ScoringRules::default().speed(level)
}

pub fn star_rating(score: i64) -> u8 {
    ScoringRules::default().star_rating(score)
}
