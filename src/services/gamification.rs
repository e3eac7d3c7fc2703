use std::collections::BTreeSet;

use chrono::NaiveDate;

pub const FAST_READING_BONUS: u32 = 10;
pub const SLOW_READING_BONUS: u32 = 5;
pub const FAST_READING_MINUTES: f64 = 20.0;

/// Points are the truncated score plus a bonus for any recorded reading time,
/// larger when reading took under twenty minutes.
pub fn award_points(score: f64, reading_minutes: f64) -> u32 {
    let base = if score.is_finite() {
        score.max(0.0).trunc() as u32
    } else {
        0
    };

    let bonus = if reading_minutes > 0.0 && reading_minutes < FAST_READING_MINUTES {
        FAST_READING_BONUS
    } else if reading_minutes >= FAST_READING_MINUTES {
        SLOW_READING_BONUS
    } else {
        0
    };

    base + bonus
}

/// Longest run of consecutive calendar days. Duplicates and order do not matter.
pub fn calculate_streak(dates: &[NaiveDate]) -> u32 {
    let days: BTreeSet<NaiveDate> = dates.iter().copied().collect();

    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        current = match previous.and_then(|p| p.succ_opt()) {
            Some(next) if next == day => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(day);
    }

    longest
}

/// At most one points badge and one streak badge.
pub fn badges(total_points: u32, streak_days: u32) -> Vec<&'static str> {
    let mut earned = Vec::new();

    if total_points >= 500 {
        earned.push("Master Reader");
    } else if total_points >= 200 {
        earned.push("Focused Scholar");
    } else if total_points >= 100 {
        earned.push("Learning Champ");
    }

    if streak_days >= 14 {
        earned.push("14-day streak");
    } else if streak_days >= 7 {
        earned.push("7-day streak");
    }

    earned
}
