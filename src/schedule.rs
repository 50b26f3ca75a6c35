//! Fixed-table spaced repetition schedule.
//!
//! Proficiency indexes the interval table; a remembered review moves one
//! level up, a forgotten one moves one level down.

/// Review intervals in hours, indexed by proficiency.
pub const REVIEW_INTERVALS_HOURS: [f64; 9] = [
    0.1,   // 6 min
    0.5,   // 30 min
    12.0,  // 12 h
    24.0,  // 1 day
    48.0,  // 2 days
    96.0,  // 4 days
    168.0, // 7 days
    336.0, // 14 days
    720.0, // 30 days
];

pub const MAX_PROFICIENCY: u32 = (REVIEW_INTERVALS_HOURS.len() - 1) as u32;

/// Words at or above this level count as mastered.
pub const MASTERED_PROFICIENCY: u32 = 5;

/// 每日新单词学习上限
pub const DAILY_NEW_WORDS_LIMIT: usize = 25;

const MS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;

/// Interval for a proficiency level, clamped to the table.
pub fn review_interval_ms(proficiency: u32) -> i64 {
    let index = (proficiency as usize).min(REVIEW_INTERVALS_HOURS.len() - 1);
    (REVIEW_INTERVALS_HOURS[index] * MS_PER_HOUR).round() as i64
}

/// Next review timestamp for a word at `proficiency`, measured from `now_ms`.
pub fn calculate_next_review(proficiency: u32, now_ms: i64) -> i64 {
    now_ms + review_interval_ms(proficiency)
}

pub fn next_proficiency(current: u32, remembered: bool) -> u32 {
    if remembered {
        current.saturating_add(1).min(MAX_PROFICIENCY)
    } else {
        current.saturating_sub(1)
    }
}

pub fn is_mastered(proficiency: u32) -> bool {
    proficiency >= MASTERED_PROFICIENCY
}
