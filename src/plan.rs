//! 每日学习计划
//!
//! 学习计划以"每天 25 个新单词"为单位，把全部单词划分成连续的学习日：
//! 已学单词（按上次复习时间）在前，未学单词（按添加时间）在后。
//! 当前是第几天只取决于累计学过的单词数，而不是实际经过的日历天数。
//!
//! 这里全部是纯函数，调用方每次读取时基于最新数据重新计算。

use std::collections::{HashMap, HashSet};

use crate::clock::{format_date, shift_days, DayBoundary};
use crate::models::{CalendarDay, DayStatus, StudyRecord, TodayProgress, Word};
use crate::schedule::DAILY_NEW_WORDS_LIMIT;

/// 从未复习过的单词数
pub fn unlearned_count(words: &[Word]) -> usize {
    words.iter().filter(|w| w.is_unlearned()).count()
}

/// 至少复习过一次的单词数
pub fn learned_count(words: &[Word]) -> usize {
    words.iter().filter(|w| !w.is_unlearned()).count()
}

/// 学完剩余未学单词需要的天数
pub fn total_days_needed(unlearned: usize) -> usize {
    unlearned.div_ceil(DAILY_NEW_WORDS_LIMIT)
}

/// 当前是学习计划的第几天（从 1 开始）
pub fn current_day_number(learned: usize) -> u32 {
    (learned / DAILY_NEW_WORDS_LIMIT) as u32 + 1
}

/// 今天的新单词队列：从未复习、今天也没学过，按列表顺序取前 25 个
pub fn new_words_to_learn<'a>(
    words: &'a [Word],
    records: &[StudyRecord],
    today_start: i64,
) -> Vec<&'a Word> {
    let studied_today: HashSet<&str> = records
        .iter()
        .filter(|r| r.study_at >= today_start)
        .map(|r| r.word_id.as_str())
        .collect();

    words
        .iter()
        .filter(|w| w.is_unlearned() && !studied_today.contains(w.id.as_str()))
        .take(DAILY_NEW_WORDS_LIMIT)
        .collect()
}

/// 今天第一次学习的单词数
///
/// 今天有学习记录、且复习次数恰好为 1 的不同单词。
pub fn learned_new_today(words: &[Word], records: &[StudyRecord], today_start: i64) -> usize {
    let by_id: HashMap<&str, &Word> = words.iter().map(|w| (w.id.as_str(), w)).collect();

    records
        .iter()
        .filter(|r| r.study_at >= today_start)
        .filter_map(|r| by_id.get(r.word_id.as_str()))
        .filter(|w| w.review_count == 1)
        .map(|w| w.id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

pub fn today_progress(unlearned: usize, learned_today: usize) -> TodayProgress {
    let planned = unlearned.min(DAILY_NEW_WORDS_LIMIT);
    let percentage = if planned > 0 {
        (learned_today as f64 / planned as f64 * 100.0).round() as u32
    } else {
        100
    };

    TodayProgress {
        planned,
        learned: learned_today,
        remaining: planned as i64 - learned_today as i64,
        percentage,
    }
}

/// 生成学习日历
///
/// 第 `day` 天的单词是 `已学 ++ 未学` 拼接序列中
/// `[(day-1)*25, min(day*25, total))` 这一段。
/// 日期按 `今天 + (day - 当前天数)` 推算。
pub fn learning_calendar(words: &[Word], now_ms: i64, boundary: &DayBoundary) -> Vec<CalendarDay> {
    let mut learned: Vec<&Word> = words.iter().filter(|w| !w.is_unlearned()).collect();
    learned.sort_by_key(|w| w.last_review_at.unwrap_or(0));

    let mut unlearned: Vec<&Word> = words.iter().filter(|w| w.is_unlearned()).collect();
    unlearned.sort_by_key(|w| w.created_at);

    let current_day = current_day_number(learned.len());
    let today = boundary.date_of(now_ms);

    let ordered: Vec<&Word> = learned.into_iter().chain(unlearned).collect();

    ordered
        .chunks(DAILY_NEW_WORDS_LIMIT)
        .enumerate()
        .map(|(index, slice)| {
            let day = index as u32 + 1;
            let date = shift_days(today, i64::from(day) - i64::from(current_day));
            let day_words: Vec<Word> = slice.iter().map(|w| (*w).clone()).collect();

            let (status, completed_count) = if day < current_day {
                (DayStatus::Completed, day_words.len())
            } else if day == current_day {
                let done = day_words.iter().filter(|w| !w.is_unlearned()).count();
                (DayStatus::Today, done)
            } else {
                (DayStatus::Upcoming, 0)
            };

            CalendarDay {
                day,
                date: format_date(date),
                display_date: boundary.display_label(date, today),
                total_count: day_words.len(),
                words: day_words,
                status,
                completed_count,
            }
        })
        .collect()
}

/// 日历中指定的一天
pub fn day_words(calendar: &[CalendarDay], day: u32) -> Option<&CalendarDay> {
    calendar.iter().find(|d| d.day == day)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_710_468_000_000;

    fn word(id: usize, created_at: i64, review_count: u32, last_review_at: Option<i64>) -> Word {
        Word {
            id: format!("w{id}"),
            english: format!("word{id}"),
            phonetic: None,
            part_of_speech: None,
            chinese: format!("词{id}"),
            created_at,
            proficiency: 0,
            next_review_at: created_at,
            review_count,
            last_review_at,
        }
    }

    fn boundary() -> DayBoundary {
        DayBoundary::from_offset_minutes(8 * 60).unwrap()
    }

    #[test]
    fn test_day_counters() {
        assert_eq!(total_days_needed(0), 0);
        assert_eq!(total_days_needed(25), 1);
        assert_eq!(total_days_needed(30), 2);
        assert_eq!(current_day_number(0), 1);
        assert_eq!(current_day_number(24), 1);
        assert_eq!(current_day_number(25), 2);
    }

    #[test]
    fn test_today_progress_empty_plan_is_complete() {
        let progress = today_progress(0, 0);
        assert_eq!(progress.planned, 0);
        assert_eq!(progress.percentage, 100);
    }

    #[test]
    fn test_today_progress_rounds_percentage() {
        let progress = today_progress(40, 10);
        assert_eq!(progress.planned, 25);
        assert_eq!(progress.remaining, 15);
        assert_eq!(progress.percentage, 40);

        let progress = today_progress(3, 1);
        assert_eq!(progress.percentage, 33);
    }

    #[test]
    fn test_calendar_orders_learned_before_unlearned() {
        let mut words: Vec<Word> = (0..30).map(|i| word(i, 1_000 + i as i64, 0, None)).collect();
        // 最后添加的两个单词已经学过
        words[28].review_count = 1;
        words[28].last_review_at = Some(NOW - 10);
        words[29].review_count = 2;
        words[29].last_review_at = Some(NOW - 20);

        let calendar = learning_calendar(&words, NOW, &boundary());
        assert_eq!(calendar.len(), 2);
        assert_eq!(calendar[0].words[0].id, "w29");
        assert_eq!(calendar[0].words[1].id, "w28");
        assert_eq!(calendar[0].words[2].id, "w0");
        assert_eq!(calendar[0].status, DayStatus::Today);
        assert_eq!(calendar[0].completed_count, 2);
        assert_eq!(calendar[0].display_date, "今天");
        assert_eq!(calendar[1].total_count, 5);
        assert_eq!(calendar[1].status, DayStatus::Upcoming);
        assert_eq!(calendar[1].display_date, "明天");
    }

    #[test]
    fn test_calendar_dates_shift_with_current_day() {
        let words: Vec<Word> = (0..60)
            .map(|i| {
                if i < 26 {
                    word(i, i as i64, 1, Some(NOW - 1_000 + i as i64))
                } else {
                    word(i, i as i64, 0, None)
                }
            })
            .collect();

        let calendar = learning_calendar(&words, NOW, &boundary());
        assert_eq!(calendar.len(), 3);
        assert_eq!(calendar[0].status, DayStatus::Completed);
        assert_eq!(calendar[0].completed_count, 25);
        assert_eq!(calendar[0].display_date, "昨天");
        assert_eq!(calendar[0].date, "2024-03-14");
        assert_eq!(calendar[1].status, DayStatus::Today);
        assert_eq!(calendar[1].completed_count, 1);
        assert_eq!(calendar[2].status, DayStatus::Upcoming);
        assert_eq!(calendar[2].total_count, 10);
        assert_eq!(calendar[2].completed_count, 0);
    }

    #[test]
    fn test_new_words_to_learn_skips_studied_today() {
        let words: Vec<Word> = (0..30).map(|i| word(i, i as i64, 0, None)).collect();
        let records = vec![StudyRecord {
            id: "r1".to_string(),
            word_id: "w0".to_string(),
            study_at: NOW,
            remembered: true,
            duration: 3,
        }];

        let queue = new_words_to_learn(&words, &records, NOW - 1);
        assert_eq!(queue.len(), DAILY_NEW_WORDS_LIMIT);
        assert!(queue.iter().all(|w| w.id != "w0"));
        assert_eq!(queue[0].id, "w1");
    }

    #[test]
    fn test_learned_new_today_counts_distinct_first_reviews() {
        let words = vec![
            word(0, 0, 1, Some(NOW)),
            word(1, 0, 2, Some(NOW)),
            word(2, 0, 1, Some(10)),
        ];
        let record = |id: &str, word_id: &str, at: i64| StudyRecord {
            id: id.to_string(),
            word_id: word_id.to_string(),
            study_at: at,
            remembered: true,
            duration: 1,
        };
        let records = vec![
            record("a", "w0", NOW),
            record("b", "w1", NOW),
            record("c", "w1", NOW),
            record("d", "w2", 10),
        ];

        assert_eq!(learned_new_today(&words, &records, NOW - 1_000), 1);
    }

    #[test]
    fn test_day_words_lookup() {
        let words: Vec<Word> = (0..30).map(|i| word(i, i as i64, 0, None)).collect();
        let calendar = learning_calendar(&words, NOW, &boundary());
        assert_eq!(day_words(&calendar, 2).map(|d| d.total_count), Some(5));
        assert!(day_words(&calendar, 3).is_none());
        assert!(day_words(&calendar, 0).is_none());
    }
}
