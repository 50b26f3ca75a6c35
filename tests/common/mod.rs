#![allow(dead_code)]

use std::sync::Arc;

use danci_vocab::{DayBoundary, FixedClock, NewWord, VocabularyStore};

/// 2024-03-15 10:00:00 +08:00
pub const NOW: i64 = 1_710_468_000_000;

pub const HOUR_MS: i64 = 3_600_000;

pub fn beijing() -> DayBoundary {
    DayBoundary::from_offset_minutes(8 * 60).expect("valid offset")
}

pub fn create_test_store() -> (VocabularyStore, FixedClock) {
    let clock = FixedClock::new(NOW);
    let store = VocabularyStore::with_clock(Arc::new(clock.clone()), beijing());
    (store, clock)
}

pub fn numbered_words(count: usize) -> Vec<NewWord> {
    (0..count)
        .map(|i| NewWord::new(format!("word{i}"), format!("单词{i}")))
        .collect()
}

/// 添加 `count` 个单词，每个间隔 1 秒，保证创建时间各不相同
pub fn seed_words(store: &mut VocabularyStore, clock: &FixedClock, count: usize) -> Vec<String> {
    let mut ids = Vec::with_capacity(count);
    for item in numbered_words(count) {
        ids.push(store.add_word(&item.english, &item.chinese, None, None).id);
        clock.advance(chrono::Duration::seconds(1));
    }
    ids
}
