mod common;

use chrono::Duration;
use danci_vocab::{Clock, DayStatus, NewWord, WordUpdate, DAILY_NEW_WORDS_LIMIT};

use common::{create_test_store, numbered_words, seed_words, HOUR_MS, NOW};

#[test]
fn remembered_and_forgotten_reviews_move_proficiency_one_step() {
    let (mut store, clock) = create_test_store();
    let id = store.add_word("apple", "苹果", None, None).id;

    for expected in 1..=8 {
        store.record_study(&id, true, 3);
        let word = store.get_word(&id).unwrap();
        assert_eq!(word.proficiency, expected);
        assert_eq!(
            word.next_review_at,
            danci_vocab::calculate_next_review(expected, clock.now_ms())
        );
    }

    // 已到上限
    store.record_study(&id, true, 3);
    assert_eq!(store.get_word(&id).unwrap().proficiency, 8);
    assert_eq!(store.get_word(&id).unwrap().next_review_at, clock.now_ms() + 720 * HOUR_MS);

    clock.advance(Duration::hours(1));
    store.record_study(&id, false, 3);
    let word = store.get_word(&id).unwrap();
    assert_eq!(word.proficiency, 7);
    assert_eq!(word.review_count, 10);
    assert_eq!(word.last_review_at, Some(clock.now_ms()));
    assert_eq!(word.next_review_at, clock.now_ms() + 336 * HOUR_MS);
    assert_eq!(store.study_records().len(), 10);
    assert_eq!(store.today_stats().reviewed_words, 10);
}

#[test]
fn forgetting_a_new_word_keeps_it_at_level_zero() {
    let (mut store, _) = create_test_store();
    let id = store.add_word("apple", "苹果", None, None).id;

    let record = store.record_study(&id, false, 12).unwrap();
    assert!(!record.remembered);
    assert_eq!(record.duration, 12);
    assert_eq!(record.study_at, NOW);

    let word = store.get_word(&id).unwrap();
    assert_eq!(word.proficiency, 0);
    assert_eq!(word.next_review_at, NOW + 360_000);
}

#[test]
fn delete_word_cascades_study_records() {
    let (mut store, clock) = create_test_store();
    let ids = seed_words(&mut store, &clock, 3);
    store.record_study(&ids[0], true, 1);
    store.record_study(&ids[0], false, 1);
    store.record_study(&ids[1], true, 1);

    assert!(store.delete_word(&ids[0]));
    assert_eq!(store.total_words(), 2);
    assert!(store.records_for_word(&ids[0]).next().is_none());
    assert_eq!(store.study_records().len(), 1);

    assert!(!store.delete_word("missing"));
    assert_eq!(store.total_words(), 2);
    assert_eq!(store.study_records().len(), 1);
}

#[test]
fn batch_add_skips_existing_terms_case_insensitively() {
    let (mut store, _) = create_test_store();
    store.add_word("Apple", "苹果", None, None);

    let list = vec![
        NewWord::new("apple", "苹果"),
        NewWord::new("banana", "香蕉").with_phonetic("/bəˈnɑː.nə/"),
        NewWord::new("cherry", "樱桃").with_part_of_speech("n."),
    ];
    assert_eq!(store.batch_add_words(&list), 2);
    assert_eq!(store.total_words(), 3);
    assert_eq!(store.today_stats().new_words, 3);

    let banana = store.find_by_english("BANANA").unwrap();
    assert_eq!(banana.phonetic.as_deref(), Some("/bəˈnɑː.nə/"));
}

#[test]
fn batch_add_rejects_duplicates_within_the_same_batch() {
    let (mut store, _) = create_test_store();
    let list = vec![
        NewWord::new("apple", "苹果"),
        NewWord::new("APPLE", "苹果2"),
        NewWord::new("pear", "梨"),
    ];

    assert_eq!(store.batch_add_words(&list), 2);
    let english: Vec<&str> = store.words().iter().map(|w| w.english.as_str()).collect();
    assert_eq!(english, vec!["apple", "pear"]);
    assert_eq!(store.find_by_english("apple").unwrap().chinese, "苹果");
}

#[test]
fn update_word_merges_fields_without_recomputing_schedule() {
    let (mut store, _) = create_test_store();
    let word = store.add_word("colour", "颜色", Some("/ˈkʌl.ər/"), None);

    let update = WordUpdate {
        english: Some("color".to_string()),
        phonetic: Some(None),
        part_of_speech: Some(Some("n.".to_string())),
        proficiency: Some(3),
        ..Default::default()
    };
    assert!(store.update_word(&word.id, &update));

    let updated = store.get_word(&word.id).unwrap();
    assert_eq!(updated.english, "color");
    assert_eq!(updated.phonetic, None);
    assert_eq!(updated.part_of_speech.as_deref(), Some("n."));
    assert_eq!(updated.proficiency, 3);
    assert_eq!(updated.next_review_at, word.next_review_at);
    assert_eq!(updated.created_at, word.created_at);
}

#[test]
fn today_queue_is_capped_and_excludes_words_studied_today() {
    let (mut store, _) = create_test_store();
    store.batch_add_words(&numbered_words(40));

    let queue = store.today_new_words_to_learn();
    assert_eq!(queue.len(), DAILY_NEW_WORDS_LIMIT);
    assert_eq!(queue[0].english, "word0");

    let first = queue[0].id.clone();
    store.record_study(&first, false, 2);

    let queue = store.today_new_words_to_learn();
    assert_eq!(queue.len(), DAILY_NEW_WORDS_LIMIT);
    assert!(queue.iter().all(|w| w.id != first));
    assert_eq!(queue[0].english, "word1");
    assert_eq!(queue[24].english, "word25");
}

#[test]
fn today_progress_tracks_first_reviews() {
    let (mut store, _) = create_test_store();
    store.batch_add_words(&numbered_words(30));
    let ids: Vec<String> = store.words().iter().map(|w| w.id.clone()).collect();

    let progress = store.today_progress();
    assert_eq!(progress.planned, 25);
    assert_eq!(progress.learned, 0);
    assert_eq!(progress.percentage, 0);

    for id in &ids[..5] {
        store.record_study(id, true, 4);
    }
    // 第二次复习不算今天的新词
    store.record_study(&ids[0], true, 4);

    assert_eq!(store.today_learned_new_words_count(), 4);
    let progress = store.today_progress();
    assert_eq!(progress.planned, 25);
    assert_eq!(progress.learned, 4);
    assert_eq!(progress.remaining, 21);
    assert_eq!(progress.percentage, 16);
}

#[test]
fn first_reviews_from_yesterday_do_not_count_today() {
    let (mut store, clock) = create_test_store();
    let id = store.add_word("apple", "苹果", None, None).id;
    store.record_study(&id, true, 1);
    assert_eq!(store.today_learned_new_words_count(), 1);

    clock.advance(Duration::days(1));
    assert_eq!(store.today_learned_new_words_count(), 0);
    assert!(store.today_new_words().is_empty());
    assert_eq!(store.today_stats().new_words, 0);
}

#[test]
fn thirty_new_words_need_two_days() {
    let (mut store, _) = create_test_store();
    store.batch_add_words(&numbered_words(30));

    assert_eq!(store.unlearned_words_count(), 30);
    assert_eq!(store.total_days_needed(), 2);
    assert_eq!(store.current_day_number(), 1);

    let calendar = store.learning_calendar();
    assert_eq!(calendar.len(), 2);
    assert_eq!(calendar[0].total_count, 25);
    assert_eq!(calendar[1].total_count, 5);
    assert_eq!(calendar[0].status, DayStatus::Today);
    assert_eq!(calendar[0].date, "2024-03-15");
    assert_eq!(calendar[1].date, "2024-03-16");
}

#[test]
fn studying_a_full_day_advances_the_plan() {
    let (mut store, clock) = create_test_store();
    let ids = seed_words(&mut store, &clock, 60);

    for id in &ids[..25] {
        store.record_study(id, true, 2);
        clock.advance(Duration::seconds(1));
    }

    assert_eq!(store.current_day_number(), 2);
    assert_eq!(store.total_days_needed(), 2);

    let calendar = store.learning_calendar();
    assert_eq!(calendar.len(), 3);
    assert_eq!(calendar[0].status, DayStatus::Completed);
    assert_eq!(calendar[0].completed_count, 25);
    assert_eq!(calendar[0].display_date, "昨天");
    assert_eq!(calendar[1].status, DayStatus::Today);
    assert_eq!(calendar[1].display_date, "今天");
    assert_eq!(calendar[1].completed_count, 0);
    assert_eq!(calendar[2].display_date, "明天");
    assert_eq!(calendar[2].total_count, 10);

    // 已学单词按上次复习时间排在最前
    assert_eq!(calendar[0].words[0].id, ids[0]);
    assert_eq!(calendar[1].words[0].id, ids[25]);

    let total: usize = calendar.iter().map(|d| d.total_count).sum();
    assert_eq!(total, store.total_words());
}

#[test]
fn day_plan_returns_single_calendar_day() {
    let (mut store, _) = create_test_store();
    store.batch_add_words(&numbered_words(30));

    let day = store.day_plan(2).unwrap();
    assert_eq!(day.day, 2);
    assert_eq!(day.words.len(), 5);
    assert_eq!(day.words[0].english, "word25");
    assert!(store.day_plan(3).is_none());
}

#[test]
fn empty_store_has_empty_plan() {
    let (store, _) = create_test_store();
    assert!(store.learning_calendar().is_empty());
    assert_eq!(store.total_days_needed(), 0);
    assert_eq!(store.current_day_number(), 1);
    assert_eq!(store.today_progress().percentage, 100);
    assert_eq!(store.daily_new_words_limit(), 25);
}
