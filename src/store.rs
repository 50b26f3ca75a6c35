//! 单词库 Store
//!
//! 持有单词列表、学习记录和每日统计三个集合，所有调度与进度视图都从这三者派生。
//! 对不存在的 ID 做更新/删除/学习都是静默的空操作。

use std::sync::Arc;

use uuid::Uuid;

use crate::clock::{Clock, DayBoundary, SystemClock};
use crate::models::{
    CalendarDay, DailyCounter, DailyStats, NewWord, StoreSnapshot, StudyRecord, TodayProgress,
    Word, WordUpdate,
};
use crate::plan;
use crate::schedule::{self, DAILY_NEW_WORDS_LIMIT};

pub struct VocabularyStore {
    words: Vec<Word>,
    study_records: Vec<StudyRecord>,
    daily_stats: Vec<DailyStats>,
    clock: Arc<dyn Clock>,
    boundary: DayBoundary,
}

impl VocabularyStore {
    /// 使用系统时钟和本地时区创建空单词库
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), DayBoundary::local())
    }

    pub fn with_clock(clock: Arc<dyn Clock>, boundary: DayBoundary) -> Self {
        Self {
            words: Vec::new(),
            study_records: Vec::new(),
            daily_stats: Vec::new(),
            clock,
            boundary,
        }
    }

    /// 从快照恢复
    pub fn from_snapshot(
        snapshot: StoreSnapshot,
        clock: Arc<dyn Clock>,
        boundary: DayBoundary,
    ) -> Self {
        Self {
            words: snapshot.words,
            study_records: snapshot.study_records,
            daily_stats: snapshot.daily_stats,
            clock,
            boundary,
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            words: self.words.clone(),
            study_records: self.study_records.clone(),
            daily_stats: self.daily_stats.clone(),
        }
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    pub fn boundary(&self) -> &DayBoundary {
        &self.boundary
    }

    fn today_start(&self) -> i64 {
        self.boundary.start_of_day(self.now_ms())
    }

    // ============================================================
    // 集合访问
    // ============================================================

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn study_records(&self) -> &[StudyRecord] {
        &self.study_records
    }

    pub fn daily_stats(&self) -> &[DailyStats] {
        &self.daily_stats
    }

    pub fn get_word(&self, id: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.id == id)
    }

    /// 按英文查找（不区分大小写）
    pub fn find_by_english(&self, english: &str) -> Option<&Word> {
        let needle = english.to_lowercase();
        self.words.iter().find(|w| w.english.to_lowercase() == needle)
    }

    pub fn records_for_word<'a>(
        &'a self,
        word_id: &'a str,
    ) -> impl Iterator<Item = &'a StudyRecord> + 'a {
        self.study_records.iter().filter(move |r| r.word_id == word_id)
    }

    // ============================================================
    // 变更操作
    // ============================================================

    /// 添加新单词，不做重复检查
    pub fn add_word(
        &mut self,
        english: &str,
        chinese: &str,
        phonetic: Option<&str>,
        part_of_speech: Option<&str>,
    ) -> Word {
        let now = self.now_ms();
        let word = Word {
            id: Uuid::new_v4().to_string(),
            english: english.trim().to_string(),
            phonetic: phonetic.map(|p| p.trim().to_string()),
            part_of_speech: part_of_speech.map(|p| p.trim().to_string()),
            chinese: chinese.trim().to_string(),
            created_at: now,
            proficiency: 0,
            next_review_at: schedule::calculate_next_review(0, now),
            review_count: 0,
            last_review_at: None,
        };

        tracing::debug!(word_id = %word.id, english = %word.english, "word added");

        self.words.push(word.clone());
        self.bump_daily(DailyCounter::NewWords);
        word
    }

    /// 批量添加，跳过库中已存在的英文（不区分大小写），返回实际插入数
    ///
    /// 每插入一个都会重新检查，因此同一批内的重复项也会被跳过。
    pub fn batch_add_words(&mut self, list: &[NewWord]) -> usize {
        let mut inserted = 0;
        for item in list {
            if self.find_by_english(&item.english).is_some() {
                tracing::debug!(english = %item.english, "duplicate word skipped");
                continue;
            }
            self.add_word(
                &item.english,
                &item.chinese,
                item.phonetic.as_deref(),
                item.part_of_speech.as_deref(),
            );
            inserted += 1;
        }

        tracing::info!(requested = list.len(), inserted, "batch import finished");
        inserted
    }

    /// 删除单词及其全部学习记录，返回是否找到
    pub fn delete_word(&mut self, id: &str) -> bool {
        let Some(index) = self.words.iter().position(|w| w.id == id) else {
            return false;
        };

        self.words.remove(index);
        let before = self.study_records.len();
        self.study_records.retain(|r| r.word_id != id);

        tracing::debug!(
            word_id = id,
            removed_records = before - self.study_records.len(),
            "word deleted"
        );
        true
    }

    /// 浅合并字段，不重新计算派生字段，返回是否找到
    pub fn update_word(&mut self, id: &str, update: &WordUpdate) -> bool {
        match self.words.iter_mut().find(|w| w.id == id) {
            Some(word) => {
                update.apply_to(word);
                tracing::debug!(word_id = id, "word updated");
                true
            }
            None => false,
        }
    }

    /// 记录一次学习并按新熟练度重新安排复习
    pub fn record_study(
        &mut self,
        word_id: &str,
        remembered: bool,
        duration: u32,
    ) -> Option<StudyRecord> {
        let now = self.now_ms();
        let word = self.words.iter_mut().find(|w| w.id == word_id)?;

        let record = StudyRecord {
            id: Uuid::new_v4().to_string(),
            word_id: word_id.to_string(),
            study_at: now,
            remembered,
            duration,
        };

        word.review_count = word.review_count.saturating_add(1);
        word.last_review_at = Some(now);
        word.proficiency = schedule::next_proficiency(word.proficiency, remembered);
        word.next_review_at = schedule::calculate_next_review(word.proficiency, now);

        tracing::debug!(
            word_id,
            remembered,
            proficiency = word.proficiency,
            next_review_at = word.next_review_at,
            "study recorded"
        );

        self.study_records.push(record.clone());
        self.bump_daily(DailyCounter::ReviewedWords);
        Some(record)
    }

    fn bump_daily(&mut self, counter: DailyCounter) {
        let date = self.boundary.date_key(self.now_ms());
        let index = match self.daily_stats.iter().position(|s| s.date == date) {
            Some(index) => index,
            None => {
                self.daily_stats.push(DailyStats::empty(date));
                self.daily_stats.len() - 1
            }
        };

        let stats = &mut self.daily_stats[index];
        match counter {
            DailyCounter::NewWords => stats.new_words = stats.new_words.saturating_add(1),
            DailyCounter::ReviewedWords => {
                stats.reviewed_words = stats.reviewed_words.saturating_add(1)
            }
        }
    }

    // ============================================================
    // 派生视图
    // ============================================================

    /// 已到复习时间的单词
    pub fn words_to_review(&self) -> Vec<&Word> {
        let now = self.now_ms();
        self.words.iter().filter(|w| w.is_due(now)).collect()
    }

    /// 今天添加的单词
    pub fn today_new_words(&self) -> Vec<&Word> {
        let today = self.today_start();
        self.words.iter().filter(|w| w.created_at >= today).collect()
    }

    /// 今日统计，不存在时返回零值（不写入）
    pub fn today_stats(&self) -> DailyStats {
        let date = self.boundary.date_key(self.now_ms());
        self.daily_stats
            .iter()
            .find(|s| s.date == date)
            .cloned()
            .unwrap_or_else(|| DailyStats::empty(date))
    }

    pub fn total_words(&self) -> usize {
        self.words.len()
    }

    pub fn mastered_words(&self) -> usize {
        self.words
            .iter()
            .filter(|w| schedule::is_mastered(w.proficiency))
            .count()
    }

    pub fn daily_new_words_limit(&self) -> usize {
        DAILY_NEW_WORDS_LIMIT
    }

    /// 今天待学的新单词（最多 25 个）
    pub fn today_new_words_to_learn(&self) -> Vec<&Word> {
        plan::new_words_to_learn(&self.words, &self.study_records, self.today_start())
    }

    pub fn unlearned_words_count(&self) -> usize {
        plan::unlearned_count(&self.words)
    }

    pub fn total_days_needed(&self) -> usize {
        plan::total_days_needed(self.unlearned_words_count())
    }

    pub fn current_day_number(&self) -> u32 {
        plan::current_day_number(plan::learned_count(&self.words))
    }

    pub fn today_learned_new_words_count(&self) -> usize {
        plan::learned_new_today(&self.words, &self.study_records, self.today_start())
    }

    pub fn today_progress(&self) -> TodayProgress {
        plan::today_progress(self.unlearned_words_count(), self.today_learned_new_words_count())
    }

    pub fn learning_calendar(&self) -> Vec<CalendarDay> {
        plan::learning_calendar(&self.words, self.now_ms(), &self.boundary)
    }

    /// 学习日历中的某一天
    pub fn day_plan(&self, day: u32) -> Option<CalendarDay> {
        let calendar = self.learning_calendar();
        plan::day_words(&calendar, day).cloned()
    }
}

impl Default for VocabularyStore {
    fn default() -> Self {
        Self::new()
    }
}
