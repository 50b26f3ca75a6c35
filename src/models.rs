//! 数据模型定义
//!
//! 单词、学习记录、每日统计，以及由它们派生出的学习计划视图。
//! 所有时间戳均为 Unix 毫秒。

use serde::{Deserialize, Serialize};

// ============================================================
// Word - 单词
// ============================================================

/// 单词
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    /// 单词唯一标识 (UUID)
    pub id: String,
    /// 英文单词
    pub english: String,
    /// 音标
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    /// 词性
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    /// 中文释义
    pub chinese: String,
    /// 添加时间
    pub created_at: i64,
    /// 熟练度 (0-8)，对应复习间隔表的下标
    pub proficiency: u32,
    /// 下次复习时间
    pub next_review_at: i64,
    /// 复习次数
    pub review_count: u32,
    /// 上次复习时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_review_at: Option<i64>,
}

impl Word {
    /// 是否从未学习过
    pub fn is_unlearned(&self) -> bool {
        self.review_count == 0
    }

    /// 是否到了复习时间
    pub fn is_due(&self, now_ms: i64) -> bool {
        self.next_review_at <= now_ms
    }
}

/// 待添加的单词（批量导入的输入项）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWord {
    pub english: String,
    pub chinese: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}

impl NewWord {
    pub fn new(english: impl Into<String>, chinese: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            chinese: chinese.into(),
            phonetic: None,
            part_of_speech: None,
        }
    }

    pub fn with_phonetic(mut self, phonetic: impl Into<String>) -> Self {
        self.phonetic = Some(phonetic.into());
        self
    }

    pub fn with_part_of_speech(mut self, part_of_speech: impl Into<String>) -> Self {
        self.part_of_speech = Some(part_of_speech.into());
        self
    }
}

/// 单词的部分更新
///
/// 只覆盖提供了的字段；可选字段使用 `Some(None)` 表示清空。
/// 不会重新计算派生字段，修改 `proficiency` 不会影响 `next_review_at`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordUpdate {
    pub english: Option<String>,
    pub phonetic: Option<Option<String>>,
    pub part_of_speech: Option<Option<String>>,
    pub chinese: Option<String>,
    pub created_at: Option<i64>,
    pub proficiency: Option<u32>,
    pub next_review_at: Option<i64>,
    pub review_count: Option<u32>,
    pub last_review_at: Option<Option<i64>>,
}

impl WordUpdate {
    /// 浅合并到目标单词
    pub fn apply_to(&self, word: &mut Word) {
        if let Some(english) = &self.english {
            word.english = english.clone();
        }
        if let Some(phonetic) = &self.phonetic {
            word.phonetic = phonetic.clone();
        }
        if let Some(part_of_speech) = &self.part_of_speech {
            word.part_of_speech = part_of_speech.clone();
        }
        if let Some(chinese) = &self.chinese {
            word.chinese = chinese.clone();
        }
        if let Some(created_at) = self.created_at {
            word.created_at = created_at;
        }
        if let Some(proficiency) = self.proficiency {
            word.proficiency = proficiency;
        }
        if let Some(next_review_at) = self.next_review_at {
            word.next_review_at = next_review_at;
        }
        if let Some(review_count) = self.review_count {
            word.review_count = review_count;
        }
        if let Some(last_review_at) = self.last_review_at {
            word.last_review_at = last_review_at;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ============================================================
// StudyRecord - 学习记录
// ============================================================

/// 学习记录，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyRecord {
    /// 记录唯一标识 (UUID)
    pub id: String,
    /// 单词 ID
    pub word_id: String,
    /// 学习时间
    pub study_at: i64,
    /// 是否记住
    pub remembered: bool,
    /// 耗时（秒）
    pub duration: u32,
}

// ============================================================
// DailyStats - 每日统计
// ============================================================

/// 每日学习统计，每个日期至多一条
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    /// 新学单词数
    pub new_words: u32,
    /// 复习单词数
    pub reviewed_words: u32,
    /// 学习时长（分钟）
    pub study_time: u32,
    /// 日期 (YYYY-MM-DD)
    pub date: String,
}

impl DailyStats {
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            new_words: 0,
            reviewed_words: 0,
            study_time: 0,
            date: date.into(),
        }
    }
}

/// 每日统计计数器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyCounter {
    NewWords,
    ReviewedWords,
}

// ============================================================
// 学习计划视图
// ============================================================

/// 今日新单词学习进度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayProgress {
    /// 今日计划学习数量
    pub planned: usize,
    /// 已完成数量
    pub learned: usize,
    /// 剩余数量（今天学得比计划多时为负）
    pub remaining: i64,
    /// 完成百分比
    pub percentage: u32,
}

/// 学习日历中某一天的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Completed,
    Today,
    Upcoming,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Today => "today",
            Self::Upcoming => "upcoming",
        }
    }
}

/// 学习日历中的一天
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// 第几天（从 1 开始）
    pub day: u32,
    /// 日期 (YYYY-MM-DD)
    pub date: String,
    /// 显示日期：今天/明天/昨天/M月D日
    pub display_date: String,
    /// 该天要学习的单词
    pub words: Vec<Word>,
    pub status: DayStatus,
    /// 已完成数量
    pub completed_count: usize,
    /// 总数量
    pub total_count: usize,
}

// ============================================================
// StoreSnapshot - 持久化快照
// ============================================================

/// 单词库的完整快照，每次变更后整体序列化
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(default)]
    pub study_records: Vec<StudyRecord>,
    #[serde(default)]
    pub daily_stats: Vec<DailyStats>,
}
