//! 学习统计
//!
//! 只做简单计数，不做趋势分析。

use serde::Serialize;

use crate::models::DailyStats;
use crate::schedule::MAX_PROFICIENCY;
use crate::store::VocabularyStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProficiencyBucket {
    pub level: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub total_words: usize,
    pub mastered_words: usize,
    pub words_to_review: usize,
    pub unlearned_words: usize,
    pub total_records: usize,
    /// 全部学习记录中"记住"的比例，没有记录时为 0
    pub remembered_rate: f64,
    pub today: DailyStats,
    pub proficiency_distribution: Vec<ProficiencyBucket>,
    /// 按日期升序
    pub history: Vec<DailyStats>,
}

pub fn summarize(store: &VocabularyStore) -> StatisticsSummary {
    let records = store.study_records();
    let remembered = records.iter().filter(|r| r.remembered).count();
    let remembered_rate = if records.is_empty() {
        0.0
    } else {
        remembered as f64 / records.len() as f64
    };

    // 通过 update_word 写入的超范围熟练度计入最高档
    let mut counts = vec![0usize; MAX_PROFICIENCY as usize + 1];
    for word in store.words() {
        let level = word.proficiency.min(MAX_PROFICIENCY) as usize;
        counts[level] += 1;
    }
    let proficiency_distribution = counts
        .into_iter()
        .enumerate()
        .map(|(level, count)| ProficiencyBucket {
            level: level as u32,
            count,
        })
        .collect();

    let mut history = store.daily_stats().to_vec();
    history.sort_by(|a, b| a.date.cmp(&b.date));

    StatisticsSummary {
        total_words: store.total_words(),
        mastered_words: store.mastered_words(),
        words_to_review: store.words_to_review().len(),
        unlearned_words: store.unlearned_words_count(),
        total_records: records.len(),
        remembered_rate,
        today: store.today_stats(),
        proficiency_distribution,
        history,
    }
}
