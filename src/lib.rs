//! # danci-vocab - 背单词核心库
//!
//! 管理英/中单词对，按固定的间隔表安排复习，并生成每日学习计划。
//!
//! - **间隔复习** - 熟练度 0-8 对应 6 分钟到 30 天的复习间隔
//! - **每日计划** - 每天 25 个新单词，按累计学过的单词数推进学习日
//! - **学习日历** - 把全部单词划分为连续的学习日，用于展示进度
//!
//! ## 模块结构
//!
//! - [`store`] - 单词库：增删改、学习记录、派生视图
//! - [`schedule`] - 复习间隔表与熟练度变化
//! - [`plan`] - 今日队列、进度、学习日历
//! - [`statistics`] - 简单计数统计
//! - [`persistence`] - 整体快照的 JSON 持久化
//! - [`app`] - 单词库 + 持久化，每次变更后保存
//! - [`import`] - 批量导入解析
//! - [`speech`] - 单词朗读
//! - [`routes`] - 页面路由表
//!
//! ## 使用示例
//!
//! ```rust
//! use danci_vocab::VocabularyStore;
//!
//! let mut store = VocabularyStore::new();
//! let word = store.add_word("apple", "苹果", None, Some("n."));
//! store.record_study(&word.id, true, 5);
//! assert_eq!(store.get_word(&word.id).unwrap().proficiency, 1);
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod models;
pub mod persistence;
pub mod plan;
pub mod routes;
pub mod schedule;
pub mod speech;
pub mod statistics;
pub mod store;

// ============================================================================
// 重新导出
// ============================================================================

pub use app::VocabularyApp;
pub use clock::{Clock, DayBoundary, FixedClock, SystemClock};
pub use error::{AppResult, StoreError, StoreResult};
pub use models::*;
pub use persistence::{JsonFileBackend, MemoryBackend, SnapshotBackend};
pub use schedule::{calculate_next_review, DAILY_NEW_WORDS_LIMIT, REVIEW_INTERVALS_HOURS};
pub use store::VocabularyStore;
