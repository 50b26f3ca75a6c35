//! 时间来源与日期边界
//!
//! 所有"今天"的判断（今日统计、今日新词、学习日历日期）都基于同一个固定时区偏移，
//! 避免出现统计用 UTC 日期、进度用本地零点的不一致。

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveTime, Offset, Utc};

/// 当前时间来源（Unix 毫秒）
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// 系统时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// 可手动拨动的时钟，克隆后共享同一时间
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<AtomicI64>,
}

impl FixedClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(now_ms)),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

// ============================================================
// DayBoundary - 日期边界
// ============================================================

/// 按固定时区偏移划分自然日
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundary {
    offset: FixedOffset,
}

impl DayBoundary {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// 使用进程启动时的系统本地偏移
    pub fn local() -> Self {
        Self::new(*Local::now().offset())
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// 以分钟表示的 UTC 偏移，超出 ±24h 时返回 None
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// 时间戳所在的本地日期
    pub fn date_of(&self, ms: i64) -> NaiveDate {
        DateTime::<Utc>::from_timestamp_millis(ms)
            .unwrap_or_default()
            .with_timezone(&self.offset)
            .date_naive()
    }

    /// 本地日期零点对应的时间戳
    pub fn midnight_of(&self, date: NaiveDate) -> i64 {
        date.and_time(NaiveTime::MIN)
            .and_local_timezone(self.offset)
            .single()
            .map(|dt| dt.timestamp_millis())
            .unwrap_or_else(|| {
                date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
                    - i64::from(self.offset.local_minus_utc()) * 1000
            })
    }

    /// 时间戳所在日的零点
    pub fn start_of_day(&self, ms: i64) -> i64 {
        self.midnight_of(self.date_of(ms))
    }

    /// 日期键 (YYYY-MM-DD)
    pub fn date_key(&self, ms: i64) -> String {
        format_date(self.date_of(ms))
    }

    /// 日历显示标签：相对今天的 -1/0/+1 天显示为 昨天/今天/明天，否则为 M月D日
    pub fn display_label(&self, date: NaiveDate, today: NaiveDate) -> String {
        match (date - today).num_days() {
            0 => "今天".to_string(),
            1 => "明天".to_string(),
            -1 => "昨天".to_string(),
            _ => format!("{}月{}日", date.month(), date.day()),
        }
    }
}

impl Default for DayBoundary {
    fn default() -> Self {
        Self::local()
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 在日期上偏移若干天，溢出时保持原日期
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}
