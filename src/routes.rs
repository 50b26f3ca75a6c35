//! 页面路由表
//!
//! 六个命名视图及其路径、页面标题。

use serde::Serialize;

pub const APP_TITLE: &str = "背单词应用";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum View {
    Home,
    Words,
    Import,
    Review,
    DayWords,
    Statistics,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Home,
        View::Words,
        View::Import,
        View::Review,
        View::DayWords,
        View::Statistics,
    ];

    /// 路由模式，`DayWords` 带 `:day` 参数
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Words => "/words",
            Self::Import => "/import",
            Self::Review => "/review",
            Self::DayWords => "/day/:day",
            Self::Statistics => "/statistics",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "今日学习",
            Self::Words => "单词库",
            Self::Import => "批量导入",
            Self::Review => "学习计划",
            Self::DayWords => "单词列表",
            Self::Statistics => "学习统计",
        }
    }

    pub fn page_title(&self) -> String {
        format!("{} - {}", self.title(), APP_TITLE)
    }

    /// 把路径解析为视图；`/day/:day` 同时返回天数
    pub fn resolve(path: &str) -> Option<(View, Option<u32>)> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Some((View::Home, None));
        }

        if let Some(rest) = trimmed.strip_prefix("/day/") {
            return rest.parse::<u32>().ok().map(|day| (View::DayWords, Some(day)));
        }

        View::ALL
            .iter()
            .find(|view| **view != View::DayWords && view.path() == trimmed)
            .map(|view| (*view, None))
    }

    /// 某一天的单词列表路径
    pub fn day_path(day: u32) -> String {
        format!("/day/{day}")
    }
}
