use std::path::PathBuf;

use crate::clock::DayBoundary;

const DEFAULT_SPEECH_RATE: f32 = 0.8;
const DATA_FILE_NAME: &str = "vocabulary.json";
const DEFAULT_LOG_DIR: &str = "./logs";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_level: String,
    /// 是否额外写入按天滚动的日志文件 (ENABLE_FILE_LOGS)
    pub file_logs: bool,
    pub log_dir: PathBuf,
    pub day_boundary: DayBoundary,
    pub speech_rate: f32,
}

impl Config {
    pub fn from_env() -> Self {
        let data_file = std::env::var("VOCAB_DATA_FILE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_file);

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let file_logs = parse_flag(std::env::var("ENABLE_FILE_LOGS").ok().as_deref());
        let log_dir = std::env::var("LOG_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        let day_boundary = std::env::var("VOCAB_UTC_OFFSET_MINUTES")
            .ok()
            .and_then(|value| value.trim().parse::<i32>().ok())
            .and_then(DayBoundary::from_offset_minutes)
            .unwrap_or_else(DayBoundary::local);

        let speech_rate = std::env::var("VOCAB_SPEECH_RATE")
            .ok()
            .and_then(|value| value.trim().parse::<f32>().ok())
            .filter(|rate| (0.1..=10.0).contains(rate))
            .unwrap_or(DEFAULT_SPEECH_RATE);

        Self {
            data_file,
            log_level,
            file_logs,
            log_dir,
            day_boundary,
            speech_rate,
        }
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("true") | Some("1"))
}

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("danci-vocab").join(DATA_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME))
}
