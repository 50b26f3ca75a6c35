// 语音朗读
// 尽力而为地播放单词发音，失败时通知用户，不影响单词库状态
//
// macOS: say
// Linux: espeak-ng / espeak
// 其他平台: 不支持

use std::io::ErrorKind;
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 朗读配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// 语言代码 (如 "en-US", "zh-CN")
    pub language: String,
    /// 语速 (0.1 - 10, 1.0 为正常)
    pub rate: f32,
    /// 音调 (0 - 2, 1.0 为正常)
    pub pitch: f32,
    /// 音量 (0 - 1)
    pub volume: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            rate: 0.8, // 放慢一点，便于跟读
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("当前平台不支持语音合成")]
    NotSupported,

    #[error("语音播放失败: {0}")]
    SpeakFailed(String),
}

/// 语音合成
pub trait Speaker {
    /// 开始朗读；正在播放的语音会先被取消
    fn speak(&self, text: &str, config: &SpeechConfig) -> Result<(), SpeechError>;

    fn stop(&self) -> Result<(), SpeechError>;
}

/// 面向用户的提示
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// 提示写到标准错误
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// 朗读单词，失败时提示用户并返回 false，不向调用方传播错误
pub fn speak_word(
    speaker: &dyn Speaker,
    notifier: &dyn Notifier,
    text: &str,
    language: &str,
    base: &SpeechConfig,
) -> bool {
    let config = SpeechConfig {
        language: language.to_string(),
        ..base.clone()
    };

    match speaker.speak(text, &config) {
        Ok(()) => true,
        Err(SpeechError::NotSupported) => {
            tracing::error!(text, language, "speech synthesis not supported");
            notifier.notify("您的系统不支持语音播放功能");
            false
        }
        Err(err) => {
            tracing::error!(error = %err, text, language, "speech playback failed");
            notifier.notify(&err.to_string());
            false
        }
    }
}

// ============================================
// 命令行 TTS 实现
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Engine {
    Say,
    Espeak(&'static str),
}

/// 调用系统 TTS 命令朗读
#[derive(Debug)]
pub struct CommandSpeaker {
    engines: Vec<Engine>,
    current: Mutex<Option<Child>>,
}

impl CommandSpeaker {
    /// 按当前平台选择可用的命令
    pub fn detect() -> Self {
        let engines = if cfg!(target_os = "macos") {
            vec![Engine::Say]
        } else if cfg!(target_os = "linux") {
            vec![Engine::Espeak("espeak-ng"), Engine::Espeak("espeak")]
        } else {
            Vec::new()
        };

        Self {
            engines,
            current: Mutex::new(None),
        }
    }

    fn command(engine: Engine, text: &str, config: &SpeechConfig) -> Command {
        match engine {
            Engine::Say => {
                let mut cmd = Command::new("say");
                // say 默认约 175 词/分钟
                cmd.arg("-r").arg(words_per_minute(config.rate).to_string()).arg(text);
                cmd
            }
            Engine::Espeak(program) => {
                let mut cmd = Command::new(program);
                cmd.arg("-v")
                    .arg(espeak_voice(&config.language))
                    .arg("-s")
                    .arg(words_per_minute(config.rate).to_string())
                    .arg("-p")
                    .arg(((config.pitch.clamp(0.0, 2.0) * 50.0).round() as u32).min(99).to_string())
                    .arg("-a")
                    .arg(((config.volume.clamp(0.0, 1.0) * 100.0).round() as u32).to_string())
                    .arg(text);
                cmd
            }
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str, config: &SpeechConfig) -> Result<(), SpeechError> {
        self.stop()?;

        for engine in &self.engines {
            let spawned = Self::command(*engine, text, config)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();

            match spawned {
                Ok(child) => {
                    let mut current = self
                        .current
                        .lock()
                        .map_err(|e| SpeechError::SpeakFailed(e.to_string()))?;
                    *current = Some(child);
                    return Ok(());
                }
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => return Err(SpeechError::SpeakFailed(err.to_string())),
            }
        }

        Err(SpeechError::NotSupported)
    }

    fn stop(&self) -> Result<(), SpeechError> {
        let mut current = self
            .current
            .lock()
            .map_err(|e| SpeechError::SpeakFailed(e.to_string()))?;

        if let Some(mut child) = current.take() {
            // 已经播放完的进程 kill 会失败，忽略即可
            let _ = child.kill();
            let _ = child.wait();
        }
        Ok(())
    }
}

fn words_per_minute(rate: f32) -> u32 {
    (175.0 * rate.clamp(0.1, 10.0)).round() as u32
}

fn espeak_voice(language: &str) -> String {
    let lower = language.to_lowercase();
    if lower.starts_with("zh") {
        "cmn".to_string()
    } else {
        lower
    }
}
