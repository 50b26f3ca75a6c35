//! 批量导入解析
//!
//! 支持两种格式：
//! - JSON 数组：`[{"english": "apple", "chinese": "苹果", "phonetic": "...", "partOfSpeech": "n."}]`
//! - 文本，每行一个单词，字段用 `|` 或制表符分隔：
//!   `english | chinese` 或 `english | phonetic | partOfSpeech | chinese`
//!
//! 文本中的空行和以 `#` 开头的行会被忽略。

use thiserror::Error;

use crate::models::NewWord;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("第 {line} 行格式错误: {content}")]
    InvalidLine { line: usize, content: String },

    #[error("JSON 格式错误: {0}")]
    Json(#[from] serde_json::Error),
}

/// 自动识别格式并解析
pub fn parse(input: &str) -> Result<Vec<NewWord>, ImportError> {
    if input.trim_start().starts_with('[') {
        parse_json(input)
    } else {
        parse_lines(input)
    }
}

pub fn parse_json(input: &str) -> Result<Vec<NewWord>, ImportError> {
    Ok(serde_json::from_str(input)?)
}

pub fn parse_lines(input: &str) -> Result<Vec<NewWord>, ImportError> {
    let mut words = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(['|', '\t']).map(str::trim).collect();
        let invalid = || ImportError::InvalidLine {
            line: index + 1,
            content: line.to_string(),
        };

        let word = match fields.as_slice() {
            [english, chinese] => NewWord::new(*english, *chinese),
            [english, phonetic, part_of_speech, chinese] => NewWord {
                english: english.to_string(),
                chinese: chinese.to_string(),
                phonetic: non_empty(phonetic),
                part_of_speech: non_empty(part_of_speech),
            },
            _ => return Err(invalid()),
        };

        if word.english.is_empty() || word.chinese.is_empty() {
            return Err(invalid());
        }
        words.push(word);
    }

    Ok(words)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
