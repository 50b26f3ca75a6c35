//! 快照持久化
//!
//! 单词库在加载时整体反序列化，每次变更后整体序列化。
//! 文件后端先写同目录下的临时文件再原子替换，写入中断不会留下半个文件。

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use crate::error::{StoreError, StoreResult};
use crate::models::StoreSnapshot;

/// 快照存储后端
pub trait SnapshotBackend {
    /// 读取快照；从未保存过时返回 `None`
    fn load(&self) -> StoreResult<Option<StoreSnapshot>>;

    fn save(&self, snapshot: &StoreSnapshot) -> StoreResult<()>;
}

// ============================================================
// JsonFileBackend
// ============================================================

/// JSON 文件后端
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotBackend for JsonFileBackend {
    fn load(&self) -> StoreResult<Option<StoreSnapshot>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let snapshot: StoreSnapshot = serde_json::from_reader(BufReader::new(file))?;
        tracing::info!(
            path = %self.path.display(),
            words = snapshot.words.len(),
            records = snapshot.study_records.len(),
            "vocabulary loaded"
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &StoreSnapshot) -> StoreResult<()> {
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, snapshot)?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path)?;

        tracing::debug!(path = %self.path.display(), "vocabulary saved");
        Ok(())
    }
}

// ============================================================
// MemoryBackend
// ============================================================

/// 内存后端，保留最后一次保存的快照
#[derive(Debug, Default)]
pub struct MemoryBackend {
    snapshot: Mutex<Option<StoreSnapshot>>,
    saves: Mutex<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            saves: Mutex::new(0),
        }
    }

    /// 已保存的次数
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }
}

impl SnapshotBackend for MemoryBackend {
    fn load(&self) -> StoreResult<Option<StoreSnapshot>> {
        let guard = self
            .snapshot
            .lock()
            .map_err(|e| StoreError::Persist(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &StoreSnapshot) -> StoreResult<()> {
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|e| StoreError::Persist(e.to_string()))?;
        *guard = Some(snapshot.clone());

        let mut saves = self
            .saves
            .lock()
            .map_err(|e| StoreError::Persist(e.to_string()))?;
        *saves += 1;
        Ok(())
    }
}
