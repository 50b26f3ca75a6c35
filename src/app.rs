//! 单词库 + 持久化后端
//!
//! 每次变更都先作用于内存中的单词库，再把完整快照写回后端。

use std::sync::Arc;

use crate::clock::{Clock, DayBoundary};
use crate::error::AppResult;
use crate::models::{NewWord, StudyRecord, Word, WordUpdate};
use crate::persistence::SnapshotBackend;
use crate::store::VocabularyStore;

pub struct VocabularyApp<B: SnapshotBackend> {
    store: VocabularyStore,
    backend: B,
}

impl<B: SnapshotBackend> VocabularyApp<B> {
    /// 从后端加载，没有已保存数据时从空库开始
    pub fn load(backend: B, clock: Arc<dyn Clock>, boundary: DayBoundary) -> AppResult<Self> {
        let store = match backend.load()? {
            Some(snapshot) => VocabularyStore::from_snapshot(snapshot, clock, boundary),
            None => {
                tracing::info!("no saved vocabulary, starting empty");
                VocabularyStore::with_clock(clock, boundary)
            }
        };

        Ok(Self { store, backend })
    }

    pub fn store(&self) -> &VocabularyStore {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn persist(&self) -> AppResult<()> {
        self.backend.save(&self.store.snapshot()).map_err(|err| {
            tracing::error!(error = %err, "failed to save vocabulary");
            err
        })
    }

    pub fn add_word(
        &mut self,
        english: &str,
        chinese: &str,
        phonetic: Option<&str>,
        part_of_speech: Option<&str>,
    ) -> AppResult<Word> {
        let word = self.store.add_word(english, chinese, phonetic, part_of_speech);
        self.persist()?;
        Ok(word)
    }

    pub fn batch_add_words(&mut self, list: &[NewWord]) -> AppResult<usize> {
        let inserted = self.store.batch_add_words(list);
        if inserted > 0 {
            self.persist()?;
        }
        Ok(inserted)
    }

    pub fn delete_word(&mut self, id: &str) -> AppResult<bool> {
        let found = self.store.delete_word(id);
        if found {
            self.persist()?;
        }
        Ok(found)
    }

    pub fn update_word(&mut self, id: &str, update: &WordUpdate) -> AppResult<bool> {
        let found = self.store.update_word(id, update);
        if found {
            self.persist()?;
        }
        Ok(found)
    }

    pub fn record_study(
        &mut self,
        word_id: &str,
        remembered: bool,
        duration: u32,
    ) -> AppResult<Option<StudyRecord>> {
        let record = self.store.record_study(word_id, remembered, duration);
        if record.is_some() {
            self.persist()?;
        }
        Ok(record)
    }
}
