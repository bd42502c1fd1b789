//! In-process stand-ins for the generation backend and the record store.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use uuid::Uuid;

use crate::interview::store::InterviewStore;
use crate::llm_client::{BackendError, TextGenerator};
use crate::models::interview::InterviewRecord;

/// Single-page PDF whose only text is "Rust and Tokio for 3 years".
pub const RESUME_PDF: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/resume.pdf"));

/// Replays a fixed list of backend outcomes, one per call.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, BackendError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicU32,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Result<String, BackendError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(BackendError::Status {
                    status: 500,
                    message: "script exhausted".to_string(),
                })
            })
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<InterviewRecord>>,
}

impl MemoryStore {
    pub fn records(&self) -> Vec<InterviewRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl InterviewStore for MemoryStore {
    async fn insert(&self, record: &InterviewRecord) -> Result<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<InterviewRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<InterviewRecord>> {
        let mut records: Vec<_> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == Some(user_id))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit.max(0) as usize);
        Ok(records)
    }
}

/// A store whose every operation fails.
pub struct FailingStore;

#[async_trait]
impl InterviewStore for FailingStore {
    async fn insert(&self, _record: &InterviewRecord) -> Result<()> {
        Err(anyhow!("connection refused"))
    }

    async fn get(&self, _id: Uuid) -> Result<Option<InterviewRecord>> {
        Err(anyhow!("connection refused"))
    }

    async fn list_for_user(&self, _user_id: Uuid, _limit: i64) -> Result<Vec<InterviewRecord>> {
        Err(anyhow!("connection refused"))
    }
}

/// Configuration with no external endpoints, for router tests.
pub fn test_config() -> crate::config::Config {
    crate::config::Config {
        database_url: "postgres://unused".to_string(),
        provider: crate::config::GenerationProvider::HuggingFace,
        generation_api_key: "hf_test".to_string(),
        generation_url: "http://127.0.0.1:9/unused".to_string(),
        base_delay: std::time::Duration::from_millis(2000),
        max_attempts: 5,
        blank_lines: crate::interview::questions::BlankLinePolicy::Drop,
        port: 0,
        rust_log: "info".to_string(),
    }
}
