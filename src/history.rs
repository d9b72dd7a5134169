use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::models::Record;

/// Persisted list of recent evaluations, newest first, capped at the
/// configured limit. Every mutation rewrites the whole file.
#[derive(Debug)]
pub struct History {
    path: PathBuf,
    limit: usize,
    records: Vec<Record>,
}

impl History {
    /// Open the history at its configured location, creating an empty one
    /// in memory when no file exists yet.
    pub fn open(config: &Config) -> Result<Self> {
        let path = match &config.history.path {
            Some(path) => path.clone(),
            None => default_path()?,
        };
        Self::load(path, config.history.limit)
    }

    pub fn load(path: PathBuf, limit: usize) -> Result<Self> {
        let records = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read history {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("History file {} is corrupt", path.display()))?
        } else {
            Vec::new()
        };

        Ok(History { path, limit, records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Prepend a record, drop anything past the limit, and persist.
    pub fn push(&mut self, record: Record) -> Result<()> {
        self.records.insert(0, record);
        self.records.truncate(self.limit);
        self.save()
    }

    /// Forget all records and remove the backing file.
    pub fn clear(&mut self) -> Result<()> {
        self.records.clear();
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove history {}", self.path.display()))?;
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write history {}", self.path.display()))
    }
}

fn default_path() -> Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(dirs::home_dir)
        .context("Could not determine a data directory for the history file")?;
    Ok(base.join("jobscan").join("history.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Classification, JobPosting, Prediction, RiskLevel};
    use crate::urlcheck;

    fn record(title: &str) -> Record {
        let posting = JobPosting {
            title: title.to_string(),
            company: "Acme".to_string(),
            description: "A perfectly ordinary job description over 25 chars.".to_string(),
            url: Some("https://acme.example/careers".to_string()),
        };
        let prediction = Prediction {
            model_version: "v1.0".to_string(),
            result: Classification::Real,
            model_result: Classification::Real,
            confidence: 64.2,
            red_flags: vec![],
            risk_level: RiskLevel::Low,
            warning: None,
        };
        Record::new(&posting, prediction, urlcheck::evaluate("https://acme.example/careers"))
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let history = History::load(dir.path().join("history.json"), 5).unwrap();
        assert!(history.records().is_empty());
    }

    #[test]
    fn test_push_prepends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut history = History::load(path.clone(), 5).unwrap();
        history.push(record("First")).unwrap();
        history.push(record("Second")).unwrap();
        assert_eq!(history.records()[0].title, "Second");
        assert_eq!(history.records()[1].title, "First");

        let reloaded = History::load(path, 5).unwrap();
        assert_eq!(reloaded.records().len(), 2);
        assert_eq!(reloaded.records()[0].title, "Second");
    }

    #[test]
    fn test_push_caps_at_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = History::load(dir.path().join("history.json"), 5).unwrap();
        for i in 0..7 {
            history.push(record(&format!("Job {}", i))).unwrap();
        }
        assert_eq!(history.records().len(), 5);
        assert_eq!(history.records()[0].title, "Job 6");
        assert_eq!(history.records()[4].title, "Job 2");
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut history = History::load(path.clone(), 5).unwrap();
        history.push(record("Only")).unwrap();
        assert!(path.exists());

        history.clear().unwrap();
        assert!(history.records().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "not json").unwrap();
        let err = History::load(path, 5).unwrap_err();
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("history.json");
        let mut history = History::load(path.clone(), 5).unwrap();
        history.push(record("Nested")).unwrap();
        assert!(path.exists());
    }
}
