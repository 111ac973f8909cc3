//! Append-only check journal
//!
//! The journal file is the sole durable store. Lines are only ever
//! appended, never rewritten or truncated, and the file grows unbounded
//! for the life of the deployment.

use crate::checker::{CheckResult, CheckStatus};
use crate::errors::Result;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one cycle's results, one line per URL, in a single write
    ///
    /// Every line shares the cycle's timestamp. An empty batch writes
    /// nothing.
    pub async fn append(&self, stamp: &str, results: &[CheckResult]) -> Result<Vec<String>> {
        let lines: Vec<String> = results
            .iter()
            .map(|result| format_line(stamp, result))
            .collect();
        self.append_lines(&lines).await?;
        Ok(lines)
    }

    /// Append the single synthetic entry for a cycle that failed outright
    pub async fn append_failure(&self, stamp: &str, detail: &str) -> Result<String> {
        let line = format!("[{}] ❌ {}", stamp, detail);
        self.append_lines(std::slice::from_ref(&line)).await?;
        Ok(line)
    }

    /// Last `n` non-empty lines, oldest first
    ///
    /// An absent journal is an empty journal, never an error; the status
    /// page renders either way.
    pub async fn tail(&self, n: usize) -> Vec<String> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Failed to read journal {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        let lines: Vec<&str> = raw.lines().filter(|line| !line.is_empty()).collect();
        let skip = lines.len().saturating_sub(n);
        lines[skip..].iter().map(|line| line.to_string()).collect()
    }

    async fn append_lines(&self, lines: &[String]) -> Result<()> {
        if lines.is_empty() {
            return Ok(());
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}\n", lines.join("\n")).as_bytes())
            .await?;
        file.flush().await?;
        Ok(())
    }
}

fn format_line(stamp: &str, result: &CheckResult) -> String {
    match &result.status {
        CheckStatus::Success => format!("[{}] ✅ {} → 200", stamp, result.url),
        CheckStatus::Failure(message) => {
            format!("[{}] ❌ {} → Error: {}", stamp, result.url, message)
        }
    }
}
