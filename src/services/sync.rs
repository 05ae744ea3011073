// src/services/sync.rs
use std::path::PathBuf;
use std::process::ExitStatus;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git pull exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

/// Pulls remote changes into the local working tree.
#[async_trait]
pub trait Syncer: Send + Sync {
    async fn pull(&self) -> Result<(), SyncError>;
}

/// Runs `git pull <remote> <branch>` in a fixed directory.
#[derive(Debug, Clone)]
pub struct GitSyncer {
    repo_dir: PathBuf,
    remote: String,
    branch: String,
}

impl GitSyncer {
    pub fn new(
        repo_dir: impl Into<PathBuf>,
        remote: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            remote: remote.into(),
            branch: branch.into(),
        }
    }
}

#[async_trait]
impl Syncer for GitSyncer {
    async fn pull(&self) -> Result<(), SyncError> {
        debug!(
            dir = %self.repo_dir.display(),
            remote = %self.remote,
            branch = %self.branch,
            "Running git pull"
        );

        let output = Command::new("git")
            .arg("pull")
            .arg(&self.remote)
            .arg(&self.branch)
            .current_dir(&self.repo_dir)
            .output()
            .await?;

        if !output.status.success() {
            return Err(SyncError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!(
            stdout = %String::from_utf8_lossy(&output.stdout).trim(),
            "✅ Git pull finished"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_directory_fails_to_spawn() {
        let syncer = GitSyncer::new("/definitely/not/a/real/dir", "origin", "main");
        let err = syncer.pull().await.unwrap_err();
        assert!(matches!(err, SyncError::Spawn(_)));
    }

    #[tokio::test]
    async fn plain_directory_is_an_error() {
        // Not a repository: git exits non-zero, or is missing from PATH entirely.
        let dir = tempfile::tempdir().unwrap();
        let syncer = GitSyncer::new(dir.path(), "origin", "main");
        assert!(syncer.pull().await.is_err());
    }
}
