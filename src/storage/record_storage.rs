use std::{
    collections::HashMap,
    future::Future,
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncWriteExt},
    sync::Mutex,
};
use tracing::{debug, info};

use crate::error::CheckinError;

use super::{
    block::{parse_blocks, Block},
    entities::{LogKind, StreakRecord, UserName},
};

/// Interface for abstracting storage of per-user check-in data. Everything is keyed by the user
/// name; logs are append-only.
pub trait CheckinStorage {
    /// Returns `None` when the user has never checked in.
    fn read_streak(&self, user: &UserName) -> impl Future<Output = Result<Option<StreakRecord>>>;

    /// Replaces the user's streak record.
    fn write_streak(
        &self,
        user: &UserName,
        record: StreakRecord,
    ) -> impl Future<Output = Result<()>>;

    fn append_block(
        &self,
        user: &UserName,
        kind: LogKind,
        block: &Block,
    ) -> impl Future<Output = Result<()>>;

    /// All blocks of a log in the order they were appended. A missing log is empty.
    fn read_blocks(
        &self,
        user: &UserName,
        kind: LogKind,
    ) -> impl Future<Output = Result<Vec<Block>>>;
}

impl<T: Deref> CheckinStorage for T
where
    T::Target: CheckinStorage,
{
    fn read_streak(&self, user: &UserName) -> impl Future<Output = Result<Option<StreakRecord>>> {
        self.deref().read_streak(user)
    }

    fn write_streak(
        &self,
        user: &UserName,
        record: StreakRecord,
    ) -> impl Future<Output = Result<()>> {
        self.deref().write_streak(user, record)
    }

    fn append_block(
        &self,
        user: &UserName,
        kind: LogKind,
        block: &Block,
    ) -> impl Future<Output = Result<()>> {
        self.deref().append_block(user, kind, block)
    }

    fn read_blocks(
        &self,
        user: &UserName,
        kind: LogKind,
    ) -> impl Future<Output = Result<Vec<Block>>> {
        self.deref().read_blocks(user, kind)
    }
}

const STREAK_SUFFIX: &str = "streak";

/// Stores every record as a text file `<name>_<kind>.txt` inside one directory.
pub struct FileCheckinStorage {
    record_dir: PathBuf,
}

impl FileCheckinStorage {
    pub fn new(record_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&record_dir)?;

        Ok(Self { record_dir })
    }

    fn path_for(&self, user: &UserName, suffix: &str) -> Result<PathBuf> {
        let name = user.as_str();
        let reason = if name.trim().is_empty() {
            Some("name is empty")
        } else if name.contains(['/', '\\', '\0']) {
            Some("name contains a path separator")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(CheckinError::InvalidUser {
                name: name.to_owned(),
                reason,
            }
            .into());
        }
        Ok(self.record_dir.join(format!("{name}_{suffix}.txt")))
    }

    /// Reads the whole file under a shared lock. `None` means the file doesn't exist yet.
    async fn read_text(path: &Path) -> Result<Option<String>> {
        async fn extract(path: &Path) -> std::result::Result<String, std::io::Error> {
            debug!("Reading {path:?}");
            let mut file = File::open(path).await?;
            file.lock_shared()?;
            let mut content = String::new();
            let result = file.read_to_string(&mut content).await;
            file.unlock_async().await?;
            result.map(|_| content)
        }

        match extract(path).await {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {path:?}")),
        }
    }

    /// Runs `write` while holding an exclusive lock on `file`.
    async fn write_locked(file: &mut File, bytes: &[u8], truncate: bool) -> Result<()> {
        file.lock_exclusive()?;
        let result = async {
            if truncate {
                file.set_len(0).await?;
            }
            file.write_all(bytes).await?;
            file.flush().await?;
            Ok::<_, std::io::Error>(())
        }
        .await;
        file.unlock_async().await?;
        Ok(result?)
    }
}

impl CheckinStorage for FileCheckinStorage {
    async fn read_streak(&self, user: &UserName) -> Result<Option<StreakRecord>> {
        let path = self.path_for(user, STREAK_SUFFIX)?;
        let Some(text) = Self::read_text(&path).await? else {
            return Ok(None);
        };
        StreakRecord::from_text(&text)
            .map(Some)
            .map_err(|reason| {
                CheckinError::MalformedStreak {
                    user: user.to_string(),
                    reason,
                }
                .into()
            })
    }

    async fn write_streak(&self, user: &UserName, record: StreakRecord) -> Result<()> {
        let path = self.path_for(user, STREAK_SUFFIX)?;
        let mut file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .await
            .with_context(|| format!("Failed to open {path:?}"))?;

        Self::write_locked(&mut file, record.to_text().as_bytes(), true).await?;
        info!("Wrote streak {} for {user} into {path:?}", record.count);
        Ok(())
    }

    async fn append_block(&self, user: &UserName, kind: LogKind, block: &Block) -> Result<()> {
        let path = self.path_for(user, kind.file_suffix())?;
        let mut file = File::options()
            .append(true)
            .create(true)
            .open(&path)
            .await
            .with_context(|| format!("Failed to open {path:?}"))?;

        Self::write_locked(&mut file, block.render().as_bytes(), false).await?;
        info!(
            "Appended {} line(s) dated {} to {path:?}",
            block.lines.len(),
            block.label
        );
        Ok(())
    }

    async fn read_blocks(&self, user: &UserName, kind: LogKind) -> Result<Vec<Block>> {
        let path = self.path_for(user, kind.file_suffix())?;
        Ok(Self::read_text(&path)
            .await?
            .map(|text| parse_blocks(&text))
            .unwrap_or_default())
    }
}

#[derive(Default)]
struct MemoryState {
    streaks: HashMap<UserName, StreakRecord>,
    logs: HashMap<(UserName, LogKind), Vec<Block>>,
}

/// Keeps everything in process memory. Useful when nothing should touch the disk.
#[derive(Default)]
pub struct MemoryCheckinStorage {
    state: Mutex<MemoryState>,
}

impl MemoryCheckinStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CheckinStorage for MemoryCheckinStorage {
    async fn read_streak(&self, user: &UserName) -> Result<Option<StreakRecord>> {
        Ok(self.state.lock().await.streaks.get(user).copied())
    }

    async fn write_streak(&self, user: &UserName, record: StreakRecord) -> Result<()> {
        self.state
            .lock()
            .await
            .streaks
            .insert(user.clone(), record);
        Ok(())
    }

    async fn append_block(&self, user: &UserName, kind: LogKind, block: &Block) -> Result<()> {
        self.state
            .lock()
            .await
            .logs
            .entry((user.clone(), kind))
            .or_default()
            .push(block.clone());
        Ok(())
    }

    async fn read_blocks(&self, user: &UserName, kind: LogKind) -> Result<Vec<Block>> {
        Ok(self
            .state
            .lock()
            .await
            .logs
            .get(&(user.clone(), kind))
            .cloned()
            .unwrap_or_default())
    }
}
