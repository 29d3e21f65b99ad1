mod audio;

use crate::{Clock, Environment, Memo, MemoId, TempDirectoryProvider, UniqueIdSource};

use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Clock frozen at a known instant.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Ids 1, 2, 3, ... as UUIDs.
#[derive(Default)]
pub(crate) struct SequentialIds(AtomicU64);

impl UniqueIdSource for SequentialIds {
    fn next(&self) -> Uuid {
        Uuid::from_u128(u128::from(self.0.fetch_add(1, Ordering::SeqCst) + 1))
    }
}

pub(crate) struct FixedTempDir(pub(crate) PathBuf);

impl TempDirectoryProvider for FixedTempDir {
    fn path(&self) -> PathBuf {
        self.0.clone()
    }
}

/// 2024-01-01T12:00:00Z
pub(crate) fn fixed_date() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + chrono::Duration::seconds(1_704_110_400)
}

pub(crate) fn environment() -> Environment {
    Environment {
        clock: Arc::new(FixedClock(fixed_date())),
        ids: Arc::new(SequentialIds::default()),
        temp_dir: Arc::new(FixedTempDir(PathBuf::from("/tmp/memos"))),
    }
}

pub(crate) fn memo_id(n: u128) -> MemoId {
    MemoId::new(Uuid::from_u128(1_000 + n))
}

pub(crate) fn memo(n: u128) -> Memo {
    Memo::new(
        memo_id(n),
        fixed_date(),
        Duration::from_secs(10),
        PathBuf::from(format!("/tmp/memos/{}.wav", n)),
    )
}
