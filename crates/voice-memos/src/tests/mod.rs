mod config;

use std::{path::PathBuf, time::Duration};

use chrono::{DateTime, Utc};
use uuid::Uuid;
use voice_memos_core::{Memo, MemoId, MemoListState};

/// 2024-01-01T12:00:00Z
pub(crate) fn fixed_date() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + chrono::Duration::seconds(1_704_110_400)
}

pub(crate) fn memo_id(n: u128) -> MemoId {
    MemoId::new(Uuid::from_u128(n))
}

pub(crate) fn memo(n: u128, seconds: u64) -> Memo {
    Memo::new(
        memo_id(n),
        fixed_date(),
        Duration::from_secs(seconds),
        PathBuf::from(format!("/tmp/memos/{}.wav", n)),
    )
}

/// State listing memos 1..=count, memo 1 on top.
pub(crate) fn state_with_memos(count: u128) -> MemoListState {
    let mut state = MemoListState::default();
    for n in (1..=count).rev() {
        state.memos.insert_front(memo(n, 65));
    }
    state
}
