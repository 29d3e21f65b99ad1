mod collection;
#[allow(clippy::module_inception)]
mod memo;
mod reducer;

pub use {
    collection::MemoCollection,
    memo::{Memo, MemoId, PlaybackMode},
    reducer::{MemoAction, MemoDelegate, MemoEffect, MemoReducer},
};
