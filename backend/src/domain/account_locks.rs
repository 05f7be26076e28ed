//! Per-account mutual exclusion for balance mutation.
//!
//! A transfer reads two balances, checks them and writes both back. Both
//! accounts stay locked for that whole sequence so concurrent transfers
//! touching the same account cannot interleave and lose an update. Locks are
//! always taken in ascending account id order, so two transfers in opposite
//! directions cannot deadlock.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::models::AccountId;

#[derive(Clone, Default)]
pub struct AccountLocks {
    locks: Arc<DashMap<AccountId, Arc<Mutex<()>>>>,
}

/// Holds the locks of both accounts until dropped
pub struct PairGuard {
    _first: OwnedMutexGuard<()>,
    _second: Option<OwnedMutexGuard<()>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, account_id: AccountId) -> Arc<Mutex<()>> {
        self.locks.entry(account_id).or_default().value().clone()
    }

    /// Lock two accounts in ascending id order
    pub async fn acquire_pair(&self, a: AccountId, b: AccountId) -> PairGuard {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let first = self.lock_for(low).lock_owned().await;
        let second = if low == high {
            None
        } else {
            Some(self.lock_for(high).lock_owned().await)
        };

        PairGuard {
            _first: first,
            _second: second,
        }
    }

    /// Number of accounts that have ever been locked
    #[cfg(test)]
    pub(crate) fn tracked_accounts(&self) -> usize {
        self.locks.len()
    }
}
