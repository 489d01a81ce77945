use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use crate::domain::{FavoritePair, UserId};

/// In-memory favorite-pair store: at most one pair per user, unconditional
/// overwrite, process lifetime only.
///
/// `set`/`get` are single-key operations that never await, so a plain mutex
/// suffices.
#[derive(Debug, Default)]
pub struct FavoritesStore {
    inner: Mutex<HashMap<UserId, FavoritePair>>,
}

impl FavoritesStore {
    pub fn set(&self, user: UserId, pair: FavoritePair) {
        self.lock().insert(user, pair);
    }

    pub fn get(&self, user: UserId) -> Option<FavoritePair> {
        self.lock().get(&user).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<UserId, FavoritePair>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CurrencyCode;

    fn pair(from: &str, to: &str) -> FavoritePair {
        FavoritePair {
            from: CurrencyCode::parse(from).unwrap(),
            to: CurrencyCode::parse(to).unwrap(),
        }
    }

    #[test]
    fn unset_user_has_no_pair() {
        let store = FavoritesStore::default();
        assert_eq!(store.get(UserId(1)), None);
    }

    #[test]
    fn later_saves_overwrite() {
        let store = FavoritesStore::default();
        store.set(UserId(1), pair("USD", "EUR"));
        store.set(UserId(1), pair("GBP", "JPY"));
        assert_eq!(store.get(UserId(1)), Some(pair("GBP", "JPY")));
    }

    #[test]
    fn users_do_not_share_pairs() {
        let store = FavoritesStore::default();
        store.set(UserId(1), pair("USD", "EUR"));
        assert_eq!(store.get(UserId(2)), None);
    }
}
