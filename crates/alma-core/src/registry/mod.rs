//! [`Registry`] — the entity services.
//!
//! A registry is a cheap, clonable handle around one [`EntityStore`]. Every
//! write holds the store's write lock across its whole validate-then-mutate
//! sequence, so two concurrent creates cannot both pass a uniqueness check
//! against the same snapshot. Reads share the read lock.
//!
//! Operations are split by entity:
//!
//! | Entity      | Module            |
//! |-------------|-------------------|
//! | Site        | [`sites`]         |
//! | Participant | [`participants`]  |
//! | Guardian    | [`guardians`]     |
//! | MonthlyFee  | [`fees`]          |

mod fees;
mod guardians;
mod participants;
mod sites;

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::store::EntityStore;

#[derive(Debug, Clone, Default)]
pub struct Registry {
  store: Arc<RwLock<EntityStore>>,
}

impl Registry {
  /// A registry over an empty store.
  pub fn new() -> Self { Self::default() }

  /// A registry over a pre-populated store (e.g. seed data).
  pub fn with_store(store: EntityStore) -> Self {
    Self {
      store: Arc::new(RwLock::new(store)),
    }
  }

  pub(crate) async fn read(&self) -> RwLockReadGuard<'_, EntityStore> {
    self.store.read().await
  }

  pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, EntityStore> {
    self.store.write().await
  }
}
