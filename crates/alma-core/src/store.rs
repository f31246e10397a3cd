//! The in-memory [`EntityStore`] and its per-collection [`Table`].
//!
//! Lookups by id go through a `BTreeMap`, so iteration yields records in id
//! order. Lookups by any other attribute are linear scans; the population is
//! a few hundred records at most.

use std::collections::BTreeMap;

use crate::{
  fee::MonthlyFee, guardian::Guardian, participant::Participant, site::Site,
};

/// Record identifier. Always positive once assigned by a [`Table`].
pub type Id = i64;

// ─── Table ───────────────────────────────────────────────────────────────────

/// One record collection plus its id counter.
///
/// The counter only moves forward: removing the highest id does not make it
/// available again.
#[derive(Debug, Clone)]
pub struct Table<T> {
  rows:    BTreeMap<Id, T>,
  next_id: Id,
}

impl<T> Default for Table<T> {
  fn default() -> Self {
    Self {
      rows:    BTreeMap::new(),
      next_id: 1,
    }
  }
}

impl<T> Table<T> {
  pub fn get(&self, id: Id) -> Option<&T> { self.rows.get(&id) }

  pub fn contains(&self, id: Id) -> bool { self.rows.contains_key(&id) }

  /// Insert `row` under the next free id and return that id.
  pub fn insert(&mut self, row: T) -> Id {
    let id = self.next_id;
    self.next_id += 1;
    self.rows.insert(id, row);
    id
  }

  /// Insert `row` under a caller-chosen id, as done when seeding. The
  /// counter is advanced past `id` so later inserts never collide.
  pub fn insert_with_id(&mut self, id: Id, row: T) -> Option<T> {
    self.next_id = self.next_id.max(id + 1);
    self.rows.insert(id, row)
  }

  /// Overwrite an existing row. Returns the previous value, or `None` (and
  /// stores nothing) when `id` is unknown.
  pub fn replace(&mut self, id: Id, row: T) -> Option<T> {
    let slot = self.rows.get_mut(&id)?;
    Some(std::mem::replace(slot, row))
  }

  pub fn remove(&mut self, id: Id) -> Option<T> { self.rows.remove(&id) }

  pub fn iter(&self) -> impl Iterator<Item = (Id, &T)> {
    self.rows.iter().map(|(id, row)| (*id, row))
  }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// The id the next [`insert`](Self::insert) will assign.
  pub fn next_id(&self) -> Id { self.next_id }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// All four collections. Constructed explicitly and handed to a
/// [`Registry`](crate::Registry); there is no process-wide instance.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
  pub sites:        Table<Site>,
  pub participants: Table<Participant>,
  pub guardians:    Table<Guardian>,
  pub fees:         Table<MonthlyFee>,
}

impl EntityStore {
  pub fn new() -> Self { Self::default() }
}
