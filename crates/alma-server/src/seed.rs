//! The fixed data a fresh process starts with.

use alma_core::{EntityStore, site::Site};

/// A store holding the program's three sites (ids 1–3).
pub fn seeded_store() -> EntityStore {
  let mut store = EntityStore::new();
  let sites = [
    (
      1,
      "Bello Principal",
      "Calle 50 #45-30, Bello, Antioquia",
      "6044567890",
      50,
      "Principal",
    ),
    (
      2,
      "Bello Campestre",
      "Carrera 60 #30-15, Bello, Antioquia",
      "6044567891",
      30,
      "Secundaria",
    ),
    (
      3,
      "Apartadó",
      "Avenida Principal #20-10, Apartadó, Antioquia",
      "6048281234",
      40,
      "Principal",
    ),
  ];
  for (id, name, address, phone, capacity, kind) in sites {
    store.sites.insert_with_id(id, Site {
      name:         name.to_owned(),
      address:      address.to_owned(),
      phone:        Some(phone.to_owned()),
      max_capacity: Some(capacity),
      status:       alma_core::site::DEFAULT_STATUS.to_owned(),
      kind:         Some(kind.to_owned()),
    });
  }
  store
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn seeded_sites_leave_room_for_new_ids() {
    let store = seeded_store();
    assert_eq!(store.sites.len(), 3);
    assert_eq!(store.sites.next_id(), 4);
    assert!(store.participants.is_empty());
  }
}
