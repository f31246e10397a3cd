//! Summary counts for the dashboard landing page.

use serde::Serialize;

use crate::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
  pub participant_count: usize,
  pub guardian_count:    usize,
  pub monthly_fee_count: usize,
  pub site_count:        usize,
}

impl Registry {
  /// Current collection sizes. Never fails.
  pub async fn stats(&self) -> Stats {
    let store = self.read().await;
    Stats {
      participant_count: store.participants.len(),
      guardian_count:    store.guardians.len(),
      monthly_fee_count: store.fees.len(),
      site_count:        store.sites.len(),
    }
  }
}
