//! Sites — the physical locations where the program runs.

use serde::{Deserialize, Serialize};

use crate::{Result, rules, store::Id};

/// Status given to a site when the caller does not supply one.
pub const DEFAULT_STATUS: &str = "Active";

/// A stored site. The id lives in the store, not in the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
  /// Unique, compared case-sensitively.
  pub name:         String,
  pub address:      String,
  pub phone:        Option<String>,
  pub max_capacity: Option<i64>,
  pub status:       String,
  #[serde(rename = "type")]
  pub kind:         Option<String>,
}

/// Caller payload for creating or replacing a site.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSite {
  pub name:         String,
  pub address:      String,
  pub phone:        Option<String>,
  pub max_capacity: Option<i64>,
  pub status:       Option<String>,
  #[serde(rename = "type")]
  pub kind:         Option<String>,
}

impl NewSite {
  /// Run the format checks and produce the record to store.
  pub fn parse(&self) -> Result<Site> {
    rules::text_length("name", &self.name, 100)?;
    rules::text_length("address", &self.address, 200)?;
    rules::optional_text_length("phone", self.phone.as_deref(), 20)?;
    if let Some(capacity) = self.max_capacity {
      rules::positive("max_capacity", capacity)?;
    }
    let status = self
      .status
      .clone()
      .unwrap_or_else(|| DEFAULT_STATUS.to_owned());
    rules::text_length("status", &status, 20)?;
    rules::optional_text_length("type", self.kind.as_deref(), 20)?;

    Ok(Site {
      name: self.name.clone(),
      address: self.address.clone(),
      phone: self.phone.clone(),
      max_capacity: self.max_capacity,
      status,
      kind: self.kind.clone(),
    })
  }
}

/// A site as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteView {
  pub id:   Id,
  #[serde(flatten)]
  pub site: Site,
}

/// The slice of a site embedded in monthly fee views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSummary {
  pub id:   Id,
  pub name: String,
}
