//! Guardians — adults responsible for a participant.

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  participant::{DocumentType, ParticipantSummary},
  rules,
  store::Id,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guardian {
  pub first_names:     String,
  pub last_names:      String,
  pub document_type:   DocumentType,
  /// Unique across guardians; participants keep their own namespace.
  pub document_number: String,
  /// Free text, e.g. "Father".
  pub relationship:    String,
  pub phone:           String,
  /// Stored lower-cased.
  pub email:           String,
  pub address:         String,
  pub participant_id:  Id,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewGuardian {
  pub first_names:     String,
  pub last_names:      String,
  pub document_type:   String,
  pub document_number: String,
  pub relationship:    String,
  pub phone:           String,
  pub email:           String,
  pub address:         String,
  pub participant_id:  Id,
}

impl NewGuardian {
  pub fn parse(&self) -> Result<Guardian> {
    rules::text_length("first_names", &self.first_names, 100)?;
    rules::text_length("last_names", &self.last_names, 100)?;
    let document_type = rules::parse_enum("document_type", &self.document_type)?;
    rules::text_length("document_number", &self.document_number, 50)?;
    rules::text_length("relationship", &self.relationship, 50)?;
    rules::text_length("phone", &self.phone, 20)?;
    rules::text_length("email", &self.email, 100)?;
    rules::email_shape(&self.email)?;
    rules::text_length("address", &self.address, 200)?;
    rules::positive("participant_id", self.participant_id)?;

    Ok(Guardian {
      first_names: self.first_names.clone(),
      last_names: self.last_names.clone(),
      document_type,
      document_number: self.document_number.clone(),
      relationship: self.relationship.clone(),
      phone: self.phone.clone(),
      email: self.email.to_lowercase(),
      address: self.address.clone(),
      participant_id: self.participant_id,
    })
  }
}

/// A guardian with a summary of its participant embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuardianView {
  pub id:          Id,
  #[serde(flatten)]
  pub guardian:    Guardian,
  pub participant: Option<ParticipantSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuardianSummary {
  pub id:              Id,
  pub first_names:     String,
  pub last_names:      String,
  pub document_number: String,
}

impl GuardianSummary {
  pub fn new(id: Id, g: &Guardian) -> Self {
    Self {
      id,
      first_names: g.first_names.clone(),
      last_names: g.last_names.clone(),
      document_number: g.document_number.clone(),
    }
  }
}
