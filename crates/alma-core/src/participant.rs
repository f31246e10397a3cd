//! Participants — enrolled beneficiaries, each tied to one site.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::{Result, rules, site::SiteView, store::Id};

// ─── Closed vocabularies ─────────────────────────────────────────────────────

/// Identity document kinds accepted for participants and guardians.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  VariantNames,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
  Cc,
  Ti,
  Ce,
  Passport,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  VariantNames,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
  Male,
  Female,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  VariantNames,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
  #[default]
  Active,
  Inactive,
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
  pub first_names:     String,
  pub last_names:      String,
  pub document_type:   DocumentType,
  /// Unique across participants.
  pub document_number: String,
  pub birth_date:      NaiveDate,
  pub gender:          Gender,
  pub enrollment_date: NaiveDate,
  pub status:          ParticipantStatus,
  pub site_id:         Id,
  pub phone:           Option<String>,
}

/// Caller payload for creating or replacing a participant. Constrained
/// fields arrive as text and are parsed by [`NewParticipant::parse`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewParticipant {
  pub first_names:     String,
  pub last_names:      String,
  pub document_type:   String,
  pub document_number: String,
  pub birth_date:      String,
  pub gender:          String,
  pub enrollment_date: String,
  pub status:          Option<String>,
  pub site_id:         Id,
  pub phone:           Option<String>,
}

impl NewParticipant {
  pub fn parse(&self) -> Result<Participant> {
    rules::text_length("first_names", &self.first_names, 100)?;
    rules::text_length("last_names", &self.last_names, 100)?;
    let document_type = rules::parse_enum("document_type", &self.document_type)?;
    rules::text_length("document_number", &self.document_number, 50)?;
    let birth_date = rules::parse_date("birth_date", &self.birth_date)?;
    let gender = rules::parse_enum("gender", &self.gender)?;
    let enrollment_date =
      rules::parse_date("enrollment_date", &self.enrollment_date)?;
    let status = match &self.status {
      Some(raw) => rules::parse_enum("status", raw)?,
      None => ParticipantStatus::default(),
    };
    rules::positive("site_id", self.site_id)?;
    rules::optional_text_length("phone", self.phone.as_deref(), 20)?;

    Ok(Participant {
      first_names: self.first_names.clone(),
      last_names: self.last_names.clone(),
      document_type,
      document_number: self.document_number.clone(),
      birth_date,
      gender,
      enrollment_date,
      status,
      site_id: self.site_id,
      phone: self.phone.clone(),
    })
  }
}

// ─── Views ───────────────────────────────────────────────────────────────────

/// A participant with its site embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantView {
  pub id:          Id,
  #[serde(flatten)]
  pub participant: Participant,
  pub site:        Option<SiteView>,
}

/// The slice of a participant embedded in guardian and fee views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantSummary {
  pub id:              Id,
  pub first_names:     String,
  pub last_names:      String,
  pub document_number: String,
  pub site_id:         Id,
}

impl ParticipantSummary {
  pub fn new(id: Id, p: &Participant) -> Self {
    Self {
      id,
      first_names: p.first_names.clone(),
      last_names: p.last_names.clone(),
      document_number: p.document_number.clone(),
      site_id: p.site_id,
    }
  }
}
