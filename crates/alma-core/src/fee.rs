//! Monthly fees — one billing record per participant per (month, year).
//!
//! The only explicit state machine in the system lives here: a fee moves
//! between [`FeeStatus::Pending`] and [`FeeStatus::Paid`]. Becoming `Paid`
//! requires a payment date in the same request; going back to `Pending` keeps
//! whatever payment date was already recorded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::{
  Result,
  guardian::GuardianSummary,
  participant::ParticipantSummary,
  rules,
  site::SiteSummary,
  store::Id,
};

pub const MIN_YEAR: i64 = 2020;
pub const MAX_YEAR: i64 = 2030;

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
pub enum FeeStatus {
  Paid,
  #[default]
  Pending,
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
pub enum PaymentMethod {
  #[default]
  Transfer,
  Cash,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFee {
  pub participant_id: Id,
  /// When set, the guardian must belong to `participant_id`.
  pub guardian_id:    Option<Id>,
  pub month:          u32,
  pub year:           i32,
  pub amount:         f64,
  pub status:         FeeStatus,
  pub payment_method: PaymentMethod,
  pub payment_date:   Option<NaiveDate>,
  pub notes:          Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMonthlyFee {
  pub participant_id: Id,
  pub guardian_id:    Option<Id>,
  pub month:          i64,
  pub year:           i64,
  pub amount:         f64,
  pub status:         Option<String>,
  pub payment_method: Option<String>,
  pub payment_date:   Option<String>,
  pub notes:          Option<String>,
}

impl NewMonthlyFee {
  pub fn parse(&self) -> Result<MonthlyFee> {
    rules::positive("participant_id", self.participant_id)?;
    if let Some(guardian_id) = self.guardian_id {
      rules::positive("guardian_id", guardian_id)?;
    }
    let month = rules::month_in_range(self.month)?;
    let year = rules::year_in_range(self.year)?;
    rules::positive_amount(self.amount)?;
    let status = match &self.status {
      Some(raw) => rules::parse_enum("status", raw)?,
      None => FeeStatus::default(),
    };
    let payment_method = match &self.payment_method {
      Some(raw) => rules::parse_enum("payment_method", raw)?,
      None => PaymentMethod::default(),
    };
    let payment_date = self
      .payment_date
      .as_deref()
      .map(|raw| rules::parse_date("payment_date", raw))
      .transpose()?;
    rules::optional_text_length("notes", self.notes.as_deref(), 500)?;

    Ok(MonthlyFee {
      participant_id: self.participant_id,
      guardian_id: self.guardian_id,
      month,
      year,
      amount: self.amount,
      status,
      payment_method,
      payment_date,
      notes: self.notes.clone(),
    })
  }
}

/// A fee with its participant, the participant's site and the paying
/// guardian (if any) embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyFeeView {
  pub id:          Id,
  #[serde(flatten)]
  pub fee:         MonthlyFee,
  pub participant: Option<ParticipantSummary>,
  pub site:        Option<SiteSummary>,
  pub guardian:    Option<GuardianSummary>,
}
