//! Validation rules guarding every mutation.
//!
//! Each rule is an independent function returning `Result<()>` (or the parsed
//! value, for format rules that also convert). Rules never mutate the store.
//!
//! Services assemble the rules applicable to an entity into a fixed, ordered
//! list of [`Check`]s and hand it to [`run_checks`], which stops at the first
//! failure. The order is always format, then parent existence, then
//! cross-reference, then uniqueness, then conditional requirements.

use std::str::FromStr;

use chrono::NaiveDate;
use strum::VariantNames;

use crate::{
  Dependents, Entity, Error, Result,
  fee::{FeeStatus, MAX_YEAR, MIN_YEAR},
  store::{EntityStore, Id},
};

// ─── Check list ──────────────────────────────────────────────────────────────

type Predicate<'a> = Box<dyn FnOnce() -> Result<()> + 'a>;

/// A single deferred rule, tagged with the stage it belongs to.
pub enum Check<'a> {
  Format(Predicate<'a>),
  Reference(Predicate<'a>),
  CrossRef(Predicate<'a>),
  Uniqueness(Predicate<'a>),
  Conditional(Predicate<'a>),
}

/// Evaluation stage of a [`Check`]; lists must be ordered by stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
  Format,
  Reference,
  CrossRef,
  Uniqueness,
  Conditional,
}

impl<'a> Check<'a> {
  pub fn format(f: impl FnOnce() -> Result<()> + 'a) -> Self {
    Self::Format(Box::new(f))
  }

  pub fn reference(f: impl FnOnce() -> Result<()> + 'a) -> Self {
    Self::Reference(Box::new(f))
  }

  pub fn cross_ref(f: impl FnOnce() -> Result<()> + 'a) -> Self {
    Self::CrossRef(Box::new(f))
  }

  pub fn uniqueness(f: impl FnOnce() -> Result<()> + 'a) -> Self {
    Self::Uniqueness(Box::new(f))
  }

  pub fn conditional(f: impl FnOnce() -> Result<()> + 'a) -> Self {
    Self::Conditional(Box::new(f))
  }

  pub fn stage(&self) -> Stage {
    match self {
      Self::Format(_) => Stage::Format,
      Self::Reference(_) => Stage::Reference,
      Self::CrossRef(_) => Stage::CrossRef,
      Self::Uniqueness(_) => Stage::Uniqueness,
      Self::Conditional(_) => Stage::Conditional,
    }
  }

  fn run(self) -> Result<()> {
    match self {
      Self::Format(f)
      | Self::Reference(f)
      | Self::CrossRef(f)
      | Self::Uniqueness(f)
      | Self::Conditional(f) => f(),
    }
  }
}

/// Run `checks` in order, surfacing the first failure.
pub fn run_checks(checks: Vec<Check<'_>>) -> Result<()> {
  debug_assert!(
    checks.windows(2).all(|w| w[0].stage() <= w[1].stage()),
    "checks must be ordered by stage"
  );
  for check in checks {
    let stage = check.stage();
    check.run().inspect_err(|e| {
      tracing::debug!(?stage, error = %e, "validation rejected request");
    })?;
  }
  Ok(())
}

// ─── Format ──────────────────────────────────────────────────────────────────

/// Parse a calendar-valid `YYYY-MM-DD` date.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
  let bytes = raw.as_bytes();
  let shaped = bytes.len() == 10
    && bytes[4] == b'-'
    && bytes[7] == b'-'
    && bytes
      .iter()
      .enumerate()
      .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
  shaped
    .then(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
    .flatten()
    .ok_or_else(|| {
      Error::Format(format!(
        "{field} must be a valid date in YYYY-MM-DD format, got {raw:?}"
      ))
    })
}

/// Parse a member of a closed vocabulary, e.g. a document type.
pub fn parse_enum<E>(field: &str, raw: &str) -> Result<E>
where
  E: FromStr + VariantNames,
{
  raw.parse().map_err(|_| {
    Error::Format(format!(
      "{field} must be one of {}, got {raw:?}",
      E::VARIANTS.join(", ")
    ))
  })
}

/// Required text: non-blank and at most `max` characters.
pub fn text_length(field: &str, value: &str, max: usize) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::Format(format!("{field} must not be empty")));
  }
  optional_text_length(field, Some(value), max)
}

pub fn optional_text_length(
  field: &str,
  value: Option<&str>,
  max: usize,
) -> Result<()> {
  match value {
    Some(v) if v.chars().count() > max => Err(Error::Format(format!(
      "{field} must be at most {max} characters"
    ))),
    _ => Ok(()),
  }
}

/// Ids and capacities must be strictly positive.
pub fn positive(field: &str, value: i64) -> Result<()> {
  if value > 0 {
    Ok(())
  } else {
    Err(Error::Format(format!(
      "{field} must be greater than 0, got {value}"
    )))
  }
}

pub fn month_in_range(month: i64) -> Result<u32> {
  match u32::try_from(month) {
    Ok(m @ 1..=12) => Ok(m),
    _ => Err(Error::Format(format!(
      "month must be between 1 and 12, got {month}"
    ))),
  }
}

pub fn year_in_range(year: i64) -> Result<i32> {
  match i32::try_from(year) {
    Ok(y) if (MIN_YEAR..=MAX_YEAR).contains(&i64::from(y)) => Ok(y),
    _ => Err(Error::Format(format!(
      "year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
    ))),
  }
}

pub fn positive_amount(amount: f64) -> Result<()> {
  if amount.is_finite() && amount > 0.0 {
    Ok(())
  } else {
    Err(Error::Format(format!(
      "amount must be greater than 0, got {amount}"
    )))
  }
}

/// Basic `local@domain.tld` shape; no attempt at RFC 5322.
pub fn email_shape(email: &str) -> Result<()> {
  let valid = email.split_once('@').is_some_and(|(local, domain)| {
    !local.is_empty()
      && !email.chars().any(char::is_whitespace)
      && !domain.contains('@')
      && domain.contains('.')
      && domain.split('.').all(|label| !label.is_empty())
  });
  if valid {
    Ok(())
  } else {
    Err(Error::Format(format!("email {email:?} is not a valid address")))
  }
}

// ─── Existence ───────────────────────────────────────────────────────────────

pub fn site_exists(store: &EntityStore, id: Id) -> Result<()> {
  exists(store.sites.contains(id), Entity::Site, id)
}

pub fn participant_exists(store: &EntityStore, id: Id) -> Result<()> {
  exists(store.participants.contains(id), Entity::Participant, id)
}

pub fn guardian_exists(store: &EntityStore, id: Id) -> Result<()> {
  exists(store.guardians.contains(id), Entity::Guardian, id)
}

fn exists(found: bool, entity: Entity, id: Id) -> Result<()> {
  if found {
    Ok(())
  } else {
    Err(Error::Reference { entity, id })
  }
}

// ─── Cross-reference ─────────────────────────────────────────────────────────

/// The guardian on a fee must be one of the fee's participant's guardians.
pub fn guardian_belongs_to(
  store: &EntityStore,
  guardian_id: Id,
  participant_id: Id,
) -> Result<()> {
  match store.guardians.get(guardian_id) {
    Some(g) if g.participant_id == participant_id => Ok(()),
    Some(_) => Err(Error::CrossReference {
      guardian_id,
      participant_id,
    }),
    None => Err(Error::Reference {
      entity: Entity::Guardian,
      id:     guardian_id,
    }),
  }
}

/// A guardian already named on fees stays with the participant those fees
/// belong to.
pub fn fees_stay_with_guardian(
  store: &EntityStore,
  guardian_id: Id,
  participant_id: Id,
) -> Result<()> {
  match store.fees.iter().find(|(_, f)| {
    f.guardian_id == Some(guardian_id) && f.participant_id != participant_id
  }) {
    Some((_, f)) => Err(Error::CrossReference {
      guardian_id,
      participant_id: f.participant_id,
    }),
    None => Ok(()),
  }
}

// ─── Uniqueness ──────────────────────────────────────────────────────────────
//
// `exclude` is the id of the record being updated, which may keep its own
// value.

pub fn unique_site_name(
  store: &EntityStore,
  name: &str,
  exclude: Option<Id>,
) -> Result<()> {
  let taken = store
    .sites
    .iter()
    .any(|(id, s)| Some(id) != exclude && s.name == name);
  if taken {
    Err(Error::Uniqueness(format!(
      "a site named {name:?} already exists"
    )))
  } else {
    Ok(())
  }
}

pub fn unique_participant_document(
  store: &EntityStore,
  document_number: &str,
  exclude: Option<Id>,
) -> Result<()> {
  let taken = store
    .participants
    .iter()
    .any(|(id, p)| Some(id) != exclude && p.document_number == document_number);
  if taken {
    Err(Error::Uniqueness(format!(
      "a participant with document {document_number} already exists"
    )))
  } else {
    Ok(())
  }
}

pub fn unique_guardian_document(
  store: &EntityStore,
  document_number: &str,
  exclude: Option<Id>,
) -> Result<()> {
  let taken = store
    .guardians
    .iter()
    .any(|(id, g)| Some(id) != exclude && g.document_number == document_number);
  if taken {
    Err(Error::Uniqueness(format!(
      "a guardian with document {document_number} already exists"
    )))
  } else {
    Ok(())
  }
}

pub fn unique_fee_period(
  store: &EntityStore,
  participant_id: Id,
  month: u32,
  year: i32,
  exclude: Option<Id>,
) -> Result<()> {
  let taken = store.fees.iter().any(|(id, f)| {
    Some(id) != exclude
      && f.participant_id == participant_id
      && f.month == month
      && f.year == year
  });
  if taken {
    Err(Error::Uniqueness(format!(
      "participant {participant_id} already has a monthly fee for \
       {month}/{year}"
    )))
  } else {
    Ok(())
  }
}

// ─── Conditional ─────────────────────────────────────────────────────────────

pub fn paid_requires_date(
  status: FeeStatus,
  payment_date: Option<NaiveDate>,
) -> Result<()> {
  if status == FeeStatus::Paid && payment_date.is_none() {
    Err(Error::ConditionalRule(
      "payment_date is required when status is PAID".to_owned(),
    ))
  } else {
    Ok(())
  }
}

// ─── Dependents ──────────────────────────────────────────────────────────────

pub fn site_dependents(store: &EntityStore, site_id: Id) -> Dependents {
  Dependents::Site {
    participants: store
      .participants
      .iter()
      .filter(|(_, p)| p.site_id == site_id)
      .count(),
  }
}

pub fn participant_dependents(
  store: &EntityStore,
  participant_id: Id,
) -> Dependents {
  Dependents::Participant {
    guardians:    store
      .guardians
      .iter()
      .filter(|(_, g)| g.participant_id == participant_id)
      .count(),
    monthly_fees: store
      .fees
      .iter()
      .filter(|(_, f)| f.participant_id == participant_id)
      .count(),
  }
}

pub fn guardian_dependents(store: &EntityStore, guardian_id: Id) -> Dependents {
  Dependents::Guardian {
    monthly_fees: store
      .fees
      .iter()
      .filter(|(_, f)| f.guardian_id == Some(guardian_id))
      .count(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    ErrorKind,
    participant::{DocumentType, Gender},
  };

  #[test]
  fn dates_must_exist_on_the_calendar() {
    assert!(parse_date("d", "2024-02-29").is_ok());
    assert!(parse_date("d", "2023-02-29").is_err());
    assert!(parse_date("d", "2024-13-01").is_err());
    assert!(parse_date("d", "2024-3-5").is_err());
    assert!(parse_date("d", "05/03/2024").is_err());
  }

  #[test]
  fn enums_accept_only_their_members() {
    assert_eq!(
      parse_enum::<DocumentType>("document_type", "PASSPORT").unwrap(),
      DocumentType::Passport
    );
    assert_eq!(parse_enum::<Gender>("gender", "FEMALE").unwrap(), Gender::Female);

    let err = parse_enum::<DocumentType>("document_type", "DNI").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.to_string().contains("CC, TI, CE, PASSPORT"), "{err}");
  }

  #[test]
  fn numeric_ranges() {
    assert_eq!(month_in_range(1).unwrap(), 1);
    assert_eq!(month_in_range(12).unwrap(), 12);
    assert!(month_in_range(0).is_err());
    assert!(month_in_range(13).is_err());
    assert!(year_in_range(2019).is_err());
    assert_eq!(year_in_range(2030).unwrap(), 2030);
    assert!(year_in_range(2031).is_err());
    assert!(year_in_range(i64::MAX).is_err());
    assert!(positive_amount(0.0).is_err());
    assert!(positive_amount(f64::NAN).is_err());
    assert!(positive_amount(0.01).is_ok());
    assert!(positive("site_id", 0).is_err());
  }

  #[test]
  fn email_shapes() {
    for ok in ["a@b.com", "first.last@mail.example.org"] {
      assert!(email_shape(ok).is_ok(), "{ok}");
    }
    for bad in ["", "ab.com", "@b.com", "a@b", "a@.com", "a@b.", "a b@c.com", "a@b@c.com"] {
      assert!(email_shape(bad).is_err(), "{bad}");
    }
  }

  #[test]
  fn blank_text_is_rejected() {
    assert!(text_length("name", "   ", 10).is_err());
    assert!(text_length("name", "abcdefghijk", 10).is_err());
    assert!(text_length("name", "Sede", 10).is_ok());
    assert!(optional_text_length("phone", None, 20).is_ok());
  }

  #[test]
  fn paid_without_date_is_rejected() {
    let err = paid_requires_date(FeeStatus::Paid, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConditionalRule);
    assert!(paid_requires_date(FeeStatus::Pending, None).is_ok());
  }

  #[test]
  fn run_checks_stops_at_first_failure() {
    let mut reached = false;
    let result = run_checks(vec![
      Check::format(|| Ok(())),
      Check::reference(|| {
        Err(Error::Reference {
          entity: Entity::Site,
          id:     9,
        })
      }),
      Check::uniqueness(|| {
        reached = true;
        Ok(())
      }),
    ]);
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Reference);
    assert!(!reached);
  }
}
