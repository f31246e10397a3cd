//! Error types for `alma-core`.
//!
//! Every failed operation leaves the store untouched; the variant tells the
//! caller which rule rejected the request.

use std::fmt;

use strum::Display;
use thiserror::Error;

use crate::store::Id;

/// The record collections known to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Entity {
  #[strum(to_string = "site")]
  Site,
  #[strum(to_string = "participant")]
  Participant,
  #[strum(to_string = "guardian")]
  Guardian,
  #[strum(to_string = "monthly fee")]
  MonthlyFee,
}

/// Records still referencing an entity that was asked to be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependents {
  Site { participants: usize },
  Participant { guardians: usize, monthly_fees: usize },
  Guardian { monthly_fees: usize },
}

impl Dependents {
  pub fn is_empty(&self) -> bool {
    match *self {
      Self::Site { participants } => participants == 0,
      Self::Participant {
        guardians,
        monthly_fees,
      } => guardians == 0 && monthly_fees == 0,
      Self::Guardian { monthly_fees } => monthly_fees == 0,
    }
  }
}

impl fmt::Display for Dependents {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::Site { participants } => write!(f, "{participants} participant(s)"),
      Self::Participant {
        guardians,
        monthly_fees,
      } => write!(
        f,
        "{guardians} guardian(s) and {monthly_fees} monthly fee(s)"
      ),
      Self::Guardian { monthly_fees } => {
        write!(f, "{monthly_fees} monthly fee(s)")
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  /// Malformed date, enum member, numeric range, text length or email.
  #[error("{0}")]
  Format(String),

  /// A foreign key points at a record that does not exist.
  #[error("{entity} with id {id} does not exist")]
  Reference { entity: Entity, id: Id },

  #[error(
    "guardian {guardian_id} does not belong to participant {participant_id}"
  )]
  CrossReference { guardian_id: Id, participant_id: Id },

  #[error("{0}")]
  Uniqueness(String),

  #[error("{0}")]
  ConditionalRule(String),

  #[error("cannot delete {entity} {id}: it still has {dependents} associated")]
  DependencyConflict {
    entity:     Entity,
    id:         Id,
    dependents: Dependents,
  },

  #[error("{entity} {id} not found")]
  NotFound { entity: Entity, id: Id },
}

/// Coarse classification of an [`Error`], for callers that map outcomes to a
/// transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Format,
  Reference,
  CrossReference,
  Uniqueness,
  ConditionalRule,
  DependencyConflict,
  NotFound,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Format(_) => ErrorKind::Format,
      Self::Reference { .. } => ErrorKind::Reference,
      Self::CrossReference { .. } => ErrorKind::CrossReference,
      Self::Uniqueness(_) => ErrorKind::Uniqueness,
      Self::ConditionalRule(_) => ErrorKind::ConditionalRule,
      Self::DependencyConflict { .. } => ErrorKind::DependencyConflict,
      Self::NotFound { .. } => ErrorKind::NotFound,
    }
  }

  pub(crate) fn not_found(entity: Entity, id: Id) -> Self {
    Self::NotFound { entity, id }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
