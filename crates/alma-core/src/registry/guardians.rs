use crate::{
  Entity, Error, Result,
  guardian::{Guardian, GuardianSummary, GuardianView, NewGuardian},
  participant::ParticipantSummary,
  rules::{self, Check},
  store::{EntityStore, Id},
};

use super::Registry;

impl Registry {
  pub async fn list_guardians(&self) -> Vec<GuardianView> {
    let store = self.read().await;
    store
      .guardians
      .iter()
      .map(|(id, g)| guardian_view(&store, id, g))
      .collect()
  }

  pub async fn get_guardian(&self, id: Id) -> Result<GuardianView> {
    let store = self.read().await;
    store
      .guardians
      .get(id)
      .map(|g| guardian_view(&store, id, g))
      .ok_or_else(|| Error::not_found(Entity::Guardian, id))
  }

  /// Guardians of one participant. An unknown participant yields an empty
  /// list rather than an error.
  pub async fn guardians_of(&self, participant_id: Id) -> Vec<GuardianView> {
    let store = self.read().await;
    store
      .guardians
      .iter()
      .filter(|(_, g)| g.participant_id == participant_id)
      .map(|(id, g)| guardian_view(&store, id, g))
      .collect()
  }

  pub async fn create_guardian(&self, input: &NewGuardian) -> Result<GuardianView> {
    let guardian = input.parse()?;
    let mut store = self.write().await;
    rules::run_checks(guardian_checks(&store, &guardian, None))?;

    let id = store.guardians.insert(guardian.clone());
    tracing::info!(
      guardian_id = id,
      participant_id = guardian.participant_id,
      "guardian created"
    );
    Ok(guardian_view(&store, id, &guardian))
  }

  pub async fn update_guardian(
    &self,
    id: Id,
    input: &NewGuardian,
  ) -> Result<GuardianView> {
    let mut store = self.write().await;
    if !store.guardians.contains(id) {
      return Err(Error::not_found(Entity::Guardian, id));
    }
    let guardian = input.parse()?;
    rules::run_checks(guardian_checks(&store, &guardian, Some(id)))?;

    store.guardians.replace(id, guardian.clone());
    tracing::info!(guardian_id = id, "guardian updated");
    Ok(guardian_view(&store, id, &guardian))
  }

  /// Delete a guardian that no monthly fee references.
  pub async fn delete_guardian(&self, id: Id) -> Result<Id> {
    let mut store = self.write().await;
    if !store.guardians.contains(id) {
      return Err(Error::not_found(Entity::Guardian, id));
    }
    let dependents = rules::guardian_dependents(&store, id);
    if !dependents.is_empty() {
      tracing::debug!(guardian_id = id, %dependents, "guardian delete blocked");
      return Err(Error::DependencyConflict {
        entity: Entity::Guardian,
        id,
        dependents,
      });
    }

    store.guardians.remove(id);
    tracing::info!(guardian_id = id, "guardian deleted");
    Ok(id)
  }
}

fn guardian_checks<'a>(
  store: &'a EntityStore,
  guardian: &'a Guardian,
  exclude: Option<Id>,
) -> Vec<Check<'a>> {
  let mut checks = vec![Check::reference(move || {
    rules::participant_exists(store, guardian.participant_id)
  })];
  if let Some(id) = exclude {
    checks.push(Check::cross_ref(move || {
      rules::fees_stay_with_guardian(store, id, guardian.participant_id)
    }));
  }
  checks.push(Check::uniqueness(move || {
    rules::unique_guardian_document(store, &guardian.document_number, exclude)
  }));
  checks
}

fn guardian_view(store: &EntityStore, id: Id, guardian: &Guardian) -> GuardianView {
  GuardianView {
    id,
    guardian: guardian.clone(),
    participant: participant_summary(store, guardian.participant_id),
  }
}

pub(super) fn participant_summary(
  store: &EntityStore,
  id: Id,
) -> Option<ParticipantSummary> {
  store
    .participants
    .get(id)
    .map(|p| ParticipantSummary::new(id, p))
}

pub(super) fn guardian_summary(
  store: &EntityStore,
  id: Id,
) -> Option<GuardianSummary> {
  store.guardians.get(id).map(|g| GuardianSummary::new(id, g))
}
