use crate::{
  Entity, Error, Result,
  participant::{NewParticipant, Participant, ParticipantView},
  rules::{self, Check},
  store::{EntityStore, Id},
};

use super::{Registry, sites::site_view};

impl Registry {
  /// All participants, each with its site embedded.
  pub async fn list_participants(&self) -> Vec<ParticipantView> {
    let store = self.read().await;
    store
      .participants
      .iter()
      .map(|(id, p)| participant_view(&store, id, p))
      .collect()
  }

  pub async fn get_participant(&self, id: Id) -> Result<ParticipantView> {
    let store = self.read().await;
    store
      .participants
      .get(id)
      .map(|p| participant_view(&store, id, p))
      .ok_or_else(|| Error::not_found(Entity::Participant, id))
  }

  pub async fn create_participant(
    &self,
    input: &NewParticipant,
  ) -> Result<ParticipantView> {
    let participant = input.parse()?;
    let mut store = self.write().await;
    rules::run_checks(participant_checks(&store, &participant, None))?;

    let id = store.participants.insert(participant.clone());
    tracing::info!(
      participant_id = id,
      site_id = participant.site_id,
      "participant created"
    );
    Ok(participant_view(&store, id, &participant))
  }

  pub async fn update_participant(
    &self,
    id: Id,
    input: &NewParticipant,
  ) -> Result<ParticipantView> {
    let mut store = self.write().await;
    if !store.participants.contains(id) {
      return Err(Error::not_found(Entity::Participant, id));
    }
    let participant = input.parse()?;
    rules::run_checks(participant_checks(&store, &participant, Some(id)))?;

    store.participants.replace(id, participant.clone());
    tracing::info!(participant_id = id, "participant updated");
    Ok(participant_view(&store, id, &participant))
  }

  /// Delete a participant with no guardians and no monthly fees. Dependents
  /// are never cascaded.
  pub async fn delete_participant(&self, id: Id) -> Result<Id> {
    let mut store = self.write().await;
    if !store.participants.contains(id) {
      return Err(Error::not_found(Entity::Participant, id));
    }
    let dependents = rules::participant_dependents(&store, id);
    if !dependents.is_empty() {
      tracing::debug!(participant_id = id, %dependents, "participant delete blocked");
      return Err(Error::DependencyConflict {
        entity: Entity::Participant,
        id,
        dependents,
      });
    }

    store.participants.remove(id);
    tracing::info!(participant_id = id, "participant deleted");
    Ok(id)
  }
}

fn participant_checks<'a>(
  store: &'a EntityStore,
  participant: &'a Participant,
  exclude: Option<Id>,
) -> Vec<Check<'a>> {
  vec![
    Check::reference(move || rules::site_exists(store, participant.site_id)),
    Check::uniqueness(move || {
      rules::unique_participant_document(
        store,
        &participant.document_number,
        exclude,
      )
    }),
  ]
}

fn participant_view(
  store: &EntityStore,
  id: Id,
  participant: &Participant,
) -> ParticipantView {
  ParticipantView {
    id,
    participant: participant.clone(),
    site: site_view(store, participant.site_id),
  }
}
