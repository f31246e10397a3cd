use crate::{
  Entity, Error, Result,
  fee::{MonthlyFee, MonthlyFeeView, NewMonthlyFee},
  rules::{self, Check},
  store::{EntityStore, Id},
};

use super::{
  Registry,
  guardians::{guardian_summary, participant_summary},
  sites::site_summary,
};

impl Registry {
  pub async fn list_fees(&self) -> Vec<MonthlyFeeView> {
    let store = self.read().await;
    store
      .fees
      .iter()
      .map(|(id, f)| fee_view(&store, id, f))
      .collect()
  }

  pub async fn get_fee(&self, id: Id) -> Result<MonthlyFeeView> {
    let store = self.read().await;
    store
      .fees
      .get(id)
      .map(|f| fee_view(&store, id, f))
      .ok_or_else(|| Error::not_found(Entity::MonthlyFee, id))
  }

  /// Fees of one participant, in id order. No validation.
  pub async fn fees_of(&self, participant_id: Id) -> Vec<MonthlyFeeView> {
    let store = self.read().await;
    store
      .fees
      .iter()
      .filter(|(_, f)| f.participant_id == participant_id)
      .map(|(id, f)| fee_view(&store, id, f))
      .collect()
  }

  pub async fn create_fee(&self, input: &NewMonthlyFee) -> Result<MonthlyFeeView> {
    let fee = input.parse()?;
    let mut store = self.write().await;
    rules::run_checks(fee_checks(&store, &fee, None))?;

    let id = store.fees.insert(fee.clone());
    tracing::info!(
      fee_id = id,
      participant_id = fee.participant_id,
      month = fee.month,
      year = fee.year,
      status = %fee.status,
      "monthly fee created"
    );
    Ok(fee_view(&store, id, &fee))
  }

  /// Replace a fee after re-running the full rule chain.
  ///
  /// A `PAID` fee needs `payment_date` in this very payload. A payload
  /// without `payment_date` keeps the date already on record, so moving a
  /// fee back to `PENDING` does not erase when it was paid.
  pub async fn update_fee(
    &self,
    id: Id,
    input: &NewMonthlyFee,
  ) -> Result<MonthlyFeeView> {
    let mut store = self.write().await;
    let previous_date = match store.fees.get(id) {
      Some(existing) => existing.payment_date,
      None => return Err(Error::not_found(Entity::MonthlyFee, id)),
    };
    let mut fee = input.parse()?;
    rules::run_checks(fee_checks(&store, &fee, Some(id)))?;

    fee.payment_date = fee.payment_date.or(previous_date);
    store.fees.replace(id, fee.clone());
    tracing::info!(fee_id = id, status = %fee.status, "monthly fee updated");
    Ok(fee_view(&store, id, &fee))
  }

  /// Monthly fees have no dependents and can always be deleted.
  pub async fn delete_fee(&self, id: Id) -> Result<Id> {
    let mut store = self.write().await;
    if store.fees.remove(id).is_none() {
      return Err(Error::not_found(Entity::MonthlyFee, id));
    }
    tracing::info!(fee_id = id, "monthly fee deleted");
    Ok(id)
  }
}

fn fee_checks<'a>(
  store: &'a EntityStore,
  fee: &'a MonthlyFee,
  exclude: Option<Id>,
) -> Vec<Check<'a>> {
  let mut checks = vec![Check::reference(move || {
    rules::participant_exists(store, fee.participant_id)
  })];
  if let Some(guardian_id) = fee.guardian_id {
    checks.push(Check::reference(move || {
      rules::guardian_exists(store, guardian_id)
    }));
    checks.push(Check::cross_ref(move || {
      rules::guardian_belongs_to(store, guardian_id, fee.participant_id)
    }));
  }
  checks.push(Check::uniqueness(move || {
    rules::unique_fee_period(store, fee.participant_id, fee.month, fee.year, exclude)
  }));
  checks.push(Check::conditional(move || {
    rules::paid_requires_date(fee.status, fee.payment_date)
  }));
  checks
}

fn fee_view(store: &EntityStore, id: Id, fee: &MonthlyFee) -> MonthlyFeeView {
  let participant = participant_summary(store, fee.participant_id);
  let site = participant
    .as_ref()
    .and_then(|p| site_summary(store, p.site_id));
  MonthlyFeeView {
    id,
    fee: fee.clone(),
    participant,
    site,
    guardian: fee.guardian_id.and_then(|g| guardian_summary(store, g)),
  }
}
