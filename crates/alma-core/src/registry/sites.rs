use crate::{
  Entity, Error, Result,
  rules::{self, Check},
  site::{NewSite, Site, SiteSummary, SiteView},
  store::{EntityStore, Id},
};

use super::Registry;

impl Registry {
  pub async fn list_sites(&self) -> Vec<SiteView> {
    let store = self.read().await;
    store
      .sites
      .iter()
      .map(|(id, site)| SiteView {
        id,
        site: site.clone(),
      })
      .collect()
  }

  pub async fn get_site(&self, id: Id) -> Result<SiteView> {
    let store = self.read().await;
    site_view(&store, id).ok_or_else(|| Error::not_found(Entity::Site, id))
  }

  pub async fn create_site(&self, input: &NewSite) -> Result<SiteView> {
    let site = input.parse()?;
    let mut store = self.write().await;
    rules::run_checks(site_checks(&store, &site, None))?;

    let id = store.sites.insert(site.clone());
    tracing::info!(site_id = id, name = %site.name, "site created");
    Ok(SiteView { id, site })
  }

  pub async fn update_site(&self, id: Id, input: &NewSite) -> Result<SiteView> {
    let mut store = self.write().await;
    if !store.sites.contains(id) {
      return Err(Error::not_found(Entity::Site, id));
    }
    let site = input.parse()?;
    rules::run_checks(site_checks(&store, &site, Some(id)))?;

    store.sites.replace(id, site.clone());
    tracing::info!(site_id = id, "site updated");
    Ok(SiteView { id, site })
  }

  /// Delete a site that no participant references.
  pub async fn delete_site(&self, id: Id) -> Result<Id> {
    let mut store = self.write().await;
    if !store.sites.contains(id) {
      return Err(Error::not_found(Entity::Site, id));
    }
    let dependents = rules::site_dependents(&store, id);
    if !dependents.is_empty() {
      tracing::debug!(site_id = id, %dependents, "site delete blocked");
      return Err(Error::DependencyConflict {
        entity: Entity::Site,
        id,
        dependents,
      });
    }

    store.sites.remove(id);
    tracing::info!(site_id = id, "site deleted");
    Ok(id)
  }
}

fn site_checks<'a>(
  store: &'a EntityStore,
  site: &'a Site,
  exclude: Option<Id>,
) -> Vec<Check<'a>> {
  vec![Check::uniqueness(move || {
    rules::unique_site_name(store, &site.name, exclude)
  })]
}

pub(super) fn site_view(store: &EntityStore, id: Id) -> Option<SiteView> {
  store.sites.get(id).map(|site| SiteView {
    id,
    site: site.clone(),
  })
}

pub(super) fn site_summary(store: &EntityStore, id: Id) -> Option<SiteSummary> {
  store.sites.get(id).map(|site| SiteSummary {
    id,
    name: site.name.clone(),
  })
}
