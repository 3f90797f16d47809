//! SyncService: drives spec downloads, Postman calls and reconciliation.

use super::outcome::{AddLinkOutcome, EntryOutcome, SyncReport};
use crate::collection::CollectionDocument;
use crate::config::StoragePaths;
use crate::error::ApiError;
use crate::json::write_indented;
use crate::links::{LinkEntry, LinkRegistry};
use crate::postman::CollectionApi;
use crate::reconcile::{reconcile, ReconciliationStats};
use crate::spec::{hash_spec, validate_spec, SpecSource};
use crate::types::CollectionUid;
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Calls run one at a time; entries are processed in registry order.
pub struct SyncService<'a> {
    api: &'a dyn CollectionApi,
    specs: &'a dyn SpecSource,
    paths: StoragePaths,
}

/// Downloaded spec and its hash.
struct FetchedSpec {
    document: Value,
    hash: String,
}

impl<'a> SyncService<'a> {
    pub fn new(api: &'a dyn CollectionApi, specs: &'a dyn SpecSource, paths: StoragePaths) -> Self {
        Self { api, specs, paths }
    }

    /// Refresh every registered collection whose spec changed.
    ///
    /// A failing entry is recorded and the run continues with the next one.
    pub async fn sync_all(&self, registry: &mut LinkRegistry) -> SyncReport {
        let mut report = SyncReport::default();

        for index in 0..registry.len() {
            let (link, previous_uid) = {
                let entry = &registry.entries()[index];
                (entry.link.clone(), entry.collection_uid.clone())
            };
            debug!(link = %link, uid = %previous_uid, "Processing link");

            let outcome = match self.sync_entry(registry, index).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(link = %link, error = %e, "Failed to sync collection");
                    EntryOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            report.push(link, previous_uid, outcome);
        }

        info!(
            unchanged = report.unchanged_count(),
            updated = report.updated_count(),
            failed = report.failed_count(),
            "Sync finished"
        );
        report
    }

    async fn sync_entry(
        &self,
        registry: &mut LinkRegistry,
        index: usize,
    ) -> Result<EntryOutcome, ApiError> {
        let (link, stored_hash, old_uid) = {
            let entry = &registry.entries()[index];
            (
                entry.link.clone(),
                entry.hash.clone(),
                entry.collection_uid.clone(),
            )
        };

        let spec = self.fetch_spec(&link).await?;
        if spec.hash == stored_hash {
            info!(link = %link, "No changes found");
            return Ok(EntryOutcome::Unchanged);
        }
        info!(link = %link, "Changes detected, rebuilding collection");

        let (latest_uid, stats) = self.rebuild(&spec.document, &old_uid).await?;

        let mut entry = registry.entries()[index].clone();
        entry.record_update(latest_uid.clone(), spec.hash);
        registry.upsert(entry);
        registry.save()?;
        info!(link = %link, uid = %latest_uid, "Collection updated");

        Ok(EntryOutcome::Updated {
            collection_uid: latest_uid,
            stats,
        })
    }

    /// Register a new spec link.
    ///
    /// Without `existing_uid` the imported collection is kept as is. With it,
    /// that collection's scripts are carried onto a fresh import first.
    pub async fn add_link(
        &self,
        registry: &mut LinkRegistry,
        link: &str,
        existing_uid: Option<&str>,
    ) -> Result<AddLinkOutcome, ApiError> {
        if registry.contains(link) {
            warn!(link, "The link already exists in the registry");
            return Ok(AddLinkOutcome::AlreadyRegistered);
        }

        let spec = self.fetch_spec(link).await?;
        let (uid, stats) = match existing_uid {
            None => (self.api.import_openapi(&spec.document).await?, None),
            Some(old_uid) => {
                let (uid, stats) = self.rebuild(&spec.document, old_uid).await?;
                (uid, Some(stats))
            }
        };

        registry.register(LinkEntry::new(link, spec.hash, uid.clone()))?;
        registry.save()?;
        info!(link, uid = %uid, "New entry added to registry");

        Ok(AddLinkOutcome::Registered {
            collection_uid: uid,
            stats,
        })
    }

    /// Import a spec URL as a new collection without touching the registry.
    pub async fn import_from_url(&self, url: &str) -> Result<CollectionUid, ApiError> {
        let spec = self.fetch_spec(url).await?;
        let uid = self.api.import_openapi(&spec.document).await?;
        info!(url, uid = %uid, "Created collection from spec");
        Ok(uid)
    }

    async fn fetch_spec(&self, url: &str) -> Result<FetchedSpec, ApiError> {
        let document = self.specs.fetch_spec(url).await?;
        validate_spec(&document)?;
        let hash = hash_spec(&document)?;
        debug!(url, hash = %hash, "Downloaded and hashed spec");
        Ok(FetchedSpec { document, hash })
    }

    /// Import `spec` into a throwaway collection, carry the scripts of
    /// `old_uid` onto it and publish the result. Returns the published UID.
    async fn rebuild(
        &self,
        spec: &Value,
        old_uid: &str,
    ) -> Result<(CollectionUid, ReconciliationStats), ApiError> {
        let temp_uid = self.api.import_openapi(spec).await?;
        let fetched = self.api.fetch_collection(&temp_uid).await;
        if let Err(e) = self.api.delete_collection(&temp_uid).await {
            warn!(uid = %temp_uid, error = %e, "Failed to delete temporary collection");
        }
        let new_value = fetched?;
        write_indented(&self.paths.new_file, &new_value)?;

        let old_value = self.api.fetch_collection(old_uid).await?;
        write_indented(&self.paths.old_file, &old_value)?;

        let new_doc = CollectionDocument::from_value(new_value)?;
        let old_doc = CollectionDocument::from_value(old_value)?;
        let (updated, stats) = reconcile(&old_doc, new_doc);
        updated.write(&self.paths.updated_file)?;

        let latest_uid = self.api.create_collection(&updated.collection_body()).await?;
        Ok((latest_uid, stats))
    }
}
