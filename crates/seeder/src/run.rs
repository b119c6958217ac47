//! The seeding run itself: upload the planned assets, attach their URLs to
//! the sample records, upsert the records.
//!
//! Every step is sequential. A failed upload or upsert is logged and
//! counted, and the run moves on to the next item.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use catalog_core::catalog::CatalogRecord;
use catalog_core::store::{BlobStore, DocumentStore};
use catalog_store::Stores;

use crate::assets::{AssetKind, AssetPlan, Assignment};

/// Outcome counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub uploaded: usize,
    pub upload_failures: usize,
    pub upserted: usize,
    pub upsert_failures: usize,
}

impl SeedReport {
    pub fn is_clean(&self) -> bool {
        self.upload_failures == 0 && self.upsert_failures == 0
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s) uploaded, {} upload failure(s); {} record(s) upserted, {} upsert failure(s)",
            self.uploaded, self.upload_failures, self.upserted, self.upsert_failures
        )
    }
}

/// Blob URLs keyed by record id and kind.
pub type UploadedAssets = HashMap<(String, AssetKind), String>;

pub struct Seeder {
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl Seeder {
    pub fn new(stores: Stores) -> Self {
        Self {
            documents: stores.documents,
            blobs: stores.blobs,
        }
    }

    /// Upload the plan, then upsert `records` with the resulting URLs.
    pub async fn run(&self, plan: &AssetPlan, records: Vec<CatalogRecord>) -> SeedReport {
        let mut report = SeedReport::default();
        let uploaded = self.upload_assets(plan, &mut report).await;
        self.upsert_records(records, &uploaded, &mut report).await;
        report
    }

    pub async fn upload_assets(&self, plan: &AssetPlan, report: &mut SeedReport) -> UploadedAssets {
        let mut uploaded = UploadedAssets::new();
        for kind in AssetKind::ALL {
            tracing::info!(container = kind.container(), "Uploading {kind} files");
            for assignment in plan.of_kind(kind) {
                match self.upload_one(assignment).await {
                    Some(url) => {
                        report.uploaded += 1;
                        uploaded.insert((assignment.record_id.clone(), kind), url);
                    }
                    None => report.upload_failures += 1,
                }
            }
        }
        uploaded
    }

    async fn upload_one(&self, assignment: &Assignment) -> Option<String> {
        let data = match tokio::fs::read(&assignment.source).await {
            Ok(data) => Bytes::from(data),
            Err(e) => {
                tracing::error!(
                    source = %assignment.source.display(),
                    error = %e,
                    "Failed to read asset"
                );
                return None;
            }
        };

        match self
            .blobs
            .put(assignment.kind.container(), &assignment.blob_name, data)
            .await
        {
            Ok(url) => {
                tracing::info!(blob = %assignment.blob_name, %url, "Upload complete");
                Some(url)
            }
            Err(e) => {
                tracing::error!(blob = %assignment.blob_name, error = %e, "Upload failed");
                None
            }
        }
    }

    pub async fn upsert_records(
        &self,
        records: Vec<CatalogRecord>,
        uploaded: &UploadedAssets,
        report: &mut SeedReport,
    ) {
        for mut record in records {
            attach_urls(&mut record, uploaded);
            let label = record.title.clone().unwrap_or_else(|| record.id.clone());

            let result = match record.to_document() {
                Ok(doc) => self.documents.upsert(doc).await.map(|_| ()),
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => {
                    report.upserted += 1;
                    tracing::info!(id = %record.id, title = %label, "Record upserted");
                }
                Err(e) => {
                    report.upsert_failures += 1;
                    tracing::error!(id = %record.id, title = %label, error = %e, "Upsert failed");
                }
            }
        }
    }
}

/// Copy any uploaded URLs for this record onto it.
pub fn attach_urls(record: &mut CatalogRecord, uploaded: &UploadedAssets) {
    if let Some(url) = uploaded.get(&(record.id.clone(), AssetKind::Video)) {
        record.video_url = Some(url.clone());
    }
    if let Some(url) = uploaded.get(&(record.id.clone(), AssetKind::Thumbnail)) {
        record.thumbnail_url = Some(url.clone());
    }
}
