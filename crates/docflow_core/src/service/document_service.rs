//! Document intake engine.
//!
//! # Responsibility
//! - Register documents handed over by the upload pipeline.
//! - Apply processing outcomes (`processed`, `error`, re-queue).
//!
//! Documents are never deleted by the core.

use std::sync::Arc;

use log::{info, warn};

use crate::clock::Clock;
use crate::error::{Collection, CoreError, CoreResult};
use crate::model::document::{Document, DocumentId, DocumentStatus, NewDocument};
use crate::model::role::Role;
use crate::repo::RecordRepository;
use crate::visibility::filter_visible;

pub struct DocumentService<R: RecordRepository<Item = Document>> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: RecordRepository<Item = Document>> DocumentService<R> {
    pub fn new(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Registers an uploaded document as `pending`, dated today.
    pub fn register(&self, new: NewDocument) -> CoreResult<Document> {
        let today = self.clock.today();
        let result = self
            .repo
            .insert_with(|id| Document::register(id, new, today).map_err(CoreError::from));
        match &result {
            Ok(document) => info!(
                "event=document_register module=document status=ok document_id={} department={} keywords={}",
                document.id,
                document.department,
                document.keywords.len()
            ),
            Err(err) => warn!("event=document_register module=document status=error error={err}"),
        }
        result
    }

    pub fn get(&self, id: DocumentId) -> CoreResult<Document> {
        self.repo
            .get(id)?
            .ok_or_else(|| CoreError::not_found(Collection::Documents, id))
    }

    /// Full collection in insertion order, without role scoping.
    pub fn list_all(&self) -> CoreResult<Vec<Document>> {
        self.repo.list()
    }

    pub fn list_visible(&self, role: Role) -> CoreResult<Vec<Document>> {
        Ok(filter_visible(role, self.repo.list()?))
    }

    pub fn complete_processing(&self, id: DocumentId) -> CoreResult<Document> {
        self.transition(id, DocumentStatus::Processed)
    }

    pub fn fail_processing(&self, id: DocumentId) -> CoreResult<Document> {
        self.transition(id, DocumentStatus::Error)
    }

    /// Queues a failed document for another processing attempt.
    pub fn retry_processing(&self, id: DocumentId) -> CoreResult<Document> {
        self.transition(id, DocumentStatus::Pending)
    }

    fn transition(&self, id: DocumentId, target: DocumentStatus) -> CoreResult<Document> {
        let result = self.repo.update_with(id, |document| {
            let current = document.status;
            if !current.allows(target) {
                return Err(CoreError::InvalidTransition {
                    collection: Collection::Documents,
                    id,
                    from: current.as_str(),
                    to: target.as_str(),
                });
            }
            document.status = target;
            Ok((current, document.clone()))
        });
        match result {
            Ok((from, document)) => {
                info!(
                    "event=document_transition module=document status={} document_id={id} from={from} to={target}",
                    if from == target { "noop" } else { "ok" }
                );
                Ok(document)
            }
            Err(err) => {
                warn!("event=document_transition module=document status=error document_id={id} target={target} error={err}");
                Err(err)
            }
        }
    }
}
