//! Resource operations over a repository: the create/read/update/patch/delete
//! flow of the Watch API, minus HTTP.

use serde_json::Value;
use thiserror::Error;
use watch_core::{Watch, WatchId};
use watch_patch::{PatchError, PatchService, ValidationError, Validator, WatchConstraints};

use crate::repository::WatchRepository;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Watch with id {0} doesn't exist.")]
    NotFound(WatchId),

    #[error("Watch id must not be null.")]
    MissingId,

    #[error("Watch id must match id specified in path (expected {expected}, got {actual:?}).")]
    IdMismatch { expected: WatchId, actual: Option<WatchId> },

    #[error(transparent)]
    Invalid(ValidationError),

    #[error(transparent)]
    Patch(#[from] PatchError),
}

impl ServiceError {
    /// HTTP status a surrounding API should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::MissingId => 400,
            ServiceError::IdMismatch { .. } => 422,
            ServiceError::Invalid(_) | ServiceError::Patch(_) => 400,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "not_found",
            ServiceError::MissingId => "missing_id",
            ServiceError::IdMismatch { .. } => "id_mismatch",
            ServiceError::Invalid(_) => "validation",
            ServiceError::Patch(e) => e.code(),
        }
    }
}

/// Watch resource service.
pub struct WatchService<R, V = WatchConstraints> {
    repo: R,
    patches: PatchService<V>,
}

impl<R: WatchRepository> WatchService<R, WatchConstraints> {
    pub fn new(repo: R) -> Self {
        Self::with_validator(repo, WatchConstraints::default())
    }
}

impl<R, V> WatchService<R, V>
where
    R: WatchRepository,
    V: Validator<Watch>,
{
    pub fn with_validator(repo: R, validator: V) -> Self {
        Self { repo, patches: PatchService::new(validator) }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn get_all(&self) -> Vec<Watch> {
        self.repo.find_all()
    }

    pub fn get(&self, id: WatchId) -> Result<Watch, ServiceError> {
        self.must_exist(id)
    }

    /// Create a watch. Any identifier in `watch` is discarded.
    pub fn create(&mut self, mut watch: Watch) -> Result<Watch, ServiceError> {
        watch.id = None;
        self.patches.validate(&watch).map_err(ServiceError::Invalid)?;
        Ok(self.store(watch))
    }

    /// Replace the watch at `id` with `watch`.
    pub fn update(&mut self, id: WatchId, watch: Watch) -> Result<Watch, ServiceError> {
        self.patches.validate(&watch).map_err(ServiceError::Invalid)?;
        if watch.id.is_none() {
            return Err(ServiceError::MissingId);
        }
        check_id(id, watch.id)?;
        self.must_exist(id)?;
        Ok(self.store(watch))
    }

    /// Apply a merge patch to the watch at `id`.
    ///
    /// The stored watch is replaced only when the patched result is valid and
    /// still carries `id`.
    pub fn patch(&mut self, id: WatchId, patch: &Value) -> Result<Watch, ServiceError> {
        let current = self.must_exist(id)?;
        let patched = self.patches.apply_patch(patch, &current)?;
        check_id(id, patched.id)?;
        Ok(self.store(patched))
    }

    pub fn delete(&mut self, id: WatchId) -> Result<(), ServiceError> {
        self.must_exist(id)?;
        self.repo.delete_by_id(id);
        tracing::debug!(id, "watch removed");
        Ok(())
    }

    fn store(&mut self, watch: Watch) -> Watch {
        let saved = self.repo.save(watch);
        tracing::debug!(id = ?saved.id, "watch created or updated");
        saved
    }

    fn must_exist(&self, id: WatchId) -> Result<Watch, ServiceError> {
        self.repo.find_by_id(id).ok_or_else(|| {
            tracing::debug!(id, "watch doesn't exist");
            ServiceError::NotFound(id)
        })
    }
}

fn check_id(expected: WatchId, actual: Option<WatchId>) -> Result<(), ServiceError> {
    if actual == Some(expected) {
        Ok(())
    } else {
        Err(ServiceError::IdMismatch { expected, actual })
    }
}
