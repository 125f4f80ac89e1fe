//! Key-value implementation of SubmissionRepository

use async_trait::async_trait;
use tracing::instrument;

use market_core::entities::Submission;
use market_core::traits::{RepoResult, SubmissionRepository};
use market_core::value_objects::RecordId;

use crate::collection::Collection;
use crate::events::EventBus;
use crate::keys;
use crate::kv::SharedStore;

use super::error::{duplicate_id, map_store_error};

/// Admin tracking collection stored under the `sellerAccounts` key
#[derive(Clone)]
pub struct KvSubmissionRepository {
    submissions: Collection<Submission>,
}

impl KvSubmissionRepository {
    pub fn new(store: SharedStore, events: EventBus) -> Self {
        Self {
            submissions: Collection::new(store, keys::SELLER_ACCOUNTS, events),
        }
    }
}

#[async_trait]
impl SubmissionRepository for KvSubmissionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Submission>> {
        let submissions = self.submissions.load().await.map_err(map_store_error)?;
        Ok(submissions.into_iter().find(|s| s.id() == id))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Submission>> {
        self.submissions.load().await.map_err(map_store_error)
    }

    #[instrument(skip(self, submission), fields(listing_id = %submission.id()))]
    async fn create(&self, submission: &Submission) -> RepoResult<()> {
        let submission = submission.clone();
        self.submissions
            .try_update(move |submissions| {
                if submissions.iter().any(|s| s.id() == submission.id()) {
                    return Err(duplicate_id(keys::SELLER_ACCOUNTS, submission.id()));
                }
                submissions.push(submission);
                Ok(())
            })
            .await
            .map_err(map_store_error)?
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<bool> {
        self.submissions
            .update(|submissions| {
                let before = submissions.len();
                submissions.retain(|s| s.id() != id);
                submissions.len() != before
            })
            .await
            .map_err(map_store_error)
    }
}
