//! Key-value implementation of ListingRepository

use async_trait::async_trait;
use tracing::instrument;

use market_core::entities::Listing;
use market_core::traits::{ListingRepository, RepoResult};
use market_core::value_objects::RecordId;

use crate::collection::Collection;
use crate::events::EventBus;
use crate::keys;
use crate::kv::SharedStore;

use super::error::{duplicate_id, listing_not_found, map_store_error};

/// Public catalog stored under the `accounts` key
#[derive(Clone)]
pub struct KvListingRepository {
    listings: Collection<Listing>,
}

impl KvListingRepository {
    pub fn new(store: SharedStore, events: EventBus) -> Self {
        Self {
            listings: Collection::new(store, keys::ACCOUNTS, events),
        }
    }
}

#[async_trait]
impl ListingRepository for KvListingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Listing>> {
        let listings = self.listings.load().await.map_err(map_store_error)?;
        Ok(listings.into_iter().find(|l| l.id == id))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Listing>> {
        self.listings.load().await.map_err(map_store_error)
    }

    #[instrument(skip(self, listing), fields(listing_id = %listing.id))]
    async fn create(&self, listing: &Listing) -> RepoResult<()> {
        let listing = listing.clone();
        self.listings
            .try_update(move |listings| {
                if listings.iter().any(|l| l.id == listing.id) {
                    return Err(duplicate_id(keys::ACCOUNTS, listing.id));
                }
                listings.push(listing);
                Ok(())
            })
            .await
            .map_err(map_store_error)?
    }

    #[instrument(skip(self, listing), fields(listing_id = %listing.id))]
    async fn update(&self, listing: &Listing) -> RepoResult<()> {
        let listing = listing.clone();
        self.listings
            .try_update(move |listings| {
                let slot = listings
                    .iter_mut()
                    .find(|l| l.id == listing.id)
                    .ok_or_else(|| listing_not_found(listing.id))?;
                *slot = listing;
                Ok(())
            })
            .await
            .map_err(map_store_error)?
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<bool> {
        self.listings
            .update(|listings| {
                let before = listings.len();
                listings.retain(|l| l.id != id);
                listings.len() != before
            })
            .await
            .map_err(map_store_error)
    }
}
