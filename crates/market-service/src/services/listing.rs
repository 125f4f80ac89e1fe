//! Listing catalog service
//!
//! Seller submissions go to the admin tracking collection (`sellerAccounts`)
//! and only reach the public catalog (`accounts`) once approved, unless
//! auto-approval is switched on.

use tracing::{info, instrument, warn};
use url::Url;
use validator::Validate;

use market_core::entities::{Listing, ListingStatus, ReviewStatus, Submission, User};
use market_core::events::ListingEvent;
use market_core::{DomainError, DomainEvent, RecordId};

use crate::dto::{DashboardStats, SellerForm};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::search::{self, ListingFilters};

/// Listing catalog service
pub struct ListingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ListingService<'a> {
    /// Create a new ListingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a seller form
    #[instrument(skip(self, seller, form), fields(seller_id = %seller.id))]
    pub async fn submit_listing(&self, seller: &User, form: SellerForm) -> ServiceResult<Submission> {
        form.validate()?;

        let mut listing = form.into_listing(self.ctx.generate_id(), seller.id);
        let auto_approve = self.ctx.settings().auto_approve_listings;

        let submission = if auto_approve {
            listing.publish();
            self.ctx.listing_repo().create(&listing).await?;
            let tracked = Submission::new(listing, ReviewStatus::Approved);
            if let Err(e) = self.ctx.submission_repo().create(&tracked).await {
                warn!(listing_id = %tracked.id(), error = %e, "Tracking copy not stored, withdrawing listing");
                self.ctx.listing_repo().delete(tracked.id()).await?;
                return Err(e.into());
            }
            tracked
        } else {
            let pending = Submission::new(listing, ReviewStatus::Pending);
            self.ctx.submission_repo().create(&pending).await?;
            pending
        };

        self.publish(DomainEvent::ListingSubmitted, submission.id(), seller.id);
        if auto_approve {
            self.publish(DomainEvent::ListingApproved, submission.id(), seller.id);
        }

        info!(
            listing_id = %submission.id(),
            price = submission.listing.price,
            auto_approve,
            "Listing submitted"
        );

        Ok(submission)
    }

    /// Publish a pending submission to the catalog
    #[instrument(skip(self, admin), fields(admin_id = %admin.id))]
    pub async fn approve_listing(&self, admin: &User, id: RecordId) -> ServiceResult<Listing> {
        ensure_admin(admin)?;

        let submission = self
            .ctx
            .submission_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ListingNotFound(id))?;

        if !submission.is_pending() {
            warn!(listing_id = %id, "Listing already approved");
            return Err(DomainError::AlreadyReviewed.into());
        }

        let mut listing = submission.listing;
        listing.publish();
        self.ctx.listing_repo().create(&listing).await?;
        self.ctx.submission_repo().delete(id).await?;

        self.publish(DomainEvent::ListingApproved, id, admin.id);
        info!(listing_id = %id, "Listing approved");

        Ok(listing)
    }

    /// Drop a submission; an auto-approved listing is withdrawn from the catalog
    #[instrument(skip(self, admin), fields(admin_id = %admin.id))]
    pub async fn reject_listing(&self, admin: &User, id: RecordId) -> ServiceResult<()> {
        ensure_admin(admin)?;

        let submission = self
            .ctx
            .submission_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ListingNotFound(id))?;

        self.ctx.submission_repo().delete(id).await?;
        let withdrawn = if submission.review == ReviewStatus::Approved {
            self.ctx.listing_repo().delete(id).await?
        } else {
            false
        };

        self.publish(DomainEvent::ListingRejected, id, admin.id);
        info!(listing_id = %id, withdrawn, "Listing rejected");

        Ok(())
    }

    /// Remove a listing from the catalog
    #[instrument(skip(self, admin), fields(admin_id = %admin.id))]
    pub async fn delete_listing(&self, admin: &User, id: RecordId) -> ServiceResult<()> {
        ensure_admin(admin)?;

        if !self.ctx.listing_repo().delete(id).await? {
            return Err(DomainError::ListingNotFound(id).into());
        }

        self.publish(DomainEvent::ListingDeleted, id, admin.id);
        info!(listing_id = %id, "Listing deleted");

        Ok(())
    }

    /// Mark an available listing as sold
    #[instrument(skip(self, admin), fields(admin_id = %admin.id))]
    pub async fn mark_sold(&self, admin: &User, id: RecordId) -> ServiceResult<Listing> {
        ensure_admin(admin)?;

        let mut listing = self
            .ctx
            .listing_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ListingNotFound(id))?;

        if !listing.is_available() {
            warn!(listing_id = %id, status = listing.status.as_str(), "Listing cannot be sold");
            return Err(DomainError::ListingUnavailable.into());
        }

        listing.mark_sold();
        self.ctx.listing_repo().update(&listing).await?;

        self.publish(DomainEvent::ListingSold, id, admin.id);
        info!(listing_id = %id, "Listing sold");

        Ok(listing)
    }

    /// The public catalog, in insertion order
    #[instrument(skip(self))]
    pub async fn catalog(&self) -> ServiceResult<Vec<Listing>> {
        Ok(self.ctx.listing_repo().list().await?)
    }

    /// Get one catalog listing
    #[instrument(skip(self))]
    pub async fn get_listing(&self, id: RecordId) -> ServiceResult<Listing> {
        self.ctx
            .listing_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::ListingNotFound(id).into())
    }

    /// Filter the current catalog
    #[instrument(skip(self, filters))]
    pub async fn search(&self, filters: &ListingFilters) -> ServiceResult<Vec<Listing>> {
        let catalog = self.catalog().await?;
        Ok(search::search(&catalog, filters))
    }

    /// Submissions still waiting for review
    #[instrument(skip(self, admin), fields(admin_id = %admin.id))]
    pub async fn pending_submissions(&self, admin: &User) -> ServiceResult<Vec<Submission>> {
        Ok(self
            .submissions(admin)
            .await?
            .into_iter()
            .filter(Submission::is_pending)
            .collect())
    }

    /// Every tracked submission, reviewed or not
    #[instrument(skip(self, admin), fields(admin_id = %admin.id))]
    pub async fn submissions(&self, admin: &User) -> ServiceResult<Vec<Submission>> {
        ensure_admin(admin)?;
        Ok(self.ctx.submission_repo().list().await?)
    }

    /// Admin dashboard counters
    #[instrument(skip(self, admin), fields(admin_id = %admin.id))]
    pub async fn dashboard_stats(&self, admin: &User) -> ServiceResult<DashboardStats> {
        ensure_admin(admin)?;

        let users = self.ctx.user_repo().list().await?;
        let catalog = self.ctx.listing_repo().list().await?;
        let submissions = self.ctx.submission_repo().list().await?;

        Ok(DashboardStats {
            total_users: users.len(),
            total_accounts: catalog.len(),
            pending_reviews: submissions.iter().filter(|s| s.is_pending()).count(),
            available_accounts: catalog
                .iter()
                .filter(|l| l.status == ListingStatus::Available)
                .count(),
            total_value: catalog
                .iter()
                .fold(0u64, |sum, l| sum.saturating_add(l.price)),
        })
    }

    /// Deep-link to the configured contact number, prefilled for this listing
    pub fn contact_link(&self, listing: &Listing) -> ServiceResult<Url> {
        search::contact_link(&self.ctx.settings().contact_phone, listing)
            .ok_or_else(|| ServiceError::internal("contact phone number is not configured"))
    }

    fn publish(&self, event: fn(ListingEvent) -> DomainEvent, listing_id: RecordId, actor: RecordId) {
        self.ctx.events().publish(event(ListingEvent::new(listing_id, actor)));
    }
}

fn ensure_admin(user: &User) -> Result<(), DomainError> {
    if user.is_admin() {
        Ok(())
    } else {
        warn!(user_id = %user.id, "Admin role required");
        Err(DomainError::AdminRequired)
    }
}
