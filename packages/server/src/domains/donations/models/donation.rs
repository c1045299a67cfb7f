use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domains::donations::machines::{DonationScope, DonationStatus};

/// Donation model - SQL persistence layer
///
/// `donor_id` is set once at creation and no update touches it. The
/// `donor_name` and `accepted_by_name` columns are display-name snapshots
/// taken at action time, not live references.
///
/// Every status transition is a single conditional UPDATE whose WHERE clause
/// carries the expected current status. Zero updated rows means the
/// precondition no longer held when the write executed, so two racing
/// accepts cannot both succeed.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Donation {
    pub id: Uuid,
    pub donor_id: Uuid,
    pub donor_name: String,

    // Listing content
    pub food_name: String,
    pub quantity: String,
    pub description: Option<String>,
    pub expiry_time: DateTime<Utc>,
    pub image: Option<String>,

    // Location
    pub location_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub status: String, // 'pending', 'accepted', 'picked_up', 'cancelled', 'expired'

    // Accepter snapshot, present only once accepted
    pub accepted_by_id: Option<Uuid>,
    pub accepted_by_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new donation listing
#[derive(Debug, Clone)]
pub struct NewDonation {
    pub donor_id: Uuid,
    pub donor_name: String,
    pub food_name: String,
    pub quantity: String,
    pub description: Option<String>,
    pub expiry_time: DateTime<Utc>,
    pub image: Option<String>,
    pub location_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Donation {
    /// Parsed status
    pub fn status(&self) -> Result<DonationStatus> {
        self.status.parse()
    }

    /// Insert a new donation in state 'pending' with the accepter unset
    pub async fn create(new_donation: NewDonation, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO donations (
                donor_id,
                donor_name,
                food_name,
                quantity,
                description,
                expiry_time,
                image,
                location_address,
                latitude,
                longitude,
                status
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'pending')
             RETURNING *",
        )
        .bind(new_donation.donor_id)
        .bind(&new_donation.donor_name)
        .bind(&new_donation.food_name)
        .bind(&new_donation.quantity)
        .bind(&new_donation.description)
        .bind(new_donation.expiry_time)
        .bind(&new_donation.image)
        .bind(&new_donation.location_address)
        .bind(new_donation.latitude)
        .bind(new_donation.longitude)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find donation by ID
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM donations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// List donations visible in the given scope
    pub async fn list(scope: DonationScope, pool: &PgPool) -> Result<Vec<Self>> {
        match scope {
            DonationScope::PendingMarketplace => sqlx::query_as::<_, Self>(
                "SELECT * FROM donations WHERE status = 'pending' ORDER BY created_at DESC",
            )
            .fetch_all(pool)
            .await
            .map_err(Into::into),
            DonationScope::OwnedBy(donor_id) => sqlx::query_as::<_, Self>(
                "SELECT * FROM donations WHERE donor_id = $1 ORDER BY created_at DESC",
            )
            .bind(donor_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into),
        }
    }

    /// Accept a pending donation, recording the accepter snapshot
    ///
    /// Returns the updated donation, or None if the donation is missing or
    /// no longer pending at write time.
    pub async fn accept(
        id: Uuid,
        accepter_id: Uuid,
        accepter_name: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE donations
             SET status = 'accepted',
                 accepted_by_id = $2,
                 accepted_by_name = $3,
                 updated_at = now()
             WHERE id = $1
               AND status = 'pending'
             RETURNING *",
        )
        .bind(id)
        .bind(accepter_id)
        .bind(accepter_name)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Complete pickup of an accepted donation
    ///
    /// Conditioned on the caller being the stored accepter. The accepter
    /// snapshot is left unchanged. Returns None when the donation is
    /// missing, not accepted, or accepted by someone else.
    pub async fn mark_picked_up(id: Uuid, accepter_id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE donations
             SET status = 'picked_up',
                 updated_at = now()
             WHERE id = $1
               AND status = 'accepted'
               AND accepted_by_id = $2
             RETURNING *",
        )
        .bind(id)
        .bind(accepter_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Cancel a pending donation, owner only
    ///
    /// Returns None when the donation is missing, not owned by `donor_id`,
    /// or no longer pending.
    pub async fn cancel(id: Uuid, donor_id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE donations
             SET status = 'cancelled',
                 updated_at = now()
             WHERE id = $1
               AND donor_id = $2
               AND status = 'pending'
             RETURNING *",
        )
        .bind(id)
        .bind(donor_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Expire every pending donation whose expiry time has passed
    ///
    /// Called by the periodic sweep. The status precondition makes the sweep
    /// safe against a concurrent accept.
    pub async fn expire_due(pool: &PgPool) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE donations
             SET status = 'expired',
                 updated_at = now()
             WHERE status = 'pending'
               AND expiry_time <= now()",
        )
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses() {
        let donation = Donation {
            id: Uuid::new_v4(),
            donor_id: Uuid::new_v4(),
            donor_name: "Alice".to_string(),
            food_name: "Bread".to_string(),
            quantity: "5 loaves".to_string(),
            description: None,
            expiry_time: Utc::now(),
            image: None,
            location_address: Some("12 Baker St".to_string()),
            latitude: Some(44.98),
            longitude: Some(-93.27),
            status: "pending".to_string(),
            accepted_by_id: None,
            accepted_by_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(donation.status().unwrap(), DonationStatus::Pending);
    }
}
