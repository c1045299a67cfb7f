use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::common::auth::{require_role, AuthUser};
use crate::common::types::Role;
use crate::domains::donations::{
    Donation, DonationData, DonationScope, DonationStatus, NewDonation,
};
use crate::error::ApiError;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    pub food_name: Option<String>,
    pub quantity: Option<String>,
    pub description: Option<String>,
    pub expiry_time: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub location: Option<LocationInput>,
}

#[derive(Debug, Deserialize)]
pub struct LocationInput {
    pub address: Option<String>,
    pub coordinates: Option<CoordinatesInput>,
}

#[derive(Debug, Deserialize)]
pub struct CoordinatesInput {
    pub lat: f64,
    pub lng: f64,
}

/// Create a donation listing (donor only)
pub async fn create_donation_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(payload): Json<CreateDonationRequest>,
) -> Result<(StatusCode, Json<DonationData>), ApiError> {
    let caller = require_role(auth.as_ref().map(|ext| &ext.0), &[Role::Donor])?;

    let food_name = required_text(payload.food_name, "foodName")?;
    let quantity = required_text(payload.quantity, "quantity")?;
    let expiry_time = payload
        .expiry_time
        .ok_or_else(|| ApiError::Validation("expiryTime is required".to_string()))?;

    if expiry_time < Utc::now() {
        return Err(ApiError::Validation(
            "expiryTime must not be in the past".to_string(),
        ));
    }

    let (location_address, coordinates) = match payload.location {
        Some(location) => (location.address, location.coordinates),
        None => (None, None),
    };

    let donation = Donation::create(
        NewDonation {
            donor_id: caller.user_id,
            donor_name: caller.name.clone(),
            food_name,
            quantity,
            description: payload.description,
            expiry_time,
            image: payload.image,
            location_address,
            latitude: coordinates.as_ref().map(|c| c.lat),
            longitude: coordinates.as_ref().map(|c| c.lng),
        },
        &state.db_pool,
    )
    .await?;

    tracing::info!(donation_id = %donation.id, donor_id = %caller.user_id, "Created donation");

    Ok((StatusCode::CREATED, Json(donation.into())))
}

/// List donations visible to the caller
///
/// NGOs see the open marketplace (pending only); donors see their own
/// listings whatever the status.
pub async fn list_donations_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<(StatusCode, Json<Vec<DonationData>>), ApiError> {
    let caller = require_role(auth.as_ref().map(|ext| &ext.0), &[])?;

    let scope = DonationScope::for_caller(caller.role, caller.user_id);
    let donations = Donation::list(scope, &state.db_pool).await?;

    let data = donations.into_iter().map(DonationData::from).collect();

    Ok((StatusCode::OK, Json(data)))
}

/// Accept a pending donation (NGO only)
pub async fn accept_donation_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<DonationData>), ApiError> {
    let caller = require_role(auth.as_ref().map(|ext| &ext.0), &[Role::Ngo])?;

    let updated = Donation::accept(id, caller.user_id, &caller.name, &state.db_pool).await?;

    match updated {
        Some(donation) => {
            tracing::info!(donation_id = %id, accepter_id = %caller.user_id, "Donation accepted");
            Ok((StatusCode::OK, Json(donation.into())))
        }
        // The conditional update matched nothing; re-read to say why
        None => match Donation::find_by_id(id, &state.db_pool).await? {
            None => Err(ApiError::NotFound("Donation not found".to_string())),
            Some(_) => Err(ApiError::InvalidState("Donation not available".to_string())),
        },
    }
}

/// Mark an accepted donation as picked up (accepting NGO only)
pub async fn pickup_donation_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<DonationData>), ApiError> {
    let caller = require_role(auth.as_ref().map(|ext| &ext.0), &[Role::Ngo])?;

    let updated = Donation::mark_picked_up(id, caller.user_id, &state.db_pool).await?;

    match updated {
        Some(donation) => {
            tracing::info!(donation_id = %id, accepter_id = %caller.user_id, "Donation picked up");
            Ok((StatusCode::OK, Json(donation.into())))
        }
        None => match Donation::find_by_id(id, &state.db_pool).await? {
            None => Err(ApiError::NotFound("Donation not found".to_string())),
            Some(donation) => {
                if donation.status()? != DonationStatus::Accepted {
                    Err(ApiError::InvalidState(
                        "Donation is not ready for pickup".to_string(),
                    ))
                } else {
                    Err(ApiError::Forbidden(
                        "Only the accepting NGO may complete pickup".to_string(),
                    ))
                }
            }
        },
    }
}

/// Cancel a pending donation (owning donor only)
pub async fn cancel_donation_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<DonationData>), ApiError> {
    let caller = require_role(auth.as_ref().map(|ext| &ext.0), &[Role::Donor])?;

    let updated = Donation::cancel(id, caller.user_id, &state.db_pool).await?;

    match updated {
        Some(donation) => {
            tracing::info!(donation_id = %id, donor_id = %caller.user_id, "Donation cancelled");
            Ok((StatusCode::OK, Json(donation.into())))
        }
        None => match Donation::find_by_id(id, &state.db_pool).await? {
            None => Err(ApiError::NotFound("Donation not found".to_string())),
            Some(donation) if donation.donor_id != caller.user_id => Err(ApiError::Forbidden(
                "Only the owning donor may cancel".to_string(),
            )),
            Some(_) => Err(ApiError::InvalidState(
                "Donation is no longer pending".to_string(),
            )),
        },
    }
}

/// Reject missing or empty required fields with a 400
fn required_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::Validation(format!("{} is required", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_rejects_blank() {
        assert!(required_text(Some("Rice".to_string()), "foodName").is_ok());
        assert!(required_text(Some("  ".to_string()), "foodName").is_err());
        assert!(required_text(None, "foodName").is_err());
    }
}
