use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::donations::models::donation::Donation;

/// Public API representation of a donation
///
/// Field names follow the original client wire format (camelCase, nested
/// location and accepter objects).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationData {
    pub id: String,
    pub donor_id: String,
    pub donor_name: String,
    pub food_name: String,
    pub quantity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub expiry_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub location: LocationData,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_by: Option<AccepterData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Free-text address plus an optional coordinate pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<CoordinatesData>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoordinatesData {
    pub lat: f64,
    pub lng: f64,
}

/// Accepter snapshot: the NGO identity recorded at accept time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccepterData {
    pub id: String,
    pub name: String,
}

impl From<Donation> for DonationData {
    fn from(donation: Donation) -> Self {
        let coordinates = match (donation.latitude, donation.longitude) {
            (Some(lat), Some(lng)) => Some(CoordinatesData { lat, lng }),
            _ => None,
        };

        let accepted_by = match (donation.accepted_by_id, donation.accepted_by_name) {
            (Some(id), Some(name)) => Some(AccepterData {
                id: id.to_string(),
                name,
            }),
            _ => None,
        };

        Self {
            id: donation.id.to_string(),
            donor_id: donation.donor_id.to_string(),
            donor_name: donation.donor_name,
            food_name: donation.food_name,
            quantity: donation.quantity,
            description: donation.description,
            expiry_time: donation.expiry_time,
            image: donation.image,
            location: LocationData {
                address: donation.location_address,
                coordinates,
            },
            status: donation.status,
            accepted_by,
            created_at: donation.created_at,
            updated_at: donation.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample(status: &str, accepter: Option<(Uuid, &str)>) -> Donation {
        Donation {
            id: Uuid::new_v4(),
            donor_id: Uuid::new_v4(),
            donor_name: "Alice".to_string(),
            food_name: "Rice".to_string(),
            quantity: "20 kg".to_string(),
            description: Some("Long grain".to_string()),
            expiry_time: Utc::now(),
            image: Some("rice.jpg".to_string()),
            location_address: Some("12 Baker St".to_string()),
            latitude: Some(44.98),
            longitude: Some(-93.27),
            status: status.to_string(),
            accepted_by_id: accepter.map(|(id, _)| id),
            accepted_by_name: accepter.map(|(_, name)| name.to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_wire_round_trip() {
        let data = DonationData::from(sample("accepted", Some((Uuid::new_v4(), "Food Bank"))));
        let json = serde_json::to_string(&data).unwrap();
        let parsed: DonationData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_wire_uses_camel_case() {
        let data = DonationData::from(sample("pending", None));
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"foodName\""));
        assert!(json.contains("\"expiryTime\""));
        assert!(json.contains("\"donorId\""));
        assert!(!json.contains("\"food_name\""));
    }

    #[test]
    fn test_accepter_present_only_when_accepted() {
        let pending = DonationData::from(sample("pending", None));
        assert!(pending.accepted_by.is_none());
        let json = serde_json::to_string(&pending).unwrap();
        assert!(!json.contains("acceptedBy"));

        let accepter_id = Uuid::new_v4();
        let accepted = DonationData::from(sample("accepted", Some((accepter_id, "Food Bank"))));
        let accepter = accepted.accepted_by.unwrap();
        assert_eq!(accepter.id, accepter_id.to_string());
        assert_eq!(accepter.name, "Food Bank");
    }
}
