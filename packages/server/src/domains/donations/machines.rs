//! Donation lifecycle - pure decision logic
//!
//! The transition graph:
//!
//! ```text
//! pending ──► accepted ──► picked_up
//!    │
//!    ├──► cancelled   (donor, owner only)
//!    └──► expired     (time-driven sweep)
//! ```
//!
//! `picked_up`, `cancelled` and `expired` are terminal. Nothing re-enters
//! `pending`. The store enforces these rules with conditional updates; this
//! module is the single authority on which transitions exist.

use uuid::Uuid;

use crate::common::types::Role;

/// Donation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonationStatus {
    Pending,
    Accepted,
    PickedUp,
    Cancelled,
    Expired,
}

impl DonationStatus {
    /// Whether no further transition may leave this status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DonationStatus::PickedUp | DonationStatus::Cancelled | DonationStatus::Expired
        )
    }

    /// Whether the lifecycle permits moving from this status to `next`
    pub fn can_transition_to(&self, next: DonationStatus) -> bool {
        matches!(
            (self, next),
            (DonationStatus::Pending, DonationStatus::Accepted)
                | (DonationStatus::Pending, DonationStatus::Cancelled)
                | (DonationStatus::Pending, DonationStatus::Expired)
                | (DonationStatus::Accepted, DonationStatus::PickedUp)
        )
    }
}

impl std::fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DonationStatus::Pending => write!(f, "pending"),
            DonationStatus::Accepted => write!(f, "accepted"),
            DonationStatus::PickedUp => write!(f, "picked_up"),
            DonationStatus::Cancelled => write!(f, "cancelled"),
            DonationStatus::Expired => write!(f, "expired"),
        }
    }
}

impl std::str::FromStr for DonationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "pending" => Ok(DonationStatus::Pending),
            "accepted" => Ok(DonationStatus::Accepted),
            "picked_up" => Ok(DonationStatus::PickedUp),
            "cancelled" => Ok(DonationStatus::Cancelled),
            "expired" => Ok(DonationStatus::Expired),
            _ => Err(anyhow::anyhow!("Invalid donation status: {}", s)),
        }
    }
}

/// What a caller may see when listing donations
///
/// NGOs browse the open marketplace; everyone else sees only their own
/// listings. Mapping the caller to a scope here keeps the handlers free of
/// role conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonationScope {
    /// All donations still waiting for an accepter
    PendingMarketplace,
    /// Donations created by this donor
    OwnedBy(Uuid),
}

impl DonationScope {
    pub fn for_caller(role: Role, user_id: Uuid) -> Self {
        match role {
            Role::Ngo => DonationScope::PendingMarketplace,
            Role::Donor | Role::Admin => DonationScope::OwnedBy(user_id),
        }
    }
}
