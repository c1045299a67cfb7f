pub mod data;
pub mod machines;
pub mod models;

pub use data::donation::DonationData;
pub use machines::{DonationScope, DonationStatus};
pub use models::donation::{Donation, NewDonation};
