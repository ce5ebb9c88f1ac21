pub mod cars;
pub mod lots;
pub mod reports;
pub mod sessions;
pub mod users;
