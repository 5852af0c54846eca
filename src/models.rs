pub mod analysis;
pub mod art;
pub mod audit;
pub mod auth;
pub mod lot;
pub mod nfe;
pub mod notification;
pub mod professional;
pub mod property;
pub mod settings;
