pub mod analysis;
pub mod arts;
pub mod audit;
pub mod auth;
pub mod documents;
pub mod lots;
pub mod nfe;
pub mod notifications;
pub mod professionals;
pub mod properties;
pub mod settings;
