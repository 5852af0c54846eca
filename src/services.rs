pub mod activity_service;
pub mod auth;
pub mod compliance_service;
pub mod document_service;
pub mod nfe_service;
pub mod notification_service;
pub mod registry_service;
pub mod traceability_service;

#[cfg(test)]
pub(crate) mod test_support;
