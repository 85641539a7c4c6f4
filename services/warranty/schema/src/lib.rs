//! sea-orm entities for the warranty service.

pub mod product_registrations;
pub mod products;
pub mod survey_responses;
pub mod users;
pub mod warranty_claims;
