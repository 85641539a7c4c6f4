pub mod auth;
pub mod catalog;
pub mod claim;
pub mod invoice;
pub mod registration;
pub mod survey;
