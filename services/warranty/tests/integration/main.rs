
mod auth_test;
mod catalog_test;
mod claim_test;
mod invoice_test;
mod registration_test;
