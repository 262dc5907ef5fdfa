pub mod lease;
pub mod payment;
