//! Domain types for the PxPay hosted checkout round-trip.

pub mod outcome;
pub mod payment;
pub mod ports;
pub mod request;
