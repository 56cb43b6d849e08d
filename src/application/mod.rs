//! Application layer orchestrating the PxPay round-trips.
//!
//! `PxPayGateway` wires a transport to the payment record stores and maps
//! gateway replies to a `PaymentOutcome`.

pub mod gateway;
