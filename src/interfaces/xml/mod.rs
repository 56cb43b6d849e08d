//! PxPay XML wire format: request envelopes out, reply messages in.

pub mod envelope;
pub mod message;

pub use envelope::encode;
pub use message::GatewayMessage;
