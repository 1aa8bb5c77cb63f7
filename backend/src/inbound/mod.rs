//! Inbound adapters translating external requests into driving-port calls.
//!
//! Only HTTP exists today; framework types stay inside [`http`].

pub mod http;
