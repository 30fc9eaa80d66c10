//! Clients for the third-party HTTP APIs.
//!
//! Both clients share the same conventions: a `reqwest::Client` built once
//! with a fixed timeout, typed response structs, and explicit mapping of
//! connect/timeout failures into readable error messages.

pub mod nominatim;
pub mod randomuser;

pub use nominatim::NominatimClient;
pub use randomuser::RandomUserClient;
