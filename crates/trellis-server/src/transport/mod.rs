//! Transport adapters
//!
//! | Transport | Description |
//! |-----------|-------------|
//! | [`http`] | Rocket routes built from container endpoints |

pub mod http;
