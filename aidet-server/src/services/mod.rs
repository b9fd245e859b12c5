//! Service layer for aidet-server
//!
//! The vendor API client and the response interpreter.

pub mod sightengine_client;
pub mod verdict;

pub use sightengine_client::{SightengineClient, SightengineError};
pub use verdict::{Detection, DetectionDetails};
