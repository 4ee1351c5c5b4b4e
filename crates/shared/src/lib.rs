//! Locatr Shared - wire types for the Engine and its clients
//!
//! This crate contains all types shared between the Engine (server) and the
//! client SDK:
//! - Request bodies and list query parameters
//! - Response envelopes (success, list with pagination, errors)
//! - Error codes
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, chrono and the domain crate
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain newtypes on the wire** - DTOs carry plain strings and integers

pub mod dto;
pub mod requests;
pub mod responses;

pub use dto::LocationData;
pub use requests::{LocationPayload, LocationQuery, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use responses::{
    AuthResponse, DataResponse, ErrorBody, ErrorCode, ErrorResponse, HealthResponse,
    ListResponse, MessageResponse, PageLinks, PageMeta, UnauthorizedResponse,
};
