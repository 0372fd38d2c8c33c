//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase on the wire. Status and action strings are
//! parsed here so an unknown value is reported with its own error code.

pub mod checkout_dto;
pub mod common_dto;
pub mod product_dto;
pub mod stats_dto;

pub use checkout_dto::*;
pub use common_dto::*;
pub use product_dto::*;
pub use stats_dto::*;
