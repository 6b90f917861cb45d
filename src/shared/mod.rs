//! Shared code for frontend, emitters and wire codec.

pub mod catalog;
pub mod typed_ids;
pub mod error;
