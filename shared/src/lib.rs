//! Shared types and client logic for the EnvanterX inventory front end
//!
//! This crate holds everything that does not depend on the browser: the
//! note codec, the pending-partner reconciler, reporting helpers and the
//! seams (storage, export, clock) the WASM layer plugs browser APIs into.

pub mod auth;
pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod http;
pub mod models;
pub mod reconcile;
pub mod report;
pub mod storage;
pub mod types;
pub mod validation;

pub use codec::*;
pub use error::{ClientError, ClientResult};
pub use models::*;
pub use reconcile::PartnerReconciler;
pub use types::*;
