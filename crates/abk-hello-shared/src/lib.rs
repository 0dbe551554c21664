//! Request validation and response shaping for the ABK hello Lambda.
//!
//! This crate holds everything the handler needs apart from the Lambda runtime:
//!
//! - [`HelloEvent`]: the API Gateway event fields we read, and raw input extraction
//! - [`RequestSchema`]: the fixed `deviceUuid`/`txId` schema
//! - [`HelloRequest`]: a request that passed validation
//! - [`ResponseBody`] and [`ApiGatewayResponse`]: the `{msg, txId}` body and its envelope
//! - [`ValidationError`]: why a request was rejected
//! - [`init_tracing`]: JSON-formatted tracing for CloudWatch Logs
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides input and event fixtures. Enable the
//! `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod error;
mod event;
pub mod logging;
mod requests;
mod response;
pub mod schema;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Result, ValidationError};
pub use event::{recover_tx_id, HelloEvent};
pub use logging::{init_tracing, LogFormat, LoggingConfig};
pub use requests::HelloRequest;
pub use response::{ApiGatewayResponse, HelloStatus, ResponseBody, ResponseHeaders, ResponseMsg};
pub use schema::{validate_input, RequestSchema};
