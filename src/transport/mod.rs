//! HTTP transport shared by the address resolver, the provider submitter
//! and the self-updater.
//!
//! This module provides:
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The client abstraction ([`HttpClient`])
//! - The production client ([`ReqwestClient`])

mod client;
mod error;
mod message;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use message::{HttpClient, HttpRequest, HttpResponse};
