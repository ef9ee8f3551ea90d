//! Asynchronous client for the RGB REST API.
//!
//! # Overview
//! Maps remote methods (fungible asset issuance, wallet UTXO listing) onto
//! HTTP endpoints under `scheme://host/api/<version>/`. Every call assembles
//! its endpoint from a `:token` path template, sends JSON over HTTP, and
//! unwraps the `{"status": "success", "data": ...}` envelope of the reply.
//!
//! # Design
//! - `RgbRestClient` is stateless beyond its immutable configuration.
//! - Request building and response parsing are pure (`build_*` /
//!   `parse_response`); only `Transport::execute` touches the network.
//! - Each operation can be awaited through a [`Deferred`] value or driven by
//!   a completion callback; both share one completion path.
//! - Errors keep "the service rejected the request" ([`ApiError`]) apart from
//!   "the call could not be completed" (other [`ClientError`] variants).

pub mod client;
pub mod config;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod http;
pub mod path;
pub mod transport;
pub mod types;

pub use client::RgbRestClient;
pub use config::{ClientConfig, ClientOptions};
pub use dispatch::{Callback, Deferred};
pub use error::{ApiError, ClientError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use path::Params;
pub use types::{
    Allocation, Allocations, IssueFungibleOptions, IssueFungibleRequest, IssuedAsset, Utxo,
    WalletUtxos, WalletUtxosOptions,
};
