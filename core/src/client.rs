//! RGB REST API client.
//!
//! # Design
//! `RgbRestClient` holds an immutable [`ClientConfig`] and a transport handle,
//! and carries no mutable state between calls. Each remote method is a thin
//! composition: a `build_*` method produces an `HttpRequest`, the transport
//! executes it, and [`RgbRestClient::parse_response`] validates the envelope
//! and types the `data` payload. The public operation then hands that future
//! to the dispatcher, which presents it either as a [`Deferred`] value or
//! through a completion callback.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{ClientConfig, ClientOptions};
use crate::dispatch::{deferred, dispatch, Deferred};
use crate::envelope::{parse_data, parse_success_response};
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::path::{format_method_path, Params};
use crate::transport::{read_response, Transport};
use crate::types::{
    Allocations, IssueFungibleOptions, IssueFungibleRequest, IssuedAsset, WalletUtxos,
    WalletUtxosOptions,
};

const ISSUE_FUNGIBLE_PATH: &str = ":network/fungible/issue";
const WALLET_UTXOS_PATH: &str = ":network/wallet/utxos";

/// Client for the RGB REST API.
///
/// Operations run on the current tokio runtime; started outside one, they
/// complete immediately with `ClientError::NoRuntime`. Calls are independent
/// of each other and may run concurrently.
#[derive(Debug, Clone)]
pub struct RgbRestClient {
    config: ClientConfig,
    transport: Transport,
}

impl Default for RgbRestClient {
    fn default() -> Self {
        Self::new(ClientOptions::default())
    }
}

impl RgbRestClient {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            config: options.into(),
            transport: Transport::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn network(&self) -> &str {
        self.config.network()
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Full URL of a method path relative to the API root.
    ///
    /// The base URL already ends in `/`, so a leading `/` left by an empty
    /// url parameter is dropped.
    pub fn endpoint_url(&self, method_path: &str, params: &Params) -> String {
        let path = format_method_path(method_path, params);
        format!("{}{}", self.config.base_url(), path.trim_start_matches('/'))
    }

    /// Build a GET request for any method path.
    pub fn build_get(&self, method_path: &str, params: &Params) -> HttpRequest {
        HttpRequest::get(self.endpoint_url(method_path, params))
    }

    /// Build a POST request for any method path with a JSON body.
    pub fn build_post<B: Serialize>(
        &self,
        method_path: &str,
        params: &Params,
        body: &B,
    ) -> Result<HttpRequest> {
        let body = serde_json::to_string(body)?;
        Ok(HttpRequest::post(self.endpoint_url(method_path, params), body))
    }

    pub fn build_issue_fungible(&self, input: &IssueFungibleRequest) -> Result<HttpRequest> {
        self.build_post(ISSUE_FUNGIBLE_PATH, &self.network_params(), input)
    }

    pub fn build_wallet_utxos(
        &self,
        wallet_descriptor: &str,
        options: WalletUtxosOptions,
    ) -> HttpRequest {
        let params = self
            .network_params()
            .query("walletDescriptor", wallet_descriptor)
            .query_opt("keyRangeStartIdx", options.key_range_start_idx)
            .query_opt("keyRangeCount", options.key_range_count);
        self.build_get(WALLET_UTXOS_PATH, &params)
    }

    /// Interpret a raw response: decode, map error statuses, unwrap the
    /// success envelope and type its `data`.
    pub fn parse_response<T: DeserializeOwned>(
        method: HttpMethod,
        response: HttpResponse,
    ) -> Result<T> {
        let body = read_response(method, response)?;
        let data = parse_success_response(method, body)?;
        parse_data(method, data)
    }

    /// Start any prepared request and return a deferred result.
    pub fn call<T>(&self, request: HttpRequest) -> Deferred<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        deferred(self.operation(Ok(request)))
    }

    /// Start any prepared request and deliver the result to `callback`.
    pub fn call_with_callback<T, C>(&self, request: HttpRequest, callback: C)
    where
        T: DeserializeOwned + Send + 'static,
        C: FnOnce(Result<T>) + Send + 'static,
    {
        dispatch(self.operation(Ok(request)), Box::new(callback));
    }

    /// Issue a new fungible asset.
    pub fn issue_fungible(
        &self,
        ticker: &str,
        name: &str,
        precision: u8,
        allocations: impl Into<Allocations>,
        options: IssueFungibleOptions,
    ) -> Deferred<IssuedAsset> {
        let input = IssueFungibleRequest::new(ticker, name, precision, allocations, options);
        deferred(self.operation(self.build_issue_fungible(&input)))
    }

    pub fn issue_fungible_with_callback<C>(
        &self,
        ticker: &str,
        name: &str,
        precision: u8,
        allocations: impl Into<Allocations>,
        options: IssueFungibleOptions,
        callback: C,
    ) where
        C: FnOnce(Result<IssuedAsset>) + Send + 'static,
    {
        let input = IssueFungibleRequest::new(ticker, name, precision, allocations, options);
        dispatch(
            self.operation(self.build_issue_fungible(&input)),
            Box::new(callback),
        );
    }

    /// List the UTXOs of the wallet derived from `wallet_descriptor`.
    pub fn wallet_utxos(
        &self,
        wallet_descriptor: &str,
        options: WalletUtxosOptions,
    ) -> Deferred<WalletUtxos> {
        let request = self.build_wallet_utxos(wallet_descriptor, options);
        deferred(self.operation(Ok(request)))
    }

    pub fn wallet_utxos_with_callback<C>(
        &self,
        wallet_descriptor: &str,
        options: WalletUtxosOptions,
        callback: C,
    ) where
        C: FnOnce(Result<WalletUtxos>) + Send + 'static,
    {
        let request = self.build_wallet_utxos(wallet_descriptor, options);
        dispatch(self.operation(Ok(request)), Box::new(callback));
    }

    fn network_params(&self) -> Params {
        Params::new().url("network", self.config.network())
    }

    fn operation<T>(
        &self,
        request: Result<HttpRequest>,
    ) -> impl Future<Output = Result<T>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let transport = self.transport.clone();
        async move {
            let request = request?;
            let method = request.method;
            let response = transport.execute(request).await?;
            Self::parse_response(method, response)
        }
    }
}
