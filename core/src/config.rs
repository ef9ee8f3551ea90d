//! Client configuration.

/// Network targeted when none is given.
pub const DEFAULT_NETWORK: &str = "testnet";
/// Host (with optional port) of the public REST API server.
pub const DEFAULT_HOST: &str = "rgb.blockchainofthings.com";
/// Latest REST API version.
pub const DEFAULT_VERSION: &str = "1.1";

const API_PATH: &str = "/api/";

/// Options accepted when constructing a client.
///
/// Every field is optional; absent or empty values fall back to the
/// `DEFAULT_*` constants and `secure` defaults to `true` (https).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    pub network: Option<String>,
    pub host: Option<String>,
    pub secure: Option<bool>,
    pub version: Option<String>,
}

impl ClientOptions {
    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// Resolved configuration. Built once per client and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    network: String,
    base_url: String,
}

impl ClientConfig {
    pub fn network(&self) -> &str {
        &self.network
    }

    /// Root endpoint of the API, always ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl From<ClientOptions> for ClientConfig {
    fn from(options: ClientOptions) -> Self {
        let network = non_empty(options.network).unwrap_or_else(|| DEFAULT_NETWORK.to_string());
        let host = non_empty(options.host).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let version = non_empty(options.version).unwrap_or_else(|| DEFAULT_VERSION.to_string());
        let scheme = if options.secure.unwrap_or(true) {
            "https"
        } else {
            "http"
        };

        Self {
            network,
            base_url: format!("{scheme}://{host}{API_PATH}{version}/"),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::from(ClientOptions::default());
        assert_eq!(config.network(), "testnet");
        assert_eq!(config.base_url(), "https://rgb.blockchainofthings.com/api/1.1/");
    }

    #[test]
    fn explicit_options() {
        let config = ClientConfig::from(
            ClientOptions::default()
                .with_network("signet")
                .with_host("localhost:3060")
                .with_secure(false)
                .with_version("1.0"),
        );
        assert_eq!(config.network(), "signet");
        assert_eq!(config.base_url(), "http://localhost:3060/api/1.0/");
    }

    #[test]
    fn empty_strings_fall_back_to_defaults() {
        let config = ClientConfig::from(ClientOptions {
            network: Some(String::new()),
            host: Some(String::new()),
            secure: None,
            version: Some(String::new()),
        });
        assert_eq!(config, ClientConfig::from(ClientOptions::default()));
    }
}
