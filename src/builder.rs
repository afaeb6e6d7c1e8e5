use crate::errors::ClientError;
use crate::Client;
use std::time::Duration;

pub struct Options {
    environment_key: String,
    edge_url: String,
    http_timeout: Duration,
    http_client: Option<reqwest::Client>,
}

impl Options {
    pub(crate) fn environment_key(&self) -> &str {
        &self.environment_key
    }

    pub(crate) fn edge_url(&self) -> &str {
        &self.edge_url
    }

    pub(crate) fn http_timeout(&self) -> &Duration {
        &self.http_timeout
    }

    pub(crate) fn http_client(&self) -> &Option<reqwest::Client> {
        &self.http_client
    }
}

/// Builder to create an Airship [`Client`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use airship::Client;
///
/// let client = Client::builder("ENVIRONMENT_KEY", "https://edge.example.com")
///     .http_timeout(Duration::from_secs(2))
///     .build()
///     .unwrap();
/// ```
pub struct ClientBuilder {
    environment_key: String,
    edge_url: String,
    http_timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

    pub(crate) fn new(environment_key: &str, edge_url: &str) -> Self {
        Self {
            environment_key: environment_key.to_owned(),
            edge_url: edge_url.to_owned(),
            http_timeout: None,
            http_client: None,
        }
    }

    /// Sets the HTTP request timeout.
    /// Default value is `10` seconds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use airship::Client;
    ///
    /// let builder = Client::builder("ENVIRONMENT_KEY", "https://edge.example.com")
    ///     .http_timeout(Duration::from_secs(2));
    /// ```
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    /// Substitutes a custom [`reqwest::Client`] used for the evaluation requests.
    ///
    /// The given client is used verbatim, so its own timeout governs the
    /// requests instead of [`ClientBuilder::http_timeout`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use airship::Client;
    ///
    /// let builder = Client::builder("ENVIRONMENT_KEY", "https://edge.example.com")
    ///     .http_client(reqwest::Client::new());
    /// ```
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Creates a [`Client`] from the configuration made on the builder.
    ///
    /// # Errors
    ///
    /// This method fails if the internal [`reqwest::Client`] cannot be initialized.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use airship::Client;
    ///
    /// let client = Client::builder("ENVIRONMENT_KEY", "https://edge.example.com")
    ///     .http_timeout(Duration::from_secs(2))
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn build(self) -> Result<Client, ClientError> {
        Client::with_options(self.build_options())
    }

    pub(crate) fn build_options(self) -> Options {
        Options {
            environment_key: self.environment_key,
            edge_url: self.edge_url,
            http_timeout: self.http_timeout.unwrap_or(Self::DEFAULT_HTTP_TIMEOUT),
            http_client: self.http_client,
        }
    }
}

#[cfg(test)]
mod builder_tests {
    use crate::builder::ClientBuilder;
    use std::time::Duration;

    #[test]
    fn default_timeout_applied() {
        let options = ClientBuilder::new("key", "http://localhost").build_options();
        assert_eq!(*options.http_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn explicit_timeout_applied() {
        let options = ClientBuilder::new("key", "http://localhost")
            .http_timeout(Duration::from_secs(2))
            .build_options();
        assert_eq!(*options.http_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn custom_http_client_applied() {
        let options = ClientBuilder::new("key", "http://localhost")
            .http_client(reqwest::Client::new())
            .build_options();
        assert!(options.http_client().is_some());
    }
}
