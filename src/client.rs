use crate::builder::{ClientBuilder, Options};
use crate::constants::{OBJECT_VALUES_PATH, PKG_VERSION};
use crate::errors::ClientError;
use crate::errors::ErrorKind::*;
use crate::flag::FeatureFlag;
use crate::model::{EvaluationRequest, ObjectValues};
use arc_swap::ArcSwapOption;
use log::{debug, error};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde::Serialize;
use std::sync::Arc;

const AIRSHIP_UA_HEADER: &str = "X-Airship-UserAgent";

static DEFAULT_CLIENT: ArcSwapOption<Client> = ArcSwapOption::const_empty();

/// Sets the process-wide default [`Client`] used by [`flag`].
///
/// Intended to be called once at startup, before any [`flag`] call. The slot
/// expects a single writer: concurrent `configure` calls are last-writer-wins,
/// and a concurrent reader observes either the old or the new client.
///
/// # Examples
///
/// ```no_run
/// use airship::{configure, flag, Client};
///
/// #[tokio::main]
/// async fn main() {
///     let client = Client::new("ENVIRONMENT_KEY", "https://edge.example.com").unwrap();
///     configure(client);
///
///     let entity = serde_json::json!({ "id": "user-1" });
///     let enabled = flag("bitcoin-pay").is_enabled(&entity).await;
/// }
/// ```
pub fn configure(client: Client) {
    DEFAULT_CLIENT.store(Some(Arc::new(client)));
}

/// Returns a [`FeatureFlag`] bound to the process-wide default [`Client`].
///
/// The default client is captured at the time of this call. Until [`configure`]
/// is called, every query made through the returned handle fails with
/// [`crate::ErrorKind::UnconfiguredClient`] and falls back to its safe default value.
///
/// # Examples
///
/// ```no_run
/// use airship::{configure, flag, Client};
///
/// #[tokio::main]
/// async fn main() {
///     configure(Client::new("ENVIRONMENT_KEY", "https://edge.example.com").unwrap());
///
///     let entity = serde_json::json!({ "id": "user-1" });
///     let treatment = flag("bitcoin-pay").get_treatment(&entity).await;
/// }
/// ```
pub fn flag(name: &str) -> FeatureFlag {
    let client = DEFAULT_CLIENT.load_full();
    FeatureFlag::new(name, client.map(|c| c.as_ref().clone()))
}

/// The main component for evaluating feature flags against the Airship edge service.
///
/// Every query issues exactly one HTTP request; the client keeps no state
/// between requests and never caches results. A `Client` is cheap to clone and
/// safe to share, all clones use the same underlying HTTP connection pool.
///
/// # Examples
///
/// ```no_run
/// use airship::Client;
///
/// #[tokio::main]
/// async fn main() {
///     let client = Client::new("ENVIRONMENT_KEY", "https://edge.example.com").unwrap();
///
///     let entity = serde_json::json!({ "id": "user-1" });
///     let treatment = client.flag("bitcoin-pay").get_treatment(&entity).await;
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    http_client: reqwest::Client,
    evaluate_url: String,
}

impl Client {
    pub(crate) fn with_options(options: Options) -> Result<Self, ClientError> {
        let http_client = match options.http_client() {
            Some(custom) => custom.clone(),
            None => {
                let mut headers = HeaderMap::new();
                let user_agent = format!("Airship-Rust/{PKG_VERSION}").parse().map_err(|_| {
                    ClientError::new(
                        HttpClientInitFailure,
                        "Failed to construct the user agent header.".to_owned(),
                    )
                })?;
                headers.insert(AIRSHIP_UA_HEADER, user_agent);
                reqwest::Client::builder()
                    .timeout(*options.http_timeout())
                    .default_headers(headers)
                    .build()
                    .map_err(|init_error| {
                        ClientError::new(
                            HttpClientInitFailure,
                            format!("Failed to initialize the HTTP client. ({init_error})"),
                        )
                    })?
            }
        };
        // The edge URL is opaque, the caller supplies the scheme.
        let evaluate_url = format!(
            "{edge_url}/{OBJECT_VALUES_PATH}/{environment_key}",
            edge_url = options.edge_url(),
            environment_key = options.environment_key()
        );
        Ok(Self {
            http_client,
            evaluate_url,
        })
    }

    /// Creates a new [`ClientBuilder`] used to build a [`Client`].
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
    pub fn builder(environment_key: &str, edge_url: &str) -> ClientBuilder {
        ClientBuilder::new(environment_key, edge_url)
    }

    /// Creates a new [`Client`] with default options.
    ///
    /// # Errors
    ///
    /// This method fails if the internal [`reqwest::Client`] cannot be initialized.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use airship::Client;
    ///
    /// let client = Client::new("ENVIRONMENT_KEY", "https://edge.example.com").unwrap();
    /// ```
    pub fn new(environment_key: &str, edge_url: &str) -> Result<Self, ClientError> {
        ClientBuilder::new(environment_key, edge_url).build()
    }

    /// Returns a [`FeatureFlag`] that represents the flag with the given name,
    /// bound to this client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use airship::Client;
    ///
    /// let client = Client::new("ENVIRONMENT_KEY", "https://edge.example.com").unwrap();
    /// let flag = client.flag("bitcoin-pay");
    /// ```
    pub fn flag(&self, name: &str) -> FeatureFlag {
        FeatureFlag::new(name, Some(self.clone()))
    }

    pub(crate) async fn evaluate<E: Serialize + ?Sized>(
        &self,
        flag_name: &str,
        entity: &E,
    ) -> Result<ObjectValues, ClientError> {
        let request = EvaluationRequest {
            flag: flag_name,
            entity,
        };
        let body = match serde_json::to_vec(&request) {
            Ok(body) => body,
            Err(serialize_error) => {
                let msg = format!(
                    "Failed to serialize the entity while evaluating flag '{flag_name}'. ({serialize_error})"
                );
                error!(event_id = EntitySerializationFailure.as_u8(); "{}", msg);
                return Err(ClientError::new(EntitySerializationFailure, msg));
            }
        };

        let result = self
            .http_client
            .post(&self.evaluate_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await;

        match result {
            Ok(response) => match response.status().as_u16() {
                200 => match response.text().await {
                    Ok(body_str) => match serde_json::from_str::<ObjectValues>(body_str.as_str()) {
                        Ok(object_values) => {
                            debug!("Evaluation of flag '{flag_name}' was successful.");
                            Ok(object_values)
                        }
                        Err(parse_error) => {
                            let msg = format!("Evaluating flag '{flag_name}' was successful but the HTTP response content was invalid. ({parse_error})");
                            error!(event_id = InvalidHttpResponseContent.as_u8(); "{}", msg);
                            Err(ClientError::new(InvalidHttpResponseContent, msg))
                        }
                    },
                    Err(body_error) => {
                        let err = transport_error(flag_name, &body_error);
                        error!(event_id = err.kind.as_u8(); "{}", err);
                        Err(err)
                    }
                },
                code => {
                    let msg = format!("Unexpected HTTP response was received while evaluating flag '{flag_name}'. Status code: {code}");
                    error!(event_id = UnexpectedHttpResponse.as_u8(); "{}", msg);
                    Err(ClientError::new(UnexpectedHttpResponse, msg))
                }
            },
            Err(send_error) => {
                let err = transport_error(flag_name, &send_error);
                error!(event_id = err.kind.as_u8(); "{}", err);
                Err(err)
            }
        }
    }
}

fn transport_error(flag_name: &str, error: &reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::new(
            HttpRequestTimeout,
            format!("Request timed out while evaluating flag '{flag_name}'."),
        )
    } else {
        ClientError::new(
            HttpRequestFailure,
            format!("Unexpected error occurred while evaluating flag '{flag_name}'. It is most likely due to a local network issue. ({error})"),
        )
    }
}

#[cfg(test)]
mod evaluate_tests {
    use crate::client::AIRSHIP_UA_HEADER;
    use crate::constants::test_constants::{MOCK_KEY, MOCK_PATH};
    use crate::constants::PKG_VERSION;
    use crate::errors::ErrorKind;
    use crate::Client;
    use serde_json::json;

    #[tokio::test]
    async fn evaluate_success() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", MOCK_PATH)
            .match_header("content-type", "application/json")
            .match_header(
                AIRSHIP_UA_HEADER,
                format!("Airship-Rust/{PKG_VERSION}").as_str(),
            )
            .match_body(mockito::Matcher::Exact(
                r#"{"flag":"nav-v2","entity":{"id":"u1"}}"#.to_owned(),
            ))
            .with_status(200)
            .with_body(r#"{"treatment":"on","payload":{"foo":"bar"},"isEligible":true,"isEnabled":true}"#)
            .create_async()
            .await;

        let client = Client::new(MOCK_KEY, server.url().as_str()).unwrap();
        let values = client
            .evaluate("nav-v2", &json!({"id": "u1"}))
            .await
            .unwrap();

        assert_eq!(values.treatment, "on");
        assert_eq!(values.payload.unwrap().get(), r#"{"foo":"bar"}"#);
        assert!(values.is_eligible);
        assert!(values.is_enabled);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn evaluate_unexpected_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", MOCK_PATH)
            .with_status(500)
            .create_async()
            .await;

        let client = Client::new(MOCK_KEY, server.url().as_str()).unwrap();
        let err = client
            .evaluate("nav-v2", &json!({"id": "u1"}))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::UnexpectedHttpResponse);
        assert!(err.kind.is_transport_failure());
        assert_eq!(
            format!("{err}").as_str(),
            "Unexpected HTTP response was received while evaluating flag 'nav-v2'. Status code: 500"
        );
    }

    #[tokio::test]
    async fn evaluate_invalid_response_content() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", MOCK_PATH)
            .with_status(200)
            .with_body(r#"{"treatment":"#)
            .create_async()
            .await;

        let client = Client::new(MOCK_KEY, server.url().as_str()).unwrap();
        let err = client
            .evaluate("nav-v2", &json!({"id": "u1"}))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::InvalidHttpResponseContent);
        assert!(err.kind.is_serialization_failure());
    }

    #[tokio::test]
    async fn evaluate_connection_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let edge_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = Client::new(MOCK_KEY, edge_url.as_str()).unwrap();
        let err = client
            .evaluate("nav-v2", &json!({"id": "u1"}))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::HttpRequestFailure);
        assert!(err.kind.is_transport_failure());
    }
}
