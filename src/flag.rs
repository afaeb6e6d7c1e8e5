use crate::details::EvaluationDetails;
use crate::errors::ClientError;
use crate::errors::ErrorKind::*;
use crate::model::ObjectValues;
use crate::Client;
use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A named handle to a feature flag, bound to the [`Client`] that minted it.
///
/// Each query method resolves all result fields from a single evaluation
/// request and never panics: [`FeatureFlag::get_treatment`], [`FeatureFlag::is_eligible`],
/// and [`FeatureFlag::is_enabled`] fall back to the safe "off"/disabled defaults on
/// failure, while [`FeatureFlag::get_details`] additionally carries the failure itself.
///
/// # Examples
///
/// ```no_run
/// use airship::Client;
///
/// #[tokio::main]
/// async fn main() {
///     let client = Client::new("ENVIRONMENT_KEY", "https://edge.example.com").unwrap();
///     let flag = client.flag("bitcoin-pay");
///
///     let entity = serde_json::json!({ "id": "user-1", "type": "User" });
///     if flag.is_enabled(&entity).await {
///         // serve the feature
///     }
/// }
/// ```
#[derive(Clone)]
pub struct FeatureFlag {
    name: String,
    client: Option<Client>,
}

impl FeatureFlag {
    pub(crate) fn new(name: &str, client: Option<Client>) -> Self {
        Self {
            name: name.to_owned(),
            client,
        }
    }

    /// The name of the flag.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the treatment value or codename assigned to the given entity
    /// under this flag.
    ///
    /// Returns [`crate::TREATMENT_OFF`] if the evaluation failed.
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
    pub async fn get_treatment<E: Serialize + ?Sized>(&self, entity: &E) -> String {
        self.get_details(entity).await.treatment
    }

    /// Returns whether the given entity is part of a population (sampled or
    /// yet to be sampled) associated with this flag.
    ///
    /// Returns `false` if the evaluation failed.
    pub async fn is_eligible<E: Serialize + ?Sized>(&self, entity: &E) -> bool {
        self.get_details(entity).await.is_eligible
    }

    /// Returns whether the given entity is sampled inside a population and
    /// given a non-off treatment under this flag.
    ///
    /// Returns `false` if the evaluation failed.
    pub async fn is_enabled<E: Serialize + ?Sized>(&self, entity: &E) -> bool {
        self.get_details(entity).await.is_enabled
    }

    /// Deserializes the JSON payload value associated with this flag for the
    /// given entity.
    ///
    /// Unlike the other query methods there is no meaningful default payload,
    /// so every failure surfaces as an error: an evaluation failure keeps its
    /// own kind, while a missing payload or one that does not decode into `T`
    /// is a [`crate::ErrorKind::PayloadDeserializationFailure`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use airship::Client;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct CopyPayload {
    ///     title: String,
    /// }
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = Client::new("ENVIRONMENT_KEY", "https://edge.example.com").unwrap();
    ///
    ///     let entity = serde_json::json!({ "id": "user-1" });
    ///     let payload: CopyPayload = client
    ///         .flag("homepage-copy")
    ///         .get_payload(&entity)
    ///         .await
    ///         .unwrap();
    /// }
    /// ```
    pub async fn get_payload<E: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        entity: &E,
    ) -> Result<T, ClientError> {
        let object_values = self.evaluate(entity).await?;
        let raw = match object_values.payload {
            Some(raw) => raw,
            None => {
                let msg = format!(
                    "The evaluation response for flag '{}' contained no payload.",
                    self.name
                );
                error!(event_id = PayloadDeserializationFailure.as_u8(); "{}", msg);
                return Err(ClientError::new(PayloadDeserializationFailure, msg));
            }
        };
        match serde_json::from_str(raw.get()) {
            Ok(payload) => Ok(payload),
            Err(parse_error) => {
                let msg = format!(
                    "Failed to deserialize the payload of flag '{}'. ({parse_error})",
                    self.name
                );
                error!(event_id = PayloadDeserializationFailure.as_u8(); "{}", msg);
                Err(ClientError::new(PayloadDeserializationFailure, msg))
            }
        }
    }

    /// Evaluates this flag for the given entity and returns an [`EvaluationDetails`]
    /// with every result field resolved from the single underlying request.
    ///
    /// This is the fail-visible form of the query methods: on failure the
    /// result fields hold their safe defaults and [`EvaluationDetails::error`]
    /// holds the failure.
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
    ///     let details = client.flag("bitcoin-pay").get_details(&entity).await;
    ///     if let Some(err) = &details.error {
    ///         eprintln!("evaluation failed: {err}");
    ///     }
    /// }
    /// ```
    pub async fn get_details<E: Serialize + ?Sized>(&self, entity: &E) -> EvaluationDetails {
        match self.evaluate(entity).await {
            Ok(object_values) => EvaluationDetails {
                flag: self.name.clone(),
                treatment: object_values.treatment,
                payload: object_values.payload,
                is_eligible: object_values.is_eligible,
                is_enabled: object_values.is_enabled,
                ..EvaluationDetails::default()
            },
            Err(err) => EvaluationDetails::from_err(&self.name, err),
        }
    }

    async fn evaluate<E: Serialize + ?Sized>(
        &self,
        entity: &E,
    ) -> Result<ObjectValues, ClientError> {
        match &self.client {
            Some(client) => client.evaluate(&self.name, entity).await,
            None => {
                let msg = format!(
                    "Cannot evaluate flag '{}', no default client is configured. Call `airship::configure` before `airship::flag`.",
                    self.name
                );
                warn!(event_id = UnconfiguredClient.as_u8(); "{}", msg);
                Err(ClientError::new(UnconfiguredClient, msg))
            }
        }
    }
}
