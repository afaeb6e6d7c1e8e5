use crate::constants::TREATMENT_OFF;
use crate::ClientError;
use serde_json::value::RawValue;

/// Details of a flag evaluation's result.
///
/// All fields come from the same single request to the edge service. When the
/// evaluation fails, the result fields hold their safe defaults and [`EvaluationDetails::error`]
/// holds the failure.
#[derive(Default, Debug)]
pub struct EvaluationDetails {
    /// Name of the evaluated flag.
    pub flag: String,
    /// The treatment assigned to the entity under the flag.
    pub treatment: String,
    /// The raw JSON payload associated with the flag for the entity (if any).
    pub payload: Option<Box<RawValue>>,
    /// Whether the entity is part of a population (sampled or yet to be sampled)
    /// associated with the flag.
    pub is_eligible: bool,
    /// Whether the entity is sampled inside a population and given a non-off treatment.
    pub is_enabled: bool,
    /// Indicates whether the safe default values are used as the result of the evaluation.
    pub is_default_value: bool,
    /// Error in case the evaluation failed.
    pub error: Option<ClientError>,
}

impl EvaluationDetails {
    pub(crate) fn from_err(flag: &str, err: ClientError) -> Self {
        Self {
            flag: flag.to_owned(),
            treatment: TREATMENT_OFF.to_owned(),
            is_default_value: true,
            error: Some(err),
            ..EvaluationDetails::default()
        }
    }
}
