use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Body of an evaluation request: the flag name plus the caller's entity,
/// passed through to the edge service verbatim.
#[derive(Serialize)]
pub(crate) struct EvaluationRequest<'a, E: Serialize + ?Sized> {
    pub flag: &'a str,
    pub entity: &'a E,
}

/// Body of an evaluation response. Missing and unknown fields are tolerated;
/// the payload stays raw until the caller asks for it.
#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ObjectValues {
    pub treatment: String,
    pub payload: Option<Box<RawValue>>,
    pub is_eligible: bool,
    pub is_enabled: bool,
}
