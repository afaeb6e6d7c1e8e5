/// The version of the crate.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Treatment assigned to an entity that is not part of a flag's treatment.
///
/// Every query method also falls back to this treatment when the evaluation fails.
pub const TREATMENT_OFF: &str = "off";

/// Treatment assigned to an entity that is part of a flag's treatment.
pub const TREATMENT_ON: &str = "on";

pub(crate) const OBJECT_VALUES_PATH: &str = "v2/object-values";

#[cfg(test)]
pub mod test_constants {
    pub const MOCK_KEY: &str = "key";
    pub const MOCK_PATH: &str = "/v2/object-values/key";
}
