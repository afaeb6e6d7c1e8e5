use rand::distr::{Alphanumeric, SampleString};

pub fn rand_env_key() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), 16)
}

pub fn object_values_path(env_key: &str) -> String {
    format!("/v2/object-values/{env_key}")
}

pub fn canonical_body() -> &'static str {
    r#"{"treatment":"on","payload":{"foo":"bar"},"isEligible":true,"isEnabled":true}"#
}
