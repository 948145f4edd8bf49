use std::env;

pub(crate) const DEFAULT_ROUTE_PATH: &str = "/rekognition";
pub(crate) const DEFAULT_CORS_ALLOW_ORIGIN: &str = "*";

/// Runtime settings read from the Lambda environment.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub route_path: String,
    pub cors_allow_origin: String,
    /// Overrides the region `aws-config` would otherwise resolve.
    pub region: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            route_path: DEFAULT_ROUTE_PATH.to_string(),
            cors_allow_origin: DEFAULT_CORS_ALLOW_ORIGIN.to_string(),
            region: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let defaults = Self::default();
        Self {
            route_path: non_empty("ROUTE_PATH")
                .and_then(|v| normalize_route(&v))
                .unwrap_or(defaults.route_path),
            cors_allow_origin: non_empty("CORS_ALLOW_ORIGIN").unwrap_or(defaults.cors_allow_origin),
            region: non_empty("REKOGNITION_REGION"),
        }
    }
}

/// `rekognition/` becomes `/rekognition`. A route with no segments is rejected.
fn normalize_route(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("/{}", trimmed))
}
