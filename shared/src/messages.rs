//! Fixed response messages shared by the handler and the client.

/// Returned for every failure past request validation. Never carries upstream detail.
pub const GENERIC_FAILURE: &str = "Something went wrong";

pub const BODY_REQUIRED: &str = "request body is required";
pub const BODY_NOT_JSON: &str = "request body must be valid JSON";
pub const IMAGE_BASE64_REQUIRED: &str = "imageBase64 is required";

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const NOT_FOUND: &str = "Not found";
