//! Build-time configuration.

/// Origin of the CV-analysis API.
///
/// Override at build time with `CVADMIN_API_URL`.
pub const API_URL: &str = match option_env!("CVADMIN_API_URL") {
    Some(url) => url,
    None => "https://api.smartcareerassistant.online",
};
