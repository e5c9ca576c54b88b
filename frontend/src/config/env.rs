//! Environment access for configuration loading.
//!
//! All variable reads go through an explicit [`Environment`] mapping instead
//! of ad-hoc `std::env` calls scattered through the call chain. The mapping
//! is built once (from the process environment on native targets, from
//! compile-time baked values on wasm) and injected into
//! [`AppConfig::load`](crate::config::AppConfig::load), so tests can supply a
//! synthetic environment.

use std::collections::HashMap;

// =============================================================================
// Variable names
// =============================================================================

/// Environment variable names consumed by the frontend.
pub mod vars {
    /// Explicit backend base-URL override.
    pub const BACKEND_URL: &str = "RESEARCH_BACKEND_URL";

    /// Backend API version selector (`v1` or `v2`).
    pub const API_VERSION: &str = "RESEARCH_API_VERSION";

    /// Dry-run gate. Only the literal `true` (any case) enables it.
    pub const DRY_RUN: &str = "RESEARCH_DRY_RUN";

    /// Gate for the v2 research API endpoint.
    pub const ENABLE_V2_API: &str = "RESEARCH_ENABLE_V2_API";

    /// Port the frontend dev server listens on.
    pub const FRONTEND_PORT: &str = "RESEARCH_FRONTEND_PORT";

    /// Host the frontend is served from.
    pub const FRONTEND_HOST: &str = "RESEARCH_FRONTEND_HOST";

    /// Fully-qualified frontend URL.
    pub const FRONTEND_URL: &str = "RESEARCH_FRONTEND_URL";

    /// Deployment hostname injected by the hosting platform.
    pub const VERCEL_URL: &str = "VERCEL_URL";

    /// Execution mode: `development` or `production`.
    pub const MODE: &str = "RESEARCH_ENV";
}

// =============================================================================
// Parsing helpers
// =============================================================================

/// Return `value` if it is defined and non-empty, otherwise warn and return
/// `default`. Never fails.
pub fn string_or_default(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            log::warn!("Environment variable not set, using default value: {default}");
            default.to_string()
        }
    }
}

/// Parse a boolean variable.
///
/// An undefined or empty value yields `default`. Any other value is `true`
/// iff it lower-cases to the literal `true`. Everything else, including
/// `1`, `yes` and `false`, is `false` with no diagnostic.
pub fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value {
        None | Some("") => default,
        Some(v) => v.eq_ignore_ascii_case("true"),
    }
}

/// Parse a port variable.
///
/// An undefined or empty value warns and yields `default`, like
/// [`string_or_default`]. A value that is not a valid `u16` also warns and
/// yields `default`.
pub fn parse_port(value: Option<&str>, default: u16) -> u16 {
    match value {
        None | Some("") => {
            log::warn!("Environment variable not set, using default value: {default}");
            default
        }
        Some(v) => match v.trim().parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                log::warn!("Invalid port value '{v}', using default value: {default}");
                default
            }
        },
    }
}

// =============================================================================
// Execution mode
// =============================================================================

/// Ambient execution mode of the application.
///
/// Anything other than the exact literals `development` and `production`
/// maps to [`ExecutionMode::Unspecified`], for which both predicates are
/// false.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Local development build.
    Development,
    /// Deployed production build.
    Production,
    /// Mode variable missing or unrecognized.
    #[default]
    Unspecified,
}

impl ExecutionMode {
    /// Parse the mode variable.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("development") => ExecutionMode::Development,
            Some("production") => ExecutionMode::Production,
            _ => ExecutionMode::Unspecified,
        }
    }

    /// Mode of the ambient environment for the current target.
    pub fn from_ambient() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Environment::from_build().mode()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Environment::from_process().mode()
        }
    }

    /// True only for [`ExecutionMode::Development`].
    pub fn is_development(self) -> bool {
        matches!(self, ExecutionMode::Development)
    }

    /// True only for [`ExecutionMode::Production`].
    pub fn is_production(self) -> bool {
        matches!(self, ExecutionMode::Production)
    }

    /// Label for display.
    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionMode::Development => "development",
            ExecutionMode::Production => "production",
            ExecutionMode::Unspecified => "unspecified",
        }
    }
}

// =============================================================================
// Environment mapping
// =============================================================================

/// An injectable mapping of environment variable names to values.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// An environment with no variables set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot of the process environment (native targets).
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Variables baked into the binary at compile time.
    ///
    /// Wasm binaries have no process environment, so the known variables are
    /// captured with `option_env!` when the crate is built, the same way the
    /// bundler inlines public variables into a deployed frontend.
    pub fn from_build() -> Self {
        let baked: [(&str, Option<&str>); 9] = [
            (vars::BACKEND_URL, option_env!("RESEARCH_BACKEND_URL")),
            (vars::API_VERSION, option_env!("RESEARCH_API_VERSION")),
            (vars::DRY_RUN, option_env!("RESEARCH_DRY_RUN")),
            (vars::ENABLE_V2_API, option_env!("RESEARCH_ENABLE_V2_API")),
            (vars::FRONTEND_PORT, option_env!("RESEARCH_FRONTEND_PORT")),
            (vars::FRONTEND_HOST, option_env!("RESEARCH_FRONTEND_HOST")),
            (vars::FRONTEND_URL, option_env!("RESEARCH_FRONTEND_URL")),
            (vars::VERCEL_URL, option_env!("VERCEL_URL")),
            (vars::MODE, option_env!("RESEARCH_ENV")),
        ];

        Self {
            vars: baked
                .into_iter()
                .filter_map(|(key, value)| Some((key.to_string(), value?.to_string())))
                .collect(),
        }
    }

    /// Synthetic environment from `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw value of a variable, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// String variable with a default, see [`string_or_default`].
    pub fn string(&self, key: &str, default: &str) -> String {
        string_or_default(self.get(key), default)
    }

    /// Boolean variable with a default, see [`parse_bool`].
    pub fn flag(&self, key: &str, default: bool) -> bool {
        parse_bool(self.get(key), default)
    }

    /// Port variable with a default, see [`parse_port`].
    pub fn port(&self, key: &str, default: u16) -> u16 {
        parse_port(self.get(key), default)
    }

    /// Execution mode declared by this environment.
    pub fn mode(&self) -> ExecutionMode {
        ExecutionMode::parse(self.get(vars::MODE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_or_default() {
        assert_eq!(string_or_default(Some("value"), "d"), "value");
        assert_eq!(string_or_default(None, "d"), "d");
        assert_eq!(string_or_default(Some(""), "d"), "d");
    }

    #[test]
    fn test_parse_bool_true_literal_only() {
        assert!(parse_bool(Some("true"), false));
        assert!(parse_bool(Some("True"), false));
        assert!(parse_bool(Some("TRUE"), false));

        // Everything else is false, even common truthy spellings.
        assert!(!parse_bool(Some("1"), true));
        assert!(!parse_bool(Some("yes"), true));
        assert!(!parse_bool(Some("no"), true));
        assert!(!parse_bool(Some("false"), true));
    }

    #[test]
    fn test_parse_bool_missing_uses_default() {
        assert!(parse_bool(None, true));
        assert!(!parse_bool(None, false));
        assert!(parse_bool(Some(""), true));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(Some("8080"), 3000), 8080);
        assert_eq!(parse_port(None, 3000), 3000);
        assert_eq!(parse_port(Some(""), 3000), 3000);
        assert_eq!(parse_port(Some("not-a-port"), 3000), 3000);
        assert_eq!(parse_port(Some("99999"), 3000), 3000);
    }

    #[test]
    fn test_execution_mode_parse() {
        assert_eq!(
            ExecutionMode::parse(Some("development")),
            ExecutionMode::Development
        );
        assert_eq!(
            ExecutionMode::parse(Some("production")),
            ExecutionMode::Production
        );
        assert_eq!(ExecutionMode::parse(Some("staging")), ExecutionMode::Unspecified);
        assert_eq!(ExecutionMode::parse(Some("Production")), ExecutionMode::Unspecified);
        assert_eq!(ExecutionMode::parse(None), ExecutionMode::Unspecified);
    }

    #[test]
    fn test_predicates_never_both_true() {
        for value in [Some("development"), Some("production"), Some("other"), Some(""), None] {
            let mode = ExecutionMode::parse(value);
            assert!(!(mode.is_development() && mode.is_production()));
        }
    }

    #[test]
    fn test_environment_lookup() {
        let env = Environment::from_pairs([(vars::FRONTEND_HOST, "example.org")]);
        assert_eq!(env.get(vars::FRONTEND_HOST), Some("example.org"));
        assert_eq!(env.get(vars::FRONTEND_PORT), None);

        assert_eq!(env.string(vars::FRONTEND_HOST, "localhost"), "example.org");
        assert_eq!(env.string(vars::FRONTEND_URL, "http://localhost:3000"), "http://localhost:3000");
        assert_eq!(env.port(vars::FRONTEND_PORT, 3000), 3000);
    }

    #[test]
    fn test_environment_mode() {
        let env = Environment::from_pairs([(vars::MODE, "development")]);
        assert!(env.mode().is_development());
        assert!(Environment::empty().mode() == ExecutionMode::Unspecified);
    }
}
