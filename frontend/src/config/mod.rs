//! Application configuration.
//!
//! Centralized configuration for the Research Assistant frontend. The
//! environment is read exactly once into an immutable [`AppConfig`] record;
//! everything downstream receives the record (or the global [`CONFIG`]) and
//! derives URLs from it.
//!
//! # Backend URL resolution
//!
//! When no explicit override is configured, the backend base URL is resolved
//! through a fallback chain, first match wins:
//!
//! | Step | Source                                       |
//! |------|----------------------------------------------|
//! | 1    | `RESEARCH_BACKEND_URL` (trimmed, non-blank)  |
//! | 2    | Current page origin (browser only)           |
//! | 3    | `VERCEL_URL`, formatted as an HTTPS URL      |
//! | 4    | `http://localhost:8000`                      |
//!
//! Resolution never fails; the fixed fallback terminates the chain.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

mod env;
mod origin;

pub use env::{
    parse_bool, parse_port, string_or_default, vars, Environment, ExecutionMode,
};
#[cfg(target_arch = "wasm32")]
pub use origin::BrowserOrigin;
pub use origin::{FixedOrigin, NoOrigin, OriginProvider};

// =============================================================================
// Defaults
// =============================================================================

/// Backend base URL used when the whole resolution chain comes up empty.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default frontend dev-server port.
pub const DEFAULT_FRONTEND_PORT: u16 = 3000;

/// Default frontend host.
pub const DEFAULT_FRONTEND_HOST: &str = "localhost";

/// Default fully-qualified frontend URL.
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

// =============================================================================
// API version
// =============================================================================

/// Backend API version selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// Original research API.
    V1,
    /// Current research API.
    #[default]
    V2,
}

impl ApiVersion {
    /// Parse the version variable.
    ///
    /// A missing, empty, or unrecognized value warns and yields
    /// [`ApiVersion::V2`]; configuration loading never fails.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("") => {
                log::warn!("Environment variable not set, using default value: v2");
                ApiVersion::V2
            }
            Some("v1") => ApiVersion::V1,
            Some("v2") => ApiVersion::V2,
            Some(other) => {
                log::warn!("Unrecognized API version '{other}', using default value: v2");
                ApiVersion::V2
            }
        }
    }

    /// Version tag as it appears in the environment.
    pub fn as_str(self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Configuration record
// =============================================================================

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    /// Resolved base URL, scheme and host included.
    pub base_url: String,
    /// Always zero; the port travels inside `base_url`.
    pub port: u16,
    /// Selected API version.
    pub api_version: ApiVersion,
}

/// Runtime feature gates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// Skip side-effecting operations when set.
    pub dry_run: bool,
    /// Route requests to the v2 research endpoint.
    pub enable_v2_api: bool,
}

/// Frontend serving settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendConfig {
    /// Dev-server port.
    pub port: u16,
    /// Host the frontend is served from.
    pub host: String,
    /// Fully-qualified frontend URL.
    pub url: String,
}

/// The immutable application configuration record.
///
/// Built once per process by [`AppConfig::load`] (or lazily through
/// [`CONFIG`]) and treated as read-only thereafter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Backend connection settings.
    pub backend: BackendConfig,
    /// Runtime feature gates.
    pub runtime: RuntimeConfig,
    /// Frontend serving settings.
    pub frontend: FrontendConfig,
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve the backend base URL through the fallback chain documented in the
/// module docs. Never fails.
pub fn resolve_backend_base_url(env: &Environment, origin: &dyn OriginProvider) -> String {
    if let Some(url) = env.get(vars::BACKEND_URL) {
        let url = url.trim();
        if !url.is_empty() {
            return url.to_string();
        }
    }

    // Deployed frontends talk to their colocated backend by default.
    if let Some(page_origin) = origin.origin() {
        return page_origin;
    }

    if let Some(host) = env.get(vars::VERCEL_URL) {
        if !host.is_empty() {
            return format!("https://{host}");
        }
    }

    DEFAULT_BACKEND_URL.to_string()
}

fn strip_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

impl AppConfig {
    /// Build the configuration record from an environment mapping and an
    /// origin provider.
    pub fn load(env: &Environment, origin: &dyn OriginProvider) -> Self {
        Self {
            backend: BackendConfig {
                base_url: resolve_backend_base_url(env, origin),
                port: 0,
                api_version: ApiVersion::parse(env.get(vars::API_VERSION)),
            },
            runtime: RuntimeConfig {
                dry_run: env.flag(vars::DRY_RUN, false),
                enable_v2_api: env.flag(vars::ENABLE_V2_API, true),
            },
            frontend: FrontendConfig {
                port: env.port(vars::FRONTEND_PORT, DEFAULT_FRONTEND_PORT),
                host: env.string(vars::FRONTEND_HOST, DEFAULT_FRONTEND_HOST),
                url: env.string(vars::FRONTEND_URL, DEFAULT_FRONTEND_URL),
            },
        }
    }

    /// Build the record from the ambient environment of the current target:
    /// baked variables and the browser origin on wasm, the process
    /// environment on native.
    pub fn from_ambient() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::load(&Environment::from_build(), &BrowserOrigin)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::load(&Environment::from_process(), &NoOrigin)
        }
    }

    /// Backend base URL without a trailing slash.
    pub fn backend_url(&self) -> &str {
        strip_trailing_slash(&self.backend.base_url)
    }

    /// Full research API endpoint, versioned by the `enable_v2_api` gate.
    pub fn api_endpoint(&self) -> String {
        let endpoint = if self.runtime.enable_v2_api {
            "/api/research2"
        } else {
            "/api/research"
        };
        format!("{}{}", self.backend_url(), endpoint)
    }

    /// Frontend URL without a trailing slash.
    pub fn frontend_url(&self) -> &str {
        strip_trailing_slash(&self.frontend.url)
    }
}

// =============================================================================
// Global instance
// =============================================================================

/// Process-wide configuration, loaded on first access and immutable after.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_ambient);

/// Ambient execution mode, read once alongside [`CONFIG`].
pub static MODE: Lazy<ExecutionMode> = Lazy::new(ExecutionMode::from_ambient);

/// True when the ambient mode is exactly `development`.
pub fn is_development() -> bool {
    MODE.is_development()
}

/// True when the ambient mode is exactly `production`.
pub fn is_production() -> bool {
    MODE.is_production()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(pairs: &[(&str, &str)], origin: &dyn OriginProvider) -> AppConfig {
        AppConfig::load(&Environment::from_pairs(pairs.iter().copied()), origin)
    }

    #[test]
    fn test_override_wins_over_everything() {
        let config = load(
            &[
                (vars::BACKEND_URL, "  http://override:9999  "),
                (vars::VERCEL_URL, "app.vercel.app"),
            ],
            &FixedOrigin::new("https://origin.example.com"),
        );
        assert_eq!(config.backend.base_url, "http://override:9999");
    }

    #[test]
    fn test_blank_override_falls_through_to_origin() {
        let config = load(
            &[(vars::BACKEND_URL, "   ")],
            &FixedOrigin::new("https://origin.example.com"),
        );
        assert_eq!(config.backend.base_url, "https://origin.example.com");
    }

    #[test]
    fn test_platform_host_formatted_as_https() {
        let config = load(&[(vars::VERCEL_URL, "app.vercel.app")], &NoOrigin);
        assert_eq!(config.backend.base_url, "https://app.vercel.app");
    }

    #[test]
    fn test_development_fallback() {
        let config = load(&[], &NoOrigin);
        assert_eq!(config.backend.base_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.backend.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_backend_url_strips_one_trailing_slash() {
        let with_slash = load(&[(vars::BACKEND_URL, "http://x/")], &NoOrigin);
        assert_eq!(with_slash.backend_url(), "http://x");

        let without_slash = load(&[(vars::BACKEND_URL, "http://x")], &NoOrigin);
        assert_eq!(without_slash.backend_url(), "http://x");

        // Idempotent: trimming the trimmed value changes nothing.
        assert_eq!(strip_trailing_slash(with_slash.backend_url()), "http://x");
    }

    #[test]
    fn test_api_endpoint_versioning() {
        let v2 = load(
            &[
                (vars::BACKEND_URL, "http://x"),
                (vars::ENABLE_V2_API, "true"),
            ],
            &NoOrigin,
        );
        assert_eq!(v2.api_endpoint(), "http://x/api/research2");

        let v1 = load(
            &[
                (vars::BACKEND_URL, "http://x/"),
                (vars::ENABLE_V2_API, "false"),
            ],
            &NoOrigin,
        );
        assert_eq!(v1.api_endpoint(), "http://x/api/research");
    }

    #[test]
    fn test_frontend_url_strips_one_trailing_slash() {
        let config = load(&[(vars::FRONTEND_URL, "http://localhost:3000/")], &NoOrigin);
        assert_eq!(config.frontend_url(), "http://localhost:3000");
    }

    #[test]
    fn test_api_version_parsing() {
        assert_eq!(ApiVersion::parse(Some("v1")), ApiVersion::V1);
        assert_eq!(ApiVersion::parse(Some("v2")), ApiVersion::V2);
        assert_eq!(ApiVersion::parse(None), ApiVersion::V2);
        assert_eq!(ApiVersion::parse(Some("")), ApiVersion::V2);
        assert_eq!(ApiVersion::parse(Some("v3")), ApiVersion::V2);
    }

    #[test]
    fn test_defaults_with_empty_environment() {
        let config = load(&[], &NoOrigin);
        assert_eq!(config.backend.port, 0);
        assert_eq!(config.backend.api_version, ApiVersion::V2);
        assert!(!config.runtime.dry_run);
        assert!(config.runtime.enable_v2_api);
        assert_eq!(config.frontend.port, 3000);
        assert_eq!(config.frontend.host, "localhost");
        assert_eq!(config.frontend.url, "http://localhost:3000");
    }

    #[test]
    fn test_full_record_from_environment() {
        let config = load(
            &[
                (vars::BACKEND_URL, "https://api.example.com/"),
                (vars::API_VERSION, "v1"),
                (vars::DRY_RUN, "True"),
                (vars::ENABLE_V2_API, "false"),
                (vars::FRONTEND_PORT, "8080"),
                (vars::FRONTEND_HOST, "example.com"),
                (vars::FRONTEND_URL, "https://example.com"),
            ],
            &NoOrigin,
        );

        assert_eq!(config.backend.api_version, ApiVersion::V1);
        assert!(config.runtime.dry_run);
        assert!(!config.runtime.enable_v2_api);
        assert_eq!(config.frontend.port, 8080);
        assert_eq!(config.frontend.host, "example.com");
        assert_eq!(config.api_endpoint(), "https://api.example.com/api/research");
    }

    #[test]
    fn test_record_serialization() {
        let config = load(&[], &NoOrigin);
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["backend"]["baseUrl"], "http://localhost:8000");
        assert_eq!(json["backend"]["apiVersion"], "v2");
        assert_eq!(json["runtime"]["dryRun"], false);
        assert_eq!(json["runtime"]["enableV2Api"], true);
        assert_eq!(json["frontend"]["port"], 3000);

        let roundtrip: AppConfig = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, config);
    }
}
