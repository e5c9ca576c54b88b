//! Page-origin detection as an injected capability.
//!
//! Backend URL resolution falls back to the current page origin when no
//! explicit override is configured, so deployed frontends talk to their
//! colocated backend without extra configuration. Making the origin a trait
//! keeps the resolution chain unit-testable without a browser.

/// Source of the current page origin, when one exists.
pub trait OriginProvider {
    /// The origin (`scheme://host[:port]`), or `None` when the runtime has
    /// no readable origin.
    fn origin(&self) -> Option<String>;
}

/// Provider for contexts without a page origin (native binaries, tests).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOrigin;

impl OriginProvider for NoOrigin {
    fn origin(&self) -> Option<String> {
        None
    }
}

/// Provider returning a preconfigured origin. Used in tests and by hosts
/// that know their origin ahead of time.
#[derive(Clone, Debug, Default)]
pub struct FixedOrigin(pub Option<String>);

impl FixedOrigin {
    /// Provider that always yields `origin`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self(Some(origin.into()))
    }
}

impl OriginProvider for FixedOrigin {
    fn origin(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Provider reading `window.location.origin` in the browser.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserOrigin;

#[cfg(target_arch = "wasm32")]
impl OriginProvider for BrowserOrigin {
    fn origin(&self) -> Option<String> {
        let origin = web_sys::window()?.location().origin().ok()?;
        if origin.is_empty() {
            None
        } else {
            Some(origin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_origin() {
        assert_eq!(NoOrigin.origin(), None);
    }

    #[test]
    fn test_fixed_origin() {
        let provider = FixedOrigin::new("https://research.example.com");
        assert_eq!(provider.origin().as_deref(), Some("https://research.example.com"));
        assert_eq!(FixedOrigin::default().origin(), None);
    }
}
