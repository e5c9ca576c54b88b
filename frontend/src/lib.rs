//! Research Assistant - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for the Research Assistant. The interesting part
//! lives in [`config`]: the environment is resolved exactly once into an
//! immutable record, and every consumer derives its URLs from that record.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Environment (baked vars, page origin)                       │
//! │        │                                                     │
//! │        ▼                                                     │
//! │  config::AppConfig  (loaded once, immutable)                 │
//! │        │                                                     │
//! │        ▼                                                     │
//! │  App                                                         │
//! │  ├── Hero (title, description)                               │
//! │  └── ConfigPanel (resolved endpoints, gates, JSON dump)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Environment resolution and the configuration record
//! - [`components`] - UI components (Hero, ConfigPanel)

use leptos::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod components;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Components
pub use components::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Research Assistant - Starting Leptos App");
    log::info!("🔧 API endpoint: {}", config::CONFIG.api_endpoint());

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    view! {
        <div class="container">
            <Hero/>
            <ConfigPanel/>
        </div>
    }
}
