//! Configuration panel component.

use leptos::*;

use crate::config::{CONFIG, MODE};

/// Read-only view of the resolved configuration record.
///
/// Shows the derived endpoints and gates, plus the full record as JSON for
/// copy-paste into bug reports.
#[component]
pub fn ConfigPanel() -> impl IntoView {
    let config = &*CONFIG;
    let json = serde_json::to_string_pretty(config).unwrap_or_default();

    view! {
        <div class="config-panel">
            <h2>"Runtime Configuration"</h2>
            <table class="config-table">
                <tr>
                    <td>"API endpoint"</td>
                    <td>{config.api_endpoint()}</td>
                </tr>
                <tr>
                    <td>"Backend URL"</td>
                    <td>{config.backend_url().to_string()}</td>
                </tr>
                <tr>
                    <td>"API version"</td>
                    <td>{config.backend.api_version.as_str()}</td>
                </tr>
                <tr>
                    <td>"Frontend URL"</td>
                    <td>{config.frontend_url().to_string()}</td>
                </tr>
                <tr>
                    <td>"Mode"</td>
                    <td>{MODE.as_str()}</td>
                </tr>
                <tr>
                    <td>"Dry run"</td>
                    <td>{if config.runtime.dry_run { "on" } else { "off" }}</td>
                </tr>
            </table>
            <pre class="config-json">{json}</pre>
        </div>
    }
}
