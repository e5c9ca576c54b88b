//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Research Assistant"</h1>
            <p class="subtitle">
                "Ask a research question and get a sourced, synthesized answer. "
                "This page shows the configuration the frontend resolved at startup."
            </p>
        </div>
    }
}
