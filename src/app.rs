use leptos::prelude::*;

use crate::pages::predict::PredictPage;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="app-layout">
            <main class="content">
                <PredictPage />
            </main>
        </div>
    }
}
