use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, ApiError};
use crate::components::probability_bars::{PendingBars, ProbabilityBars};
use crate::model::{build_payload, is_latest_request, PredictState, PredictionView, FEATURES};

#[component]
pub fn PredictPage() -> impl IntoView {
    let (state, set_state) = signal(PredictState::Idle);
    // Monotonic id for predict actions. A response only lands if no newer
    // action has been issued since; repeated submissions supersede rather
    // than race each other.
    let (latest_request, set_latest_request) = signal(0u64);

    let input_refs: Vec<NodeRef<leptos::html::Input>> =
        FEATURES.iter().map(|_| NodeRef::new()).collect();

    let refs_for_predict = input_refs.clone();
    let run_predict = move || {
        let raw_values: Vec<String> = refs_for_predict
            .iter()
            .map(|input| input.get().map(|el| el.value()).unwrap_or_default())
            .collect();
        let payload = build_payload(&raw_values);

        let request_id = latest_request.get_untracked() + 1;
        set_latest_request.set(request_id);
        set_state.set(PredictState::Pending);

        spawn_local(async move {
            let outcome = api::predict(&payload).await;
            if !is_latest_request(request_id, latest_request.get_untracked()) {
                // Superseded by a newer submission; drop this response.
                return;
            }
            match outcome {
                Ok(prediction) => {
                    set_state.set(PredictState::Rendered(PredictionView::new(
                        prediction.label,
                        &prediction.probabilities,
                    )));
                }
                Err(ApiError::Server(message)) => {
                    set_state.set(PredictState::Failed(message));
                }
                Err(error) => {
                    web_sys::console::error_1(&format!("predict failed: {}", error).into());
                    set_state.set(PredictState::Failed(
                        "Server error. Check console.".to_string(),
                    ));
                }
            }
        });
    };

    let field_rows: Vec<_> = FEATURES
        .iter()
        .enumerate()
        .map(|(idx, feature)| {
            let input_ref = input_refs[idx];
            let next_ref = input_refs.get(idx + 1).copied();
            let run = run_predict.clone();
            view! {
                <div class="form-field">
                    <label class="form-field-label">{feature.label}</label>
                    <input
                        type="number"
                        step="any"
                        name=feature.key
                        class="input form-field-input"
                        placeholder="--"
                        node_ref=input_ref
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() != "Enter" {
                                return;
                            }
                            ev.prevent_default();
                            match next_ref {
                                Some(next) => {
                                    if let Some(el) = next.get() {
                                        let _ = el.focus();
                                    }
                                }
                                None => run(),
                            }
                        }
                    />
                </div>
            }
        })
        .collect();

    let run_for_submit = run_predict.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        run_for_submit();
    };

    view! {
        <div class="page predict-page">
            <h2>"Wine Quality Prediction"</h2>
            <p class="page-description">
                "Enter the chemical measurements of a wine sample to estimate its quality band. "
                "Leave a field blank if the value is unknown."
            </p>

            <form class="predict-form" on:submit=on_submit>
                <div class="form-fields-grid">{field_rows}</div>
                <button type="submit" class="btn btn-primary">
                    "Predict"
                </button>
            </form>

            <div class="predict-result">
                {move || match state.get() {
                    PredictState::Idle => view! { <div class="result-idle"></div> }.into_any(),
                    PredictState::Pending => view! {
                        <div class="result-pending">
                            <span class="result-label">"Predicting..."</span>
                            <PendingBars />
                        </div>
                    }.into_any(),
                    PredictState::Rendered(prediction) => view! {
                        <div class="result-rendered">
                            <span class="result-label">
                                <strong>"Prediction: "</strong>
                                {prediction.label.clone()}
                            </span>
                            <ProbabilityBars bars=prediction.bars.clone() />
                        </div>
                    }.into_any(),
                    PredictState::Failed(message) => view! {
                        <div class="result-error">
                            <span class="status-text status-error">{message}</span>
                        </div>
                    }.into_any(),
                }}
            </div>
        </div>
    }
}
