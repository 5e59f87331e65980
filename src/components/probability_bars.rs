use leptos::prelude::*;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;

use crate::model::{BarRow, CLASS_LABELS};

/// Animated probability bars for a rendered prediction.
///
/// Fills mount at width 0 and move to their final width two animation frames
/// later, so the browser paints the zero state first and the CSS transition
/// has a starting point to animate from. The readouts are always final.
#[component]
pub fn ProbabilityBars(bars: Vec<BarRow>) -> impl IntoView {
    let (armed, set_armed) = signal(false);

    // Arm the final widths after two frames so the 0% state gets painted.
    Effect::new(move |_| {
        let window = match web_sys::window() {
            Some(window) => window,
            None => return,
        };
        let window_for_inner = window.clone();
        let outer = Closure::once(move || {
            let inner = Closure::once(move || set_armed.set(true));
            let _ = window_for_inner.request_animation_frame(inner.as_ref().unchecked_ref());
            inner.forget();
        });
        let _ = window.request_animation_frame(outer.as_ref().unchecked_ref());
        outer.forget();
    });

    let rows: Vec<_> = bars
        .into_iter()
        .map(|bar| {
            let percent = bar.percent;
            view! {
                <div class="progress-row">
                    <span class="progress-label">{bar.label}</span>
                    <div class="progress-bar">
                        <div
                            class="progress-bar-inner"
                            style:width=move || {
                                if armed.get() {
                                    format!("{}%", percent)
                                } else {
                                    "0%".to_string()
                                }
                            }
                        ></div>
                    </div>
                    <span class="progress-readout">{bar.readout}</span>
                </div>
            }
        })
        .collect();

    view! {
        <div class="probability-bars">
            <h3>"Class Probabilities:"</h3>
            {rows}
        </div>
    }
}

/// Dimmed placeholder bars shown while a request is in flight.
#[component]
pub fn PendingBars() -> impl IntoView {
    let rows: Vec<_> = CLASS_LABELS
        .iter()
        .map(|label| {
            view! {
                <div class="progress-row pending">
                    <span class="progress-label">{*label}</span>
                    <div class="progress-bar">
                        <div class="progress-bar-inner" style="width: 0%"></div>
                    </div>
                    <span class="progress-readout">"--"</span>
                </div>
            }
        })
        .collect();

    view! { <div class="probability-bars pending">{rows}</div> }
}
