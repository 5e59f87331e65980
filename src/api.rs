use serde::Deserialize;
use serde_json::{Map, Value};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// Wire shape of the `/predict` response. The server returns either an
/// `error` object or a prediction; older deployments name the label field
/// `prediction` instead of `predicted_label`, so both spellings are accepted.
#[derive(Debug, Clone, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default, alias = "prediction")]
    predicted_label: Option<String>,
    #[serde(default)]
    probabilities: Option<Vec<f64>>,
}

/// A decoded, validated prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub probabilities: Vec<f64>,
}

/// Failure modes of one predict cycle.
///
/// `Server` carries a message the backend chose for the user and is shown
/// verbatim. `Transport` covers rejected fetches, non-ok statuses and
/// malformed bodies; callers show a generic message and log the detail.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Server(String),
    Transport(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Server(message) => write!(f, "{}", message),
            ApiError::Transport(message) => write!(f, "request failed: {}", message),
        }
    }
}

fn js_error(context: &str, err: JsValue) -> ApiError {
    let detail = err.as_string().unwrap_or_else(|| format!("{:?}", err));
    ApiError::Transport(format!("{}: {}", context, detail))
}

/// POST the form payload to `/predict` and decode the response.
pub async fn predict(payload: &Map<String, Value>) -> Result<Prediction, ApiError> {
    let body = serde_json::to_string(payload)
        .map_err(|e| ApiError::Transport(format!("failed to encode payload: {}", e)))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init("/predict", &opts)
        .map_err(|e| js_error("failed to build request", e))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| js_error("failed to set request headers", e))?;

    let window = web_sys::window()
        .ok_or_else(|| ApiError::Transport("no window object".to_string()))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| js_error("fetch rejected", e))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| ApiError::Transport("fetch returned a non-Response value".to_string()))?;

    if !response.ok() {
        return Err(ApiError::Transport(format!(
            "server returned HTTP {}",
            response.status()
        )));
    }

    let json = JsFuture::from(
        response
            .json()
            .map_err(|e| js_error("response body is not JSON", e))?,
    )
    .await
    .map_err(|e| js_error("failed to read response body", e))?;

    let decoded: PredictResponse = serde_wasm_bindgen::from_value(json)
        .map_err(|e| ApiError::Transport(format!("failed to decode response: {}", e)))?;

    into_prediction(decoded)
}

/// Validate the wire response into either a prediction or an error.
fn into_prediction(response: PredictResponse) -> Result<Prediction, ApiError> {
    if let Some(message) = response.error {
        return Err(ApiError::Server(message));
    }
    let label = response
        .predicted_label
        .ok_or_else(|| ApiError::Transport("response is missing the prediction label".to_string()))?;
    let probabilities = response
        .probabilities
        .ok_or_else(|| ApiError::Transport("response is missing probabilities".to_string()))?;
    Ok(Prediction { label, probabilities })
}
