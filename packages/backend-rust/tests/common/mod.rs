#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use style_trend_backend::config::{Config, PredictorConfig};

pub fn test_config(predictor_url: &str) -> Config {
    Config {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        log_level: "info".to_string(),
        predictor: PredictorConfig {
            base_url: predictor_url.to_string(),
            timeout: Duration::from_secs(2),
            max_retries: 0,
        },
    }
}

pub fn create_test_app(predictor_url: &str) -> Router {
    style_trend_backend::create_app(test_config(predictor_url))
}

/// Nothing listens on port 1 on loopback
pub const UNREACHABLE_PREDICTOR: &str = "http://127.0.0.1:1";

/// Serve `router` on an ephemeral loopback port and return its base URL
pub async fn spawn_predictor(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock predictor");
    let addr = listener.local_addr().expect("mock predictor addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

/// Predictor that ranks Kinesthetic first unless the learner is female, in
/// which case Visual wins
pub async fn spawn_ranking_predictor() -> String {
    async fn predict(Json(payload): Json<Value>) -> Json<Value> {
        if payload["Gender"] == 1 {
            Json(json!({
                "predicted_style": "Visual",
                "predictions": [
                    {"style": "Visual", "percentage": 64.2, "is_predicted": true},
                    {"style": "Auditory", "percentage": 20.1, "is_predicted": false},
                    {"style": "Reading/Writing", "percentage": 9.9, "is_predicted": false},
                    {"style": "Kinesthetic", "percentage": 5.8, "is_predicted": false}
                ]
            }))
        } else {
            Json(json!({
                "predicted_style": "Kinesthetic",
                "predictions": [
                    {"style": "Kinesthetic", "percentage": 48.0, "is_predicted": true},
                    {"style": "Visual", "percentage": 27.0, "is_predicted": false},
                    {"style": "Auditory", "percentage": 15.0, "is_predicted": false},
                    {"style": "Reading/Writing", "percentage": 10.0, "is_predicted": false}
                ]
            }))
        }
    }

    spawn_predictor(Router::new().route("/predict-style", post(predict))).await
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
