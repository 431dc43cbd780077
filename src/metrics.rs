use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use emqam_auth::{AuthorizationOutcome, Tier};
use emqam_models::TopicDirection;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::{Duration, Instant};

/// Install the Prometheus recorder and spawn its upkeep task.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
            ],
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(handle)
}

/// Metrics middleware to track HTTP requests
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);
    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router exposing the Prometheus scrape endpoint.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

/// One tier decision.
pub fn track_authorization(tier: Tier, outcome: AuthorizationOutcome) {
    counter!("authorization_decisions_total", "tier" => tier.as_str(), "outcome" => outcome.as_str())
        .increment(1);
}

pub fn track_login(success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!("user_logins_total", "status" => status).increment(1);
}

/// Broker callback answers, by callback and verdict.
pub fn track_broker_auth(allowed: bool) {
    let status = if allowed { "allowed" } else { "denied" };
    counter!("broker_checks_total", "check" => "auth", "status" => status).increment(1);
}

pub fn track_broker_acl(direction: TopicDirection, allowed: bool) {
    let status = if allowed { "allowed" } else { "denied" };
    counter!("broker_checks_total", "check" => "acl", "direction" => direction.as_str(), "status" => status)
        .increment(1);
}

pub fn track_grant_created(direction: TopicDirection) {
    counter!("acl_grants_created_total", "direction" => direction.as_str()).increment(1);
}
