use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use config::ConfigError;
use governor::{clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter};

use crate::{
    api::state::AppState,
    config::{ThrottleConfig, ThrottleRate},
    error::AppError,
};

pub type KeyedLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Per-client request budgets. A scope without a limiter is unthrottled.
#[derive(Clone, Default)]
pub struct Throttles {
    pub anon: Option<Arc<KeyedLimiter>>,
    pub submissions: Option<Arc<KeyedLimiter>>,
}

impl Throttles {
    pub fn from_config(config: &ThrottleConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            anon: config.anon_rate()?.map(limiter),
            submissions: config.submissions_rate()?.map(limiter),
        })
    }
}

/// Spreads `requests` evenly over `per`, allowing the full count as a burst.
pub fn limiter(rate: ThrottleRate) -> Arc<KeyedLimiter> {
    let quota = Quota::with_period(rate.per / rate.requests.get())
        .unwrap_or_else(|| Quota::per_second(rate.requests))
        .allow_burst(rate.requests);
    Arc::new(RateLimiter::keyed(quota))
}

fn client_ip(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

fn check(limiter: Option<&KeyedLimiter>, scope: &str, request: &Request) -> Result<(), AppError> {
    let Some(limiter) = limiter else {
        return Ok(());
    };
    let ip = client_ip(request);
    limiter.check_key(&ip).map_err(|_| {
        tracing::warn!(%ip, scope, path = %request.uri().path(), "Request throttled");
        AppError::TooManyRequests
    })
}

pub async fn throttle_anon(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    check(state.throttles.anon.as_deref(), "anon", &request)?;
    Ok(next.run(request).await)
}

pub async fn throttle_submissions(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    check(state.throttles.submissions.as_deref(), "submissions", &request)?;
    Ok(next.run(request).await)
}
