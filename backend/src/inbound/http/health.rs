//! Orchestrator health checks.
//!
//! Both checks answer with the same `{ value, message, data }` envelope as
//! the API so monitors parse one response shape. `data` is always null.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

use crate::domain::Envelope;

/// Flipped once the listener is bound; the process is live for as long as it
/// can answer at all.
#[derive(Debug, Default)]
pub struct HealthState {
    accepting: AtomicBool,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.accepting.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.accepting.load(Ordering::Acquire)
    }
}

fn status_reply(up: bool, message: &str) -> HttpResponse {
    // `()` serialises as null, matching the failed shape.
    let body: Envelope<()> = if up {
        Envelope::ok(message, ())
    } else {
        Envelope::failure(message)
    };
    let mut reply = if up {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    reply
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(body)
}

/// 200 once the listener is bound, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Accepting requests", body = crate::inbound::http::schemas::EmptyEnvelopeSchema),
        (status = 503, description = "Still starting", body = crate::inbound::http::schemas::EmptyEnvelopeSchema)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    if state.is_ready() {
        status_reply(true, "ready")
    } else {
        status_reply(false, "starting")
    }
}

/// Always 200 while the process can serve.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Process is serving", body = crate::inbound::http::schemas::EmptyEnvelopeSchema)
    )
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    status_reply(true, "live")
}
