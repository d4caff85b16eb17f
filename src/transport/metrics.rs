use crate::{ErrorKind, Resource};
use http::StatusCode;
use std::time::Duration;

pub(crate) struct InFlightGuard {
    gauge: metrics::Gauge,
}

impl InFlightGuard {
    pub(crate) fn new() -> Self {
        let gauge = metrics::gauge!("jenkins_api_inflight");
        gauge.increment(1.0);
        Self { gauge }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.gauge.decrement(1.0);
    }
}

fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

fn error_kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidConfig => "invalid_config",
        ErrorKind::RequestFailed => "request_failed",
        ErrorKind::Decode => "decode",
    }
}

pub(crate) fn record_outcome(
    resource: &Resource<'_>,
    status: Option<StatusCode>,
    latency: Duration,
    error_kind: Option<ErrorKind>,
) {
    let resource = resource.kind();
    let status_class = status.map(status_class).unwrap_or("transport");

    metrics::counter!(
        "jenkins_api_requests_total",
        "resource" => resource,
        "status_class" => status_class
    )
    .increment(1);
    metrics::histogram!(
        "jenkins_api_request_duration_seconds",
        "resource" => resource,
        "status_class" => status_class
    )
    .record(latency);

    if let Some(kind) = error_kind {
        metrics::counter!(
            "jenkins_api_errors_total",
            "resource" => resource,
            "kind" => error_kind_label(kind)
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_low_cardinality() {
        assert_eq!(status_class(StatusCode::OK), "2xx");
        assert_eq!(status_class(StatusCode::FOUND), "3xx");
        assert_eq!(status_class(StatusCode::NOT_FOUND), "4xx");
        assert_eq!(status_class(StatusCode::BAD_GATEWAY), "5xx");
        assert_eq!(error_kind_label(ErrorKind::Decode), "decode");
        assert_eq!(error_kind_label(ErrorKind::RequestFailed), "request_failed");
        assert_eq!(
            Resource::UserViewJobs {
                user: "alice",
                view: "mine"
            }
            .kind(),
            "user_view_jobs"
        );
    }

    #[test]
    fn recording_without_recorder_is_a_no_op() {
        let _guard = InFlightGuard::new();
        record_outcome(
            &Resource::AllJobs,
            None,
            Duration::from_millis(5),
            Some(ErrorKind::RequestFailed),
        );
    }
}
