//! Optional Prometheus middleware gate.
//!
//! The app factory always wraps one middleware type; this gate either
//! delegates to `actix-web-prom` or passes requests straight through,
//! erasing the difference behind a boxed service.

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::PrometheusMetrics;
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct MetricsGate {
    metrics: Option<Arc<PrometheusMetrics>>,
}

impl MetricsGate {
    #[must_use]
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        Self {
            metrics: metrics.map(Arc::new),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self.metrics.clone() {
            Some(metrics) => {
                let pending = Compat::new((*metrics).clone()).new_transform(service);
                Box::pin(async move { Ok(boxed::service(pending.await?)) })
            }
            None => {
                let passthrough =
                    service.map(|response: ServiceResponse<B>| response.map_into_boxed_body());
                Box::pin(async move { Ok(boxed::service(passthrough)) })
            }
        }
    }
}
