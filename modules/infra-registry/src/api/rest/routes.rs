use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};

use crate::api::rest::dto::RestResource;
use crate::api::rest::handlers::{self, ServiceInfo};
use crate::domain::service::ResourceService;

pub const SERVICE_NAME: &str = "City Infrastructure API";

/// Collection routes (with and without trailing slash) plus item routes for
/// one registry.
pub fn register_resource<R: RestResource>(
    router: Router,
    service: Arc<ResourceService<R>>,
) -> Router {
    let collection = || get(handlers::list::<R>).post(handlers::create::<R>);

    let resource = Router::new()
        .route(R::PATH, collection())
        .route(&format!("{}/", R::PATH), collection())
        .route(
            &format!("{}/{{id}}", R::PATH),
            get(handlers::get::<R>)
                .put(handlers::update::<R>)
                .delete(handlers::delete::<R>),
        )
        .layer(Extension(service));

    router.merge(resource)
}

/// Root and health probes. `endpoints` lists the registered collection paths.
pub fn register_probes(router: Router, endpoints: Vec<&'static str>) -> Router {
    let info = ServiceInfo {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
    };

    let probes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .layer(Extension(info));

    router.merge(probes)
}
