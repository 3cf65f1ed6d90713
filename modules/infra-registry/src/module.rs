use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::api::rest::dto::RestResource;
use crate::api::rest::routes;
use crate::domain::bridge::Bridge;
use crate::domain::service::ResourceService;
use crate::domain::water_quality::WaterQualitySample;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmRepository;

/// Composition root: both registries wired to one database.
#[derive(Clone)]
pub struct InfraRegistry {
    bridges: Arc<ResourceService<Bridge>>,
    samples: Arc<ResourceService<WaterQualitySample>>,
}

impl InfraRegistry {
    /// Bring the schema up to date, then build the services.
    ///
    /// # Errors
    /// Returns an error if a migration fails.
    pub async fn init(db: DatabaseConnection) -> anyhow::Result<Self> {
        migrate(&db).await?;

        let registry = Self {
            bridges: Arc::new(ResourceService::new(Arc::new(SeaOrmRepository::<Bridge>::new(
                db.clone(),
            )))),
            samples: Arc::new(ResourceService::new(Arc::new(
                SeaOrmRepository::<WaterQualitySample>::new(db),
            ))),
        };

        info!("Infrastructure registry initialized");
        Ok(registry)
    }

    /// Every registry route plus the root and health probes.
    #[must_use]
    pub fn router(&self) -> Router {
        let router = routes::register_resource(Router::new(), Arc::clone(&self.bridges));
        let router = routes::register_resource(router, Arc::clone(&self.samples));
        routes::register_probes(router, vec![Bridge::PATH, WaterQualitySample::PATH])
    }
}

/// Idempotent schema bootstrap.
///
/// # Errors
/// Returns an error if a migration fails.
pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    info!("Running database migrations");
    Migrator::up(db, None).await?;
    info!("Database migrations completed successfully");
    Ok(())
}
