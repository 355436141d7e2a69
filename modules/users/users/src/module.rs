use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};
use users_sdk::UsersClient;

use crate::api::rest::routes;
use crate::config::UsersConfig;
use crate::domain::service::UsersService;
use crate::infra::images::LocalImageStore;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::SeaUserStore;
use crate::local_client::UsersLocalClient;

/// Composition root of the users module.
///
/// Owns the one service instance shared by the REST routes and the local
/// client.
#[derive(Clone)]
pub struct Users {
    service: Arc<UsersService>,
}

impl Users {
    /// Run migrations on `db` and wire the SeaORM store and the local
    /// image store into the service.
    pub async fn init(cfg: &UsersConfig, db: DatabaseConnection) -> anyhow::Result<Self> {
        info!("Initializing users module");
        debug!(
            "Loaded users config: default_page_size={}, max_page_size={}, image_root={}",
            cfg.default_page_size,
            cfg.max_page_size,
            cfg.images.root_dir.display()
        );

        Self::migrate(&db).await?;

        let store = Arc::new(SeaUserStore::new(db));
        let images = Arc::new(LocalImageStore::new(&cfg.images));
        let service = UsersService::new(store, images, cfg)?;

        Ok(Self {
            service: Arc::new(service),
        })
    }

    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running users database migrations");
        Migrator::up(db, None).await?;
        info!("Users database migrations completed successfully");
        Ok(())
    }

    pub fn register_rest(&self, router: axum::Router, max_body_bytes: usize) -> axum::Router {
        info!("Registering users REST routes");
        routes::register_routes(router, self.service.clone(), max_body_bytes)
    }

    /// Object-safe client for other in-process modules.
    pub fn client(&self) -> Arc<dyn UsersClient> {
        Arc::new(UsersLocalClient::new(self.service.clone()))
    }

    pub fn service(&self) -> Arc<UsersService> {
        self.service.clone()
    }
}
