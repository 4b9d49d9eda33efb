//! Composition root.

use std::sync::Arc;

use anyhow::Context as _;
use company_registry_sdk::CompanyRegistryClientV1;
use registry_auth::{ClockSource, SystemClock, TokenAuthority};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tokio::sync::broadcast;

use crate::config::{AppConfig, DatabaseConfig, SinkKind};
use crate::domain::events::EventDispatcher;
use crate::domain::ports::EventSink;
use crate::domain::service::{CompaniesService, UsersService};
use crate::infra::events::{BroadcastEventSink, NoopEventSink, PublishedEvent};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{SeaOrmCompaniesRepository, SeaOrmUsersRepository};
use crate::local_client::LocalClient;

/// Wired module instance: database, token authority, services, event dispatch.
pub struct CompanyRegistry {
    db: DatabaseConnection,
    users: Arc<UsersService>,
    companies: Arc<CompaniesService>,
    events: EventDispatcher,
    bus: Option<Arc<BroadcastEventSink>>,
}

impl CompanyRegistry {
    /// Connect, migrate and wire the module with the system clock.
    ///
    /// # Errors
    /// Fails on an invalid token configuration, an unreachable database or a
    /// failed migration.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        Self::init_with_clock(config, Arc::new(SystemClock)).await
    }

    /// Same as [`Self::init`] with an explicit time source.
    ///
    /// # Errors
    /// See [`Self::init`].
    pub async fn init_with_clock(
        config: AppConfig,
        clock: Arc<dyn ClockSource>,
    ) -> anyhow::Result<Self> {
        let authority = Arc::new(
            TokenAuthority::new(&config.auth, clock).context("token authority configuration")?,
        );

        let db = connect(&config.database).await?;
        Migrator::up(&db, None)
            .await
            .context("failed to run company-registry migrations")?;

        let bus = match config.events.sink {
            SinkKind::Noop => None,
            SinkKind::Broadcast => Some(Arc::new(BroadcastEventSink::new(config.events.capacity))),
        };
        let sink: Arc<dyn EventSink> = match &bus {
            Some(bus) => bus.clone(),
            None => Arc::new(NoopEventSink),
        };
        let events = EventDispatcher::new(sink, config.events.topic.as_str());

        let users = Arc::new(UsersService::new(
            Arc::new(SeaOrmUsersRepository::new(db.clone())),
            authority,
            events.clone(),
        ));
        let companies = Arc::new(CompaniesService::new(
            Arc::new(SeaOrmCompaniesRepository::new(db.clone())),
            events.clone(),
            config.service,
        ));

        tracing::info!(
            issuer = %config.auth.issuer,
            sink = ?config.events.sink,
            topic = %config.events.topic,
            "company-registry initialized"
        );

        Ok(Self {
            db,
            users,
            companies,
            events,
            bus,
        })
    }

    /// Client over the local services.
    #[must_use]
    pub fn client(&self) -> Arc<dyn CompanyRegistryClientV1> {
        Arc::new(LocalClient::new(
            Arc::clone(&self.users),
            Arc::clone(&self.companies),
        ))
    }

    /// Subscribe to mutation events. `None` unless the broadcast sink is configured.
    #[must_use]
    pub fn subscribe(&self) -> Option<broadcast::Receiver<PublishedEvent>> {
        self.bus.as_ref().map(|bus| bus.subscribe())
    }

    /// Stop event delivery and close the pool.
    ///
    /// # Errors
    /// Fails if the pool does not close cleanly.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        self.events.shutdown().await;
        self.db
            .close()
            .await
            .context("failed to close database pool")?;
        tracing::info!("company-registry stopped");
        Ok(())
    }
}

async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    let max_connections = if cfg.is_memory() {
        1
    } else {
        cfg.max_connections
    };
    opts.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(cfg.connect_timeout)
        .acquire_timeout(cfg.acquire_timeout)
        .sqlx_logging(false);

    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to database (max_connections={max_connections})"))
}
