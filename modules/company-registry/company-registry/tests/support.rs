#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use company_registry::config::AppConfig;
use company_registry::domain::error::DomainError;
use company_registry::domain::repos::CompaniesRepository;
use company_registry::infra::storage::migrations::Migrator;
use company_registry::{Company, CompanyType, OptionalField};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

/// Fresh in-memory sqlite with migrations applied.
pub async fn sqlite_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// File-backed sqlite under `dir` with a pool of `max_connections`, so
/// statements from different tasks really run on different connections.
pub async fn sqlite_file_db(dir: &std::path::Path, max_connections: u32) -> DatabaseConnection {
    let url = format!("sqlite://{}?mode=rwc", dir.join("registry.db").display());
    let mut opts = ConnectOptions::new(url);
    opts.max_connections(max_connections)
        .min_connections(max_connections)
        .sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect sqlite file");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub fn test_config() -> AppConfig {
    AppConfig {
        auth: registry_auth::TokenConfig::new(
            "company-registry",
            "integration-secret",
            std::time::Duration::from_secs(900),
        ),
        ..AppConfig::default()
    }
}

pub fn acme(actor: Uuid) -> Company {
    company("Acme", actor)
}

pub fn company(name: &str, actor: Uuid) -> Company {
    Company {
        name: name.to_owned().into(),
        employee_count: 5.into(),
        registered: true.into(),
        company_type: CompanyType::Corporation.into(),
        created_by: actor.into(),
        ..Company::default()
    }
}

pub fn id_of(c: &Company) -> Uuid {
    *c.id.as_value().expect("stored company has an id")
}

/// Behaviour every `CompaniesRepository` must show.
pub async fn companies_contract(repo: Arc<dyn CompaniesRepository>) {
    duplicate_name_conflicts(repo.as_ref()).await;
    round_trip_reconstructs_every_attribute(repo.as_ref()).await;
    clearing_description_keeps_other_fields(repo.as_ref()).await;
    noop_update_is_idempotent(repo.as_ref()).await;
    update_of_missing_row_is_not_found(repo.as_ref()).await;
    rename_onto_existing_name_conflicts(repo.as_ref()).await;
    delete_is_terminal(repo.as_ref()).await;
    update_never_changes_creator(repo.as_ref()).await;
    concurrent_creates_resolve_to_one_winner(repo).await;
}

async fn duplicate_name_conflicts(repo: &dyn CompaniesRepository) {
    let u1 = Uuid::new_v4();
    repo.create(acme(u1)).await.unwrap();

    let err = repo.create(acme(u1)).await.unwrap_err();

    assert!(
        matches!(err, DomainError::Conflict { entity: "company" }),
        "got {err:?}"
    );
}

async fn round_trip_reconstructs_every_attribute(repo: &dyn CompaniesRepository) {
    let actor = Uuid::new_v4();
    let mut input = company("Roundtrip", actor);
    input.company_type = CompanyType::SoleProprietorship.into();
    input.registered = false.into();

    let created = repo.create(input.clone()).await.unwrap();
    let fetched = repo.get_by_id(id_of(&created)).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.name, input.name);
    assert_eq!(fetched.employee_count, input.employee_count);
    assert_eq!(fetched.registered, input.registered);
    assert_eq!(fetched.company_type, input.company_type);
    assert_eq!(fetched.created_by, input.created_by);
    // Omitted nullable columns come back cleared, never unset.
    assert_eq!(fetched.description, OptionalField::Cleared);
    assert_eq!(fetched.updated_by, OptionalField::Cleared);

    let by_name = repo.get_by_name("Roundtrip").await.unwrap();
    assert_eq!(by_name, fetched);
}

async fn clearing_description_keeps_other_fields(repo: &dyn CompaniesRepository) {
    let u1 = Uuid::new_v4();
    let mut input = company("Described", u1);
    input.description = "Builds rockets".to_owned().into();
    let created = repo.create(input).await.unwrap();
    let id = id_of(&created);
    assert_eq!(
        created.description,
        OptionalField::Value("Builds rockets".to_owned())
    );

    let mut patch = Company::patch(id, u1);
    patch.description = OptionalField::Cleared;
    repo.update(patch).await.unwrap();

    let after = repo.get_by_id(id).await.unwrap();
    assert_eq!(after.description, OptionalField::Cleared);
    assert_eq!(after.name, created.name);
    assert_eq!(after.employee_count, created.employee_count);
    assert_eq!(after.registered, created.registered);
    assert_eq!(after.company_type, created.company_type);
    assert_eq!(after.created_by, created.created_by);
    assert_eq!(after.updated_by, OptionalField::Value(u1));
}

async fn noop_update_is_idempotent(repo: &dyn CompaniesRepository) {
    let u1 = Uuid::new_v4();
    let mut input = company("Steady", u1);
    input.description = "unchanged".to_owned().into();
    let created = repo.create(input).await.unwrap();
    let id = id_of(&created);

    let first = repo.update(Company::patch(id, u1)).await.unwrap();
    let second = repo.update(Company::patch(id, u1)).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second.name, created.name);
    assert_eq!(second.description, created.description);
    assert_eq!(second.employee_count, created.employee_count);
    assert_eq!(second.registered, created.registered);
    assert_eq!(second.company_type, created.company_type);
}

async fn update_of_missing_row_is_not_found(repo: &dyn CompaniesRepository) {
    let missing = Uuid::new_v4();

    let err = repo
        .update(Company::patch(missing, Uuid::new_v4()))
        .await
        .unwrap_err();

    assert!(err.is_not_found(), "got {err:?}");
    assert!(repo.get_by_id(missing).await.unwrap_err().is_not_found());
}

async fn rename_onto_existing_name_conflicts(repo: &dyn CompaniesRepository) {
    let u1 = Uuid::new_v4();
    repo.create(company("Taken", u1)).await.unwrap();
    let other = repo.create(company("Free", u1)).await.unwrap();

    let mut patch = Company::patch(id_of(&other), u1);
    patch.name = "Taken".to_owned().into();
    let err = repo.update(patch).await.unwrap_err();

    assert!(err.is_conflict(), "got {err:?}");
    let unchanged = repo.get_by_id(id_of(&other)).await.unwrap();
    assert_eq!(unchanged.name, OptionalField::Value("Free".to_owned()));
}

async fn delete_is_terminal(repo: &dyn CompaniesRepository) {
    let created = repo.create(company("Doomed", Uuid::new_v4())).await.unwrap();
    let id = id_of(&created);

    repo.delete(id).await.unwrap();

    assert!(repo.get_by_id(id).await.unwrap_err().is_not_found());
    assert!(repo.delete(id).await.unwrap_err().is_not_found());
}

async fn update_never_changes_creator(repo: &dyn CompaniesRepository) {
    let creator = Uuid::new_v4();
    let created = repo.create(company("Founded", creator)).await.unwrap();
    let id = id_of(&created);

    let intruder = Uuid::new_v4();
    let mut patch = Company::patch(id, intruder);
    patch.created_by = intruder.into();
    let updated = repo.update(patch).await.unwrap();

    assert_eq!(updated.created_by, OptionalField::Value(creator));
    assert_eq!(updated.updated_by, OptionalField::Value(intruder));
    let fetched = repo.get_by_id(id).await.unwrap();
    assert_eq!(fetched.created_by, OptionalField::Value(creator));
}

pub async fn concurrent_creates_resolve_to_one_winner(repo: Arc<dyn CompaniesRepository>) {
    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.create(company("Contested", Uuid::new_v4())).await })
        })
        .collect();

    let mut wins = 0;
    let mut conflicts = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => wins += 1,
            Err(e) if e.is_conflict() => conflicts += 1,
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }

    assert_eq!(wins, 1);
    assert_eq!(conflicts, 3);
}
