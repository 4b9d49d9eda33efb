#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::super::entity::company;
    use super::super::mapper::*;
    use crate::domain::error::DomainError;
    use crate::domain::fields::CompanyFields;
    use company_registry_sdk::{Company, CompanyType, OptionalField};
    use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
    use uuid::Uuid;

    fn stored_row() -> company::Model {
        company::Model {
            id: Uuid::new_v4(),
            name: "Acme".to_owned(),
            description: Some("Rockets".to_owned()),
            employee_count: 5,
            registered: true,
            company_type: "Corporation".to_owned(),
            created_by: Uuid::new_v4(),
            updated_by: None,
        }
    }

    #[test]
    fn null_columns_read_back_as_cleared() {
        let mut row = stored_row();
        row.description = None;

        let c = company_from_model(row).unwrap();

        assert_eq!(c.description, OptionalField::Cleared);
        assert_eq!(c.updated_by, OptionalField::Cleared);
        assert_eq!(c.name, OptionalField::Value("Acme".to_owned()));
    }

    #[test]
    fn unknown_stored_type_is_infrastructure() {
        let mut row = stored_row();
        row.company_type = "Guild".to_owned();

        assert!(matches!(
            company_from_model(row),
            Err(DomainError::Infrastructure(_))
        ));
    }

    #[test]
    fn insert_assigns_id_when_unset() {
        let c = Company {
            name: "Acme".to_owned().into(),
            employee_count: 5.into(),
            registered: true.into(),
            company_type: CompanyType::Cooperative.into(),
            created_by: Uuid::new_v4().into(),
            ..Company::default()
        };

        let am = company_insert(c).unwrap();

        match am.id {
            Set(id) => assert!(!id.is_nil()),
            other => panic!("id not set: {other:?}"),
        }
        assert_eq!(am.company_type, Set("Cooperative".to_owned()));
        assert_eq!(am.description, NotSet);
    }

    #[test]
    fn insert_rejects_missing_required_field() {
        let c = Company {
            name: "Acme".to_owned().into(),
            ..Company::default()
        };

        match company_insert(c) {
            Err(DomainError::Validation { field, .. }) => assert_eq!(field, CompanyFields::EMPLOYEE_COUNT),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn patch_maps_each_state_independently() {
        let id = Uuid::new_v4();
        let actor = Uuid::new_v4();
        let mut patch = Company::patch(id, actor);
        patch.description = OptionalField::Cleared;
        patch.employee_count = OptionalField::Value(9);

        let (target, am) = company_patch(patch).unwrap();

        assert_eq!(target, id);
        assert_eq!(am.id, Unchanged(id));
        assert_eq!(am.description, Set(None));
        assert_eq!(am.employee_count, Set(9));
        assert_eq!(am.updated_by, Set(Some(actor)));
        assert_eq!(am.name, NotSet);
        assert_eq!(am.registered, NotSet);
    }

    #[test]
    fn patch_rejects_clearing_non_nullable_columns() {
        let mut patch = Company::patch(Uuid::new_v4(), Uuid::new_v4());
        patch.name = OptionalField::Cleared;

        assert!(matches!(
            company_patch(patch),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn patch_never_writes_creator() {
        let mut patch = Company::patch(Uuid::new_v4(), Uuid::new_v4());
        patch.created_by = Uuid::new_v4().into();

        let (_, am) = company_patch(patch.clone()).unwrap();
        assert_eq!(am.created_by, NotSet);

        let mut row = stored_row();
        let creator = row.created_by;
        apply_company_patch(&mut row, patch).unwrap();
        assert_eq!(row.created_by, creator);
    }

    #[test]
    fn in_memory_patch_leaves_row_untouched_on_error() {
        let mut row = stored_row();
        let before = row.clone();
        let mut patch = Company::patch(row.id, Uuid::new_v4());
        patch.description = OptionalField::Cleared;
        patch.registered = OptionalField::Cleared;

        assert!(apply_company_patch(&mut row, patch).is_err());
        assert_eq!(row, before);
    }

    #[test]
    fn in_memory_patch_applies_only_supplied_fields() {
        let mut row = stored_row();
        let actor = Uuid::new_v4();
        let mut patch = Company::patch(row.id, actor);
        patch.description = OptionalField::Cleared;

        apply_company_patch(&mut row, patch).unwrap();

        assert_eq!(row.description, None);
        assert_eq!(row.updated_by, Some(actor));
        assert_eq!(row.name, "Acme");
        assert_eq!(row.employee_count, 5);
    }
}
