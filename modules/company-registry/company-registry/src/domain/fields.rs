/// Company attribute names, as reported in validation errors.
pub struct CompanyFields;

impl CompanyFields {
    pub const ID: &'static str = "id";
    pub const NAME: &'static str = "name";
    pub const DESCRIPTION: &'static str = "description";
    pub const EMPLOYEE_COUNT: &'static str = "employee_count";
    pub const REGISTERED: &'static str = "registered";
    pub const TYPE: &'static str = "company_type";
    pub const CREATED_BY: &'static str = "created_by";
    pub const UPDATED_BY: &'static str = "updated_by";
}

/// User attribute names, as reported in validation errors.
pub struct UserFields;

impl UserFields {
    pub const ID: &'static str = "id";
    pub const USERNAME: &'static str = "username";
    pub const PASSWORD: &'static str = "password";
    pub const PASSWORD_HASH: &'static str = "password_hash";
}

/// Entity names carried by `NotFound` / `Conflict`.
pub mod entity_names {
    pub const COMPANY: &str = "company";
    pub const USER: &str = "user";
}
