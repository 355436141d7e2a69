//! Field rules for the create and update workflows.
//!
//! Update rules run in a fixed order. The email syntax check and the
//! lookup of the target user are hard failures that stop validation; the
//! remaining rules are all evaluated and their violations reported
//! together.

use std::collections::HashSet;

use time::format_description::OwnedFormatItem;
use time::{Date, OffsetDateTime};
use tracing::debug;
use users_sdk::{NewUser, User};

use crate::config::{PasswordPolicy, UsersConfig};
use crate::domain::error::{DomainError, Violation};
use crate::domain::ports::UserStore;
use crate::domain::request::UpdateRequest;

/// An update that passed every rule, together with the record it targets.
#[derive(Debug)]
pub struct ValidatedUpdate {
    /// Trimmed and normalized form values.
    pub request: UpdateRequest,
    /// The stored user matched by `request.email`.
    pub existing: User,
}

pub struct FieldValidator {
    country_codes: HashSet<String>,
    birthday_format: OwnedFormatItem,
    password_policy: PasswordPolicy,
}

impl FieldValidator {
    /// Build a validator from module config.
    ///
    /// # Errors
    /// Returns an error if `birthday_format` is not a valid `time` format
    /// description.
    pub fn new(cfg: &UsersConfig) -> anyhow::Result<Self> {
        let birthday_format = time::format_description::parse_owned::<1>(&cfg.birthday_format)
            .map_err(|e| {
                anyhow::anyhow!("invalid birthday_format '{}': {e}", cfg.birthday_format)
            })?;

        Ok(Self {
            country_codes: cfg
                .country_codes
                .iter()
                .map(|c| c.trim().to_ascii_uppercase())
                .collect(),
            birthday_format,
            password_policy: cfg.password_policy.clone(),
        })
    }

    /// Check an update form against the rules and the current store state.
    pub async fn validate(
        &self,
        request: UpdateRequest,
        store: &dyn UserStore,
    ) -> Result<ValidatedUpdate, DomainError> {
        let request = sanitize(request);

        check_email(&request.email)?;

        let existing = store
            .user_by_email(&request.email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::target_not_found(&request.email))?;

        let mut violations = Vec::new();
        check_nickname(&request.nickname, &mut violations);
        self.check_country_code(&request.country_code, &mut violations);
        self.check_birthday(&request.birthday, &mut violations);
        if let Some(password) = &request.password {
            self.check_password_change(password.expose(), &existing, &mut violations);
        }

        if !violations.is_empty() {
            debug!(
                user_id = %existing.id,
                count = violations.len(),
                "Update form rejected by field rules"
            );
            return Err(DomainError::validation(violations));
        }

        Ok(ValidatedUpdate { request, existing })
    }

    /// Check the fields of a new user. Email uniqueness is checked by the
    /// service against the store.
    pub fn validate_new_user(&self, new_user: NewUser) -> Result<NewUser, DomainError> {
        let new_user = NewUser {
            email: new_user.email.trim().to_owned(),
            nickname: new_user.nickname.trim().to_owned(),
            password: new_user.password,
            country_code: new_user.country_code.trim().to_ascii_uppercase(),
            birthday: new_user.birthday.trim().to_owned(),
        };

        check_email(&new_user.email)?;

        let mut violations = Vec::new();
        check_nickname(&new_user.nickname, &mut violations);
        if new_user.password.is_empty() {
            violations.push(Violation::malformed("password", "must not be empty"));
        } else if self.is_denied(new_user.password.expose()) {
            violations.push(Violation::invalid_change("password", "is not allowed"));
        }
        self.check_country_code(&new_user.country_code, &mut violations);
        self.check_birthday(&new_user.birthday, &mut violations);

        if violations.is_empty() {
            Ok(new_user)
        } else {
            Err(DomainError::validation(violations))
        }
    }

    fn check_country_code(&self, code: &str, violations: &mut Vec<Violation>) {
        if !self.country_codes.contains(code) {
            violations.push(Violation::malformed(
                "country_code",
                format!("{code} is not a recognised country code"),
            ));
        }
    }

    fn check_birthday(&self, birthday: &str, violations: &mut Vec<Violation>) {
        match Date::parse(birthday, &self.birthday_format) {
            Ok(date) if date > OffsetDateTime::now_utc().date() => {
                violations.push(Violation::malformed("birthday", "must not be in the future"));
            }
            Ok(_) => {}
            Err(e) => violations.push(Violation::malformed(
                "birthday",
                format!("{birthday} is not a valid date: {e}"),
            )),
        }
    }

    fn check_password_change(
        &self,
        password: &str,
        existing: &User,
        violations: &mut Vec<Violation>,
    ) {
        if self.password_policy.reject_unchanged && password == existing.password.expose() {
            violations.push(Violation::invalid_change(
                "password",
                "must differ from the current password",
            ));
        } else if self.is_denied(password) {
            violations.push(Violation::invalid_change("password", "is not allowed"));
        }
    }

    fn is_denied(&self, password: &str) -> bool {
        self.password_policy.denylist.iter().any(|p| p == password)
    }
}

fn sanitize(request: UpdateRequest) -> UpdateRequest {
    UpdateRequest {
        email: request.email.trim().to_owned(),
        nickname: request.nickname.trim().to_owned(),
        password: request.password.filter(|p| !p.is_empty()),
        country_code: request.country_code.trim().to_ascii_uppercase(),
        birthday: request.birthday.trim().to_owned(),
        image: request.image,
    }
}

fn check_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() {
        return Err(DomainError::malformed("email", "must not be empty"));
    }

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if well_formed {
        Ok(())
    } else {
        Err(DomainError::malformed(
            "email",
            format!("{email} is not a valid address"),
        ))
    }
}

fn check_nickname(nickname: &str, violations: &mut Vec<Violation>) {
    if nickname.is_empty() {
        violations.push(Violation::malformed("nickname", "must not be empty"));
    }
}
