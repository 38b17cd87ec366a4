// Copyright 2023 Remi Bernotavicius

use crate::database;
use database::models::{NewUser, User};
use database::schema::users;
use derive_more::Display;
use diesel::prelude::OptionalExtension as _;
use diesel::result::DatabaseErrorKind;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::QueryResult;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

#[derive(Debug, Display)]
pub enum AccountError {
    #[display("{_0} is required")]
    MissingField(&'static str),
    #[display("the passwords don't match")]
    PasswordMismatch,
    #[display("an account with this email already exists")]
    EmailTaken,
    #[display("wrong email or password")]
    InvalidCredentials,
    #[display("database error: {_0}")]
    Store(diesel::result::Error),
}

impl std::error::Error for AccountError {}

impl From<diesel::result::Error> for AccountError {
    fn from(e: diesel::result::Error) -> Self {
        Self::Store(e)
    }
}

/// What the registration form collects. Phone and address may be left blank.
#[derive(Default, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub address: String,
}

fn non_blank(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

pub fn register(
    conn: &mut database::Connection,
    registration: &Registration,
) -> Result<User, AccountError> {
    let required = [
        ("name", &registration.name),
        ("email", &registration.email),
        ("password", &registration.password),
        ("password confirmation", &registration.confirm_password),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AccountError::MissingField(field));
        }
    }
    if registration.password != registration.confirm_password {
        return Err(AccountError::PasswordMismatch);
    }

    let new_email = registration.email.trim();
    let existing = users::table
        .select(users::id)
        .filter(users::email.eq(new_email))
        .get_result::<database::models::UserId>(conn)
        .optional()?;
    if existing.is_some() {
        return Err(AccountError::EmailTaken);
    }

    let new_user = NewUser {
        name: registration.name.trim(),
        password: &registration.password,
        email: new_email,
        phone: non_blank(&registration.phone),
        address: non_blank(&registration.address),
    };
    let user = diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result(conn)
        .map_err(|e| match e {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                AccountError::EmailTaken
            }
            e => AccountError::Store(e),
        })?;

    log::info!("registered user {}", user.id);
    Ok(user)
}

/// Looks up the user whose email and password both match exactly.
pub fn login(
    conn: &mut database::Connection,
    email: &str,
    password: &str,
) -> Result<User, AccountError> {
    let user = users::table
        .select(User::as_select())
        .filter(users::email.eq(email.trim()))
        .filter(users::password.eq(password))
        .get_result(conn)
        .optional()?
        .ok_or(AccountError::InvalidCredentials)?;

    log::info!("user {} logged in", user.id);
    Ok(user)
}

pub fn find_by_email(conn: &mut database::Connection, email: &str) -> QueryResult<Option<User>> {
    users::table
        .select(User::as_select())
        .filter(users::email.eq(email.trim()))
        .get_result(conn)
        .optional()
}

#[cfg(test)]
fn registration() -> Registration {
    Registration {
        name: "Ana".into(),
        email: "ana@example.com".into(),
        password: "hunter2".into(),
        confirm_password: "hunter2".into(),
        phone: "  ".into(),
        address: "Rua das Flores, 10".into(),
    }
}

#[test]
fn register_then_login() {
    let mut conn = database::test_connection();
    let registered = register(&mut conn, &registration()).unwrap();
    assert_eq!(registered.name, "Ana");
    assert_eq!(registered.phone, None);
    assert_eq!(registered.address.as_deref(), Some("Rua das Flores, 10"));

    let logged_in = login(&mut conn, "ana@example.com", "hunter2").unwrap();
    assert_eq!(logged_in.id, registered.id);

    let found = find_by_email(&mut conn, " ana@example.com").unwrap().unwrap();
    assert_eq!(found.id, registered.id);
    assert!(find_by_email(&mut conn, "bob@example.com").unwrap().is_none());
}

#[test]
fn register_requires_fields() {
    let mut conn = database::test_connection();

    let mut r = registration();
    r.name = "".into();
    assert!(matches!(
        register(&mut conn, &r),
        Err(AccountError::MissingField("name"))
    ));

    let mut r = registration();
    r.confirm_password = "".into();
    assert!(matches!(
        register(&mut conn, &r),
        Err(AccountError::MissingField("password confirmation"))
    ));
}

#[test]
fn register_rejects_mismatched_passwords() {
    let mut conn = database::test_connection();
    let mut r = registration();
    r.confirm_password = "hunter3".into();
    assert!(matches!(
        register(&mut conn, &r),
        Err(AccountError::PasswordMismatch)
    ));
}

#[test]
fn register_rejects_duplicate_email() {
    let mut conn = database::test_connection();
    register(&mut conn, &registration()).unwrap();

    let mut r = registration();
    r.name = "Another Ana".into();
    assert!(matches!(
        register(&mut conn, &r),
        Err(AccountError::EmailTaken)
    ));
}

#[test]
fn login_rejects_wrong_password() {
    let mut conn = database::test_connection();
    register(&mut conn, &registration()).unwrap();

    assert!(matches!(
        login(&mut conn, "ana@example.com", "Hunter2"),
        Err(AccountError::InvalidCredentials)
    ));
    assert!(matches!(
        login(&mut conn, "bob@example.com", "hunter2"),
        Err(AccountError::InvalidCredentials)
    ));
}
