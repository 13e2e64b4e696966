use crate::{
    database::DbConn,
    error::{Error, Result},
    models::users::User,
};

/// Gets a single user by their email address. The user may not exist.
pub async fn find_by_email(conn: &mut DbConn, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, created_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(user)
}

/// Creates a new user. Only the boot seed calls this.
pub async fn create(conn: &mut DbConn, email: &str, password_hash: &str) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash)
        VALUES (?, ?)
        RETURNING id, email, password_hash, created_at
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .fetch_one(conn)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Error::Conflict("Email já cadastrado".to_string())
        }
        _ => Error::Sqlx(e),
    })?;

    Ok(user)
}
