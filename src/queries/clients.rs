use crate::{
    database::DbConn,
    error::{Error, Result},
    models::clients::{Client, NewClient, PaginationParams, UpdateClientRequest},
};

const CLIENT_COLUMNS: &str = "id, nome, email, data_nascimento, created_at, updated_at";

/// Lists clients ordered by name, optionally filtered by a search term over
/// name and email, with page/limit windowing.
pub async fn list(conn: &mut DbConn, params: &PaginationParams) -> Result<Vec<Client>> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(10).max(1);
    let offset = (page - 1) * limit;

    let clients = match search_pattern(params) {
        Some(pattern) => {
            sqlx::query_as::<_, Client>(&format!(
                r#"
                SELECT {CLIENT_COLUMNS}
                FROM clients
                WHERE nome LIKE ? OR email LIKE ?
                ORDER BY nome ASC
                LIMIT ? OFFSET ?
                "#
            ))
            .bind(&pattern)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(conn)
            .await
        }
        None => {
            sqlx::query_as::<_, Client>(&format!(
                r#"
                SELECT {CLIENT_COLUMNS}
                FROM clients
                ORDER BY nome ASC
                LIMIT ? OFFSET ?
                "#
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(conn)
            .await
        }
    }
    .map_err(Error::Sqlx)?;

    Ok(clients)
}

/// Lists every client, ordered by id. Feeds the aggregation engine.
pub async fn list_all(conn: &mut DbConn) -> Result<Vec<Client>> {
    let clients = sqlx::query_as::<_, Client>(&format!(
        r#"
        SELECT {CLIENT_COLUMNS}
        FROM clients
        ORDER BY id ASC
        "#
    ))
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(clients)
}

/// Counts clients matching the same filter as `list`.
pub async fn count(conn: &mut DbConn, search: Option<&str>) -> Result<i64> {
    let count = match search.filter(|s| !s.is_empty()) {
        Some(term) => {
            let pattern = format!("%{}%", term);
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM clients WHERE nome LIKE ? OR email LIKE ?",
            )
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(conn)
            .await
        }
        None => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients")
                .fetch_one(conn)
                .await
        }
    }
    .map_err(Error::Sqlx)?;

    Ok(count)
}

/// Gets a single client by id. The client may not exist.
pub async fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<Client>> {
    let client = sqlx::query_as::<_, Client>(&format!(
        r#"
        SELECT {CLIENT_COLUMNS}
        FROM clients
        WHERE id = ?
        "#
    ))
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(client)
}

/// Gets a single client by (already normalized) email. May not exist.
pub async fn find_by_email(conn: &mut DbConn, email: &str) -> Result<Option<Client>> {
    let client = sqlx::query_as::<_, Client>(&format!(
        r#"
        SELECT {CLIENT_COLUMNS}
        FROM clients
        WHERE email = ?
        "#
    ))
    .bind(email)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(client)
}

/// Inserts a client and returns the persisted row with id and timestamps.
pub async fn create(conn: &mut DbConn, new_client: &NewClient) -> Result<Client> {
    let client = sqlx::query_as::<_, Client>(&format!(
        r#"
        INSERT INTO clients (nome, email, data_nascimento)
        VALUES (?, ?, ?)
        RETURNING {CLIENT_COLUMNS}
        "#
    ))
    .bind(&new_client.nome)
    .bind(&new_client.email)
    .bind(&new_client.data_nascimento)
    .fetch_one(conn)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Error::Conflict("Email já cadastrado".to_string())
        }
        _ => Error::Sqlx(e),
    })?;

    Ok(client)
}

/// Applies a partial update. Absent and empty-string fields are skipped;
/// `updated_at` is bumped alongside any real change. Returns `None` when no
/// field was supplied (the no-op case) or when the row vanished meanwhile.
pub async fn update(
    conn: &mut DbConn,
    id: i64,
    changes: &UpdateClientRequest,
) -> Result<Option<Client>> {
    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<&str> = Vec::new();

    if let Some(nome) = changes.nome.as_deref().filter(|v| !v.is_empty()) {
        sets.push("nome = ?");
        values.push(nome);
    }
    if let Some(email) = changes.email.as_deref().filter(|v| !v.is_empty()) {
        sets.push("email = ?");
        values.push(email);
    }
    if let Some(data) = changes.data_nascimento.as_deref().filter(|v| !v.is_empty()) {
        sets.push("data_nascimento = ?");
        values.push(data);
    }

    if sets.is_empty() {
        return Ok(None);
    }

    let sql = format!(
        "UPDATE clients SET {}, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        sets.join(", ")
    );

    let mut query = sqlx::query(&sql);
    for value in values {
        query = query.bind(value);
    }

    let affected = query
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Conflict("Email já cadastrado".to_string())
            }
            _ => Error::Sqlx(e),
        })?
        .rows_affected();

    if affected == 0 {
        return Ok(None);
    }

    find_by_id(conn, id).await
}

/// Deletes a client, cascading to its sales. Returns whether a row went away.
pub async fn delete(conn: &mut DbConn, id: i64) -> Result<bool> {
    let affected = sqlx::query("DELETE FROM clients WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await
        .map_err(Error::Sqlx)?
        .rows_affected();

    Ok(affected > 0)
}

fn search_pattern(params: &PaginationParams) -> Option<String> {
    params
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s))
}
