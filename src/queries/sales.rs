use crate::{
    database::DbConn,
    error::{Error, Result},
    models::sales::{NewSale, Sale},
};

const SALE_COLUMNS: &str = "id, client_id, valor, data, created_at";

/// Lists every sale, most recent sale date first.
pub async fn list(conn: &mut DbConn) -> Result<Vec<Sale>> {
    let sales = sqlx::query_as::<_, Sale>(&format!(
        r#"
        SELECT {SALE_COLUMNS}
        FROM sales
        ORDER BY data DESC
        "#
    ))
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(sales)
}

/// Lists one client's sales, most recent sale date first.
pub async fn list_by_client(conn: &mut DbConn, client_id: i64) -> Result<Vec<Sale>> {
    let sales = sqlx::query_as::<_, Sale>(&format!(
        r#"
        SELECT {SALE_COLUMNS}
        FROM sales
        WHERE client_id = ?
        ORDER BY data DESC
        "#
    ))
    .bind(client_id)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(sales)
}

/// Inserts a sale and returns the persisted row. The foreign key rejects
/// unknown clients; that failure surfaces as a validation error.
pub async fn create(conn: &mut DbConn, new_sale: &NewSale) -> Result<Sale> {
    let sale = sqlx::query_as::<_, Sale>(&format!(
        r#"
        INSERT INTO sales (client_id, valor, data)
        VALUES (?, ?, ?)
        RETURNING {SALE_COLUMNS}
        "#
    ))
    .bind(new_sale.client_id)
    .bind(new_sale.valor)
    .bind(&new_sale.data)
    .fetch_one(conn)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            Error::Validation("Cliente informado não existe".to_string())
        }
        _ => Error::Sqlx(e),
    })?;

    Ok(sale)
}
