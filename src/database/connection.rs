use crate::error::{Error, Result};
use sqlx::{postgres::PgConnectOptions, Connection, PgConnection};

/// Opens a dedicated connection. Every database operation gets its own and
/// closes it when done; nothing is pooled.
pub async fn connect(options: &PgConnectOptions) -> Result<PgConnection> {
    PgConnection::connect_with(options)
        .await
        .map_err(Error::Connection)
}

pub async fn close(conn: PgConnection) -> Result<()> {
    conn.close().await?;
    Ok(())
}
