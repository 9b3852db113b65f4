//! Transient/permanent classification of database faults

use sea_orm::{DbErr, RuntimeErr};

/// SQLSTATE class 08 codes treated as transient connection faults.
const TRANSIENT_SQLSTATES: &[&str] = &[
    "08000", // connection_exception
    "08003", // connection_does_not_exist
    "08006", // connection_failure
    "08001", // sqlclient_unable_to_establish_sqlconnection
];

pub fn is_transient_sqlstate(code: &str) -> bool {
    TRANSIENT_SQLSTATES.contains(&code)
}

/// Classify a sea-orm error as transient (connection level) or permanent.
pub fn is_transient_db_error(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) => true,
        DbErr::Conn(runtime) => match runtime {
            #[cfg(any(feature = "postgres", feature = "sqlite"))]
            RuntimeErr::SqlxError(e) => is_transient_sqlx_error(e),
            _ => true,
        },
        DbErr::Exec(runtime) | DbErr::Query(runtime) => match runtime {
            #[cfg(any(feature = "postgres", feature = "sqlite"))]
            RuntimeErr::SqlxError(e) => is_transient_sqlx_error(e),
            _ => false,
        },
        _ => false,
    }
}

#[cfg(any(feature = "postgres", feature = "sqlite"))]
fn is_transient_sqlx_error(err: &sea_orm::sqlx::Error) -> bool {
    use sea_orm::sqlx::Error;

    match err {
        Error::Database(db) => db
            .code()
            .map(|code| is_transient_sqlstate(&code))
            .unwrap_or(false),
        Error::Io(_) | Error::PoolTimedOut | Error::PoolClosed | Error::WorkerCrashed => true,
        _ => false,
    }
}
