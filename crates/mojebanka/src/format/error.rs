//! Ошибки записи выходных форматов.

use std::io;

use thiserror::Error;

/// Ошибка записи транзакций.
#[derive(Debug, Error)]
pub enum Error {
    /// Ошибка ввода/вывода.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Ошибка записи таблицы.
    #[error("table error: {0}")]
    Csv(#[from] ::csv::Error),

    /// У транзакции нет ни одной даты, а формат её требует.
    #[error("transaction {transaction_id} has no valid date")]
    MissingDate {
        /// Идентификатор транзакции из выписки.
        transaction_id: String,
    },
}

/// Удобный alias для Result с ошибкой записи.
pub type Result<T> = std::result::Result<T, Error>;
