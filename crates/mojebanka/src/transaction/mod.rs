//! Модель данных транзакций выписки MojeBanka.
//!
//! Модуль определяет [`Transaction`] и типы его полей: сумму со знаком
//! и валютой ([`Price`]) и вид операции ([`TransactionType`]).

mod types;

pub use types::{Price, Sign, Transaction, TransactionType};
