//! Библиотека разбора текстовых выписок MojeBanka.
//!
//! Крейт превращает текстовый экспорт выписки (формат MojeBanka, Komerční
//! banka) в последовательность типизированных транзакций и умеет записывать
//! их в два формата:
//!
//! - **Table** — таблица с разделителем-табуляцией (расширение `cvs`)
//! - **QIF** — файл Quicken Interchange Format (`!Type:Bank`)
//!
//! # Быстрый старт
//!
//! ```
//! use mojebanka::prelude::*;
//!
//! let text = "94-60576642/8060     8205868823     -1500,00 CZK     08.09.2011\n\
//! Úhrada   0   08.09.2011\n\
//! 000-08092011 005-005-001596020   0   08.09.2011\n\
//! Popis příkazce STAVEBNI SPORENI - BURINKA\n\
//! Popis pro příjemce NA   AC-0000940060576642\n\
//! Systémový popis Úhrada do jiné banky";
//!
//! let txs = parse_statement(text).unwrap();
//! assert_eq!(txs.len(), 1);
//! assert_eq!(txs[0].account, "94-60576642/8060");
//! assert_eq!(txs[0].kind, TransactionType::Payment);
//! assert_eq!(txs[0].price.to_string(), "-1500,00 CZK");
//! ```

pub mod classify;
pub mod error;
pub mod extract;
pub mod format;
pub mod normalize;
pub mod reader;
pub mod source;
pub mod transaction;
pub mod writer;

pub use error::{ParseError, ParseResult};

/// Часто используемые типы одним импортом.
pub mod prelude {
    pub use crate::{
        error::{ParseError, ParseResult},
        format::{ExportFormat, Format, Qif, Table, export_file_name},
        reader::{TransactionReader, parse_statement},
        source::{Encoding, decode_statement, read_statement},
        transaction::{Price, Sign, Transaction, TransactionType},
        writer::TransactionWriter,
    };
}
