//! Выходные форматы: таблица с табуляциями и QIF.
//!
//! Каждый формат — маркерный тип, реализующий [`ExportFormat`]; запись
//! идёт потоково через [`crate::writer::TransactionWriter`]. Для выбора
//! формата во время выполнения есть [`Format`].
//!
//! # Пример
//!
//! ```
//! use mojebanka::format::{ExportFormat, Qif};
//!
//! let mut out = Vec::new();
//! Qif::write_header(&mut out).unwrap();
//! assert_eq!(out, b"!Type:Bank\n");
//! ```

mod error;
pub mod qif;
pub mod table;

use std::io::Write;

use chrono::NaiveDateTime;
pub use error::{Error, Result};

use crate::transaction::Transaction;

/// Маркер табличного формата (колонки через табуляцию).
#[derive(Debug, Clone, Copy, Default)]
pub struct Table;

/// Маркер формата QIF.
#[derive(Debug, Clone, Copy, Default)]
pub struct Qif;

/// Потоковая запись транзакций в конкретный формат.
pub trait ExportFormat {
    /// Расширение выходного файла.
    const EXTENSION: &'static str;

    /// Пишет заголовок файла.
    fn write_header<W: Write>(writer: &mut W) -> Result<()>;

    /// Пишет одну транзакцию.
    fn write_one<W: Write>(writer: &mut W, tx: &Transaction) -> Result<()>;
}

impl ExportFormat for Table {
    /// Именно `cvs`: под это имя настроены существующие импорты.
    const EXTENSION: &'static str = "cvs";

    fn write_header<W: Write>(writer: &mut W) -> Result<()> {
        table::write_header(writer)
    }

    fn write_one<W: Write>(writer: &mut W, tx: &Transaction) -> Result<()> {
        table::write_one(writer, tx)
    }
}

impl ExportFormat for Qif {
    const EXTENSION: &'static str = "qif";

    fn write_header<W: Write>(writer: &mut W) -> Result<()> {
        qif::write_header(writer)
    }

    fn write_one<W: Write>(writer: &mut W, tx: &Transaction) -> Result<()> {
        qif::write_one(writer, tx)
    }
}

/// Формат для выбора во время выполнения.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// Таблица с табуляциями.
    Table,
    /// QIF.
    #[default]
    Qif,
}

impl Format {
    /// Расширение выходного файла.
    ///
    /// ```
    /// use mojebanka::format::Format;
    ///
    /// assert_eq!(Format::Table.extension(), "cvs");
    /// assert_eq!(Format::Qif.extension(), "qif");
    /// ```
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Table => Table::EXTENSION,
            Self::Qif => Qif::EXTENSION,
        }
    }
}

/// Формат отметки времени в имени файла: год, день, месяц, часы, минуты, секунды.
pub const TIMESTAMP_FORMAT: &str = "%Y-%d-%m-%H-%M-%S";

/// Имя выходного файла `mojebanka_export_<отметка>.<расширение>`.
///
/// ```
/// use chrono::NaiveDate;
/// use mojebanka::format::{Format, export_file_name};
///
/// let at = NaiveDate::from_ymd_opt(2011, 9, 8).unwrap().and_hms_opt(14, 5, 9).unwrap();
/// assert_eq!(export_file_name(Format::Qif, at), "mojebanka_export_2011-08-09-14-05-09.qif");
/// ```
#[must_use]
pub fn export_file_name(format: Format, at: NaiveDateTime) -> String {
    format!("mojebanka_export_{}.{}", at.format(TIMESTAMP_FORMAT), format.extension())
}
