//! Потоковый writer для транзакций.
//!
//! Предоставляет [`TransactionWriter`] для записи транзакций
//! в любой тип, реализующий [`Write`].

use std::{
    io::{BufWriter, Write},
    marker::PhantomData,
};

use crate::{
    format::{ExportFormat, Result},
    transaction::Transaction,
};

/// Потоковый writer для транзакций.
///
/// Использует буферизацию для эффективного I/O.
///
/// # Type Parameters
///
/// - `W`: целевой поток (реализует [`Write`])
/// - `F`: формат (реализует [`ExportFormat`])
///
/// # Пример
///
/// ```
/// use mojebanka::prelude::*;
///
/// let mut out = Vec::new();
/// let mut writer = TransactionWriter::<_, Qif>::new(&mut out);
/// writer.write_header().unwrap();
/// writer.write_all(&[]).unwrap();
/// writer.flush().unwrap();
/// assert_eq!(writer.records_written(), 0);
/// drop(writer);
/// assert_eq!(out, b"!Type:Bank\n");
/// ```
pub struct TransactionWriter<W: Write, F: ExportFormat> {
    inner: BufWriter<W>,
    _format: PhantomData<F>,
    /// Счётчик записанных транзакций.
    records_written: usize,
    /// Флаг: записан ли заголовок.
    header_written: bool,
}

impl<W: Write, F: ExportFormat> TransactionWriter<W, F> {
    /// Создаёт новый writer.
    pub fn new(writer: W) -> Self {
        Self {
            inner: BufWriter::new(writer),
            _format: PhantomData,
            records_written: 0,
            header_written: false,
        }
    }

    /// Записывает заголовок формата.
    ///
    /// Может вызываться несколько раз, но заголовок записывается только один раз.
    pub fn write_header(&mut self) -> Result<()> {
        if !self.header_written {
            F::write_header(&mut self.inner)?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Записывает одну транзакцию.
    pub fn write(&mut self, tx: &Transaction) -> Result<()> {
        F::write_one(&mut self.inner, tx)?;
        self.records_written += 1;
        Ok(())
    }

    /// Записывает несколько транзакций.
    pub fn write_all(&mut self, txs: &[Transaction]) -> Result<()> {
        for tx in txs {
            self.write(tx)?;
        }
        Ok(())
    }

    /// Принудительно сбрасывает буфер.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Возвращает количество записанных транзакций.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }
}
