//! Разбор выписки целиком.
//!
//! Предоставляет [`TransactionReader`] — итератор, который режет документ
//! на блоки по линии-разделителю и превращает блоки-кандидаты в
//! транзакции, и [`parse_statement`] — тот же разбор «всё или ничего».

use std::str::Split;

use tracing::debug;

use crate::{
    classify::is_noise,
    error::ParseResult,
    extract::extract_transaction,
    normalize::TRIM_CHARS,
    transaction::Transaction,
};

/// Линия из 80 подчёркиваний между записями выписки.
pub const SEPARATOR: &str =
    "________________________________________________________________________________";

/// Потоковый разбор выписки.
///
/// Реализует [`Iterator`] по транзакциям в порядке документа. Пустые и
/// служебные блоки пропускаются. После первой ошибки извлечения итератор
/// больше ничего не возвращает.
///
/// # Пример
///
/// ```
/// use mojebanka::reader::TransactionReader;
///
/// let text = "Transakční historie\n____________\n";
/// let mut reader = TransactionReader::new(text);
/// assert!(reader.next().is_none());
/// assert_eq!(reader.records_read(), 0);
/// ```
pub struct TransactionReader<'a> {
    blocks: Split<'a, &'static str>,
    /// Счётчик разобранных транзакций.
    records_read: usize,
    /// Счётчик пропущенных блоков (пустых и служебных).
    blocks_skipped: usize,
    /// Флаг окончания документа или ошибки.
    finished: bool,
}

impl<'a> TransactionReader<'a> {
    /// Создаёт reader поверх уже декодированного текста выписки.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { blocks: text.split(SEPARATOR), records_read: 0, blocks_skipped: 0, finished: false }
    }

    /// Возвращает количество успешно разобранных транзакций.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Возвращает количество пропущенных блоков.
    #[must_use]
    pub fn blocks_skipped(&self) -> usize {
        self.blocks_skipped
    }
}

impl Iterator for TransactionReader<'_> {
    type Item = ParseResult<Transaction>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        for block in self.blocks.by_ref() {
            let block = block.trim_matches(TRIM_CHARS);
            if is_noise(block) {
                self.blocks_skipped += 1;
                debug!(len = block.len(), "skipping noise block");
                continue;
            }

            return match extract_transaction(block) {
                Ok(tx) => {
                    self.records_read += 1;
                    Some(Ok(tx))
                }
                Err(e) => {
                    self.finished = true; // Остановка при ошибке
                    Some(Err(e))
                }
            };
        }

        self.finished = true;
        None
    }
}

/// Разбирает выписку целиком.
///
/// Возвращает все транзакции в порядке документа либо первую ошибку
/// извлечения; частичный результат не возвращается.
pub fn parse_statement(text: &str) -> ParseResult<Vec<Transaction>> {
    let mut reader = TransactionReader::new(text);
    let txs = reader.by_ref().collect::<ParseResult<Vec<_>>>()?;
    debug!(
        transactions = txs.len(),
        skipped = reader.blocks_skipped(),
        "statement parsed"
    );
    Ok(txs)
}
