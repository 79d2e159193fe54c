//! Табличный формат: строка заголовка и по строке на транзакцию,
//! колонки разделены табуляцией.
//!
//! # Формат
//!
//! ```text
//! date3	type	account	price	var_sym	desc1	desc2	desc3	desc4
//! 08.09.2011	Úhrada	94-60576642/8060	-1500,00 CZK	8205868823	STAVEBNI SPORENI - BURINKA	...
//! ```

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use super::Result;
use crate::transaction::Transaction;

/// Имена колонок в порядке вывода.
pub const HEADER: [&str; 9] =
    ["date3", "type", "account", "price", "var_sym", "desc1", "desc2", "desc3", "desc4"];

const DELIMITER: u8 = b'\t';

/// Строка таблицы; порядок полей совпадает с [`HEADER`].
#[derive(Debug, Serialize)]
struct Row<'a> {
    date3: String,
    kind: &'static str,
    account: &'a str,
    price: String,
    var_symbol: &'a str,
    desc1: &'a str,
    desc2: &'a str,
    desc3: &'a str,
    desc4: &'a str,
}

impl<'a> From<&'a Transaction> for Row<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            date3: format_date(tx.date3),
            kind: tx.kind.as_str(),
            account: &tx.account,
            price: tx.price.to_string(),
            var_symbol: &tx.var_symbol,
            desc1: &tx.desc1,
            desc2: &tx.desc2,
            desc3: &tx.desc3,
            desc4: &tx.desc4,
        }
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d.%m.%Y").to_string()).unwrap_or_default()
}

fn csv_writer<W: Write>(writer: W) -> ::csv::Writer<W> {
    ::csv::WriterBuilder::new().delimiter(DELIMITER).has_headers(false).from_writer(writer)
}

/// Пишет строку заголовка.
pub fn write_header<W: Write>(writer: &mut W) -> Result<()> {
    let mut csv_writer = csv_writer(writer);
    csv_writer.write_record(HEADER)?;
    csv_writer.flush()?;
    Ok(())
}

/// Пишет одну транзакцию строкой таблицы.
pub fn write_one<W: Write>(writer: &mut W, tx: &Transaction) -> Result<()> {
    let mut csv_writer = csv_writer(writer);
    csv_writer.serialize(Row::from(tx))?;
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{Price, Sign, TransactionType};

    fn sample_transaction() -> Transaction {
        Transaction {
            account: "94-60576642/8060".to_string(),
            var_symbol: "8205868823".to_string(),
            price: Price { sign: Sign::Minus, whole: 1500, cents: 0, currency: "CZK".into() },
            date1: NaiveDate::from_ymd_opt(2011, 9, 8),
            kind: TransactionType::Payment,
            const_symbol: "0".to_string(),
            date2: NaiveDate::from_ymd_opt(2011, 9, 8),
            transaction_id: "000-08092011 005-005-001596020".to_string(),
            spec_symbol: "0".to_string(),
            date3: NaiveDate::from_ymd_opt(2011, 9, 8),
            desc1: "STAVEBNI SPORENI - BURINKA".to_string(),
            desc2: "NA AC-0000940060576642".to_string(),
            desc3: "Úhrada do jiné banky".to_string(),
            desc4: String::new(),
        }
    }

    #[test]
    fn test_header_row() {
        let mut out = Vec::new();
        write_header(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "date3\ttype\taccount\tprice\tvar_sym\tdesc1\tdesc2\tdesc3\tdesc4\n"
        );
    }

    #[test]
    fn test_row_column_order() {
        let mut out = Vec::new();
        write_one(&mut out, &sample_transaction()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "08.09.2011\tÚhrada\t94-60576642/8060\t-1500,00 CZK\t8205868823\t\
             STAVEBNI SPORENI - BURINKA\tNA AC-0000940060576642\tÚhrada do jiné banky\t\n"
        );
    }

    #[test]
    fn test_missing_date3_is_empty_cell() {
        let tx = Transaction { date3: None, kind: TransactionType::Unspecified, ..sample_transaction() };
        let mut out = Vec::new();
        write_one(&mut out, &tx).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.starts_with("\t\t94-60576642/8060\t"), "{line:?}");
    }
}
