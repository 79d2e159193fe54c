//! Формат QIF (Quicken Interchange Format), тип счёта `Bank`.
//!
//! # Формат
//!
//! ```text
//! !Type:Bank
//! D08/09/2011
//! T-1,500.00
//! P94-60576642/8060 8205868823
//! MSTAVEBNI SPORENI - BURINKA NA AC-0000940060576642 Úhrada do jiné banky
//! ^
//! ```

use std::io::Write;

use super::{Error, Result};
use crate::transaction::{Price, Transaction};

/// Заголовок файла.
pub const HEADER: &str = "!Type:Bank";

/// Счёт без номера с кодом банка Komerční banka: так выписка помечает
/// операции самого банка (комиссии, проценты).
pub const KB_ACCOUNT: &str = "/0100";

/// Плательщик для операций банка.
pub const KB_PAYEE: &str = "KB";

/// Пишет заголовок `!Type:Bank`.
pub fn write_header<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "{HEADER}")?;
    Ok(())
}

/// Пишет одну запись QIF, завершённую строкой `^`.
///
/// Дата берётся из [`Transaction::booking_date`]; если дат нет совсем,
/// возвращается [`Error::MissingDate`].
pub fn write_one<W: Write>(writer: &mut W, tx: &Transaction) -> Result<()> {
    let date = tx
        .booking_date()
        .ok_or_else(|| Error::MissingDate { transaction_id: tx.transaction_id.clone() })?;

    writeln!(writer, "D{}", date.format("%d/%m/%Y"))?;
    writeln!(writer, "T{}", format_amount(&tx.price))?;
    writeln!(writer, "P{}", payee(tx))?;
    writeln!(writer, "M{} {} {} {}", tx.desc1, tx.desc2, tx.desc3, tx.desc4)?;
    writeln!(writer, "^")?;
    Ok(())
}

/// Сумма с точкой, двумя знаками и запятыми между тысячами.
///
/// ```
/// use mojebanka::format::qif::format_amount;
///
/// assert_eq!(format_amount(&"-1500,00 CZK".parse().unwrap()), "-1,500.00");
/// assert_eq!(format_amount(&"+1234567,89 CZK".parse().unwrap()), "1,234,567.89");
/// assert_eq!(format_amount(&"-0,00 CZK".parse().unwrap()), "0.00");
/// ```
#[must_use]
pub fn format_amount(price: &Price) -> String {
    let units = price.minor_units();
    let sign = if units < 0 { "-" } else { "" };
    let abs = units.unsigned_abs();
    format!("{sign}{}.{:02}", group_thousands(abs / 100), abs % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Плательщик: `KB` для операций банка, иначе счёт; через пробел
/// вариабильный символ, если он есть.
#[must_use]
pub fn payee(tx: &Transaction) -> String {
    let mut payee =
        if tx.account == KB_ACCOUNT { KB_PAYEE.to_string() } else { tx.account.clone() };
    if !tx.var_symbol.is_empty() {
        payee.push(' ');
        payee.push_str(&tx.var_symbol);
    }
    payee
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::transaction::{Sign, TransactionType};

    fn sample_transaction() -> Transaction {
        Transaction {
            account: "94-60576642/8060".to_string(),
            var_symbol: "8205868823".to_string(),
            price: Price { sign: Sign::Minus, whole: 1500, cents: 0, currency: "CZK".into() },
            date1: NaiveDate::from_ymd_opt(2011, 9, 8),
            kind: TransactionType::Payment,
            const_symbol: "0".to_string(),
            date2: NaiveDate::from_ymd_opt(2011, 9, 9),
            transaction_id: "000-08092011 005-005-001596020".to_string(),
            spec_symbol: "0".to_string(),
            date3: NaiveDate::from_ymd_opt(2011, 9, 10),
            desc1: "STAVEBNI SPORENI - BURINKA".to_string(),
            desc2: "NA AC-0000940060576642".to_string(),
            desc3: "Úhrada do jiné banky".to_string(),
            desc4: "nájem".to_string(),
        }
    }

    #[test]
    fn test_write_record() {
        let mut out = Vec::new();
        write_one(&mut out, &sample_transaction()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "D08/09/2011\n\
             T-1,500.00\n\
             P94-60576642/8060 8205868823\n\
             MSTAVEBNI SPORENI - BURINKA NA AC-0000940060576642 Úhrada do jiné banky nájem\n\
             ^\n"
        );
    }

    #[test]
    fn test_date_falls_back_to_date2() {
        let tx = Transaction { date1: None, ..sample_transaction() };
        let mut out = Vec::new();
        write_one(&mut out, &tx).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("D09/09/2011\n"));
    }

    #[test]
    fn test_no_dates_is_error() {
        let tx = Transaction { date1: None, date2: None, date3: None, ..sample_transaction() };
        let err = write_one(&mut Vec::new(), &tx).unwrap_err();
        assert!(matches!(err, Error::MissingDate { .. }));
    }

    #[test]
    fn test_bank_account_payee() {
        let tx = Transaction {
            account: KB_ACCOUNT.to_string(),
            var_symbol: String::new(),
            ..sample_transaction()
        };
        assert_eq!(payee(&tx), "KB");

        let tx = Transaction { account: "1/0100".to_string(), ..sample_transaction() };
        assert_eq!(payee(&tx), "1/0100 8205868823");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(123456), "123,456");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
