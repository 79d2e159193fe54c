//! Основные типы и структуры транзакций.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;

use crate::{error::ParseError, normalize};

/// Вид операции из второй строки записи.
///
/// В выписке записан чешским словом; пустое место означает, что вид
/// не указан.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Вид не указан.
    #[default]
    Unspecified,
    /// Платёж (`Úhrada`).
    Payment,
    /// Инкассо (`Inkaso`).
    Collection,
}

impl TransactionType {
    /// Возвращает метку так, как она записана в выписке.
    ///
    /// # Пример
    /// ```
    /// use mojebanka::transaction::TransactionType;
    /// assert_eq!(TransactionType::Payment.as_str(), "Úhrada");
    /// assert_eq!(TransactionType::Unspecified.as_str(), "");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Payment => "Úhrada",
            Self::Collection => "Inkaso",
        }
    }
}

impl FromStr for TransactionType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::Unspecified),
            "Úhrada" => Ok(Self::Payment),
            "Inkaso" => Ok(Self::Collection),
            _ => Err(ParseError::InvalidValue {
                field: "type".to_string(),
                expected: "empty, Úhrada or Inkaso".to_string(),
                actual: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Знак суммы в том виде, в каком он встретился в тексте.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Знака нет.
    #[default]
    Unsigned,
    /// Явный `+`.
    Plus,
    /// `-`, списание.
    Minus,
}

impl Sign {
    /// `true` для списаний.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        matches!(self, Self::Minus)
    }

    const fn as_str(&self) -> &'static str {
        match self {
            Self::Unsigned => "",
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

/// Сумма операции: знак, целая часть, ровно две цифры дробной части и код валюты.
///
/// Знак и модуль хранятся раздельно: выходные форматы заново рисуют
/// десятичную точку, а таблица выводит сумму в исходном виде.
///
/// # Пример
///
/// ```
/// use mojebanka::transaction::{Price, Sign};
///
/// let price: Price = "-1500,00 CZK".parse().unwrap();
/// assert_eq!(price.sign, Sign::Minus);
/// assert_eq!(price.whole, 1500);
/// assert_eq!(price.cents, 0);
/// assert_eq!(price.minor_units(), -150_000);
/// assert_eq!(price.to_string(), "-1500,00 CZK");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Price {
    /// Знак из текста.
    pub sign: Sign,
    /// Целая часть суммы.
    pub whole: u64,
    /// Дробная часть (0..=99).
    pub cents: u8,
    /// Трёхбуквенный код валюты, на практике `CZK`.
    pub currency: String,
}

impl Price {
    /// Наибольшая целая часть, при которой сумма помещается в `i64` копеек.
    pub const MAX_WHOLE: u64 = (i64::MAX as u64 - 99) / 100;

    /// Сумма в сотых долях валюты со знаком.
    #[must_use]
    pub fn minor_units(&self) -> i64 {
        // whole <= MAX_WHOLE гарантируется разбором
        let units = self.whole as i64 * 100 + i64::from(self.cents);
        if self.sign.is_negative() { -units } else { units }
    }
}

impl FromStr for Price {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize::parse_amount(s)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{},{:02} {}", self.sign.as_str(), self.whole, self.cents, self.currency)
    }
}

/// Одна запись выписки MojeBanka.
///
/// Создаётся один раз из одного блока документа и дальше не меняется.
/// Все описания — всегда строки, пустые при отсутствии текста.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Счёт контрагента: `[префикс-]номер/код банка`, номер может быть пустым.
    pub account: String,
    /// Вариабильный символ (только цифры, может быть пустым).
    pub var_symbol: String,
    /// Сумма с валютой.
    pub price: Price,
    /// Первая дата из строки с суммой.
    pub date1: Option<NaiveDate>,
    /// Вид операции.
    pub kind: TransactionType,
    /// Константный символ.
    pub const_symbol: String,
    /// Дата из второй строки.
    pub date2: Option<NaiveDate>,
    /// Идентификатор транзакции банка.
    pub transaction_id: String,
    /// Специфический символ.
    pub spec_symbol: String,
    /// Дата из третьей строки; при коротком или неверном значении — `None`.
    pub date3: Option<NaiveDate>,
    /// Описание для плательщика (`Popis příkazce`).
    pub desc1: String,
    /// Описание для получателя (`Popis pro příjemce`).
    pub desc2: String,
    /// Системное описание (`Systémový popis`).
    pub desc3: String,
    /// Сообщение для получателя (`Zpráva pro příjemce`), пустое если его нет.
    pub desc4: String,
}

impl Transaction {
    /// Первая известная дата: `date1`, затем `date2`, затем `date3`.
    #[must_use]
    pub fn booking_date(&self) -> Option<NaiveDate> {
        self.date1.or(self.date2).or(self.date3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_from_str() {
        assert_eq!("Úhrada".parse::<TransactionType>().unwrap(), TransactionType::Payment);
        assert_eq!("Inkaso".parse::<TransactionType>().unwrap(), TransactionType::Collection);
        assert_eq!("".parse::<TransactionType>().unwrap(), TransactionType::Unspecified);
        assert!("Vklad".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_price_display_keeps_explicit_plus() {
        let price = Price { sign: Sign::Plus, whole: 250, cents: 5, currency: "CZK".into() };
        assert_eq!(price.to_string(), "+250,05 CZK");
        assert_eq!(price.minor_units(), 25_005);
    }

    #[test]
    fn test_price_max_whole_fits_minor_units() {
        let price = Price { sign: Sign::Minus, whole: Price::MAX_WHOLE, cents: 99, currency: "CZK".into() };
        assert!(price.minor_units() < 0);
    }
}
