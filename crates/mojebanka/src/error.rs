//! Модуль ошибок разбора выписок.

use thiserror::Error;

/// Главная ошибка разбора выписки.
///
/// Ошибки отдельных полей дат сюда не попадают: такие поля просто
/// становятся `None`. Структурное несоответствие блока, наоборот,
/// прерывает разбор всего документа.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Ошибка ввода/вывода.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Блок похож на транзакцию, но не совпадает со структурой записи.
    ///
    /// Содержит обрезанный текст блока целиком, чтобы оператор мог
    /// поправить экспорт или расширить разбор.
    #[error("Unknown transaction ({reason}):\n{block}")]
    MalformedTransaction {
        /// Текст блока после обрезки пробельных символов.
        block: String,
        /// На каком шаге разбор не сошёлся.
        reason: String,
    },

    /// Некорректное значение поля.
    #[error("Invalid value for {field}: expected {expected}, got '{actual}'")]
    InvalidValue {
        /// Имя поля.
        field: String,
        /// Ожидаемый формат.
        expected: String,
        /// Фактическое значение.
        actual: String,
    },

    /// Входные байты не декодируются в указанной кодировке.
    #[error("Input is not valid {encoding}")]
    InvalidEncoding {
        /// Имя кодировки.
        encoding: &'static str,
    },
}

impl ParseError {
    /// Создаёт [`ParseError::MalformedTransaction`] для блока.
    pub(crate) fn malformed(block: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTransaction { block: block.to_string(), reason: reason.into() }
    }

    /// Текст блока, на котором остановился разбор (если ошибка структурная).
    #[must_use]
    pub fn block(&self) -> Option<&str> {
        match self {
            Self::MalformedTransaction { block, .. } => Some(block),
            _ => None,
        }
    }
}

/// Удобный alias для Result с ParseError.
pub type ParseResult<T> = Result<T, ParseError>;
