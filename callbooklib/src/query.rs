//! Поиск по записям. Только чтение: результат — список ссылок в исходном порядке.

use crate::{
    error::Result,
    model::{parse_date, CallRecord},
};

/// По какому полю искать.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Name,
    Phone,
    Date,
}

/// Подстрока в ФИО без учёта регистра.
pub fn filter_by_name<'a>(records: &'a [CallRecord], substring: &str) -> Vec<&'a CallRecord> {
    let needle = substring.to_lowercase();
    records
        .iter()
        .filter(|r| r.full_name.to_lowercase().contains(&needle))
        .collect()
}

/// Точное совпадение номера, без нормализации.
pub fn filter_by_phone<'a>(records: &'a [CallRecord], number: &str) -> Vec<&'a CallRecord> {
    records.iter().filter(|r| r.phone_number == number).collect()
}

/// Совпадение даты звонка. Строка запроса разбирается до фильтрации.
pub fn filter_by_date<'a>(records: &'a [CallRecord], date: &str) -> Result<Vec<&'a CallRecord>> {
    let date = parse_date(date)?;
    Ok(records.iter().filter(|r| r.call_date == date).collect())
}

pub fn search<'a>(
    records: &'a [CallRecord],
    mode: SearchMode,
    query: &str,
) -> Result<Vec<&'a CallRecord>> {
    match mode {
        SearchMode::Name => Ok(filter_by_name(records, query)),
        SearchMode::Phone => Ok(filter_by_phone(records, query)),
        SearchMode::Date => filter_by_date(records, query),
    }
}
