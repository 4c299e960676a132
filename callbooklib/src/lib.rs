//! callbooklib — библиотека учёта телефонных звонков: модель записи, журнал в текстовом файле,
//! поиск и экспорт (CSV, XML).

pub mod error;
pub mod model;
pub mod query;
pub mod store;
pub mod traits;

pub mod formats {
    pub mod csv;
    pub mod journal;
    pub mod xml;
}
