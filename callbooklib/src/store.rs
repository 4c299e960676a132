//! Хранилище: упорядоченный список записей в памяти поверх файла журнала.
//!
//! Файл читается один раз при загрузке; каждая новая запись дописывается в конец.
//! Файл открывается и закрывается внутри одного вызова.

use crate::{
    error::Result,
    formats::journal::{encode, Journal},
    model::CallRecord,
    traits::ReadFormat,
};
use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct CallStore {
    path: PathBuf,
    records: Vec<CallRecord>,
}

impl CallStore {
    /// Пустое хранилище, привязанное к `path`; файл не трогается.
    pub fn in_memory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Загружает журнал. Отсутствующий файл — пустой список, не ошибка.
    /// Первая битая строка прерывает загрузку целиком.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("{} not found, starting with an empty journal", path.display());
                return Ok(Self::in_memory(path));
            }
            Err(e) => return Err(e.into()),
        };
        let records = Journal::read(BufReader::new(file))?;
        debug!("loaded {} record(s) from {}", records.len(), path.display());
        Ok(Self { path, records })
    }

    /// Дописывает запись в файл, затем в память. Запись, которую журнал не прочтёт
    /// обратно, отклоняется до открытия файла. Если запись в файл не удалась,
    /// список в памяти не меняется.
    pub fn append(&mut self, record: CallRecord) -> Result<()> {
        record.validate()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format!("{}\n", encode(&record)).as_bytes())?;
        debug!("appended record for {:?} to {}", record.full_name, self.path.display());
        self.records.push(record);
        Ok(())
    }

    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
