//! Унифицированные трэйты чтения/записи на основе std::io::{BufRead, Write}.

use crate::{error::Result, model::CallRecord};
use std::io::{BufRead, Write};

pub trait ReadFormat {
    fn read<R: BufRead>(r: R) -> Result<Vec<CallRecord>>;
}

pub trait WriteFormat {
    fn write<W: Write>(w: W, records: &[CallRecord]) -> Result<()>;
}

pub trait Format: ReadFormat + WriteFormat {}
impl<T: ReadFormat + WriteFormat> Format for T {}
