//! Журнал звонков: одна запись на строку, семь полей через `;`:
//! full_name;phone_number;yyyy-mm-dd;rate;duration;discount;subscriber_type
//!
//! Разделитель внутри полей не экранируется, поэтому записи с `;` или переводом строки
//! в имени или телефоне отклоняются (`CallRecord::validate`) до записи в файл.

use crate::{
    error::{CallsError, Result},
    model::{parse_date, parse_decimal, parse_minutes, CallRecord, SubscriberType, DATE_FORMAT},
};
use log::{debug, warn};
use std::io::{BufRead, Write};

pub const SEPARATOR: char = ';';
pub const FIELD_COUNT: usize = 7;

/// Каноническая строка записи (без перевода строки).
pub fn encode(r: &CallRecord) -> String {
    if r.full_name.contains(SEPARATOR) || r.phone_number.contains(SEPARATOR) {
        warn!(
            "record for {:?} contains '{SEPARATOR}' and will not decode back",
            r.full_name
        );
    }
    format!(
        "{};{};{};{};{};{};{}",
        r.full_name,
        r.phone_number,
        r.call_date.format(DATE_FORMAT),
        r.rate,
        r.duration_minutes,
        r.discount_percent,
        r.subscriber_type.as_str(),
    )
}

/// Разбор строки журнала. Тип абонента — строго с учётом регистра.
pub fn decode(line: &str) -> Result<CallRecord> {
    let p: Vec<&str> = line.split(SEPARATOR).collect();
    if p.len() != FIELD_COUNT {
        return Err(CallsError::Parse(format!(
            "expected {FIELD_COUNT} fields, found {}",
            p.len()
        )));
    }
    let r = CallRecord::new(
        p[0],
        p[1],
        parse_date(p[2])?,
        parse_decimal("rate", p[3])?,
        parse_minutes(p[4])?,
        parse_decimal("discount", p[5])?,
        p[6].parse::<SubscriberType>()?,
    );
    r.validate()?;
    Ok(r)
}

pub struct Journal;

impl crate::traits::ReadFormat for Journal {
    fn read<R: BufRead>(r: R) -> Result<Vec<CallRecord>> {
        let mut records = Vec::new();
        for (i, line) in r.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                debug!("journal line {}: blank, skipped", i + 1);
                continue;
            }
            let rec = decode(line).map_err(|e| match e {
                CallsError::Parse(msg) => CallsError::Parse(format!("line {}: {msg}", i + 1)),
                other => other,
            })?;
            records.push(rec);
        }
        Ok(records)
    }
}

impl crate::traits::WriteFormat for Journal {
    fn write<W: Write>(mut w: W, records: &[CallRecord]) -> Result<()> {
        for r in records {
            writeln!(w, "{}", encode(r))?;
        }
        w.flush()?;
        Ok(())
    }
}
