//! CSV с заголовком:
//! full_name,phone_number,call_date,rate,duration_minutes,discount_percent,subscriber_type,cost
//!
//! `cost` пишется для таблиц (пусто при переполнении) и при чтении игнорируется.

use crate::{
    error::Result,
    model::{parse_date, parse_decimal, parse_minutes, CallRecord, SubscriberType, DATE_FORMAT},
};
use csv::{ReaderBuilder, WriterBuilder};
use std::io::{BufRead, Write};

#[derive(serde::Deserialize)]
struct CsvRow {
    full_name: String,
    phone_number: String,
    call_date: String,
    rate: String,
    duration_minutes: String,
    discount_percent: String,
    subscriber_type: String,
}

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    full_name: &'a str,
    phone_number: &'a str,
    call_date: String,
    rate: String,
    duration_minutes: u32,
    discount_percent: String,
    subscriber_type: &'static str,
    cost: Option<String>,
}

pub struct Csv;

impl crate::traits::ReadFormat for Csv {
    fn read<R: BufRead>(r: R) -> Result<Vec<CallRecord>> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(r);
        let mut records = Vec::new();

        for rec in rdr.deserialize::<CsvRow>() {
            let row = rec?;
            let r = CallRecord::new(
                row.full_name,
                row.phone_number,
                parse_date(&row.call_date)?,
                parse_decimal("rate", &row.rate)?,
                parse_minutes(&row.duration_minutes)?,
                parse_decimal("discount", &row.discount_percent)?,
                row.subscriber_type.parse::<SubscriberType>()?,
            );
            r.validate()?;
            records.push(r);
        }

        Ok(records)
    }
}

impl crate::traits::WriteFormat for Csv {
    fn write<W: Write>(mut w: W, records: &[CallRecord]) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);

        for r in records {
            let out = CsvOutRow {
                full_name: &r.full_name,
                phone_number: &r.phone_number,
                call_date: r.call_date.format(DATE_FORMAT).to_string(),
                rate: r.rate.to_string(),
                duration_minutes: r.duration_minutes,
                discount_percent: r.discount_percent.to_string(),
                subscriber_type: r.subscriber_type.as_str(),
                cost: r.cost().map(|c| c.round_dp(2).to_string()),
            };
            wrt.serialize(out)?;
        }
        wrt.flush()?;
        Ok(())
    }
}
