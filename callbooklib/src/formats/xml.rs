//! Простой XML: <CallLog><record>...</record></CallLog>

use crate::{
    error::{CallsError, Result},
    model::{parse_date, CallRecord, SubscriberType, DATE_FORMAT},
};
use quick_xml::{de::from_reader, se::to_string};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

#[derive(Serialize, Deserialize, Debug)]
struct XmlRecord {
    full_name: String,
    phone_number: String,
    call_date: String,
    #[serde(with = "rust_decimal::serde::str")]
    rate: Decimal,
    duration_minutes: u32,
    #[serde(with = "rust_decimal::serde::str")]
    discount_percent: Decimal,
    subscriber_type: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename = "CallLog")]
struct XmlLog {
    #[serde(rename = "record", default)]
    records: Vec<XmlRecord>,
}

pub struct SimpleXml;

impl crate::traits::ReadFormat for SimpleXml {
    fn read<R: BufRead>(r: R) -> Result<Vec<CallRecord>> {
        let x: XmlLog = from_reader(r).map_err(|e| CallsError::Xml(format!("{e}")))?;

        let mut records = Vec::with_capacity(x.records.len());
        for e in x.records {
            let r = CallRecord::new(
                e.full_name,
                e.phone_number,
                parse_date(&e.call_date)?,
                e.rate,
                e.duration_minutes,
                e.discount_percent,
                e.subscriber_type.parse::<SubscriberType>()?,
            );
            r.validate()?;
            records.push(r);
        }

        Ok(records)
    }
}

impl crate::traits::WriteFormat for SimpleXml {
    fn write<W: Write>(mut w: W, records: &[CallRecord]) -> Result<()> {
        let x = XmlLog {
            records: records
                .iter()
                .map(|r| XmlRecord {
                    full_name: r.full_name.clone(),
                    phone_number: r.phone_number.clone(),
                    call_date: r.call_date.format(DATE_FORMAT).to_string(),
                    rate: r.rate,
                    duration_minutes: r.duration_minutes,
                    discount_percent: r.discount_percent,
                    subscriber_type: r.subscriber_type.as_str().to_string(),
                })
                .collect(),
        };

        let s = to_string(&x).map_err(|e| CallsError::Xml(format!("{e}")))?;
        w.write_all(s.as_bytes())?;
        w.flush()?;
        Ok(())
    }
}
