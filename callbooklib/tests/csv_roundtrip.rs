use callbooklib::{
    formats::csv::Csv,
    model::{CallRecord, SubscriberType},
    traits::{ReadFormat, WriteFormat},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Cursor;

#[test]
fn csv_write_then_read_back() {
    let recs = vec![
        CallRecord::new(
            "Petrov, Ivan",
            "+380501234567",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Decimal::from_str_exact("1.25").unwrap(),
            30,
            Decimal::from_str_exact("10").unwrap(),
            SubscriberType::Vip,
        ),
        CallRecord::new(
            "Olena",
            "123",
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            Decimal::ONE,
            1,
            Decimal::ZERO,
            SubscriberType::Regular,
        ),
    ];

    let mut out = Vec::new();
    Csv::write(&mut out, &recs).expect("write csv");
    let text = String::from_utf8(out.clone()).unwrap();
    assert!(text.starts_with("full_name,phone_number,call_date,rate,duration_minutes,discount_percent,subscriber_type,cost\n"));
    assert!(text.contains("\"Petrov, Ivan\",+380501234567,2024-03-01,1.25,30,10,VIP,33.75"), "{text}");

    let back = Csv::read(Cursor::new(out)).expect("read csv");
    assert_eq!(back, recs);
}

#[test]
fn csv_import_rejects_separator_in_name() {
    let input = "full_name,phone_number,call_date,rate,duration_minutes,discount_percent,subscriber_type\n\"Petrov; Ivan\",1,2024-03-01,1,1,0,VIP\n";
    assert!(Csv::read(Cursor::new(input)).is_err());
}

#[test]
fn csv_rejects_lowercase_subscriber_type() {
    let input = "full_name,phone_number,call_date,rate,duration_minutes,discount_percent,subscriber_type\nA,1,2024-03-01,1,1,0,vip\n";
    assert!(Csv::read(Cursor::new(input)).is_err());
}
