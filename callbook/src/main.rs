use anyhow::{Context, Result};
use callbooklib::{
    formats::{csv::Csv, journal::Journal, xml::SimpleXml},
    model::{CallRecord, RawFields},
    query::{search, SearchMode},
    store::CallStore,
    traits::{ReadFormat, WriteFormat},
};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

mod shell;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Fmt {
    Csv,
    Xml,
    Journal,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum By {
    Name,
    Phone,
    Date,
}

impl From<By> for SearchMode {
    fn from(by: By) -> Self {
        match by {
            By::Name => SearchMode::Name,
            By::Phone => SearchMode::Phone,
            By::Date => SearchMode::Date,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "callbook", version, about = "Учёт телефонных звонков")]
struct Cli {
    /// Файл журнала
    #[arg(short = 'f', long = "file", env = "CALLBOOK_FILE", default_value = "calls.txt")]
    file: PathBuf,

    /// Подробнее лог (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Без команды — интерактивное меню
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Добавить запись
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        /// yyyy-mm-dd
        #[arg(long)]
        date: String,
        /// Тариф за минуту
        #[arg(long)]
        rate: String,
        #[arg(long)]
        minutes: String,
        /// Скидка, %
        #[arg(long, default_value = "0")]
        discount: String,
        /// Regular, Business или VIP (регистр не важен)
        #[arg(long, default_value = "Regular")]
        kind: String,
    },
    /// Вывести все записи
    List,
    /// Поиск по имени, телефону или дате
    Search {
        #[arg(long, value_enum)]
        by: By,
        query: String,
    },
    /// Выгрузить журнал (по умолчанию в stdout)
    Export {
        #[arg(long, value_enum)]
        format: Fmt,
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
    /// Дописать в журнал записи из файла (по умолчанию stdin)
    Import {
        #[arg(long, value_enum)]
        format: Fmt,
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut store = CallStore::load(&cli.file)
        .with_context(|| format!("cannot load journal {}", cli.file.display()))?;
    info!("{} record(s) in {}", store.len(), cli.file.display());

    let Some(command) = cli.command else {
        let stdin = io::stdin();
        return shell::Shell::new(stdin.lock(), io::stdout())
            .run(&mut store)
            .context("interactive session failed");
    };

    match command {
        Command::Add { name, phone, date, rate, minutes, discount, kind } => {
            let record = CallRecord::from_fields(&RawFields {
                full_name: &name,
                phone_number: &phone,
                call_date: &date,
                rate: &rate,
                duration_minutes: &minutes,
                discount_percent: &discount,
                subscriber_type: &kind,
            })?;
            store.append(record)?;
        }
        Command::List => print_records(store.records().iter())?,
        Command::Search { by, query } => {
            let found = search(store.records(), by.into(), &query)?;
            print_records(found.into_iter())?;
        }
        Command::Export { format, output } => {
            let mut writer: Box<dyn Write> = match output {
                Some(path) => Box::new(File::create(path)?),
                None => Box::new(io::stdout()),
            };
            let records = store.records();
            match format {
                Fmt::Csv => Csv::write(&mut writer, records),
                Fmt::Xml => SimpleXml::write(&mut writer, records),
                Fmt::Journal => Journal::write(&mut writer, records),
            }?;
            writer.flush()?;
        }
        Command::Import { format, input } => {
            let reader: Box<dyn io::Read> = match input {
                Some(path) => Box::new(File::open(path)?),
                None => Box::new(io::stdin()),
            };
            let br = BufReader::new(reader);
            let records = match format {
                Fmt::Csv => Csv::read(br),
                Fmt::Xml => SimpleXml::read(br),
                Fmt::Journal => Journal::read(br),
            }?;
            let count = records.len();
            for r in records {
                store.append(r)?;
            }
            info!("imported {count} record(s)");
        }
    }

    Ok(())
}

fn print_records<'a>(records: impl Iterator<Item = &'a CallRecord>) -> Result<()> {
    let mut out = io::stdout().lock();
    let mut any = false;
    for r in records {
        writeln!(out, "{r}")?;
        any = true;
    }
    if !any {
        writeln!(out, "Записів не знайдено.")?;
    }
    Ok(())
}
