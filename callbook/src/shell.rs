//! Интерактивное меню поверх любой пары BufRead/Write.
//!
//! Ошибки разбора и записи показываются пользователю, после чего меню
//! выводится снова. Цикл завершается по `0` или концу ввода.

use callbooklib::{
    model::{CallRecord, RawFields},
    query::{search, SearchMode},
    store::CallStore,
};
use log::{info, warn};
use std::io::{self, BufRead, Write};

const MENU: &str = "
===== Управління Дзвінками =====
1. Додати запис
2. Вивести всі записи
3. Пошук за прізвищем
4. Пошук за номером телефону
5. Пошук за датою
0. Вихід
=================================";

const NOT_FOUND: &str = "Записів не знайдено.";
const BAD_CHOICE: &str = "Неправильний вибір. Спробуйте ще раз.";

pub struct Shell<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn run(&mut self, store: &mut CallStore) -> io::Result<()> {
        loop {
            writeln!(self.out, "{MENU}")?;
            let Some(choice) = self.prompt("Ваш вибір: ")? else {
                break;
            };
            match choice.trim().parse::<u8>() {
                Ok(0) => break,
                Ok(1) => self.add_record(store)?,
                Ok(2) => self.show_all(store)?,
                Ok(3) => self.search(store, SearchMode::Name)?,
                Ok(4) => self.search(store, SearchMode::Phone)?,
                Ok(5) => self.search(store, SearchMode::Date)?,
                _ => writeln!(self.out, "{BAD_CHOICE}")?,
            }
        }
        Ok(())
    }

    /// `None` — конец ввода.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.out, "{message}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn add_record(&mut self, store: &mut CallStore) -> io::Result<()> {
        writeln!(self.out, "===== Додавання запису =====")?;
        let labels = [
            "ПІП: ",
            "Телефон: ",
            "Дата (yyyy-MM-dd): ",
            "Тариф: ",
            "Хвилини: ",
            "Знижка %: ",
            "Тип (Regular/Business/VIP): ",
        ];
        let mut answers = Vec::with_capacity(labels.len());
        for label in labels {
            match self.prompt(label)? {
                Some(a) => answers.push(a),
                None => return Ok(()),
            }
        }
        let raw = RawFields {
            full_name: &answers[0],
            phone_number: &answers[1],
            call_date: &answers[2],
            rate: &answers[3],
            duration_minutes: &answers[4],
            discount_percent: &answers[5],
            subscriber_type: &answers[6],
        };

        let result = CallRecord::from_fields(&raw).and_then(|r| store.append(r));
        match result {
            Ok(()) => {
                info!("record added, {} in journal", store.len());
                writeln!(self.out, "Запис успішно додано!")
            }
            Err(e) => {
                warn!("record discarded: {e}");
                writeln!(self.out, "Помилка: {e}")
            }
        }
    }

    fn show_all(&mut self, store: &CallStore) -> io::Result<()> {
        writeln!(self.out, "===== Всі записи =====")?;
        self.render(store.records().iter())
    }

    fn search(&mut self, store: &CallStore, mode: SearchMode) -> io::Result<()> {
        writeln!(self.out, "===== Пошук записів =====")?;
        let label = match mode {
            SearchMode::Name => "Введіть прізвище: ",
            SearchMode::Phone => "Введіть телефон: ",
            SearchMode::Date => "Введіть дату (yyyy-MM-dd): ",
        };
        let Some(query) = self.prompt(label)? else {
            return Ok(());
        };
        match search(store.records(), mode, &query) {
            Ok(found) => self.render(found.into_iter()),
            Err(e) => writeln!(self.out, "Помилка: {e}"),
        }
    }

    fn render<'a>(&mut self, records: impl Iterator<Item = &'a CallRecord>) -> io::Result<()> {
        let mut any = false;
        for r in records {
            writeln!(self.out, "{r}")?;
            any = true;
        }
        if !any {
            writeln!(self.out, "{NOT_FOUND}")?;
        }
        Ok(())
    }
}
