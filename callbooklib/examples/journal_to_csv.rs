use callbooklib::{
    formats::{csv::Csv, journal::Journal},
    traits::{ReadFormat, WriteFormat},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Журнал (stdin) -> CSV (stdout)
    let records = Journal::read(std::io::BufReader::new(std::io::stdin()))?;
    Csv::write(std::io::stdout(), &records)?;
    Ok(())
}
