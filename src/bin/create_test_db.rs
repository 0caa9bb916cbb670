use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime, Time};

use spendlog::{Description, SQLiteTransactionStore, Transaction, TransactionStore, initialize_db};

/// A utility for creating a test database for the spendlog server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many days of transactions to create, ending today.
    #[arg(long, default_value_t = 450)]
    days: u32,
}

const SAMPLE_EXPENSES: [(&str, f64); 6] = [
    ("Groceries", -84.35),
    ("Coffee", -5.5),
    ("Petrol", -72.1),
    ("Power bill", -143.87),
    ("Dinner out", -61.0),
    ("Books", -24.99),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let store = SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)));
    let today = OffsetDateTime::now_utc().replace_time(Time::MIDNIGHT);

    println!("Creating transactions for the last {} days...", args.days);

    let mut count = 0;

    for day in 0..args.days {
        let date = today - Duration::days(i64::from(day));

        // Salary on the first of each month.
        if date.day() == 1 {
            store.insert(Transaction::build(
                3250.0,
                date,
                Description::new("Salary")?,
            ))?;
            count += 1;
        }

        // Skip a few days so that the daily pattern is not perfectly regular.
        if day % 3 == 2 {
            continue;
        }

        let (description, amount) = SAMPLE_EXPENSES[day as usize % SAMPLE_EXPENSES.len()];
        // Vary amounts a little between months.
        let amount = amount * (1.0 + f64::from(u8::from(date.month())) / 100.0);
        store.insert(Transaction::build(
            (amount * 100.0).round() / 100.0,
            date + Duration::hours(12),
            Description::new(description)?,
        ))?;
        count += 1;
    }

    println!("Created {count} transactions.");
    println!("Success!");

    Ok(())
}
