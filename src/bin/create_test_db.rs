use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker::{
    Category, TRANSACTIONS_SLOT, Transaction, TransactionType, initialize_db, new_transaction_id,
    write_slot,
};

/// A utility for creating a test database for the REST API server of expense_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

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

    println!("Creating demo transactions...");

    let transactions = demo_transactions();
    let json = serde_json::to_string(&transactions)?;
    write_slot(TRANSACTIONS_SLOT, &json, &conn)?;

    println!("Saved {} transactions.", transactions.len());
    println!("Success!");

    Ok(())
}

fn demo_transactions() -> Vec<Transaction> {
    let today = OffsetDateTime::now_utc().date();

    [
        (TransactionType::Income, 52000.0, Category::Salary, 27, "Monthly salary"),
        (TransactionType::Expense, 15000.0, Category::Bills, 25, "Rent"),
        (TransactionType::Expense, 1850.5, Category::Food, 20, "Groceries"),
        (TransactionType::Expense, 640.0, Category::Travel, 14, "Metro card top-up"),
        (TransactionType::Income, 8000.0, Category::Freelance, 10, "Logo design"),
        (TransactionType::Expense, 2399.0, Category::Shopping, 7, ""),
        (TransactionType::Expense, 499.0, Category::Entertainment, 5, "Streaming subscription"),
        (TransactionType::Expense, 1200.0, Category::Healthcare, 2, "Pharmacy"),
        (TransactionType::Income, 1500.0, Category::Gifts, 1, "Birthday"),
        (TransactionType::Expense, 320.0, Category::Food, 0, "Lunch"),
    ]
    .into_iter()
    .map(
        |(transaction_type, amount, category, days_ago, notes)| Transaction {
            id: new_transaction_id(),
            transaction_type,
            amount,
            category,
            date: today - Duration::days(days_ago),
            notes: notes.to_owned(),
        },
    )
    .collect()
}
