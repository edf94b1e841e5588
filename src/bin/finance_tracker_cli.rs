use std::{env, path::PathBuf, process};

use colored::Colorize;
use finance_tracker::{
    config::ConfigManager,
    currency::format_currency_value,
    init, input,
    ledger::{BalanceStatus, Ledger, Record, RecordKind},
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });

    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    let symbol = config.currency_symbol.as_str();
    let (mut ledger, report) =
        Ledger::open_with_policy(manager.data_file(&config), config.corrupt_file_policy());
    if let Some(error) = report.error() {
        eprintln!("Error loading data: {error}");
        if let Some(moved) = report.quarantined() {
            eprintln!("The unreadable file was kept at {}", moved.display());
        }
    }

    match command.as_str() {
        "add" => {
            let kind = input::parse_kind(&required(&mut args))?;
            let date = input::parse_date(&required(&mut args))?;
            let description = required(&mut args);
            let amount = input::parse_amount(&required(&mut args))?;
            let due_date = match kind {
                RecordKind::Expense => args.next().as_deref().and_then(input::parse_due_date),
                RecordKind::Income => None,
            };
            let record = Record::new(date, description, amount, kind, due_date)?;
            ledger.add_record(record)?;
            println!("{} record added successfully!", kind.label());
        }
        "list" => print_table(ledger.list_active(), symbol),
        "show" => {
            for record in ledger.list_active() {
                println!("{}", record.render(symbol));
            }
        }
        "trash" => {
            if ledger.list_trash().is_empty() {
                println!("Trash bin is empty.");
            } else {
                println!("--- Trash Bin ---");
                print_table(ledger.list_trash(), symbol);
            }
        }
        "delete" => match input::parse_index(&required(&mut args))? {
            None => println!("Deletion cancelled."),
            Some(index) => {
                let removed = ledger.delete_by_index(index)?;
                println!(
                    "Deleted: {} ({}{})",
                    removed.description(),
                    removed.kind().sign(),
                    format_currency_value(removed.amount(), symbol)
                );
            }
        },
        "balance" => {
            let balance = ledger.compute_balance();
            println!("--- Financial Balance Report ---");
            println!(
                "Total Allowances: {}",
                format_currency_value(balance.total_income, symbol)
            );
            println!(
                "Total Plans: {}",
                format_currency_value(balance.total_expense, symbol)
            );
            println!("Net Balance: {}", format_currency_value(balance.net, symbol));
            let status = balance.status();
            let advice = match status {
                BalanceStatus::Surplus => status.advice().green(),
                BalanceStatus::Deficit => status.advice().red().bold(),
                BalanceStatus::Even => status.advice().yellow(),
            };
            println!("Status: {advice}");
        }
        "due" => {
            let due = ledger.upcoming_due();
            if due.is_empty() {
                println!("No upcoming due dates.");
            } else {
                println!("Upcoming Due Dates:");
                for record in due {
                    println!(
                        "- {}: {} due on {}",
                        record.description(),
                        format_currency_value(record.amount(), symbol),
                        record.due_date().unwrap_or_default()
                    );
                }
            }
        }
        "export" => {
            let target = PathBuf::from(required(&mut args));
            ledger.export_to(&target)?;
            println!("Exported data to {}", target.display());
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

fn required(args: &mut impl Iterator<Item = String>) -> String {
    args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    })
}

fn print_table(records: &[Record], symbol: &str) {
    if records.is_empty() {
        println!("No records to display.");
        return;
    }
    println!(
        "{:<3} {:<12} {:<20} {:<12} {:<15} {:<9}",
        "#", "Date", "Description", "Amount", "Due Date", "Type"
    );
    println!("{}", "-".repeat(75));
    for (position, record) in records.iter().enumerate() {
        let amount = format!(
            "{}{}",
            record.kind().sign(),
            format_currency_value(record.amount(), symbol)
        );
        println!(
            "{:<3} {:<12} {:<20} {:<12} {:<15} {:<9}",
            position + 1,
            record.date().to_string(),
            record.description(),
            amount,
            record.due_date().unwrap_or("N/A"),
            record.kind().label()
        );
    }
}

fn print_usage() {
    eprintln!(
        "Usage: finance_tracker_cli <command>\n\
         Commands:\n  \
         add <plan|allowance> <MM-DD-YYYY> <description> <amount> [due date]\n  \
         list\n  \
         show\n  \
         trash\n  \
         delete <number>   (0 cancels)\n  \
         balance\n  \
         due\n  \
         export <file.json>"
    );
}
