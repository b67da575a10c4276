// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal presentation of outcomes, reports, and transaction history.
//!
//! All formatting lives here; the workflow and aggregator return numeric
//! data and never shape strings for display.

use std::collections::HashMap;

use colored::Colorize;
use tollgate_metrics::{Report, TransactionRecord};
use tollgate_workflow::QueryOutcome;

/// Print the settled payment details for a delivered response.
pub fn print_transaction_details(outcome: &QueryOutcome) {
    println!("\n--- Transaction Details ---");
    println!("Transaction Hash: {}", outcome.tx_reference);
    println!("Cost: {} USDC", format_cost(outcome.cost));
    println!("Tokens used: {}", outcome.token_usage);
    if let Some(producer) = &outcome.producer {
        println!("Response generated by agent: {producer}");
    }
}

/// Print the delivered content.
pub fn print_response_content(content: &str) {
    println!("\n--- Response Content ---\n");
    println!("{content}");
}

/// Print an error message.
pub fn print_error(error: &str) {
    eprintln!("\n{} {}", "Error:".red().bold(), error);
}

/// Print the monitoring report.
pub fn print_report(report: &Report) {
    println!("\n{}", "=== Performance Report ===".bold());
    match report {
        Report::Empty { status } => println!("{status}"),
        Report::Summary(summary) => {
            println!("Total transactions: {}", summary.total_transactions);
            println!("Success rate: {}", format_rate(summary.success_rate));
            println!("Average cost: ${}", format_cost(summary.avg_cost));
            println!("Average tokens: {}", summary.avg_tokens.round() as u64);
            println!("Average duration: {}", format_duration(summary.avg_duration_secs));
        }
    }
}

/// Print the recorded transaction history.
pub fn print_transactions(transactions: &HashMap<String, TransactionRecord>) {
    println!("\n{}", "=== Recent Transactions ===".bold());
    if transactions.is_empty() {
        println!("No transactions recorded.");
        return;
    }

    let mut keys: Vec<_> = transactions.keys().collect();
    keys.sort();
    for key in keys {
        let record = &transactions[key];
        println!("\nTransaction: {}", abbreviate(key));
        println!("  Status: {}", record.status);
        println!("  Time: {}", record.timestamp);
        println!("  Tokens: {}", record.tokens);
        println!("  Cost: {} USDC", format_cost(record.cost));
        if let Some(error) = &record.error {
            println!("  Error: {}", error.red());
        }
    }
}

/// Fixed six-decimal cost formatting, matching USDC precision.
fn format_cost(cost: f64) -> String {
    format!("{cost:.6}")
}

/// Fractional rate as a percentage with one decimal.
fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Seconds with two decimals.
fn format_duration(secs: f64) -> String {
    format!("{secs:.2}s")
}

/// Shorten long transaction keys for display.
fn abbreviate(key: &str) -> String {
    if key.len() > 10 {
        format!("{}...", &key[..10])
    } else {
        key.to_string()
    }
}
