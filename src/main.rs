use clap::Parser;
use product_import::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        // Ctrl+C stops the import at the next batch boundary; the batch in
        // flight still completes and the partial report is printed.
        let signal_token = cancellation_token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nReceived CTRL+C, stopping after the current batch...");
                signal_token.cancel();
            }
        });

        commands::run(args, cancellation_token).await
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Product Import - Bulk catalog loading from CSV");
    println!("==============================================");
    println!();
    println!("Validate storefront product CSV files row by row and create every");
    println!("valid product in the product store.");
    println!();
    println!("USAGE:");
    println!("    product-import <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Validate a CSV file and create its valid products");
    println!("    validate    Validate a CSV file without creating any products");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Check a file before importing it:");
    println!("    product-import validate products.csv");
    println!();
    println!("    # Import into a specific store with smaller batches:");
    println!("    product-import import products.csv --store ./products.jsonl --batch-size 5");
    println!();
    println!("    # Machine-readable report:");
    println!("    product-import import products.csv --output-format json");
    println!();
    println!("REQUIRED COLUMNS:");
    println!("    name, price, category, productType");
    println!();
    println!("For detailed help on any command, use:");
    println!("    product-import <COMMAND> --help");
}
