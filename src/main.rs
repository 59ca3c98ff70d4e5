use clap::Parser;
use rocket_cart::core::ConfigProvider;
use rocket_cart::utils::error::{CartError, ErrorSeverity};
use rocket_cart::utils::{logger, validation::Validate};
use rocket_cart::{
    ApiCatalog, Cart, CartStore, CliConfig, Command, LocalStorage, TomlConfig, TracingNotifier,
    UpdateProductAmount,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 2,
            ErrorSeverity::Medium => 3,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 4,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: &CliConfig) -> Result<(), CartError> {
    let settings: Box<dyn ConfigProvider> = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            let config = TomlConfig::from_file(path)?;
            config.validate()?;
            Box::new(config)
        }
        None => {
            cli.validate()?;
            Box::new(cli.clone())
        }
    };

    let catalog = ApiCatalog::from_config(settings.as_ref())?;
    let storage = LocalStorage::new(settings.storage_path().to_string());
    let store = CartStore::load(catalog, storage, TracingNotifier, settings.storage_key()).await?;

    let cart = match cli.command {
        Command::Show => store.cart().await,
        Command::Add { product_id } => store.add_product(product_id).await?,
        Command::Remove { product_id } => store.remove_product(product_id).await?,
        Command::Update { product_id, amount } => {
            store
                .update_product_amount(UpdateProductAmount { product_id, amount })
                .await?
        }
    };

    print_cart(&cart);
    Ok(())
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("🛒 Cart is empty");
        return;
    }

    println!("🛒 {} products, {} items", cart.len(), cart.item_count());
    for line in cart.lines() {
        println!(
            "  #{:<5} {:<40} {:>3} x {:>9.2} = {:>10.2}",
            line.id(),
            line.product.title().unwrap_or("-"),
            line.amount,
            line.product.price().unwrap_or(0.0),
            line.subtotal()
        );
    }
    println!("  Total: {:.2}", cart.subtotal());
}
