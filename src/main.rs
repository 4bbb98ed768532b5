use anyhow::Context;
use cart_sync::utils::{logger, validation::Validate};
use cart_sync::{
    Cart, CartCommand, CartEngine, CliConfig, ConsoleNotifier, HttpShopApi, LocalStorage, Outcome,
    ProductId, UpdateProductAmount,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse()
        .resolve()
        .context("failed to load configuration file")?;

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let api = HttpShopApi::from_config(&config);
    let storage = LocalStorage::new(&config.storage_path);
    let engine = CartEngine::new(api.clone(), api, storage, ConsoleNotifier).await;

    let outcome = match config.command {
        CartCommand::Add { product_id } => engine.add_product(ProductId(product_id)).await,
        CartCommand::Remove { product_id } => engine.remove_product(ProductId(product_id)).await,
        CartCommand::Update { product_id, amount } => {
            engine
                .update_product_amount(UpdateProductAmount {
                    product_id: ProductId(product_id),
                    amount,
                })
                .await
        }
        CartCommand::Show => Outcome::Unchanged,
    };

    print_cart(&engine.cart());

    if outcome.is_rejected() {
        std::process::exit(2);
    }

    Ok(())
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("🛒 Cart is empty");
        return;
    }

    println!("🛒 {} products", cart.len());
    for item in cart {
        println!(
            "  #{:<6} {:<40} {:>3} x {:>9.2} = {:>10.2}",
            item.id.0,
            item.title,
            item.amount.get(),
            item.price,
            item.subtotal()
        );
    }
    println!("  Total: {:.2}", cart.total());
}
