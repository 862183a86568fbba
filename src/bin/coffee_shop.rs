use brew_recipe_api::config::Defaults;
use brew_recipe_api::{COFFEE_SHOP, coffee_shop_router, logger, run};
use tracing::{error, info};

const DEFAULTS: Defaults = Defaults {
    port: 8000,
    index_html: "static/coffee_shop.html",
};

#[tokio::main]
async fn main() {

    logger::init();
    info!("🔥 Starting up the coffee shop...");

    if let Err(e) = run(COFFEE_SHOP, DEFAULTS, coffee_shop_router).await {
        error!("Coffee shop failed to start: {e}");
        std::process::exit(1);
    }

}
