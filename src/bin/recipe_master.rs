use brew_recipe_api::config::Defaults;
use brew_recipe_api::{RECIPE_MASTER, logger, recipe_router, run};
use tracing::{error, info};

const DEFAULTS: Defaults = Defaults {
    port: 8001,
    index_html: "static/recipe_master.html",
};

#[tokio::main]
async fn main() {

    logger::init();
    info!("Starting Recipe Master...");

    if let Err(e) = run(RECIPE_MASTER, DEFAULTS, recipe_router).await {
        error!("Recipe Master failed to start: {e}");
        std::process::exit(1);
    }

}
