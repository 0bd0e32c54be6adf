use anyhow::Result;
use teloxide::prelude::*;

mod chart;
mod coingecko;
mod compare;
mod config;
mod dependencies;
mod dexscreener;
mod geckoterminal;
mod token_query;

use crate::dependencies::BotDependencies;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let bot = Bot::from_env();
    let bot_deps = BotDependencies::from_env();

    log::info!("tokenpulse bot starting");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(token_query::handler::handle_message))
        .branch(Update::filter_callback_query().endpoint(compare::handler::handle_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![bot_deps])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
