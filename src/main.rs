extern crate news;
extern crate rocket;

use std::error::Error;

use news::config::Config;
use news::db::PgStore;

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    let store = PgStore::connect(&config)?;
    let _ = news::rocket(Box::new(store)).launch().await?;
    Ok(())
}
