extern crate news;

use std::error::Error;

use news::config::Config;
use news::db::seed::SeedData;
use news::db::PgStore;

/// Resets the configured database to the fixture data set.
fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    let store = PgStore::connect(&config)?;
    let data = SeedData::test();
    store.seed(&data)?;
    println!(
        "Seeded {} articles and {} comments",
        data.articles.len(),
        data.comments.len()
    );
    Ok(())
}
