#[macro_use]
extern crate rocket;

#[macro_use]
extern crate error_chain;

#[macro_use]
extern crate diesel;

extern crate chrono;
extern crate dotenv;
extern crate parking_lot;
extern crate r2d2;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;

pub mod article;
pub mod comment;
pub mod config;
pub mod db;
pub mod endpoints;
pub mod topic;
pub mod types;
mod utils;

use rocket::serde::json::{Json, Value};
use rocket::{Build, Rocket};

use db::Store;

#[catch(404)]
fn not_found() -> Json<Value> {
    Json(json!({ "msg": "Route not found!" }))
}

#[catch(400)]
fn bad_request() -> Json<Value> {
    Json(json!({ "msg": "Bad Request" }))
}

#[catch(500)]
fn internal_error() -> Json<Value> {
    Json(json!({ "msg": "Internal Server Error" }))
}

/// Builds the service around `store`: every route, the JSON catchers and
/// the store itself as managed state.
pub fn rocket(store: Box<dyn Store>) -> Rocket<Build> {
    rocket::build()
        .manage(store)
        .mount("/api", routes![endpoints::list, topic::list])
        .mount(
            "/api/articles",
            routes![
                article::list,
                article::get,
                article::update,
                comment::list,
                comment::create
            ],
        )
        .mount("/api/comments", routes![comment::get, comment::delete])
        .register("/", catchers![not_found, bad_request, internal_error])
}
