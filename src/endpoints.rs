use rocket::response::content::RawJson;

/// Documentation for every route, keyed by `"METHOD path"`.
static ENDPOINTS: &str = include_str!("../endpoints.json");

#[get("/")]
pub fn list() -> RawJson<String> {
    RawJson(format!("{{\"endpoints\":{}}}", ENDPOINTS))
}
