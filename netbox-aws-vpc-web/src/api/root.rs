use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use super::{API_PREFIX, PLUGIN_SCOPE};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(api_root));
}

/// Endpoint map of the plugin API.
async fn api_root(req: HttpRequest) -> HttpResponse {
    let info = req.connection_info();
    let base = format!(
        "{}://{}{API_PREFIX}{PLUGIN_SCOPE}",
        info.scheme(),
        info.host()
    );
    HttpResponse::Ok().json(json!({
        "accounts": format!("{base}/accounts/"),
        "vpcs": format!("{base}/vpcs/"),
        "subnets": format!("{base}/subnets/"),
    }))
}
