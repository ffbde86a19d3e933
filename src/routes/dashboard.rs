//! 管理仪表盘静态资源
//!
//! 使用 rust-embed 嵌入 dashboard/dist/，挂载在 `/admin` 下。
//! 未找到的路径回退到 index.html，`./dashboard-custom/` 中的同名文件优先（开发用）。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

pub const DASHBOARD_BASE_PATH: &str = "/admin";

#[derive(Embed)]
#[folder = "dashboard/dist/"]
struct DashboardAssets;

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}

fn get_mime_type(path: &str) -> &'static str {
    match extension(path) {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "ico" => "image/x-icon",
        "woff2" => "font/woff2",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

// 带 hash 的构建产物可以长期缓存
fn should_cache(path: &str) -> bool {
    matches!(
        extension(path),
        "js" | "mjs" | "css" | "svg" | "png" | "woff2"
    )
}

/// 替换页面中的 %BASE_PATH% 占位符
fn process_html(content: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(content)
        .replace("%BASE_PATH%", DASHBOARD_BASE_PATH)
        .into_bytes()
}

fn get_file(path: &str) -> Option<Vec<u8>> {
    // 拒绝跳出目录的路径
    if path.split('/').any(|segment| segment == "..") {
        return None;
    }
    std::fs::read(format!("./dashboard-custom/{path}"))
        .ok()
        .or_else(|| DashboardAssets::get(path).map(|f| f.data.to_vec()))
}

pub async fn serve_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    let (content, file_path) = match (path.is_empty(), get_file(path)) {
        (false, Some(content)) => (Some(content), path),
        _ => (get_file("index.html"), "index.html"),
    };

    let Some(mut data) = content else {
        return Ok(HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(
                "<!DOCTYPE html><html><body><h1>Dashboard Not Found</h1>\
                 <p>The dashboard assets have not been embedded.</p></body></html>",
            ));
    };

    let mime = get_mime_type(file_path);
    if mime.starts_with("text/html") {
        data = process_html(&data);
    }

    let mut response = HttpResponse::Ok();
    response.content_type(mime);
    if should_cache(file_path) {
        response.insert_header(("Cache-Control", "public, max-age=31536000, immutable"));
    } else {
        response.insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"));
    }
    Ok(response.body(data))
}

pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(DASHBOARD_BASE_PATH)
            .route("", web::get().to(serve_dashboard))
            .route("/{tail:.*}", web::get().to(serve_dashboard)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_mime_type() {
        assert_eq!(get_mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            get_mime_type("assets/app.js"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(get_mime_type("unknown.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_should_cache() {
        assert!(should_cache("assets/app.js"));
        assert!(!should_cache("index.html"));
    }

    #[test]
    fn test_process_html_sets_base_path() {
        let html = process_html(b"<base href=\"%BASE_PATH%/\">");
        assert_eq!(html, b"<base href=\"/admin/\">".to_vec());
    }

    #[test]
    fn test_parent_segments_are_rejected() {
        assert!(get_file("../Cargo.toml").is_none());
    }

    #[test]
    fn test_index_is_embedded() {
        let index = get_file("index.html").expect("dashboard index");
        assert!(String::from_utf8_lossy(&index).contains("Active Students"));
    }
}
