use backend::config::ServerConfig;
use backend::services;
use backend::services::mailer::Mailer;
use backend::state::AppState;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info, warn};
use mime_guess::from_path;
use std::fs;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env();
    fs::create_dir_all(&config.upload_dir)?;
    fs::create_dir_all(&config.output_dir)?;

    let mailer = match Mailer::from_config(&config.mail) {
        Ok(Some(mailer)) => {
            info!("Result mails are delivered via {}", mailer.kind());
            Some(mailer)
        }
        Ok(None) => {
            warn!("Neither SMTP_HOST nor MAIL_OUTBOX_DIR is set; submissions will be refused");
            None
        }
        Err(e) => {
            error!("Invalid mail configuration: {}", e);
            None
        }
    };

    let url = config.url();
    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    let bind = (config.host.clone(), config.port);
    let state = web::Data::new(AppState::new(config, mailer));

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(services::submit::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
        .bind(bind)?
        .run()
        .await
}
