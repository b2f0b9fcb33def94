use actix_web::{
    HttpRequest, HttpResponse, Responder,
    http::header::{ContentDisposition, ContentType},
    web,
};
use log::info;

use crate::app::{EventQuery, Message, StateQuery};
use crate::config::QrServeConfig;
use crate::customizer::Customizer;
use crate::errors::RuntimeError;
use crate::renderer;

/// The generator page
///
/// Every control of the page submits the whole form, so each request carries the complete
/// state plus, optionally, the one customization event that triggered it.
pub async fn index(
    state: web::Query<StateQuery>,
    event: web::Query<EventQuery>,
    conf: web::Data<QrServeConfig>,
) -> Result<HttpResponse, RuntimeError> {
    let mut state = state.into_inner().into_state(&conf.default_options)?;

    let event = event.into_inner();
    let mut customizer = Customizer::new(state.options())
        .with_drafts(event.fg_hex.as_deref(), event.bg_hex.as_deref());
    if let Some(event) = event.into_event()?
        && let Some(options) = customizer.handle(event)
    {
        state.update(Message::OptionsChanged(options));
    }
    customizer.sync(state.options());

    let generator = state.generator(&conf);
    let preview = generator.render()?;

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(renderer::page(&state, &customizer, &generator, preview, &conf).into_string()))
}

/// Exports the code in the currently selected format as an attachment
pub async fn download(
    state: web::Query<StateQuery>,
    conf: web::Data<QrServeConfig>,
) -> Result<HttpResponse, RuntimeError> {
    let state = state.into_inner().into_state(&conf.default_options)?;
    let download = state.generator(&conf).export()?;

    info!(
        "Serving {} ({} bytes)",
        download.filename,
        download.bytes.len()
    );

    Ok(HttpResponse::Ok()
        .insert_header(ContentType(download.content_type))
        .insert_header(ContentDisposition::attachment(download.filename))
        .body(download.bytes))
}

pub async fn error_404(req: HttpRequest) -> Result<HttpResponse, RuntimeError> {
    Err(RuntimeError::RouteNotFoundError(req.path().to_string()))
}

pub async fn healthcheck() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

pub async fn favicon() -> impl Responder {
    let logo = include_str!("../data/logo.svg");
    HttpResponse::Ok()
        .insert_header(ContentType(mime::IMAGE_SVG))
        .body(logo)
}

pub async fn css(stylesheet: web::Data<String>) -> impl Responder {
    HttpResponse::Ok()
        .insert_header(ContentType(mime::TEXT_CSS))
        .body(stylesheet.to_string())
}
