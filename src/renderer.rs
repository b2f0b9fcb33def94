use actix_web::http::StatusCode;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{Datelike, Local};
use clap::{crate_name, crate_version};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use strum::IntoEnumIterator;

use crate::app::AppState;
use crate::config::QrServeConfig;
use crate::consts::{CSS_ROUTE, DOWNLOAD_ROUTE, FAVICON_ROUTE, PLACEHOLDER_TEXT, URL_PLACEHOLDER};
use crate::customizer::Customizer;
use crate::generator::{Generator, Preview};
use crate::options::RenderAs;
use crate::qr::Surface;

/// Renders the generator page
pub fn page(
    state: &AppState,
    customizer: &Customizer,
    generator: &Generator,
    preview: Preview,
    conf: &QrServeConfig,
) -> Markup {
    let options = state.options();

    html! {
        (DOCTYPE)
        html {
            (page_header(&conf.title))

            body {
                header.app-header {
                    img.logo src=(FAVICON_ROUTE) alt="logo";
                    h1 { (conf.title) }
                }
                main.main-content {
                    form #qr-form action="/" method="get" {
                        input type="hidden" name="event" value="";
                        input type="hidden" name="size" value=(options.size());
                        input type="hidden" name="level" value=(options.level());
                        input type="hidden" name="margin" value=(options.margin());
                        input type="hidden" name="render_as" value=(options.render_as());
                        input type="hidden" name="fg" value=(options.fg_color());
                        input type="hidden" name="bg" value=(options.bg_color());

                        div.url-field {
                            label for="url" { "URL" }
                            input #url type="text" inputmode="url" name="url" value=(state.url())
                                placeholder=(URL_PLACEHOLDER) autofocus
                                onchange="this.form.submit()";
                        }
                        div.panels {
                            (customizer_card(customizer))
                            (generator_card(generator, preview))
                        }
                    }
                }
                footer.app-footer {
                    p { "© " (Local::now().year()) " " (conf.copyright) }
                    p.version { (version_footer()) }
                }
            }
        }
    }
}

/// Partial: customization card
fn customizer_card(customizer: &Customizer) -> Markup {
    let options = customizer.options();

    html! {
        div.customizer-card {
            h2 { "QR code settings" }
            div.control {
                label for="format" { "File format" }
                select #format name="format" data-testid="render-select" onchange="emit(this)" {
                    @for render_as in RenderAs::iter() {
                        option value=(render_as) selected[render_as == options.render_as()] {
                            (render_as.label())
                        }
                    }
                }
            }
            (color_control("Code color", "fg", options.fg_color().as_str(), customizer.fg_text()))
            (color_control("Background color", "bg", options.bg_color().as_str(), customizer.bg_text()))
        }
    }
}

/// Partial: color picker paired with a raw hex text field
fn color_control(title: &str, prefix: &str, color: &str, text: &str) -> Markup {
    let picker = format!("{prefix}_picker");
    let hex = format!("{prefix}_hex");

    html! {
        div.control {
            label for=(picker) { (title) }
            div.color-row {
                input id=(picker) type="color" name=(picker) value=(color)
                    data-testid=(format!("{prefix}-color-input")) onchange="emit(this)";
                input.color-hex-input id=(hex) type="text" name=(hex) value=(text)
                    maxlength="7" spellcheck="false" onchange="emit(this)";
            }
        }
    }
}

/// Partial: display card with the export button
fn generator_card(generator: &Generator, preview: Preview) -> Markup {
    html! {
        div.qr-card {
            div.qr-display {
                @match preview {
                    Preview::Placeholder => {
                        p.placeholder { (PLACEHOLDER_TEXT) }
                    }
                    Preview::Surface(Surface::Canvas(png)) => {
                        img.qr-code data-testid="qr-canvas" alt="QR code"
                            src=(format!("data:image/png;base64,{}", STANDARD.encode(png)));
                    }
                    Preview::Surface(Surface::Svg(markup)) => {
                        div.qr-code data-testid="qr-svg" { (PreEscaped(markup)) }
                    }
                }
            }
            button.export type="submit" formaction=(DOWNLOAD_ROUTE) data-testid="export-btn"
                disabled[!generator.is_export_enabled()] {
                (generator.export_label())
            }
        }
    }
}

// Partial: version footer
fn version_footer() -> Markup {
    html! {
        (format!("{}/{}", crate_name!(), crate_version!()))
    }
}

/// Partial: page header
fn page_header(title: &str) -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta http-equiv="X-UA-Compatible" content="IE=edge";
            meta name="viewport" content="width=device-width, initial-scale=1";

            link rel="icon" type="image/svg+xml" href=(FAVICON_ROUTE);
            link rel="stylesheet" href=(CSS_ROUTE);

            title { (title) }

            (PreEscaped(r#"
                <script>
                    // report which control changed, then let the server render the new state
                    function emit(control) {
                        const form = control.form;
                        form.elements.event.value = control.name;
                        form.submit();
                    }
                </script>
                "#))
        }
    }
}

/// Renders an error on the webpage
pub fn render_error(error_description: &str, error_code: StatusCode) -> Markup {
    html! {
        (DOCTYPE)
        html {
            (page_header(&error_code.to_string()))

            body {
                div.error {
                    p { (error_code.to_string()) }
                    @for error in error_description.lines() {
                        p { (error) }
                    }
                    div.error-nav {
                        a.error-back href="/" {
                            "Go back to the generator"
                        }
                    }
                    p.footer {
                        (version_footer())
                    }
                }
            }
        }
    }
}
