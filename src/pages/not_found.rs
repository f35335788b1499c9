// Not-found page, also shown when another page fails to render.

use maud::{Markup, html};

use crate::error::Result;
use crate::html::empty_state;
use crate::router::View;
use crate::shell::APP_REGION;

use super::page_shell;

fn not_found() -> Markup {
    let message = html! {
        "Page not found."
        div.empty-action {
            a.btn.btn-primary href="#/guide" { "Go to Guide" }
        }
    };
    page_shell(empty_state("404", message))
}

pub fn render(view: &View<'_>) -> Result<()> {
    view.commit(APP_REGION, not_found())?;
    Ok(())
}
