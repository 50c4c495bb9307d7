use crate::components::Document;
use crate::view::ViewMount;
use dioxus::prelude::*;
use tracing::debug;

/// A page bound to a route.
///
/// `mount` is the whole contract between the router and the delegated view: it receives
/// the typed route parameters and returns the view with its props. No validation happens
/// here; the view owns the meaning of its inputs.
pub trait Page {
    /// Typed route parameters (`()` when the route has none).
    type Params;

    /// Document title.
    const TITLE: &'static str;

    fn mount(params: Self::Params) -> ViewMount;

    /// Renders the full HTML document for a request.
    fn render(params: Self::Params) -> String {
        let mount = Self::mount(params);
        debug!(view = mount.name(), title = Self::TITLE, "Rendering page");
        render_document(Self::TITLE, &mount)
    }
}

const DOCUMENT_LANG: &str = "fr";

/// Renders an HTML document whose body holds one padded container with one view mount.
#[must_use]
pub fn render_document(title: &str, mount: &ViewMount) -> String {
    let markup = dioxus_ssr::render_element(rsx! {
        Document { page_title: title.to_owned(), mount: mount.clone() }
    });

    format!(r#"<!DOCTYPE html><html lang="{DOCUMENT_LANG}">{markup}</html>"#)
}
