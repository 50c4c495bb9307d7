use crate::view::ViewMount;
use dioxus::prelude::*;

/// Classes of the padded container every page renders.
pub const CONTAINER_CLASS: &str = "container mx-auto p-6";

/// Standard padded page container.
#[component]
pub fn PageContainer(children: Element) -> Element {
    rsx! {
        main { class: CONTAINER_CLASS, {children} }
    }
}

/// Mount node of a client view; props travel as JSON in `data-props`.
#[component]
pub fn ViewHost(mount: ViewMount) -> Element {
    let view = mount.name();
    let props = mount.props().map(|props| props.to_string());

    rsx! {
        div { "data-view": view, "data-props": props }
    }
}

/// `<head>` and `<body>` of a page; the `<html>` element is added by the renderer.
#[component]
pub(crate) fn Document(page_title: String, mount: ViewMount) -> Element {
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{page_title}" }
        }
        body {
            PageContainer {
                ViewHost { mount: mount.clone() }
            }
        }
    }
}
