//! Annotated spectrum image display.

use dioxus::prelude::*;

/// Props for the [`SpectrumImage`] component.
#[derive(Props, Clone, PartialEq)]
pub struct SpectrumImageProps {
    /// Live object URL for the fetched spectrum image.
    url: String,
}

/// The rendered spectrum with its functional-group annotations.
///
/// The URL is a blob object URL owned by the session's image store;
/// this component only displays it and never revokes it.
#[component]
pub fn SpectrumImage(props: SpectrumImageProps) -> Element {
    rsx! {
        div { class: "image-container",
            h3 { "Spectrum with Functional Groups" }
            img {
                src: "{props.url}",
                alt: "FTIR spectrum with annotated functional groups",
                class: "spectrum-image",
            }
        }
    }
}
