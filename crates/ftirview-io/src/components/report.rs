//! PDF report download button.

use dioxus::prelude::*;

/// Props for the [`ReportButton`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ReportButtonProps {
    /// Precondition notice to show next to the button (set by the app
    /// when the report request is refused). Does not touch session
    /// state.
    notice: Option<String>,
    /// Fired when the user requests the report.
    on_request: EventHandler<()>,
}

/// Button that requests the PDF report for the loaded result.
///
/// The report opens in a new browsing context; no success or failure
/// is observable past that point, so the only feedback shown here is
/// the precondition notice.
#[component]
pub fn ReportButton(props: ReportButtonProps) -> Element {
    rsx! {
        div { class: "report-section",
            button {
                class: "download-button",
                onclick: move |_| props.on_request.call(()),
                "Download PDF Report"
            }

            if let Some(ref notice) = props.notice {
                p { class: "error", "{notice}" }
            }
        }
    }
}
