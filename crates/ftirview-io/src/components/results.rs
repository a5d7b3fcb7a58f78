//! Results table component for one feature sequence.

use dioxus::prelude::*;
use ftirview_session::FeatureTable;

/// Props for the [`FeatureTableView`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FeatureTableViewProps {
    /// Section heading, e.g. `"Detected Peaks"`.
    title: String,
    /// Prepared table body from the presentation adapter.
    table: FeatureTable,
}

/// Renders one feature sequence as a five-column table.
///
/// An empty sequence renders the adapter's placeholder message as a
/// single full-width row, so the table is never bodyless.
#[component]
pub fn FeatureTableView(props: FeatureTableViewProps) -> Element {
    let body = match &props.table {
        FeatureTable::Rows(rows) => rsx! {
            for row in rows {
                tr { key: "{row.index}",
                    td { "{row.index}" }
                    td { "{row.wavenumber}" }
                    td { "{row.absorbance}" }
                    td { "{row.functional_group}" }
                    td { "{row.kind}" }
                }
            }
        },
        FeatureTable::Empty { message } => rsx! {
            tr {
                td { colspan: "5", "{message}" }
            }
        },
    };

    rsx! {
        div { class: "table-section",
            h3 { "{props.title}" }
            table { class: "results-table",
                thead {
                    tr {
                        th { "No." }
                        th { "Wavenumber" }
                        th { "Absorbance" }
                        th { "Group" }
                        th { "Type" }
                    }
                }
                tbody { {body} }
            }
        }
    }
}
