use dioxus::prelude::*;
use ftirview_io::{
    BlobUrlStore, CsvUpload, FeatureTableView, RemoteClient, ReportButton, SpectrumImage,
};
use ftirview_session::{CsvFile, Session, SessionState, feature_table, run_analysis};

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the analysis session behind a single signal and wires the
/// upload, results, spectrum, and report components to it. Every UI
/// flag (processing indicator, error banner, results visibility) is
/// derived by pattern-matching the session state; none is tracked
/// independently.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let mut session = use_signal(|| Session::new(BlobUrlStore::new()));
    let client = use_hook(RemoteClient::default);
    let mut report_notice = use_signal(|| Option::<String>::None);

    // --- File selection handler ---
    let on_select = move |file: CsvFile| {
        report_notice.set(None);
        // The outcome (FileSelected or Failed) is carried entirely in
        // session state; nothing to do with the Result here.
        let _ = session.write().select_file(file);
    };

    // --- Submission handler ---
    // Starts the submission synchronously so the Submitting state
    // renders immediately, then runs the remote sequence in a spawned
    // task. finish_submit discards the outcome if the session has
    // moved on (new selection) while the task was in flight.
    let submit_client = client.clone();
    let on_submit = move |_| {
        report_notice.set(None);
        let begun = session.write().begin_submit();
        let Ok(submission) = begun else {
            // Guard failures are already reflected in session state
            // (NoFileSelected) or prevented by button disablement.
            return;
        };
        let client = submit_client.clone();
        spawn(async move {
            let outcome = run_analysis(&client, submission.file()).await;
            session
                .write()
                .finish_submit(submission.generation(), outcome);
        });
    };

    // --- Report handler ---
    // Fire-and-forget on success; a refused precondition surfaces as
    // an inline notice without touching session state.
    let report_client = client;
    let on_report = move |()| {
        let outcome = session.read().request_report(&report_client);
        report_notice.set(outcome.err().map(|e| e.to_string()));
    };

    // --- Start-over handler ---
    let on_reset = move |_| {
        report_notice.set(None);
        session.write().reset();
    };

    // --- Derived view state ---
    let snapshot = session.read();
    let submitting = snapshot.state().is_submitting();
    let can_submit = matches!(snapshot.state(), SessionState::FileSelected(_));
    let error_message = snapshot.state().error().map(ToString::to_string);
    let loaded = match snapshot.state() {
        SessionState::Loaded { result, image } => Some((
            image.clone(),
            feature_table(&result.maxima, "peaks"),
            feature_table(&result.minima, "minima"),
        )),
        _ => None,
    };
    drop(snapshot);

    let show_form = loaded.is_none();
    let results_view = loaded.map(|(image_url, maxima_table, minima_table)| {
        rsx! {
            div { class: "results-container",
                SpectrumImage { url: image_url }

                div { class: "tables-container",
                    FeatureTableView {
                        title: "Detected Peaks",
                        table: maxima_table,
                    }
                    FeatureTableView {
                        title: "Detected Minima",
                        table: minima_table,
                    }
                }

                ReportButton {
                    notice: report_notice(),
                    on_request: on_report,
                }

                button {
                    class: "reset-button",
                    onclick: on_reset,
                    "Analyze Another File"
                }
            }
        }
    });

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("./style.css") }

        div { class: "container",
            h1 { "FTIR Characteristic Analysis" }

            // The upload form is hidden while results are shown.
            if show_form {
                form {
                    class: "form",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                    },

                    CsvUpload { on_select: on_select }

                    button {
                        r#type: "button",
                        disabled: !can_submit || submitting,
                        onclick: on_submit,
                        if submitting { "Processing..." } else { "Upload File" }
                    }
                }
            }

            if submitting {
                p { class: "loading", "Loading..." }
            }

            if let Some(ref err) = error_message {
                p { class: "error", "{err}" }
            }

            {results_view}
        }
    }
}
