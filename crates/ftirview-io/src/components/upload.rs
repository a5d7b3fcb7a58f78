//! CSV upload component with drag-and-drop and file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use ftirview_session::{CSV_MIME, CsvFile};

/// Infer a MIME type from the filename extension.
///
/// Dioxus `FileData` does not expose the browser-reported MIME type,
/// so it is inferred here; the session controller still enforces the
/// CSV constraint and rejects anything else.
fn mime_for(name: &str) -> &'static str {
    let is_csv = name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        CSV_MIME
    } else {
        "application/octet-stream"
    }
}

/// Props for the [`CsvUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct CsvUploadProps {
    /// Called with the selected file after its bytes are read.
    on_select: EventHandler<CsvFile>,
}

/// A drag-and-drop zone with a file picker button.
///
/// When a file is selected (via the picker or drag-and-drop), reads
/// the bytes and fires `on_select`. Type validation is deliberately
/// left to the session controller so invalid selections surface
/// through the same error path everywhere.
#[component]
pub fn CsvUpload(props: CsvUploadProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut filename = use_signal(|| Option::<String>::None);
    let mut read_error = use_signal(|| Option::<String>::None);

    // Read and forward the first file from a list. Shared by the
    // file-picker and drag-and-drop paths.
    let process_files = move |files: Vec<FileData>| async move {
        if let Some(file) = files.first() {
            let name = file.name();
            match file.read_bytes().await {
                Ok(bytes) => {
                    filename.set(Some(name.clone()));
                    read_error.set(None);
                    let mime = mime_for(&name);
                    props.on_select.call(CsvFile::new(name, mime, bytes.to_vec()));
                }
                Err(e) => {
                    read_error.set(Some(format!("Failed to read file: {e}")));
                }
            }
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let zone_class = if dragging() {
        "upload-zone dragging"
    } else {
        "upload-zone"
    };

    rsx! {
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            if let Some(ref name) = filename() {
                p { class: "upload-filename", "Selected: {name}" }
            }

            if let Some(ref err) = read_error() {
                p { class: "error", "{err}" }
            }

            p { "Drop a CSV file here or" }

            label { class: "upload-button",
                input {
                    r#type: "file",
                    accept: ".csv",
                    class: "hidden",
                    onchange: handle_files,
                }
                "Choose CSV File"
            }
        }
    }
}
