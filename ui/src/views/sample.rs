use dioxus::prelude::*;

use crate::net::client;
use crate::report::ReportView;

/// Sample-report route: fetches the pre-baked document for `id` and
/// renders it in sample display mode.
///
/// The fetch has three observable states — loading, loaded, failed — and
/// a failure renders its own notice. Forcing a failed load through the
/// normal report branches would dress it up as a backend error that
/// never happened.
#[component]
pub fn SampleReport(id: String) -> Element {
    let sample_id = id.clone();
    let report = use_resource(use_reactive!(|(id,)| async move {
        match client::fetch_sample_report(&id).await {
            Ok(report) => Some(report),
            Err(err) => {
                tracing::warn!("failed to load sample report {id}: {err}");
                None
            }
        }
    }));

    match report() {
        Some(Some(sample)) => rsx! {
            ReportView {
                report: sample,
                sample_id: sample_id.clone(),
                on_start_new: move |_| {},
            }
        },
        Some(None) => rsx! {
            section { class: "page page-report",
                h2 { class: "report__sample-heading", "Sample Report" }
                p { class: "report__notice", "This sample report could not be loaded." }
                Link { to: "/", "← Return to upload page" }
            }
        },
        None => rsx! {
            section { class: "page page-report",
                p { class: "report__notice report__notice--loading", "Loading sample report…" }
            }
        },
    }
}
