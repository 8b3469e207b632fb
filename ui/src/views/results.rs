use dioxus::prelude::*;

use crate::core::storage::{self, StoredAnalysis};
use crate::report::ReportView;

/// Live results route: renders whatever the last finished run left in
/// the result slot. Starting a new analysis clears the slot and the
/// persisted copy behind it.
#[component]
pub fn Results() -> Element {
    let mut result_slot = use_context::<Signal<Option<StoredAnalysis>>>();
    let stored = result_slot();

    let clear_slot = move |_| {
        if let Err(err) = storage::clear_result() {
            tracing::warn!("failed to clear stored result: {err}");
        }
        result_slot.set(None);
    };

    match stored {
        Some(stored) => rsx! {
            ReportView {
                report: stored.report,
                elapsed_seconds: stored.elapsed_seconds,
                on_start_new: clear_slot,
            }
        },
        None => rsx! {
            ReportView { on_start_new: clear_slot }
        },
    }
}
