use dioxus::prelude::*;

use crate::analysis::UploadView;

/// Landing route: the submission form and its analysis overlay.
#[component]
pub fn Upload() -> Element {
    rsx! {
        UploadView {}
    }
}
