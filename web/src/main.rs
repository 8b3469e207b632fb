use dioxus::prelude::*;

use ui::core::storage::{self, StoredAnalysis};
use ui::views::{Results, SampleReport, Upload};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Upload {},
    #[route("/results")]
    Results {},
    #[route("/sample-report/:id")]
    SampleReport { id: String },
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Seed the result slot from the last persisted run, if any. The
    // upload controller overwrites it, the results view clears it.
    let result_slot: Signal<Option<StoredAnalysis>> = use_signal(|| match storage::load_result() {
        Ok(stored) => stored,
        Err(err) => {
            tracing::warn!("could not restore last result: {err}");
            None
        }
    });
    use_context_provider(|| result_slot);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// Unknown paths fall back to the upload view.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let navigator = use_navigator();

    use_effect(move || {
        navigator.replace(Route::Upload {});
    });
    tracing::debug!("redirecting unknown path: /{}", segments.join("/"));

    rsx! {}
}
