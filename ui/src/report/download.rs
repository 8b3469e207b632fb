//! Report download plumbing.

use crate::net::client;

/// Resolves the download target: static sample asset when rendering a
/// sample, backend endpoint for a live task, `None` otherwise (the
/// button is a no-op then).
pub fn resolve_download_url(sample_id: Option<&str>, task_id: Option<&str>) -> Option<String> {
    if let Some(sample_id) = sample_id {
        return Some(client::sample_report_url(sample_id));
    }
    task_id.map(client::download_url)
}

/// Kicks off a browser download of `url` through a synthetic anchor.
#[cfg(target_arch = "wasm32")]
pub fn trigger_download(url: &str) {
    use wasm_bindgen::JsCast;
    use web_sys::HtmlAnchorElement;

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        tracing::warn!("download skipped: document unavailable");
        return;
    };
    let anchor = document
        .create_element("a")
        .ok()
        .and_then(|element| element.dyn_into::<HtmlAnchorElement>().ok());
    let Some(anchor) = anchor else {
        tracing::warn!("download skipped: could not create anchor");
        return;
    };

    anchor.set_href(url);
    anchor.set_download("");
    anchor.style().set_property("display", "none").ok();

    if let Some(body) = document.body() {
        body.append_child(&anchor).ok();
        anchor.click();
        anchor.remove();
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn trigger_download(url: &str) {
    tracing::debug!("download requested outside the browser: {url}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_reports_resolve_to_the_static_asset() {
        assert_eq!(
            resolve_download_url(Some("3"), None),
            Some("/sample_report_3.json".to_string())
        );
    }

    #[test]
    fn live_tasks_resolve_to_the_download_endpoint() {
        assert_eq!(
            resolve_download_url(None, Some("xyz")),
            Some("http://127.0.0.1:8000/download/xyz".to_string())
        );
    }

    #[test]
    fn sample_mode_wins_even_with_a_task_id_present() {
        assert_eq!(
            resolve_download_url(Some("2"), Some("xyz")),
            Some("/sample_report_2.json".to_string())
        );
    }

    #[test]
    fn no_identifiers_means_no_target() {
        assert_eq!(resolve_download_url(None, None), None);
    }
}
