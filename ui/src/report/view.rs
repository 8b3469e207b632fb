use dioxus::prelude::*;

use crate::core::format;
use crate::net::schema::{AnalysisReport, Claim, ReportMetadata, TaskStatus};

use super::download::{resolve_download_url, trigger_download};
use super::sources::SourceRef;
use super::stats::{ClaimLabel, LabelDistribution};

/// Pure presentation of one analysis result (or its absence).
///
/// Live results render their body only once the task is done; a sample
/// renders unconditionally. The in-progress phase never reaches this
/// view — the upload overlay covers it.
#[component]
pub fn ReportView(
    report: Option<AnalysisReport>,
    elapsed_seconds: Option<u64>,
    sample_id: Option<String>,
    on_start_new: EventHandler<()>,
) -> Element {
    let is_sample = sample_id.is_some();
    let status = report.as_ref().map(|report| report.status);
    let show_body = is_sample || status == Some(TaskStatus::Done);
    let show_error = status == Some(TaskStatus::Error);
    let show_generic =
        !is_sample && !matches!(status, Some(TaskStatus::Done) | Some(TaskStatus::Error));
    let error_text = report
        .as_ref()
        .and_then(|report| report.error.clone())
        .unwrap_or_default();

    rsx! {
        section { class: "page page-report",
            div { class: "report__back",
                Link {
                    to: "/",
                    onclick: move |_| on_start_new.call(()),
                    "← Return to upload page to start a new analysis"
                }
            }

            if show_body {
                if is_sample {
                    h2 { class: "report__sample-heading", "Sample Report" }
                }
                if let Some(report) = report.as_ref() {
                    {render_report_body(report, elapsed_seconds, sample_id.as_deref(), is_sample)}
                }
            }

            if show_error {
                p { class: "report__error", "{error_text}" }
            }
            if show_generic {
                p { class: "report__notice", "Something went wrong. Please try again." }
            }
        }
    }
}

fn render_report_body(
    report: &AnalysisReport,
    elapsed_seconds: Option<u64>,
    sample_id: Option<&str>,
    is_sample: bool,
) -> Element {
    let download_target = resolve_download_url(sample_id, report.task_id.as_deref());
    let distribution = LabelDistribution::from_claims(&report.claims);
    let elapsed_note = if is_sample { None } else { elapsed_seconds };

    rsx! {
        div { class: "report__header",
            if let Some(metadata) = report.metadata.as_ref() {
                {render_metadata(metadata)}
            }
            button {
                r#type: "button",
                class: "button button--ghost report__download",
                onclick: move |_| {
                    if let Some(url) = download_target.as_ref() {
                        trigger_download(url);
                    }
                },
                "Download Report"
            }
        }

        if let Some(distribution) = distribution {
            div { class: "report__stats",
                div { class: "report__stat-items",
                    for label in ClaimLabel::ALL.iter().copied() {
                        span { class: "report__stat",
                            "{label.icon()} {label.display_name()}: {format::format_percent(distribution.percent(label))}"
                        }
                    }
                }
                if let Some(elapsed) = elapsed_note {
                    span { class: "report__elapsed",
                        "Analysis completed in {format::format_elapsed_long(elapsed)}"
                    }
                }
            }
        }

        {render_claim_table(&report.claims)}
    }
}

fn render_metadata(metadata: &ReportMetadata) -> Element {
    let finished = metadata
        .finished_time
        .as_deref()
        .map(format::format_timestamp_compact)
        .unwrap_or_else(|| "-".to_string());
    let file_name = metadata.file_name.clone().unwrap_or_else(|| "-".into());
    let openai_model = metadata.openai_model.clone().unwrap_or_else(|| "-".into());
    let temperature = metadata
        .temprature
        .map(|value| value.to_string())
        .unwrap_or_else(|| "-".into());
    let perplexity_model = metadata
        .perplexity_model
        .clone()
        .unwrap_or_else(|| "-".into());

    rsx! {
        dl { class: "report__metadata",
            div { class: "report__metadata-item", dt { "Finished Time" } dd { "{finished}" } }
            div { class: "report__metadata-item", dt { "File Name" } dd { "{file_name}" } }
            div { class: "report__metadata-item", dt { "OpenAI Model" } dd { "{openai_model}" } }
            div { class: "report__metadata-item", dt { "Temperature" } dd { "{temperature}" } }
            div { class: "report__metadata-item", dt { "Perplexity Model" } dd { "{perplexity_model}" } }
        }
    }
}

fn render_claim_table(claims: &[Claim]) -> Element {
    rsx! {
        table { class: "report-table",
            thead {
                tr {
                    th { class: "report-table__num", "Num" }
                    th { "Claim" }
                    th { "Label" }
                    th { "Sources (* indicates a reliable domain)" }
                }
            }
            tbody {
                for (index, claim) in claims.iter().enumerate() {
                    {render_claim_row(index, claim)}
                }
            }
        }
    }
}

fn render_claim_row(index: usize, claim: &Claim) -> Element {
    let num = claim.num.unwrap_or(index as u32 + 1);
    let label = ClaimLabel::parse(&claim.label);

    rsx! {
        tr { class: "report-table__row",
            td { class: "report-table__num", "{num}" }
            td { class: "report-table__claim", "{claim.extracted_claim}" }
            td { class: "report-table__label", "{label.icon()} {claim.label}" }
            td { class: "report-table__sources",
                for source in claim.sources.iter() {
                    {render_source(source)}
                }
            }
        }
    }
}

fn render_source(raw: &str) -> Element {
    let source = SourceRef::parse(raw);
    let class_name = if source.reliable {
        "report-table__source report-table__source--reliable"
    } else {
        "report-table__source"
    };

    rsx! {
        div { class: "{class_name}",
            a {
                href: "{source.href}",
                target: "_blank",
                rel: "noopener noreferrer",
                "{source.display}"
            }
        }
    }
}
