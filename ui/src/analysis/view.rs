use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;
use futures_util::StreamExt;

use crate::core::storage::{self, StoredAnalysis};
use crate::core::{format, platform, timing};
use crate::net::client::{self, ApiError};
use crate::net::schema::AnalysisReport;

use super::engine::{AnalysisEngine, AnalysisPhase, PollOutcome, POLL_INTERVAL_MS, TICK_INTERVAL_MS};
use super::request::{AnalysisForm, InputMode, SelectedFile};

type EventSender = UnboundedSender<AnalysisEvent>;
type SenderSlot = Rc<RefCell<Option<EventSender>>>;

#[component]
pub fn UploadView() -> Element {
    let mut form = use_signal(AnalysisForm::default);
    let loading = use_signal(|| false);
    let elapsed = use_signal(|| 0u64);
    let mut error_line = use_signal(|| Option::<String>::None);

    let result_slot = use_context::<Signal<Option<StoredAnalysis>>>();
    let navigator = use_navigator();

    let sender_slot: SenderSlot = Rc::new(RefCell::new(None));
    let sender_slot_for_loop = sender_slot.clone();

    let coroutine = use_coroutine(move |mut rx: UnboundedReceiver<AnalysisEvent>| {
        let sender_slot = sender_slot_for_loop.clone();
        let form = form;
        let mut loading = loading;
        let mut elapsed = elapsed;
        let mut error_line = error_line;
        let mut result_slot = result_slot;

        async move {
            let mut engine = AnalysisEngine::default();

            while let Some(event) = rx.next().await {
                match event {
                    AnalysisEvent::Submit => {
                        if engine.is_active() {
                            continue;
                        }
                        let validated = form.peek().validate();
                        match validated {
                            Err(violations) => {
                                error_line.set(Some(violations.join("; ")));
                            }
                            Ok(request) => {
                                let Some(run_id) = engine.begin(timing::now()) else {
                                    continue;
                                };
                                error_line.set(None);
                                elapsed.set(0);
                                loading.set(true);
                                queue_tick(sender_slot.clone(), run_id);

                                if let Some(sender) = current_sender(&sender_slot) {
                                    platform::spawn_future(async move {
                                        let event = match client::start_analysis(request).await {
                                            Ok(start) => AnalysisEvent::TaskStarted {
                                                run_id,
                                                task_id: start.task_id,
                                            },
                                            Err(err) => AnalysisEvent::SubmitFailed {
                                                run_id,
                                                message: err.submit_message(),
                                            },
                                        };
                                        let _ = sender.unbounded_send(event);
                                    });
                                }
                            }
                        }
                    }
                    AnalysisEvent::TaskStarted { run_id, task_id } => {
                        if engine.task_created(run_id, task_id) {
                            // First poll fires right away; the 2 s gap only
                            // separates subsequent rounds.
                            queue_poll(sender_slot.clone(), run_id, 0);
                        }
                    }
                    AnalysisEvent::SubmitFailed { run_id, message } => {
                        if engine.fail(run_id) {
                            error_line.set(Some(message));
                            loading.set(false);
                        }
                    }
                    AnalysisEvent::PollDue { run_id } => {
                        let task_id = match engine.phase() {
                            AnalysisPhase::Polling { task_id } if engine.is_current(run_id) => {
                                task_id.clone()
                            }
                            _ => continue,
                        };
                        if let Some(sender) = current_sender(&sender_slot) {
                            platform::spawn_future(async move {
                                let outcome = client::fetch_report(&task_id).await;
                                let _ = sender
                                    .unbounded_send(AnalysisEvent::PollSettled { run_id, outcome });
                            });
                        }
                    }
                    AnalysisEvent::PollSettled { run_id, outcome } => match outcome {
                        Ok(report) => {
                            match engine.report_received(run_id, report, timing::now()) {
                                PollOutcome::Continue => {
                                    queue_poll(sender_slot.clone(), run_id, POLL_INTERVAL_MS);
                                }
                                PollOutcome::Finished {
                                    report,
                                    elapsed_seconds,
                                } => {
                                    let record = StoredAnalysis {
                                        report,
                                        elapsed_seconds,
                                    };
                                    if let Err(err) = storage::save_result(&record) {
                                        tracing::warn!("failed to persist analysis result: {err}");
                                    }
                                    result_slot.set(Some(record));
                                    loading.set(false);
                                    navigator.push("/results");
                                }
                                PollOutcome::Ignored => {}
                            }
                        }
                        Err(err) => {
                            if engine.fail(run_id) {
                                error_line
                                    .set(Some(format!("Lost contact with the analysis backend: {err}")));
                                loading.set(false);
                            }
                        }
                    },
                    AnalysisEvent::Tick { run_id } => {
                        if engine.is_current(run_id) {
                            elapsed.set(engine.elapsed_seconds(timing::now()));
                            queue_tick(sender_slot.clone(), run_id);
                        }
                    }
                    AnalysisEvent::Cancel => {
                        let task_id = engine.cancel();
                        loading.set(false);
                        navigator.push("/");
                        if let Some(task_id) = task_id {
                            // Best-effort notification; the task may keep
                            // running server-side if this is lost.
                            platform::spawn_future(async move {
                                match client::request_cancel(&task_id).await {
                                    Ok(ack) => {
                                        tracing::info!("cancel acknowledged: {}", ack.message)
                                    }
                                    Err(err) => tracing::warn!(
                                        "failed to notify backend of cancellation: {err}"
                                    ),
                                }
                            });
                        }
                    }
                }
            }
        }
    });

    sender_slot.borrow_mut().replace(coroutine.tx());

    let (mode, file_name, rss_url, api_key_openai, api_key_perplexity) = form.with(|f| {
        (
            f.mode,
            f.file.as_ref().map(|file| file.name.clone()),
            f.rss_url.clone(),
            f.api_key_openai.clone(),
            f.api_key_perplexity.clone(),
        )
    });
    let is_loading = loading();
    let elapsed_now = elapsed();
    let error_text = error_line();
    let selected_file_name = if mode == InputMode::File {
        file_name
    } else {
        None
    };

    rsx! {
        section { class: "page page-upload",
            h1 { class: "page-upload__title", "Podcast Factuality Checker" }

            div { class: "upload-form",
                div { class: "upload-form__inputs",
                    div { class: "upload-form__source",
                        label { class: "upload-form__choice",
                            input {
                                r#type: "radio",
                                name: "input-mode",
                                checked: mode == InputMode::File,
                                onchange: move |_| {
                                    form.with_mut(|f| f.mode = InputMode::File);
                                    error_line.set(None);
                                },
                            }
                            span { "Upload MP3" }
                        }
                        input {
                            class: "upload-form__file",
                            r#type: "file",
                            accept: "audio/mp3,audio/mpeg,.mp3",
                            disabled: mode != InputMode::File,
                            onchange: move |evt| {
                                error_line.set(None);
                                if let Some(file_engine) = evt.files() {
                                    let names = file_engine.files();
                                    platform::spawn_future(async move {
                                        if let Some(name) = names.first() {
                                            if let Some(bytes) = file_engine.read_file(name).await {
                                                form.with_mut(|f| {
                                                    f.file = Some(SelectedFile {
                                                        name: name.clone(),
                                                        bytes,
                                                    })
                                                });
                                            }
                                        }
                                    });
                                }
                            },
                        }

                        label { class: "upload-form__choice",
                            input {
                                r#type: "radio",
                                name: "input-mode",
                                checked: mode == InputMode::Rss,
                                onchange: move |_| {
                                    form.with_mut(|f| f.mode = InputMode::Rss);
                                    error_line.set(None);
                                },
                            }
                            span { "Input RSS link" }
                        }
                        input {
                            class: "upload-form__rss",
                            r#type: "url",
                            placeholder: "https://example.com/feed.xml",
                            value: "{rss_url}",
                            disabled: mode != InputMode::Rss,
                            oninput: move |evt| {
                                form.with_mut(|f| f.rss_url = evt.value());
                                error_line.set(None);
                            },
                        }
                    }

                    div { class: "upload-form__keys",
                        label { class: "upload-form__key",
                            span { "OpenAI API Key" }
                            textarea {
                                placeholder: "Enter your OpenAI API key",
                                value: "{api_key_openai}",
                                oninput: move |evt| {
                                    form.with_mut(|f| f.api_key_openai = evt.value());
                                    error_line.set(None);
                                },
                            }
                        }
                        label { class: "upload-form__key",
                            span { "Perplexity API Key" }
                            textarea {
                                placeholder: "Enter your Perplexity API key",
                                value: "{api_key_perplexity}",
                                oninput: move |evt| {
                                    form.with_mut(|f| f.api_key_perplexity = evt.value());
                                    error_line.set(None);
                                },
                            }
                        }
                    }
                }

                if let Some(name) = selected_file_name.as_ref() {
                    p { class: "upload-form__file-name", "Selected file: {name}" }
                }
                if let Some(message) = error_text.as_ref() {
                    p { class: "upload-form__error", "{message}" }
                }

                div { class: "upload-form__actions",
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        disabled: is_loading,
                        onclick: move |_| coroutine.send(AnalysisEvent::Submit),
                        "Submit Analysis"
                    }
                    nav { class: "upload-form__samples",
                        span { "Sample reports:" }
                        Link { class: "upload-form__sample-link", to: "/sample-report/1", "1" }
                        Link { class: "upload-form__sample-link", to: "/sample-report/2", "2" }
                        Link { class: "upload-form__sample-link", to: "/sample-report/3", "3" }
                    }
                }
            }

            if is_loading {
                div { class: "analysis-backdrop",
                    div { class: "analysis-backdrop__panel",
                        span { class: "analysis-backdrop__spinner" }
                        p { class: "analysis-backdrop__status",
                            "Analyzing: {format::format_elapsed_short(elapsed_now)}"
                        }
                        button {
                            r#type: "button",
                            class: "button button--danger",
                            onclick: move |_| coroutine.send(AnalysisEvent::Cancel),
                            "Cancel Task"
                        }
                    }
                }
            }
        }
    }
}

fn current_sender(slot: &SenderSlot) -> Option<EventSender> {
    slot.borrow().as_ref().cloned()
}

/// Schedules the next status poll after `delay_ms`.
fn queue_poll(sender_slot: SenderSlot, run_id: u64, delay_ms: u64) {
    if let Some(sender) = current_sender(&sender_slot) {
        platform::spawn_future(async move {
            if delay_ms > 0 {
                timing::sleep_ms(delay_ms).await;
            }
            let _ = sender.unbounded_send(AnalysisEvent::PollDue { run_id });
        });
    }
}

/// Schedules the next elapsed-counter update.
fn queue_tick(sender_slot: SenderSlot, run_id: u64) {
    if let Some(sender) = current_sender(&sender_slot) {
        platform::spawn_future(async move {
            timing::sleep_ms(TICK_INTERVAL_MS).await;
            let _ = sender.unbounded_send(AnalysisEvent::Tick { run_id });
        });
    }
}

/// Events consumed by the upload coroutine. Network and timer futures
/// send completions back here; nothing mutates the engine anywhere else.
#[derive(Debug)]
enum AnalysisEvent {
    Submit,
    Cancel,
    TaskStarted {
        run_id: u64,
        task_id: String,
    },
    SubmitFailed {
        run_id: u64,
        message: String,
    },
    PollDue {
        run_id: u64,
    },
    PollSettled {
        run_id: u64,
        outcome: Result<AnalysisReport, ApiError>,
    },
    Tick {
        run_id: u64,
    },
}
