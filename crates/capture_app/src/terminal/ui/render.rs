use capture_core::{
    AppViewModel, CaptureRecord, ComparisonView, NoticeKind, PaneView, ProgressView, ScreenView,
    SUCCESS_MESSAGE,
};
use chrono::{DateTime, Local, NaiveDateTime};

use super::constants::{PROGRESS_BAR_WIDTH, RULE};

/// Renders the whole screen as text lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![RULE.to_string()];

    match &view.screen {
        ScreenView::Welcome => render_welcome(view, &mut lines),
        ScreenView::Comparison(comparison) => render_comparison(comparison, &mut lines),
    }

    if let Some(folder) = &view.pending_delete {
        lines.push(format!("Delete capture {folder}? This cannot be undone. [yes/no]"));
    }
    if let Some(notice) = &view.notice {
        lines.push(format!(
            "[{}] {}  (dismiss to close)",
            notice_label(notice.kind),
            notice.message
        ));
    }
    lines
}

fn render_welcome(view: &AppViewModel, lines: &mut Vec<String>) {
    let busy = if view.controls_enabled { "" } else { "  (capture in progress)" };
    lines.push(format!("URL: {}{}", view.input, busy));

    if let Some(progress) = &view.progress {
        lines.push(format_progress(progress));
    }
    if view.success_visible {
        lines.push(SUCCESS_MESSAGE.to_string());
    }

    lines.push(String::new());
    if view.captures.is_empty() {
        lines.push("No captures yet.".to_string());
    } else {
        lines.push(format!("Captures ({}):", view.captures.len()));
        lines.extend(
            view.captures
                .iter()
                .enumerate()
                .map(|(index, record)| format_capture_row(index + 1, record)),
        );
    }
}

fn render_comparison(comparison: &ComparisonView, lines: &mut Vec<String>) {
    lines.push(comparison.title.clone());
    if let Some(final_url) = &comparison.final_url {
        lines.push(format!("Redirected to: {final_url}"));
    }
    lines.push(format!(
        "Mode: {}  (split | original | captured, open, esc)",
        comparison.mode.label()
    ));
    for (label, pane) in [("Original", &comparison.original), ("Captured", &comparison.captured)] {
        if let Some(line) = format_pane(label, pane) {
            lines.push(line);
        }
    }
}

fn format_pane(label: &str, pane: &PaneView) -> Option<String> {
    pane.layout.visible.then(|| {
        format!(
            "  {label} ({}%): {}",
            pane.layout.width_percent, pane.source
        )
    })
}

fn format_progress(progress: &ProgressView) -> String {
    let percent = progress.percent.min(100) as usize;
    let filled = percent * PROGRESS_BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%  {}",
        "#".repeat(filled),
        " ".repeat(PROGRESS_BAR_WIDTH - filled),
        percent,
        progress.message
    )
}

fn format_capture_row(position: usize, record: &CaptureRecord) -> String {
    let assets = &record.assets;
    let address = match record.final_url.as_deref() {
        Some(final_url) if final_url != record.original_url => {
            format!("{} -> {}", record.original_url, final_url)
        }
        _ => record.original_url.clone(),
    };
    format!(
        "{position:>3}. {}  [{}]  {}  css {}, js {}, images {}",
        address,
        record.folder_name,
        format_capture_time(&record.capture_time),
        assets.css,
        assets.js,
        assets.images
    )
}

/// Server times are ISO-8601, with or without an offset.
fn format_capture_time(raw: &str) -> String {
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn notice_label(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::InvalidUrl => "invalid url",
        NoticeKind::SubmitFailed => "submit failed",
        NoticeKind::CaptureFailed => "capture failed",
        NoticeKind::PollFailed => "connection lost",
        NoticeKind::NotFound => "not found",
        NoticeKind::ComparisonFailed => "compare failed",
        NoticeKind::DeleteFailed => "delete failed",
    }
}
