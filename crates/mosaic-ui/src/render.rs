use std::fmt::Write;

use mosaic_core::{GRID_COLUMNS, GRID_ROWS, Slot};

use crate::state::UiState;

const BAR_WIDTH: usize = 30;

/// Text frame of the current window contents
pub fn frame(state: &UiState) -> String {
    let mut out = String::new();

    let search = if state.controls.search_enabled { "[Search]" } else { "(Search)" };
    let play = if state.controls.play_enabled {
        format!("[{}]", state.controls.play_label)
    } else {
        format!("({})", state.controls.play_label)
    };
    let _ = writeln!(out, "Term: {}", state.term);
    let _ = writeln!(out, "{search} {play}");

    let slots = state.gallery.slots();
    for row in 0..GRID_ROWS {
        let cells: Vec<String> = slots[row * GRID_COLUMNS..(row + 1) * GRID_COLUMNS]
            .iter()
            .map(|slot| match slot {
                Slot::Placeholder => format!("{:>4}", "--"),
                Slot::Image(index) => format!("{index:>4}"),
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(" "));
    }

    let _ = writeln!(out, "{}", progress_bar(state.progress));
    let _ = writeln!(out, "{}", state.status);

    if let Some(report) = &state.error_report {
        let _ = writeln!(out, "!! {}", report.replace('\n', "\n!! "));
    }

    out
}

fn progress_bar(progress: f64) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = (progress * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        " ".repeat(BAR_WIDTH - filled),
        (progress * 100.0).round() as u32
    )
}
