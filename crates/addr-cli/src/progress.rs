//! Per-row progress bars for column stages.

use std::io::{self, IsTerminal};

use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{msg:>12} [{bar:30}] {pos}/{len} rows ({elapsed})";

/// Creates a bar for `len` rows, or a hidden one when progress is disabled
/// or stderr is not a terminal.
pub fn stage_progress(len: usize, message: &'static str, enabled: bool) -> ProgressBar {
    if !enabled || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    match ProgressStyle::with_template(BAR_TEMPLATE) {
        Ok(style) => bar.set_style(style.progress_chars("=> ")),
        Err(error) => tracing::debug!(%error, "falling back to default progress style"),
    }
    bar.set_message(message);
    bar
}
