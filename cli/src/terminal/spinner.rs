use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Spinner shown on STDERR while listings are downloaded. Cleared on drop.
pub struct RefreshSpinner {
    spinner: ProgressBar,
}

impl RefreshSpinner {
    pub fn start(message: &str, hidden: bool) -> Self {
        let spinner = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };

        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}") {
            spinner.set_style(style.tick_strings(&[
                "▁▁▁▁▁",
                "▁▂▂▂▁",
                "▁▄▂▄▁",
                "▂▄▆▄▂",
                "▄▆█▆▄",
                "▂▄▆▄▂",
                "▁▄▂▄▁",
                "▁▂▂▂▁",
            ]));
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        // A hidden bar swallows `println`, so logs must keep going straight to STDERR.
        if !spinner.is_hidden()
            && let Ok(mut active) = ACTIVE.lock()
        {
            *active = Some(spinner.clone());
        }
        Self { spinner }
    }
}

impl Drop for RefreshSpinner {
    fn drop(&mut self) {
        if let Ok(mut active) = ACTIVE.lock() {
            *active = None;
        }
        self.spinner.finish_and_clear();
    }
}

/// Log sink that prints above a running spinner instead of tearing through it.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match active_spinner() {
            Some(spinner) => {
                let msg = String::from_utf8_lossy(buf);
                spinner.println(msg.trim_end());
                Ok(buf.len())
            }
            None => std::io::stderr().write_all(buf).map(|()| buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stderr().flush()
    }
}

fn active_spinner() -> Option<ProgressBar> {
    ACTIVE
        .lock()
        .ok()
        .and_then(|active| active.clone())
        .filter(|spinner| !spinner.is_hidden())
}
