//! Diagnostics setup and the session journal.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const RULE: &str = "==================================================";

/// Install the stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("glory_maze=debug,warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glory_maze=info"))
    };

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Journal of one game session, written to a text file.
///
/// The file is truncated when opened. Every line is timestamped and also
/// emitted as a tracing event. When the file cannot be created the journal
/// keeps working without it.
#[derive(Debug)]
pub struct GameLog {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl GameLog {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let writer = match File::create(&path) {
            Ok(file) => Some(BufWriter::new(file)),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not create game log");
                None
            }
        };

        let mut log = Self { path, writer };
        log.log("=== GLORY MAZE - SESSION START ===");
        log.log(&format!("Date/Time: {}", timestamp()));
        log.log("---------------------------------------------------");
        log
    }

    /// A journal that only emits tracing events.
    pub fn disabled() -> Self {
        Self {
            path: PathBuf::new(),
            writer: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_file_backed(&self) -> bool {
        self.writer.is_some()
    }

    pub fn log(&mut self, message: &str) {
        tracing::info!(target: "glory_maze::journal", "{}", message);

        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        let line = format!("[{}] {}", timestamp(), message);
        if let Err(err) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            tracing::warn!(error = %err, "game log write failed, disabling journal file");
            self.writer = None;
        }
    }

    pub fn log_victory(&mut self, winner: &str, moves: u32) {
        self.log(&format!(
            "VICTORY! Player '{}' found the treasure in {} moves!",
            winner, moves
        ));
        self.log(&format!("=== END OF MATCH - WINNER: {} ===", winner));
        self.log(RULE);
    }

    pub fn log_defeat(&mut self, player: &str) {
        self.log(&format!("DEFEAT! Player '{}' ran out of power.", player));
        self.log("=== END OF MATCH - NO WINNER ===");
        self.log(RULE);
    }

    /// Flush and release the file. Later lines only reach tracing.
    pub fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(err) = writer.flush() {
                tracing::warn!(error = %err, "failed to flush game log");
            }
        }
    }
}

impl Drop for GameLog {
    fn drop(&mut self) {
        self.close();
    }
}
