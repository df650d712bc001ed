use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

/// Install a JSON tracing layer appending to `path`.
///
/// `RUST_LOG` narrows the filter; the default keeps engine debug events
/// so per-expectation outcomes land in the run log.
pub fn init_run_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let sink = Arc::new(Mutex::new(file));

    let make_writer = BoxMakeWriter::new(move || LogWriter {
        sink: Arc::clone(&sink),
    });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,veridata_eval=debug"));

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(make_writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(())
}

struct LogWriter {
    sink: Arc<Mutex<std::fs::File>>,
}

impl LogWriter {
    fn locked(&self) -> io::Result<std::sync::MutexGuard<'_, std::fs::File>> {
        self.sink
            .lock()
            .map_err(|_| io::Error::other("failed to lock log file"))
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.locked()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.locked()?.flush()
    }
}
