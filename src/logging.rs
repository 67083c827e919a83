use indicatif::ProgressBar;
use std::io;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr so stdout carries only
/// the report. `RUST_LOG` overrides the verbosity flag when set.
///
/// Every log line is written with `progress` suspended, so a spinner on the
/// same terminal is cleared first and redrawn after.
pub fn init(verbosity: u8, progress: ProgressBar) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(SuspendProgress::new(progress, io::stderr))
        .with_target(false)
        .try_init();
}

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `MakeWriter` that hides a progress bar around each write to `inner`.
#[derive(Clone)]
pub struct SuspendProgress<M> {
    progress: ProgressBar,
    inner: M,
}

impl<M> SuspendProgress<M> {
    pub fn new(progress: ProgressBar, inner: M) -> Self {
        Self { progress, inner }
    }
}

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for SuspendProgress<M> {
    type Writer = Suspended<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        Suspended {
            progress: self.progress.clone(),
            inner: self.inner.make_writer(),
        }
    }
}

pub struct Suspended<W> {
    progress: ProgressBar,
    inner: W,
}

impl<W: io::Write> io::Write for Suspended<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.flush())
    }
}
