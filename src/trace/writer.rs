//! Trace writer for eNB scheduler allocation reports.
//!
//! `SchedAllocTraceFile` owns an open trace file. `MacTrace` wraps it with a
//! configurable filename and opens it lazily on the first report, which is
//! how the MAC layer hooks it up.

use crate::sched::SchedTraceInfo;
use crate::utils::config::{DEFAULT_SCHED_TRACE_FILENAME, TRACE_HEADER};
use crate::utils::error::TraceError;
use log::{debug, error, info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Receiver of per-cycle scheduling reports
///
/// **Public** - the MAC holds a `&mut dyn SchedTraceSink` and calls it once
/// per scheduling cycle
pub trait SchedTraceSink {
    fn report_sched_info(&mut self, info: &SchedTraceInfo) -> Result<(), TraceError>;
}

/// An open scheduler allocation trace file
///
/// The header is written once on creation. The file is flushed and closed
/// when the value is dropped.
#[derive(Debug)]
pub struct SchedAllocTraceFile {
    path: PathBuf,
    writer: BufWriter<File>,
    lines_written: u64,
    closed: bool,
}

impl SchedAllocTraceFile {
    /// Create (or truncate) the trace file and write the header
    ///
    /// # Errors
    /// * `TraceError::Open` - the file could not be created
    /// * `TraceError::Write` - the header could not be written
    pub fn create(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref().to_path_buf();

        let file = File::create(&path).map_err(|source| TraceError::Open {
            path: path.clone(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", TRACE_HEADER)?;
        writer.flush()?;

        info!("Opened scheduler allocation trace: {}", path.display());

        Ok(Self {
            path,
            writer,
            lines_written: 0,
            closed: false,
        })
    }

    /// Append one line per allocation in `info`
    ///
    /// # Returns
    /// Number of lines written
    pub fn write_report(&mut self, info: &SchedTraceInfo) -> Result<usize, TraceError> {
        let mut count = 0;
        for record in info.records() {
            writeln!(self.writer, "{}", record)?;
            count += 1;
        }
        // Keep the file readable while the simulation is still running
        self.writer.flush()?;

        self.lines_written += count as u64;
        debug!(
            "Traced {} allocations for slot {} (ul {})",
            count,
            info.dl_sfn_sf(),
            info.ul_sfn_sf
        );

        Ok(count)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data lines written so far, header excluded
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Flush and close the file, reporting any error
    pub fn close(mut self) -> Result<(), TraceError> {
        self.writer.flush()?;
        self.closed = true;
        self.log_closed();
        Ok(())
    }

    fn log_closed(&self) {
        debug!(
            "Closed trace {} after {} lines",
            self.path.display(),
            self.lines_written
        );
    }
}

impl SchedTraceSink for SchedAllocTraceFile {
    fn report_sched_info(&mut self, info: &SchedTraceInfo) -> Result<(), TraceError> {
        self.write_report(info).map(|_| ())
    }
}

impl Drop for SchedAllocTraceFile {
    fn drop(&mut self) {
        // Already flushed by close()
        if self.closed {
            return;
        }
        if let Err(e) = self.writer.flush() {
            error!("Failed to flush trace {}: {}", self.path.display(), e);
        }
        self.log_closed();
    }
}

/// State of the lazily opened trace file
#[derive(Debug)]
enum TraceState {
    Closed,
    Open(SchedAllocTraceFile),
    Failed,
}

/// MAC scheduler trace with a configurable output filename
///
/// The file is opened on the first report. Changing the filename after that
/// has no effect.
#[derive(Debug)]
pub struct MacTrace {
    filename: PathBuf,
    state: TraceState,
}

impl Default for MacTrace {
    fn default() -> Self {
        Self::new(DEFAULT_SCHED_TRACE_FILENAME)
    }
}

impl MacTrace {
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            state: TraceState::Closed,
        }
    }

    /// Set the output filename
    ///
    /// Has no effect once the trace file is open. After a failed open the
    /// new filename is used by the next report.
    pub fn set_output_filename(&mut self, filename: impl Into<PathBuf>) {
        let filename = filename.into();
        info!("Filename: {}", filename.display());

        if self.is_open() {
            warn!(
                "Trace already opened at {}; ignoring new filename {}",
                self.filename.display(),
                filename.display()
            );
            return;
        }

        if let TraceState::Failed = self.state {
            self.state = TraceState::Closed;
        }
        self.filename = filename;
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, TraceState::Open(_))
    }

    /// Data lines written so far
    pub fn lines_written(&self) -> u64 {
        match &self.state {
            TraceState::Open(file) => file.lines_written(),
            _ => 0,
        }
    }

    /// Record one scheduling outcome, opening the trace file if needed
    ///
    /// # Errors
    /// * `TraceError::Open` - first report and the file could not be opened
    /// * `TraceError::Unavailable` - an earlier open already failed
    /// * `TraceError::Write` - I/O error while appending
    pub fn report_sched_info(&mut self, info: &SchedTraceInfo) -> Result<(), TraceError> {
        self.open_if_needed()?.write_report(info)?;
        Ok(())
    }

    fn open_if_needed(&mut self) -> Result<&mut SchedAllocTraceFile, TraceError> {
        if let TraceState::Closed = self.state {
            match SchedAllocTraceFile::create(&self.filename) {
                Ok(file) => self.state = TraceState::Open(file),
                Err(e) => {
                    self.state = TraceState::Failed;
                    return Err(e);
                }
            }
        }

        match &mut self.state {
            TraceState::Open(file) => Ok(file),
            _ => Err(TraceError::Unavailable(self.filename.clone())),
        }
    }
}

impl SchedTraceSink for MacTrace {
    fn report_sched_info(&mut self, info: &SchedTraceInfo) -> Result<(), TraceError> {
        MacTrace::report_sched_info(self, info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::{SfnSf, TddMode, TtiAllocInfo, TtiType};

    fn ctrl_report() -> SchedTraceInfo {
        SchedTraceInfo::new(
            SfnSf::new(3, 5, 1),
            SfnSf::new(3, 6, 1),
            vec![TtiAllocInfo::new(TtiType::Ctrl, TddMode::Dl, 42, 0, 2)],
        )
    }

    #[test]
    fn test_create_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.txt");

        let file = SchedAllocTraceFile::create(&path).unwrap();
        assert_eq!(file.lines_written(), 0);
        file.close().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("{}\n", TRACE_HEADER));
    }

    #[test]
    fn test_lazy_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lazy.txt");

        let mut trace = MacTrace::new(&path);
        assert!(!trace.is_open());
        assert!(!path.exists());

        trace.report_sched_info(&ctrl_report()).unwrap();
        assert!(trace.is_open());
        assert_eq!(trace.lines_written(), 1);
    }

    #[test]
    fn test_filename_ignored_after_open() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");

        let mut trace = MacTrace::new(&first);
        trace.report_sched_info(&ctrl_report()).unwrap();
        trace.set_output_filename(&second);
        trace.report_sched_info(&ctrl_report()).unwrap();

        assert_eq!(trace.filename(), first.as_path());
        assert!(!second.exists());
    }

    #[test]
    fn test_failed_open_is_not_retried() {
        let dir = tempfile::tempdir().unwrap();

        // A directory cannot be opened as a trace file
        let mut trace = MacTrace::new(dir.path());
        let first = trace.report_sched_info(&ctrl_report());
        assert!(matches!(first, Err(TraceError::Open { .. })));

        let second = trace.report_sched_info(&ctrl_report());
        assert!(matches!(second, Err(TraceError::Unavailable(_))));
    }

    #[test]
    fn test_new_filename_after_failed_open() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("missing/x.txt");
        let good = dir.path().join("good.txt");

        let mut trace = MacTrace::new(&bad);
        assert!(trace.report_sched_info(&ctrl_report()).is_err());

        trace.set_output_filename(&good);
        assert_eq!(trace.filename(), good.as_path());

        trace.report_sched_info(&ctrl_report()).unwrap();
        assert!(trace.is_open());
        assert!(good.exists());
        assert_eq!(trace.lines_written(), 1);
    }

    #[test]
    fn test_close_then_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("closed.txt");

        let mut file = SchedAllocTraceFile::create(&path).unwrap();
        file.write_report(&ctrl_report()).unwrap();
        file.close().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_default_filename() {
        let trace = MacTrace::default();
        assert_eq!(trace.filename(), Path::new(DEFAULT_SCHED_TRACE_FILENAME));
    }
}
