use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::core::error::{Result, WaybackUrlsError};

/// The one place result lines are written to.
///
/// A sink has a single owner; concurrent backends never touch it directly.
pub struct OutputSink<W: Write> {
    writer: W,
}

impl OutputSink<Box<dyn Write + Send>> {
    /// Open the result destination: a freshly created file, or stdout.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let writer: Box<dyn Write + Send> = match path {
            Some(path) => {
                let file = File::create(path).map_err(|e| {
                    WaybackUrlsError::Io(io::Error::new(
                        e.kind(),
                        format!("Could not create result file '{}': {e}", path.display()),
                    ))
                })?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(io::stdout())),
        };
        Ok(Self::new(writer))
    }
}

impl<W: Write> OutputSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write one line, appending the newline.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
