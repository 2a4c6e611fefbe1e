use crate::transpiler::codegen::GeneratedModel;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

/// Destination for generated artifacts.
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactSink {
    /// Store one artifact and return where it went
    fn write(&mut self, file_name: &str, contents: &str) -> Result<PathBuf>;

    /// Undo a previous `write`
    fn discard(&mut self, location: &Path) -> Result<()>;
}

/// Writes artifacts into a directory, overwriting existing files.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactSink for FileSink {
    fn write(&mut self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("wrote {}", path.display());
        Ok(path)
    }

    fn discard(&mut self, location: &Path) -> Result<()> {
        fs::remove_file(location)
            .with_context(|| format!("Failed to remove {}", location.display()))
    }
}

/// Prints artifacts to a writer, each preceded by a banner with its file name.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ArtifactSink for WriterSink<W> {
    fn write(&mut self, file_name: &str, contents: &str) -> Result<PathBuf> {
        writeln!(self.writer, "// ---- {} ----", file_name)?;
        self.writer.write_all(contents.as_bytes())?;
        self.writer.flush()?;
        Ok(PathBuf::from(file_name))
    }

    fn discard(&mut self, _location: &Path) -> Result<()> {
        Ok(())
    }
}

/// Store the header and the source. If the source cannot be stored the header is
/// discarded again, so a failed run leaves neither behind.
pub fn emit_artifacts(
    sink: &mut dyn ArtifactSink,
    generated: &GeneratedModel,
) -> Result<(PathBuf, PathBuf)> {
    let header = sink.write(&generated.header_file, &generated.header)?;

    match sink.write(&generated.source_file, &generated.source) {
        Ok(source) => Ok((header, source)),
        Err(err) => {
            if let Err(cleanup) = sink.discard(&header) {
                warn!("could not remove {}: {:#}", header.display(), cleanup);
            }
            Err(err)
        }
    }
}
