use bunny_sim::Narrative;
use log::warn;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Narrative sink that writes to a file and, when `to_console` is set, also
/// echoes to stdout.
#[derive(Debug)]
pub struct NarrativeLog {
    path: PathBuf,
    file: File,
    pub to_console: bool,
}

impl NarrativeLog {
    pub fn create(path: &Path, to_console: bool) -> io::Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            file: File::create(path)?,
            to_console,
        })
    }

    /// Truncates the file and starts it over.
    pub fn clear(&mut self) -> io::Result<()> {
        self.file = File::create(&self.path)?;
        Ok(())
    }
}

impl Narrative for NarrativeLog {
    fn write(&mut self, text: &str) {
        if let Err(err) = self.file.write_all(text.as_bytes()) {
            warn!("Narrative write to {} failed: {err}", self.path.display());
        }
        if self.to_console {
            print!("{text}");
        }
    }
}
