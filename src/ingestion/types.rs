//! Ingestion Data Types
//!
//! Describes the input side of a job: the manifest and the files it lists.

use crate::search::types::FileId;

use std::path::PathBuf;

/// One input file, immutable once the manifest is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    /// 1-based position in the manifest; this is what appears in posting lists.
    pub id: FileId,
    pub path: PathBuf,
}

/// The ordered list of input files for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    files: Vec<InputFile>,
}

impl Manifest {
    /// Builds a manifest from paths, numbering them from 1 in order.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let files = paths
            .into_iter()
            .enumerate()
            .map(|(i, path)| InputFile {
                id: i + 1,
                path: path.into(),
            })
            .collect();
        Self { files }
    }

    pub fn files(&self) -> &[InputFile] {
        &self.files
    }

    /// File at 0-based task index, as handed out by the task queue.
    pub fn get(&self, index: usize) -> Option<&InputFile> {
        self.files.get(index)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
