//! Discovery of local media files and their assignment to sample records.
//!
//! Files are listed by name, capped per kind, and mapped onto record ids
//! through an explicit [`AssetPlan`] rather than by directory order alone:
//! a file named after a record id (`3.mp4`) always lands on that record,
//! and the remaining files fill the remaining records in order.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Maximum number of files uploaded per kind.
pub const MAX_ASSETS_PER_KIND: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Video,
    Thumbnail,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [AssetKind::Video, AssetKind::Thumbnail];

    /// Subdirectory of the asset root holding this kind.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Video => "videos",
            Self::Thumbnail => "thumbnails",
        }
    }

    /// Blob container receiving this kind.
    pub fn container(self) -> &'static str {
        self.dir_name()
    }

    fn blob_prefix(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Thumbnail => "thumbnail",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.blob_prefix())
    }
}

/// One file bound to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub record_id: String,
    pub kind: AssetKind,
    pub source: PathBuf,
    pub blob_name: String,
}

/// Blob name for a record's asset: `video_<id><.ext>` / `thumbnail_<id><.ext>`.
pub fn blob_name(kind: AssetKind, record_id: &str, source: &Path) -> String {
    match source.extension() {
        Some(ext) => format!("{}_{record_id}.{}", kind.blob_prefix(), ext.to_string_lossy()),
        None => format!("{}_{record_id}", kind.blob_prefix()),
    }
}

/// Regular files directly inside `dir`, sorted by file name.
///
/// A missing directory yields an empty list.
pub fn discover(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Human-readable problems with the asset layout. None of them stop a run.
pub fn check_layout(root: &Path) -> Vec<String> {
    if !root.is_dir() {
        return vec![format!(
            "Asset directory {} not found. Create {}/videos and {}/thumbnails and add sample media",
            root.display(),
            root.display(),
            root.display()
        )];
    }

    AssetKind::ALL
        .iter()
        .filter_map(|kind| {
            let dir = root.join(kind.dir_name());
            let empty = discover(&dir).map(|files| files.is_empty()).unwrap_or(true);
            empty.then(|| format!("No {kind} files found in {}", dir.display()))
        })
        .collect()
}

/// The complete file-to-record mapping for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetPlan {
    pub assignments: Vec<Assignment>,
    /// Files that found no record.
    pub unassigned: Vec<PathBuf>,
}

impl AssetPlan {
    /// Scan `root/videos` and `root/thumbnails` and map them onto `record_ids`.
    pub fn discover(root: &Path, record_ids: &[&str]) -> io::Result<Self> {
        let mut plan = Self::default();
        for kind in AssetKind::ALL {
            let files = discover(&root.join(kind.dir_name()))?;
            plan.assign(kind, files, record_ids);
        }
        Ok(plan)
    }

    /// Map `files` (already in name order) of one kind onto `record_ids`.
    ///
    /// Only the first [`MAX_ASSETS_PER_KIND`] files are candidates; the
    /// rest are reported as unassigned.
    pub fn assign(&mut self, kind: AssetKind, mut files: Vec<PathBuf>, record_ids: &[&str]) {
        let surplus = files.split_off(files.len().min(MAX_ASSETS_PER_KIND));

        let mut taken: Vec<Option<PathBuf>> = vec![None; record_ids.len()];
        let mut rest = Vec::new();

        // Pin files whose stem is a record id.
        for file in files {
            let stem = file.file_stem().map(|s| s.to_string_lossy().into_owned());
            let slot = stem
                .as_deref()
                .and_then(|stem| record_ids.iter().position(|id| *id == stem))
                .filter(|&i| taken[i].is_none());
            match slot {
                Some(i) => taken[i] = Some(file),
                None => rest.push(file),
            }
        }

        let mut rest = rest.into_iter();
        for slot in taken.iter_mut().filter(|slot| slot.is_none()) {
            *slot = rest.next();
        }
        self.unassigned.extend(rest);
        self.unassigned.extend(surplus);

        for (id, source) in record_ids.iter().zip(taken) {
            if let Some(source) = source {
                self.assignments.push(Assignment {
                    record_id: id.to_string(),
                    kind,
                    blob_name: blob_name(kind, id, &source),
                    source,
                });
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn of_kind(&self, kind: AssetKind) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(move |a| a.kind == kind)
    }
}

impl fmt::Display for AssetPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.assignments.is_empty() {
            return writeln!(f, "No media files to upload.");
        }
        writeln!(f, "{:<8} {:<10} {:<24} SOURCE", "RECORD", "KIND", "BLOB")?;
        for a in &self.assignments {
            writeln!(
                f,
                "{:<8} {:<10} {:<24} {}",
                a.record_id,
                a.kind.to_string(),
                a.blob_name,
                a.source.display()
            )?;
        }
        for path in &self.unassigned {
            writeln!(f, "(skipped) {}", path.display())?;
        }
        Ok(())
    }
}
