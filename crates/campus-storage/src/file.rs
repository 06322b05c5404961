//! Flat-file implementation of [`SnapshotStore`].
//!
//! One JSON collection-of-records file per entity kind under a data
//! directory. Loading order is fixed by the linker because later files
//! reference earlier ones by id; a missing file simply loads as an empty
//! collection, matching a data directory that has never been saved to.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use campus_core::Campus;

use crate::convert::decompose;
use crate::error::StorageError;
use crate::link::{recompose, LoadReport};
use crate::record::Snapshot;
use crate::traits::SnapshotStore;

const USERS_FILE: &str = "users.json";
const COURSES_FILE: &str = "courses.json";
const ENROLLMENTS_FILE: &str = "enrollments.json";
const ASSIGNMENTS_FILE: &str = "assignments.json";
const GRADES_FILE: &str = "grades.json";

/// Snapshot storage under a directory of per-kind JSON files.
#[derive(Debug)]
pub struct FlatFileStore {
    dir: PathBuf,
}

impl FlatFileStore {
    /// Creates a store rooted at `dir`. The directory is created on the
    /// first save, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FlatFileStore { dir: dir.into() }
    }

    /// The directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_records<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, StorageError> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    fn write_records<T: Serialize>(&self, name: &str, records: &[T]) -> Result<(), StorageError> {
        let writer = BufWriter::new(File::create(self.dir.join(name))?);
        serde_json::to_writer_pretty(writer, records)?;
        Ok(())
    }
}

impl SnapshotStore for FlatFileStore {
    fn save_campus(&mut self, campus: &Campus) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let snapshot = decompose(campus);
        self.write_records(USERS_FILE, &snapshot.users)?;
        self.write_records(COURSES_FILE, &snapshot.courses)?;
        self.write_records(ENROLLMENTS_FILE, &snapshot.enrollments)?;
        self.write_records(ASSIGNMENTS_FILE, &snapshot.assignments)?;
        self.write_records(GRADES_FILE, &snapshot.grades)?;
        Ok(())
    }

    fn load_campus(&self) -> Result<(Campus, LoadReport), StorageError> {
        let snapshot = Snapshot {
            users: self.read_records(USERS_FILE)?,
            courses: self.read_records(COURSES_FILE)?,
            enrollments: self.read_records(ENROLLMENTS_FILE)?,
            assignments: self.read_records(ASSIGNMENTS_FILE)?,
            grades: self.read_records(GRADES_FILE)?,
        };
        Ok(recompose(snapshot))
    }
}
