//! Append-mode relation files.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result as AnyResult};

use aucload_types::{Relation, UserRow};

use crate::dat::{encode_line, DatRecord};
use crate::normalize::NormalizedItem;

/// One relation's backing file, opened for appending.
pub struct RelationSink {
    writer: BufWriter<File>,
    rows: u64,
}

impl RelationSink {
    /// Opens (creating if necessary) the relation's file under `dir`,
    /// positioned to append after any rows from earlier runs.
    pub fn open(dir: &Path, relation: Relation) -> AnyResult<Self> {
        let path = dir.join(relation.file_name());
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open {relation} output file '{}'", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            rows: 0,
        })
    }

    pub fn write_row<R: DatRecord>(&mut self, row: &R) -> io::Result<()> {
        self.writer.write_all(encode_line(row).as_bytes())?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written during this run; rows appended after in earlier runs do
    /// not count.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// The four relation files of one run.
pub struct OutputSet {
    pub items: RelationSink,
    pub users: RelationSink,
    pub categories: RelationSink,
    pub bids: RelationSink,
}

impl OutputSet {
    /// Opens all four relation files under `dir`, creating the directory
    /// first if needed.
    pub fn open(dir: &Path) -> AnyResult<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
        Ok(Self {
            items: RelationSink::open(dir, Relation::Items)?,
            users: RelationSink::open(dir, Relation::Users)?,
            categories: RelationSink::open(dir, Relation::Categories)?,
            bids: RelationSink::open(dir, Relation::Bids)?,
        })
    }

    /// Appends everything one normalized item carries, except its user
    /// snapshots: those go to the run's registry, not straight to disk.
    pub fn commit(&mut self, item: &NormalizedItem) -> io::Result<()> {
        self.items.write_row(&item.item)?;
        for row in &item.categories {
            self.categories.write_row(row)?;
        }
        for row in &item.bids {
            self.bids.write_row(row)?;
        }
        Ok(())
    }

    /// Writes the deduplicated Users relation.
    pub fn write_users<I>(&mut self, rows: I) -> io::Result<()>
    where
        I: IntoIterator<Item = UserRow>,
    {
        for row in rows {
            self.users.write_row(&row)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.items.flush()?;
        self.users.flush()?;
        self.categories.flush()?;
        self.bids.flush()
    }
}
