//! Class rosters and group partitioning.
//!
//! A roster is a CSV sheet with at least a `Course` and a `Name_ori` column.
//! [`match_roster_schema`] locates those columns explicitly instead of
//! probing for attributes, and [`partition`] cuts a course's member list
//! into numbered groups.

mod grouping;
mod schema;

pub use grouping::{partition, Group, GroupPlan, GroupRequest};
pub use schema::{match_roster_schema, SchemaMatch, COURSE_COLUMN, NAME_COLUMN};

use std::io;

use lexis_types::RosterError;
use tracing::{debug, warn};

/// One roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// Course the member belongs to.
    pub course: String,
    /// Member display name.
    pub name: String,
}

/// A parsed class roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// Builds a roster from `(course, name)` pairs.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = RosterEntry>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Reads a roster from CSV with a header row.
    ///
    /// With `allow_positional`, a sheet without the expected headers is read
    /// as course in column 0 and name in column 1.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::MissingColumns` if the columns cannot be located,
    /// and `RosterError::Malformed` if the CSV itself cannot be read.
    pub fn from_csv_reader<R: io::Read>(
        reader: R,
        allow_positional: bool,
    ) -> Result<Self, RosterError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| RosterError::Malformed(e.to_string()))?
            .clone();

        let header_names: Vec<&str> = headers.iter().collect();

        let (course_idx, name_idx) = match match_roster_schema(header_names.iter().copied()) {
            SchemaMatch::Matched { course, name } => (course, name),
            SchemaMatch::Positional { course, name } if allow_positional => {
                warn!("roster headers not found; using positional columns");
                (course, name)
            }
            SchemaMatch::Positional { .. } => {
                return Err(RosterError::MissingColumns(vec![COURSE_COLUMN, NAME_COLUMN]))
            }
            SchemaMatch::Missing(missing) => return Err(RosterError::MissingColumns(missing)),
        };

        let mut entries = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| RosterError::Malformed(e.to_string()))?;
            let course = record.get(course_idx).unwrap_or_default();
            let name = record.get(name_idx).unwrap_or_default();
            if course.is_empty() && name.is_empty() {
                continue;
            }
            entries.push(RosterEntry {
                course: course.to_owned(),
                name: name.to_owned(),
            });
        }

        debug!(rows = entries.len(), "roster loaded");
        Ok(Self { entries })
    }

    /// All rows, in file order.
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the roster has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct non-empty course names, in first-appearance order.
    pub fn courses(&self) -> Vec<&str> {
        let mut seen = rustc_hash::FxHashSet::default();
        self.entries
            .iter()
            .map(|e| e.course.as_str())
            .filter(|c| !c.is_empty() && seen.insert(*c))
            .collect()
    }

    /// Non-empty member names of `course`, in file order.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::UnknownCourse` if no row names that course.
    pub fn members(&self, course: &str) -> Result<Vec<&str>, RosterError> {
        if !self.entries.iter().any(|e| e.course == course) {
            return Err(RosterError::UnknownCourse(course.to_owned()));
        }
        Ok(self
            .entries
            .iter()
            .filter(|e| e.course == course && !e.name.is_empty())
            .map(|e| e.name.as_str())
            .collect())
    }
}
