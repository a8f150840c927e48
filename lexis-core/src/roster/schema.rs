//! Roster column detection.

/// Header naming the course column.
pub const COURSE_COLUMN: &str = "Course";
/// Header naming the member name column.
pub const NAME_COLUMN: &str = "Name_ori";

/// Where the roster columns were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaMatch {
    /// Both headers present at these indices.
    Matched {
        /// Index of the course column.
        course: usize,
        /// Index of the name column.
        name: usize,
    },
    /// Neither header present, but there are enough columns to read by position.
    Positional {
        /// Index of the course column.
        course: usize,
        /// Index of the name column.
        name: usize,
    },
    /// The listed headers could not be located.
    Missing(Vec<&'static str>),
}

fn find_column<'h, I>(headers: I, wanted: &str) -> Option<usize>
where
    I: Iterator<Item = &'h str> + Clone,
{
    // Exact match wins over a relaxed one.
    headers
        .clone()
        .position(|h| h == wanted)
        .or_else(|| headers.clone().position(|h| h.trim().eq_ignore_ascii_case(wanted)))
}

/// Locates the `Course` and `Name_ori` columns in a header row.
///
/// Headers match exactly first, then trimmed and ASCII case-insensitively.
/// If only one of the two is present the other is reported missing; if
/// neither is present and there are at least two columns, the result is
/// [`SchemaMatch::Positional`] with course in column 0 and name in column 1.
///
/// ```
/// use lexis_core::roster::{match_roster_schema, SchemaMatch};
///
/// assert_eq!(
///     match_roster_schema(["No", "Course", "Name_ori"]),
///     SchemaMatch::Matched { course: 1, name: 2 }
/// );
/// ```
pub fn match_roster_schema<'h, I>(headers: I) -> SchemaMatch
where
    I: IntoIterator<Item = &'h str>,
    I::IntoIter: Clone,
{
    let headers = headers.into_iter();
    let course = find_column(headers.clone(), COURSE_COLUMN);
    let name = find_column(headers.clone(), NAME_COLUMN);

    match (course, name) {
        (Some(course), Some(name)) => SchemaMatch::Matched { course, name },
        (None, None) if headers.count() >= 2 => SchemaMatch::Positional { course: 0, name: 1 },
        (course, name) => {
            let mut missing = Vec::with_capacity(2);
            if course.is_none() {
                missing.push(COURSE_COLUMN);
            }
            if name.is_none() {
                missing.push(NAME_COLUMN);
            }
            SchemaMatch::Missing(missing)
        }
    }
}
