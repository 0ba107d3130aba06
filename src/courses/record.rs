//! Course records as fetched from a schedule file
//!
//! A schedule file is a JSON array of flat objects. Each object describes one
//! course and must carry a `coursename` key, which doubles as the folder name.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Key that identifies a course and names its folder
pub const COURSE_NAME_KEY: &str = "coursename";

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// One course from a schedule, fields kept in their original order
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecord {
    name: String,
    fields: Map<String, Value>,
}

impl CourseRecord {
    /// Build a record from a JSON object, validating the course name
    ///
    /// `index` is the record's position in the schedule and only used for
    /// error messages.
    pub fn from_value(index: usize, value: Value) -> Result<Self> {
        let Value::Object(fields) = value else {
            return Err(Error::InvalidCourse {
                index,
                reason: "expected a JSON object".to_string(),
            });
        };

        let name = match fields.get(COURSE_NAME_KEY) {
            Some(Value::String(name)) => name.clone(),
            Some(_) => {
                return Err(Error::InvalidCourse {
                    index,
                    reason: format!("`{}` must be a string", COURSE_NAME_KEY),
                })
            }
            None => {
                return Err(Error::InvalidCourse {
                    index,
                    reason: format!("missing `{}`", COURSE_NAME_KEY),
                })
            }
        };

        validate_folder_name(&name).map_err(|reason| Error::InvalidCourse { index, reason })?;

        Ok(Self { name, fields })
    }

    /// Build a record from key/value pairs, in order
    pub fn from_pairs<K, V, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields: Map<String, Value> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        Self::from_value(0, Value::Object(fields))
    }

    /// The course name, used as the folder name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in insertion order, with values rendered as text
    pub fn fields(&self) -> impl Iterator<Item = (&str, String)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), render_value(value)))
    }

    /// Contents of the descriptor file: one `key: value` line per field
    pub fn descriptor(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.fields() {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(&value);
            out.push_str(LINE_ENDING);
        }
        out
    }
}

/// Parse a schedule document (a JSON array of course objects)
///
/// Any invalid record fails the whole schedule.
pub fn parse_schedule(value: Value) -> Result<Vec<CourseRecord>> {
    let Value::Array(items) = value else {
        return Err(Error::InvalidCourse {
            index: 0,
            reason: "schedule must be a JSON array".to_string(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| CourseRecord::from_value(index, item))
        .collect()
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// A course name must be usable as a single path component
fn validate_folder_name(name: &str) -> std::result::Result<(), String> {
    if name.trim().is_empty() {
        return Err(format!("`{}` is empty", COURSE_NAME_KEY));
    }
    if name == "." || name == ".." {
        return Err(format!("`{}` cannot be `{}`", COURSE_NAME_KEY, name));
    }
    if name.contains(['/', '\\']) {
        return Err(format!(
            "`{}` cannot contain a path separator: {}",
            COURSE_NAME_KEY, name
        ));
    }
    Ok(())
}
