use crate::error::JsonPathError;
use serde_json::{Map, Value};
use std::fmt;

const ROOT: &str = "$";
const ROOT_PREFIX: &str = "$.";

/// Prefixes a bare path with the JSONPath root. `""` becomes `"$"`.
pub fn to_json_path(path: &str) -> String {
    if path.is_empty() {
        ROOT.to_string()
    } else if path.starts_with(ROOT) {
        path.to_string()
    } else {
        format!("{}{}", ROOT_PREFIX, path)
    }
}

/// Strips the JSONPath root from a path. `"$"` becomes `""`.
pub fn from_json_path(path: &str) -> String {
    if path == ROOT {
        return String::new();
    }
    path.strip_prefix(ROOT_PREFIX).unwrap_or(path).to_string()
}

/// One step of a [`JsonPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// A parsed JSONPath of the dotted/bracket subset: `$`, `.key`, `[0]`, `['quoted key']`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Parses `path`, with or without the leading `$`.
    pub fn parse(path: &str) -> Result<Self, JsonPathError> {
        let normalized = to_json_path(path);
        let error_path = || normalized.clone();
        let mut chars = normalized.char_indices().skip(1).peekable();
        let mut segments = Vec::new();

        while let Some((position, c)) = chars.next() {
            match c {
                '.' => {
                    let mut key = String::new();
                    while let Some(&(_, next)) = chars.peek() {
                        if next == '.' || next == '[' {
                            break;
                        }
                        key.push(next);
                        chars.next();
                    }
                    if key.is_empty() {
                        return Err(JsonPathError::EmptySegment {
                            path: error_path(),
                            position,
                        });
                    }
                    segments.push(PathSegment::Key(key));
                }
                '[' => {
                    let segment = match chars.peek() {
                        Some(&(_, quote @ ('\'' | '"'))) => {
                            chars.next();
                            let mut key = String::new();
                            loop {
                                match chars.next() {
                                    Some((_, c)) if c == quote => break,
                                    Some((_, c)) => key.push(c),
                                    None => {
                                        return Err(JsonPathError::UnterminatedBracket(
                                            error_path(),
                                        ));
                                    }
                                }
                            }
                            PathSegment::Key(key)
                        }
                        _ => {
                            let mut digits = String::new();
                            while let Some(&(at, next)) = chars.peek() {
                                if next == ']' {
                                    break;
                                }
                                if !next.is_ascii_digit() {
                                    return Err(JsonPathError::UnexpectedCharacter {
                                        path: error_path(),
                                        position: at,
                                        found: next,
                                    });
                                }
                                digits.push(next);
                                chars.next();
                            }
                            match digits.parse::<usize>() {
                                Ok(index) => PathSegment::Index(index),
                                Err(_) => {
                                    return Err(JsonPathError::EmptySegment {
                                        path: error_path(),
                                        position,
                                    });
                                }
                            }
                        }
                    };
                    match chars.next() {
                        Some((_, ']')) => segments.push(segment),
                        Some((at, found)) => {
                            return Err(JsonPathError::UnexpectedCharacter {
                                path: error_path(),
                                position: at,
                                found,
                            });
                        }
                        None => return Err(JsonPathError::UnterminatedBracket(error_path())),
                    }
                }
                found => {
                    return Err(JsonPathError::UnexpectedCharacter {
                        path: error_path(),
                        position,
                        found,
                    });
                }
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Dotted form without the root, as used by flattened property paths.
    pub fn to_dotted(&self) -> String {
        from_json_path(&self.to_string())
    }

    pub fn get<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| match segment {
                PathSegment::Key(key) => current.get(key.as_str()),
                PathSegment::Index(index) => current.get(*index),
            })
    }

    /// Writes `value` at this path, creating intermediate objects and arrays as needed.
    ///
    /// Arrays are only overwritten or extended by one element at the end.
    ///
    /// Fails with a description when an intermediate value is a scalar or an index
    /// lies past the end of its array.
    pub fn set(&self, target: &mut Value, value: Value) -> Result<(), String> {
        let mut current = target;
        for segment in &self.segments {
            if current.is_null() {
                *current = match segment {
                    PathSegment::Key(_) => Value::Object(Map::new()),
                    PathSegment::Index(_) => Value::Array(Vec::new()),
                };
            }
            current = match (segment, current) {
                (PathSegment::Key(key), Value::Object(fields)) => {
                    fields.entry(key.clone()).or_insert(Value::Null)
                }
                (PathSegment::Index(index), Value::Array(items)) => {
                    let len = items.len();
                    if *index == len {
                        items.push(Value::Null);
                    }
                    match items.get_mut(*index) {
                        Some(item) => item,
                        None => {
                            return Err(format!(
                                "index {} is past the end of an array of length {}",
                                index, len
                            ));
                        }
                    }
                }
                (segment, other) => {
                    return Err(format!(
                        "cannot step into {} with segment {}",
                        describe(other),
                        segment
                    ));
                }
            };
        }
        *current = value;
        Ok(())
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) if key.contains(['.', '[', ']']) => write!(f, "['{}']", key),
            PathSegment::Key(key) => write!(f, ".{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT)?;
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
