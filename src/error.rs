use thiserror::Error;

/// Grammar violations reported by the topic, tag and topic filter validators.
///
/// A violation is plain data: validators return it, they never panic.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicError {
    #[error("The topic must not be an empty string")]
    EmptyString,

    #[error("The topic must not contain the null character (U+0000)")]
    NullCharacter,

    #[error("Wildcard characters '#' and '+' are not allowed in a topic")]
    WildcardNotAllowed,

    #[error("Wildcard characters '#' and '+' are not allowed in the shared subscription name")]
    WildcardInSharedName,

    #[error("The shared subscription name must not be empty")]
    EmptySharedName,

    #[error(
        "The multi-level wildcard '#' must be the last character and must be preceded by a topic level separator"
    )]
    MultiLevelWildcardMisplaced,

    #[error("The single-level wildcard '+' must not be preceded by any character other than '/'")]
    SingleLevelWildcardPreceded,

    #[error("The single-level wildcard '+' must not be followed by any character other than '/'")]
    SingleLevelWildcardFollowed,
}

impl TopicError {
    /// Stable key identifying the violated rule, suitable as a translation key.
    pub fn message_key(&self) -> &'static str {
        match self {
            TopicError::EmptyString => "validation.topic.emptyString",
            TopicError::NullCharacter => "validation.topic.noNullChar",
            TopicError::WildcardNotAllowed => "validation.topic.noWildcards",
            TopicError::WildcardInSharedName => "validation.topicFilter.noWildcardsInShareName",
            TopicError::EmptySharedName => "validation.topicFilter.emptyShareName",
            TopicError::MultiLevelWildcardMisplaced => "validation.topicFilter.multiLevelWildcard",
            TopicError::SingleLevelWildcardPreceded => {
                "validation.topicFilter.singleLevelWildcardPreceded"
            }
            TopicError::SingleLevelWildcardFollowed => {
                "validation.topicFilter.singleLevelWildcardFollowed"
            }
        }
    }
}

/// Errors raised while parsing a JSONPath expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsonPathError {
    #[error("Unexpected character '{found}' at position {position} in path '{path}'")]
    UnexpectedCharacter {
        path: String,
        position: usize,
        found: char,
    },

    #[error("Unterminated bracket segment in path '{0}'")]
    UnterminatedBracket(String),

    #[error("Empty segment at position {position} in path '{path}'")]
    EmptySegment { path: String, position: usize },
}

/// Errors raised while applying mapping instructions to a payload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    #[error("Invalid path in instruction for destination '{destination}': {source}")]
    InvalidPath {
        destination: String,
        #[source]
        source: JsonPathError,
    },

    #[error("Cannot write destination '{destination}': {message}")]
    Conflict {
        destination: String,
        message: String,
    },
}

/// Errors raised while loading schema or payload documents.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON document '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON object at the root of '{0}'")]
    NotAnObject(String),
}
