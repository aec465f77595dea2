use crate::error::TopicError;

/// Literal prefix that turns a topic filter into an MQTT 5 shared subscription.
pub const SHARE_PREFIX: &str = "$share/";

const NULL_CHAR: char = '\u{0000}';
const LEVEL_SEPARATOR: char = '/';
const MULTI_LEVEL_WILDCARD: char = '#';
const SINGLE_LEVEL_WILDCARD: char = '+';

/// Validates a topic name that can be published to. Wildcards are rejected.
pub fn validate_topic(data: &str) -> Result<(), TopicError> {
    check_common(data)?;
    if data.contains([MULTI_LEVEL_WILDCARD, SINGLE_LEVEL_WILDCARD]) {
        return Err(TopicError::WildcardNotAllowed);
    }
    Ok(())
}

/// Validates a device tag name. Tags follow the same grammar as topic names.
pub fn validate_tag(data: &str) -> Result<(), TopicError> {
    validate_topic(data)
}

/// Validates a subscription topic filter, including the `$share/<name>/<filter>` form.
///
/// The first violation found wins; errors are never accumulated.
pub fn validate_topic_filter(topic: &str) -> Result<(), TopicError> {
    check_common(topic)?;

    let (mut scanner, body) = match topic.strip_prefix(SHARE_PREFIX) {
        Some(rest) => (FilterScanner::new(ScanState::ShareName { empty: true }), rest),
        None => (FilterScanner::new(ScanState::Filter), topic),
    };
    scanner.scan(body)
}

fn check_common(data: &str) -> Result<(), TopicError> {
    if data.is_empty() {
        return Err(TopicError::EmptyString);
    }
    if data.contains(NULL_CHAR) {
        return Err(TopicError::NullCharacter);
    }
    Ok(())
}

/// States of the topic filter scan.
///
/// | state       | input        | next / outcome                 |
/// |-------------|--------------|--------------------------------|
/// | `ShareName` | `+` or `#`   | `WildcardInSharedName`         |
/// | `ShareName` | `/`, empty   | `EmptySharedName`              |
/// | `ShareName` | `/`          | `Filter`, previous is `/`      |
/// | `ShareName` | other        | `ShareName { empty: false }`   |
/// | `Filter`    | `#`          | ok if last and previous is `/`, else misplaced |
/// | `Filter`    | `+`          | error unless previous is `/` and next is `/` or end |
/// | `Filter`    | other        | `Filter`                       |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    ShareName { empty: bool },
    Filter,
}

struct FilterScanner {
    state: ScanState,
    /// `None` before the first character. Only a real `/` opens a level.
    previous: Option<char>,
}

impl FilterScanner {
    fn new(state: ScanState) -> Self {
        Self {
            state,
            previous: None,
        }
    }

    fn at_level_start(&self) -> bool {
        self.previous == Some(LEVEL_SEPARATOR)
    }

    fn scan(&mut self, body: &str) -> Result<(), TopicError> {
        let mut chars = body.chars().peekable();

        while let Some(current) = chars.next() {
            let next = chars.peek().copied();
            match self.state {
                ScanState::ShareName { empty } => {
                    self.share_name_step(current, empty)?;
                }
                ScanState::Filter => {
                    if self.filter_step(current, next)? {
                        return Ok(());
                    }
                    self.previous = Some(current);
                }
            }
        }

        if self.state == (ScanState::ShareName { empty: true }) {
            return Err(TopicError::EmptySharedName);
        }
        Ok(())
    }

    fn share_name_step(&mut self, current: char, empty: bool) -> Result<(), TopicError> {
        match current {
            MULTI_LEVEL_WILDCARD | SINGLE_LEVEL_WILDCARD => Err(TopicError::WildcardInSharedName),
            LEVEL_SEPARATOR if empty => Err(TopicError::EmptySharedName),
            LEVEL_SEPARATOR => {
                self.state = ScanState::Filter;
                self.previous = Some(LEVEL_SEPARATOR);
                Ok(())
            }
            _ => {
                self.state = ScanState::ShareName { empty: false };
                Ok(())
            }
        }
    }

    /// Returns `Ok(true)` when a trailing multi-level wildcard ends the scan successfully.
    fn filter_step(&self, current: char, next: Option<char>) -> Result<bool, TopicError> {
        match current {
            MULTI_LEVEL_WILDCARD => {
                if self.at_level_start() && next.is_none() {
                    Ok(true)
                } else {
                    Err(TopicError::MultiLevelWildcardMisplaced)
                }
            }
            SINGLE_LEVEL_WILDCARD => {
                if !self.at_level_start() {
                    return Err(TopicError::SingleLevelWildcardPreceded);
                }
                match next {
                    None | Some(LEVEL_SEPARATOR) => Ok(false),
                    Some(_) => Err(TopicError::SingleLevelWildcardFollowed),
                }
            }
            _ => Ok(false),
        }
    }
}
