//! ACL grants: which user may publish and/or subscribe on which topic.
//!
//! A grant request arrives as a form payload:
//!
//! ```text
//! username=<user>&access=<publish|subscribe|pubsub>&topic=<filter>
//! ```
//!
//! `access` must be one of the [`TopicDirection`] tokens; any other value is
//! a parse failure, never a default. Grant topics are MQTT topic filters and
//! may use the `+` and `#` wildcards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use crate::payload::{FormRecord, ParseError};

/// Permitted operation(s) on a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicDirection {
    Publish,
    Subscribe,
    #[serde(rename = "pubsub")]
    PubSub,
}

impl TopicDirection {
    pub const ALL: [TopicDirection; 3] = [Self::Publish, Self::Subscribe, Self::PubSub];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Subscribe => "subscribe",
            Self::PubSub => "pubsub",
        }
    }

    /// Whether a grant in this direction permits `requested`.
    pub fn covers(&self, requested: TopicDirection) -> bool {
        *self == Self::PubSub || *self == requested
    }
}

impl FromStr for TopicDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.as_str() == s)
            .ok_or_else(|| ParseError::UnknownTopicDirection(s.to_string()))
    }
}

impl fmt::Display for TopicDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single permission-grant record, handed to the ACL store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AclRequest {
    /// Taken from the `username` key.
    #[validate(length(min = 1, message = "username is required"))]
    pub user_id: String,
    #[validate(custom(function = "validate_topic_filter"))]
    pub topic: String,
    #[validate(required(message = "access is required"))]
    pub access: Option<TopicDirection>,
}

impl AclRequest {
    pub fn new(user_id: impl Into<String>, topic: impl Into<String>, access: TopicDirection) -> Self {
        Self {
            user_id: user_id.into(),
            topic: topic.into(),
            access: Some(access),
        }
    }

    /// Whether this grant lets its user act on `topic` in `direction`.
    ///
    /// `topic` may be a subscription filter, in which case every topic it
    /// matches must be matched by the grant. Publishing needs a plain topic
    /// name.
    pub fn permits(&self, topic: &str, direction: TopicDirection) -> bool {
        if direction != TopicDirection::Subscribe && !is_topic_name(topic) {
            return false;
        }
        self.access.is_some_and(|access| access.covers(direction))
            && topic_matches(&self.topic, topic)
    }
}

impl FormRecord for AclRequest {
    fn assign(&mut self, key: &str, value: &str) -> Result<(), ParseError> {
        match key {
            "username" => self.user_id = value.to_string(),
            "access" => self.access = Some(value.parse()?),
            "topic" => self.topic = value.to_string(),
            _ => {}
        }
        Ok(())
    }
}

/// Match a topic against an MQTT topic filter.
///
/// `+` matches exactly one level, `#` matches the remaining levels (including
/// none) and must be last. Topics starting with `$` are never matched by a
/// leading wildcard.
///
/// `topic` may itself be a filter. It then matches only when every topic it
/// covers is covered by `filter`: a `+` level needs `+` or `#` in the filter,
/// and a `#` level needs `#` at the same or an earlier level.
pub fn topic_matches(filter: &str, topic: &str) -> bool {
    if topic.starts_with('$') && (filter.starts_with('+') || filter.starts_with('#')) {
        return false;
    }

    let filter: Vec<&str> = filter.split('/').collect();
    let topic: Vec<&str> = topic.split('/').collect();
    match_levels(&filter, &topic)
}

fn match_levels(filter: &[&str], topic: &[&str]) -> bool {
    match (filter, topic) {
        (["#"], _) => true,
        (["+", f_rest @ ..], [t, t_rest @ ..]) if *t != "#" => match_levels(f_rest, t_rest),
        ([f, f_rest @ ..], [t, t_rest @ ..]) => f == t && match_levels(f_rest, t_rest),
        ([], []) => true,
        _ => false,
    }
}

/// A topic name as published: no wildcards and no empty levels.
fn is_topic_name(topic: &str) -> bool {
    !topic.is_empty()
        && !topic.contains(['+', '#'])
        && !topic.split('/').any(|level| level.is_empty())
}

/// A grant topic must be a well-formed filter: no empty levels, wildcards
/// occupying a whole level, `#` only last.
fn validate_topic_filter(topic: &str) -> Result<(), ValidationError> {
    let invalid = || {
        let mut error = ValidationError::new("topic_filter");
        error.message = Some("topic must be a valid MQTT topic filter".into());
        error
    };

    if topic.is_empty() {
        return Err(invalid());
    }

    let levels: Vec<&str> = topic.split('/').collect();
    let last = levels.len() - 1;
    for (i, level) in levels.iter().enumerate() {
        if level.is_empty()
            || (level.contains('#') && (*level != "#" || i != last))
            || (level.contains('+') && *level != "+")
        {
            return Err(invalid());
        }
    }

    Ok(())
}
