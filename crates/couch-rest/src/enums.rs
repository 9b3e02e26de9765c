//! Open string enumerations.
//!
//! The server may grow new values at any time, so every enumeration here is
//! a newtype over a string: any value is accepted on the wire, and the
//! closed set documented by the API is exposed as associated constants.

use std::borrow::Cow;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $const:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Cow<'static, str>);

        impl $name {
            $(
                $(#[$vmeta])*
                pub const $const: $name = $name(Cow::Borrowed($value));
            )+

            /// The string form of this value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(Cow::Owned(value.to_string()))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(Cow::Owned(value))
            }
        }
    };
}

string_enum! {
    /// Changes-feed delivery mode.
    Feed {
        CONTINUOUS = "continuous",
        EVENTSOURCE = "eventsource",
        LONGPOLL = "longpoll",
        NORMAL = "normal",
    }
}

string_enum! {
    /// Revision style for changes results.
    Style {
        MAIN_ONLY = "main_only",
        ALL_DOCS = "all_docs",
    }
}

string_enum! {
    /// The single recognized value of the `batch` query parameter: the
    /// server acknowledges with 202 before the write is durable.
    Batch {
        OK = "ok",
    }
}

string_enum! {
    /// Index type.
    IndexType {
        JSON = "json",
        SPECIAL = "special",
        TEXT = "text",
    }
}

string_enum! {
    /// Replication document state as reported by the scheduler.
    ReplicationState {
        COMPLETED = "completed",
        CRASHING = "crashing",
        ERROR = "error",
        FAILED = "failed",
        INITIALIZING = "initializing",
        PENDING = "pending",
        RUNNING = "running",
    }
}

string_enum! {
    /// Active task type.
    ActiveTaskType {
        DATABASE_COMPACTION = "database_compaction",
        INDEXER = "indexer",
        REPLICATION = "replication",
        SEARCH_INDEXER = "search_indexer",
        VIEW_COMPACTION = "view_compaction",
    }
}

string_enum! {
    /// Server security role.
    SecurityRole {
        READER = "_reader",
        WRITER = "_writer",
        ADMIN = "_admin",
        REPLICATOR = "_replicator",
        DB_UPDATES = "_db_updates",
        DESIGN = "_design",
        SHARDS = "_shards",
        SECURITY = "_security",
    }
}

string_enum! {
    /// `/_up` status.
    UpStatus {
        MAINTENANCE_MODE = "maintenance_mode",
        NOLB = "nolb",
        OK = "ok",
    }
}

string_enum! {
    /// Database lifecycle event in the `_db_updates` feed.
    DbEventType {
        CREATED = "created",
        DELETED = "deleted",
        UPDATED = "updated",
    }
}

string_enum! {
    /// Search analyzer name (language analyzers plus the Lucene built-ins).
    AnalyzerName {
        CLASSIC = "classic",
        EMAIL = "email",
        KEYWORD = "keyword",
        SIMPLE = "simple",
        SIMPLE_ASCIIFOLDING = "simple_asciifolding",
        STANDARD = "standard",
        WHITESPACE = "whitespace",
        ARABIC = "arabic",
        ARMENIAN = "armenian",
        BASQUE = "basque",
        BRAZILIAN = "brazilian",
        BULGARIAN = "bulgarian",
        CATALAN = "catalan",
        CHINESE = "chinese",
        CJK = "cjk",
        CZECH = "czech",
        DANISH = "danish",
        DUTCH = "dutch",
        ENGLISH = "english",
        FINNISH = "finnish",
        FRENCH = "french",
        GALICIAN = "galician",
        GERMAN = "german",
        GREEK = "greek",
        HINDI = "hindi",
        HUNGARIAN = "hungarian",
        INDONESIAN = "indonesian",
        IRISH = "irish",
        ITALIAN = "italian",
        JAPANESE = "japanese",
        LATVIAN = "latvian",
        LITHUANIAN = "lithuanian",
        NORWEGIAN = "norwegian",
        PERSIAN = "persian",
        POLISH = "polish",
        PORTUGUESE = "portuguese",
        ROMANIAN = "romanian",
        RUSSIAN = "russian",
        SPANISH = "spanish",
        SWEDISH = "swedish",
        THAI = "thai",
        TURKISH = "turkish",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_serialize_as_plain_strings() {
        assert_eq!(
            serde_json::to_string(&Feed::CONTINUOUS).unwrap(),
            r#""continuous""#
        );
        assert_eq!(serde_json::to_string(&Batch::OK).unwrap(), r#""ok""#);
        assert_eq!(
            serde_json::to_string(&SecurityRole::REPLICATOR).unwrap(),
            r#""_replicator""#
        );
    }

    #[test]
    fn test_unknown_values_accepted_on_the_wire() {
        let state: ReplicationState = serde_json::from_str(r#""hibernating""#).unwrap();
        assert_eq!(state.as_str(), "hibernating");
        assert_ne!(state, ReplicationState::RUNNING);
    }

    #[test]
    fn test_round_trip_of_known_value() {
        let parsed: UpStatus = serde_json::from_str(r#""maintenance_mode""#).unwrap();
        assert_eq!(parsed, UpStatus::MAINTENANCE_MODE);
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            r#""maintenance_mode""#
        );
    }

    #[test]
    fn test_from_str_conversions() {
        let feed: Feed = "normal".into();
        assert_eq!(feed, Feed::NORMAL);
        assert_eq!(feed.to_string(), "normal");
    }
}
