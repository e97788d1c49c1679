use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending { Self::Asc } else { Self::Desc }
    }

    pub fn is_ascending(self) -> bool {
        self == Self::Asc
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortSpecError {
    #[error("sort spec `{0}` must look like `column,direction`")]
    Shape(String),
    #[error("sort spec `{0}` has an empty column")]
    EmptyColumn(String),
    #[error("unknown sort direction `{0}`, expected `asc` or `desc`")]
    Direction(String),
}

/// A sort request in its externally encoded form, `"column,direction"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn from_request(column: &str, ascending: bool) -> Self {
        Self::new(column, SortDirection::from_ascending(ascending))
    }
}

impl FromStr for SortSpec {
    type Err = SortSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (Some(column), Some(direction), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(SortSpecError::Shape(s.to_string()));
        };

        let column = column.trim();
        if column.is_empty() {
            return Err(SortSpecError::EmptyColumn(s.to_string()));
        }

        let direction = match direction.trim().to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => return Err(SortSpecError::Direction(other.to_string())),
        };

        Ok(Self::new(column, direction))
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.column, self.direction.as_str())
    }
}
