//! Declarative note filters.
//!
//! Each [`FilterField`] maps to a fixed comparison and target column. The
//! SQL is assembled from that table; no per-field code paths exist.

use std::fmt;
use std::str::FromStr;

/// How a filter value is compared with its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Case-insensitive substring match.
    Contains,
    /// Case-insensitive equality.
    EqualsIgnoreCase,
    /// Exact equality.
    Equals,
    /// The value itself or anything below it in the index hierarchy.
    Subtree,
}

/// Where a filter value is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A column of the `notes` table (aliased `n`).
    Column(&'static str),
    /// A column reached through a junction: `from` must expose `key` (a note id).
    Related {
        from: &'static str,
        key: &'static str,
        column: &'static str,
    },
}

/// The mapping for one filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub comparison: Comparison,
    pub target: Target,
}

/// Fields notes can be filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Topic,
    Text,
    Index,
    Keyword,
    Edition,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Topic,
        FilterField::Text,
        FilterField::Index,
        FilterField::Keyword,
        FilterField::Edition,
    ];

    pub const fn spec(self) -> FieldSpec {
        match self {
            FilterField::Topic => FieldSpec {
                comparison: Comparison::Contains,
                target: Target::Column("n.topic"),
            },
            FilterField::Text => FieldSpec {
                comparison: Comparison::Contains,
                target: Target::Column("n.text"),
            },
            FilterField::Index => FieldSpec {
                comparison: Comparison::Subtree,
                target: Target::Column("n.idx"),
            },
            FilterField::Keyword => FieldSpec {
                comparison: Comparison::EqualsIgnoreCase,
                target: Target::Related {
                    from: "note_keywords nk JOIN keywords k ON k.id = nk.keyword_id",
                    key: "nk.note_id",
                    column: "k.word",
                },
            },
            FilterField::Edition => FieldSpec {
                comparison: Comparison::Equals,
                target: Target::Related {
                    from: "note_editions ne",
                    key: "ne.note_id",
                    column: "ne.edition_id",
                },
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FilterField::Topic => "topic",
            FilterField::Text => "text",
            FilterField::Index => "index",
            FilterField::Keyword => "keyword",
            FilterField::Edition => "edition",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterField::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown filter field '{}'", s))
    }
}

/// A conjunction of field criteria. Blank values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    criteria: Vec<(FilterField, String)>,
}

impl NoteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a criterion; a blank value leaves the filter unchanged.
    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        let value = value.into();
        let value = value.trim();
        if !value.is_empty() {
            self.criteria.push((field, value.to_string()));
        }
        self
    }

    pub fn criteria(&self) -> &[(FilterField, String)] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Builds a `WHERE` body (without the keyword) and its positional parameters.
    ///
    /// Returns `1 = 1` for an empty filter.
    pub(crate) fn to_sql(&self) -> (String, Vec<String>) {
        if self.criteria.is_empty() {
            return ("1 = 1".to_string(), Vec::new());
        }

        let mut clauses = Vec::with_capacity(self.criteria.len());
        let mut params = Vec::new();

        for (field, value) in &self.criteria {
            let spec = field.spec();
            let column = match spec.target {
                Target::Column(column) => column,
                Target::Related { column, .. } => column,
            };

            let predicate = match spec.comparison {
                Comparison::Contains => {
                    params.push(format!("%{}%", escape_like(&value.to_lowercase())));
                    format!("casefold({}) LIKE ?{} ESCAPE '\\'", column, params.len())
                }
                Comparison::EqualsIgnoreCase => {
                    params.push(value.to_lowercase());
                    format!("casefold({}) = ?{}", column, params.len())
                }
                Comparison::Equals => {
                    params.push(value.clone());
                    format!("{} = ?{}", column, params.len())
                }
                Comparison::Subtree => {
                    params.push(value.clone());
                    let exact = params.len();
                    params.push(format!("{}.%", escape_like(value)));
                    format!(
                        "({col} = ?{exact} OR {col} LIKE ?{below} ESCAPE '\\')",
                        col = column,
                        exact = exact,
                        below = params.len()
                    )
                }
            };

            let clause = match spec.target {
                Target::Column(_) => predicate,
                Target::Related { from, key, .. } => format!(
                    "n.id IN (SELECT {} FROM {} WHERE {})",
                    key, from, predicate
                ),
            };
            clauses.push(clause);
        }

        (clauses.join(" AND "), params)
    }
}

/// Escapes LIKE wildcards so user input matches literally (escape char `\`).
pub(crate) fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
