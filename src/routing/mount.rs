//! Mount rule compilation.
//!
//! # Responsibilities
//! - Parse `what`/`where` pairs into typed mount rules
//! - Classify each resource pattern into one of four shapes
//! - Reject malformed entries before the table is frozen
//!
//! # Design Decisions
//! - Shape is decided here, once; the resolver never re-inspects `what`
//! - Tenant ids cannot contain `/`, `*` or braces, so substituting the
//!   placeholder never changes the shape of a pattern

use serde::Serialize;
use thiserror::Error;

use crate::config::MountConfig;
use crate::routing::matcher::ROOT;
use crate::routing::tenant::is_parametric;

/// Resource pattern mounting every database at the mount point.
pub const WILDCARD: &str = "*";

/// Trailing token meaning "any collection" (in `what`) or "any remainder"
/// (in `where`).
pub const ANY: &str = "{*}";

/// Errors raised while compiling a mount entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("mount 'where' is empty")]
    EmptyWhere,

    #[error("mount 'where' must be an absolute path: {0}")]
    RelativeWhere(String),

    #[error("'{{*}}' may only terminate a mount 'where': {0}")]
    MisplacedWhereWildcard(String),

    #[error("mount 'what' is empty")]
    EmptyWhat,

    #[error("wildcard may only appear as '*' or a trailing '/{{*}}' in mount 'what': {0}")]
    MisplacedWhatWildcard(String),

    #[error("mount 'what' names more than a database and a collection: {0}")]
    TooManySegments(String),

    #[error("mount 'what' has an empty database or collection name: {0}")]
    EmptySegment(String),
}

/// The MongoDB side of a mount, classified once at load time.
///
/// Names may still carry the `{host[0]}` placeholder; it is substituted per
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceShape {
    /// `what = "*"`: database and collection come from the path itself.
    WildcardAtRoot,
    /// `what = "db/{*}"`: fixed database, collection from the path.
    DatabaseAnyCollection { database: String },
    /// `what = "db/coll"`: both pinned; the remainder is a document id.
    FixedCollection { database: String, collection: String },
    /// `what = "db"`: fixed database, collection from the path.
    Database { database: String },
}

impl ResourceShape {
    /// Classify a `what` pattern.
    pub fn parse(what: &str) -> Result<Self, MountError> {
        if what.is_empty() {
            return Err(MountError::EmptyWhat);
        }
        if what == WILDCARD {
            return Ok(ResourceShape::WildcardAtRoot);
        }

        let normalized = what.strip_prefix(ROOT).unwrap_or(what);

        if let Some(database) = normalized.strip_suffix("/{*}") {
            let database = Self::name(what, database)?;
            return Ok(ResourceShape::DatabaseAnyCollection { database });
        }

        match normalized.split_once(ROOT) {
            Some((database, collection)) => {
                if collection.contains(ROOT) {
                    return Err(MountError::TooManySegments(what.to_string()));
                }
                Ok(ResourceShape::FixedCollection {
                    database: Self::name(what, database)?,
                    collection: Self::name(what, collection)?,
                })
            }
            None => Ok(ResourceShape::Database {
                database: Self::name(what, normalized)?,
            }),
        }
    }

    fn name(what: &str, segment: &str) -> Result<String, MountError> {
        if segment.is_empty() {
            return Err(MountError::EmptySegment(what.to_string()));
        }
        if segment.contains(ANY) || segment.contains(WILDCARD) {
            return Err(MountError::MisplacedWhatWildcard(what.to_string()));
        }
        Ok(segment.to_string())
    }

    /// Short label used in logs, metrics and the admin API.
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceShape::WildcardAtRoot => "wildcard",
            ResourceShape::DatabaseAnyCollection { .. } => "database_any_collection",
            ResourceShape::FixedCollection { .. } => "fixed_collection",
            ResourceShape::Database { .. } => "database",
        }
    }
}

/// A compiled mount entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRule {
    resource: String,
    uri: String,
    prefix: String,
    shape: ResourceShape,
}

impl MountRule {
    /// Compile a mount from its `what` (resource) and `where` (uri) patterns.
    pub fn new(what: impl Into<String>, where_: impl Into<String>) -> Result<Self, MountError> {
        let what = what.into();
        let where_ = where_.into();

        if where_.is_empty() {
            return Err(MountError::EmptyWhere);
        }
        if !where_.starts_with(ROOT) {
            return Err(MountError::RelativeWhere(where_));
        }
        let without_trailing = where_.strip_suffix(ANY).unwrap_or(&where_);
        if without_trailing.contains(ANY) {
            return Err(MountError::MisplacedWhereWildcard(where_));
        }

        let shape = ResourceShape::parse(&what)?;
        let prefix = bare_prefix(&where_);

        Ok(Self {
            resource: what,
            uri: where_,
            prefix,
            shape,
        })
    }

    /// The resource pattern (`what`) as configured.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The uri pattern (`where`) as configured.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The `where` pattern without its trailing `{*}`, tenant placeholder
    /// left in place.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn shape(&self) -> &ResourceShape {
        &self.shape
    }

    /// True if either pattern carries the tenant placeholder.
    pub fn is_parametric(&self) -> bool {
        is_parametric(&self.resource) || is_parametric(&self.uri)
    }
}

impl TryFrom<&MountConfig> for MountRule {
    type Error = MountError;

    fn try_from(config: &MountConfig) -> Result<Self, Self::Error> {
        MountRule::new(config.what.clone(), config.where_.clone())
    }
}

/// Strip the trailing `{*}` marker and the slash before it.
///
/// `/api/{*}` and `/api` share the prefix `/api`; `/{*}` collapses to `/`.
pub fn bare_prefix(where_: &str) -> String {
    let stripped = where_.strip_suffix(ANY).unwrap_or(where_);
    match stripped.strip_suffix(ROOT) {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ if stripped.is_empty() => ROOT.to_string(),
        _ => stripped.to_string(),
    }
}

/// Summary of a configured mount, as shown by the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountInfo {
    pub what: String,
    #[serde(rename = "where")]
    pub where_: String,
    pub shape: &'static str,
    pub parametric: bool,
}

/// Ordered, immutable list of mounts. Order is priority.
#[derive(Debug, Clone, Default)]
pub struct MountTable {
    rules: Vec<MountRule>,
    parametric: bool,
}

impl MountTable {
    /// Freeze an ordered list of compiled mounts.
    pub fn new(rules: Vec<MountRule>) -> Self {
        let parametric = rules.iter().any(MountRule::is_parametric);

        if rules.is_empty() {
            tracing::debug!("No mounts configured, defaulting to wildcard at root");
        } else {
            tracing::debug!(mounts = rules.len(), parametric, "Mount table compiled");
        }

        Self { rules, parametric }
    }

    /// Compile every configured mount, failing on the first malformed entry.
    ///
    /// Configuration validation reports all malformed entries at once; this
    /// is for callers that already validated.
    pub fn from_config(mounts: &[MountConfig]) -> Result<Self, MountError> {
        let rules = mounts
            .iter()
            .map(MountRule::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[MountRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if any mount uses the `{host[0]}` placeholder.
    pub fn has_parametric_mounts(&self) -> bool {
        self.parametric
    }

    /// The `where` of the first mount, or `/` when none is configured.
    pub fn mount_prefix(&self) -> &str {
        self.rules.first().map(|r| r.uri()).unwrap_or(ROOT)
    }

    pub fn info(&self) -> Vec<MountInfo> {
        self.rules
            .iter()
            .map(|r| MountInfo {
                what: r.resource.clone(),
                where_: r.uri.clone(),
                shape: r.shape.kind(),
                parametric: r.is_parametric(),
            })
            .collect()
    }
}
