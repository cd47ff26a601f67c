//! Renders tenant-scoped SQL.
//!
//! Templates are `&'static str` and may only name relations through the
//! `{schema}`, `{users}`, `{services}` and `{appointments}` placeholders. The
//! placeholders are filled from a [`SchemaName`], so no runtime string ever
//! reaches a structural position; values still go through bind parameters.

use crate::domain::models::tenant::SchemaName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// One Postgres schema per tenant: `"joes_shop"."users"`.
    Postgres,
    /// One table prefix per tenant: `"joes_shop__users"`.
    Sqlite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Users,
    Services,
    Appointments,
}

impl Relation {
    pub const ALL: [Relation; 3] = [Relation::Users, Relation::Services, Relation::Appointments];

    pub fn table(&self) -> &'static str {
        match self {
            Relation::Users => "users",
            Relation::Services => "services",
            Relation::Appointments => "appointments",
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            Relation::Users => "{users}",
            Relation::Services => "{services}",
            Relation::Appointments => "{appointments}",
        }
    }
}

/// Separator between the namespace and the relation on SQLite.
pub const SQLITE_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Copy)]
pub struct Namespace<'a> {
    dialect: Dialect,
    schema: &'a SchemaName,
}

impl<'a> Namespace<'a> {
    pub fn new(dialect: Dialect, schema: &'a SchemaName) -> Self {
        Self { dialect, schema }
    }

    pub fn relation(&self, relation: Relation) -> String {
        match self.dialect {
            Dialect::Postgres => format!("\"{}\".\"{}\"", self.schema.as_str(), relation.table()),
            Dialect::Sqlite => format!(
                "\"{}{}{}\"",
                self.schema.as_str(),
                SQLITE_SEPARATOR,
                relation.table()
            ),
        }
    }

    pub fn render(&self, template: &'static str) -> String {
        let mut sql = template.replace("{schema}", &format!("\"{}\"", self.schema.as_str()));
        for relation in Relation::ALL {
            sql = sql.replace(relation.placeholder(), &self.relation(relation));
        }
        sql
    }
}

/// Recovers the namespace from a SQLite table name such as `joes_shop__appointments`.
pub fn sqlite_namespace_of(table: &str, relation: Relation) -> Option<SchemaName> {
    let suffix = format!("{}{}", SQLITE_SEPARATOR, relation.table());
    table
        .strip_suffix(suffix.as_str())
        .and_then(|prefix| SchemaName::parse(prefix).ok())
}
