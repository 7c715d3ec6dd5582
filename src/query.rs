//! Query predicate builder shared by entity repositories.
//!
//! # Responsibility
//! - Let services compose filter/sort/paging intent as data.
//! - Render that intent to a SQL fragment plus bind values exactly once,
//!   in the store-execution layer.
//!
//! # Invariants
//! - Builders perform no I/O and know nothing about entity shapes.
//! - Top-level conditions combine with AND; `any_of` and multi-column
//!   search introduce OR groups.
//! - Rendering uses `?` placeholders only; values never interpolate into
//!   the SQL text.

use rusqlite::types::Value;

/// Sort direction for an `ORDER BY` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One node of the filter expression tree.
///
/// Kept as a closed set of variants so the SQL renderer can handle every
/// shape exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column = value`
    Eq(&'static str, Value),
    /// `column LIKE '%needle%'` (substring, ASCII case-insensitive)
    Like(&'static str, String),
    /// `column >= value`
    Ge(&'static str, Value),
    /// `column <= value`
    Le(&'static str, Value),
    /// Parenthesized OR of child predicates.
    AnyOf(Vec<Predicate>),
    /// Parenthesized AND of child predicates.
    AllOf(Vec<Predicate>),
}

impl Predicate {
    fn render(&self, sql: &mut String, binds: &mut Vec<Value>) {
        match self {
            Self::Eq(column, value) => {
                sql.push_str(column);
                sql.push_str(" = ?");
                binds.push(value.clone());
            }
            Self::Like(column, needle) => {
                sql.push_str(column);
                sql.push_str(" LIKE ?");
                binds.push(Value::Text(format!("%{needle}%")));
            }
            Self::Ge(column, value) => {
                sql.push_str(column);
                sql.push_str(" >= ?");
                binds.push(value.clone());
            }
            Self::Le(column, value) => {
                sql.push_str(column);
                sql.push_str(" <= ?");
                binds.push(value.clone());
            }
            Self::AnyOf(children) => render_group(children, " OR ", sql, binds),
            Self::AllOf(children) => render_group(children, " AND ", sql, binds),
        }
    }
}

fn render_group(children: &[Predicate], joiner: &str, sql: &mut String, binds: &mut Vec<Value>) {
    // An empty group must not poison the surrounding conjunction.
    if children.is_empty() {
        sql.push_str("1 = 1");
        return;
    }
    sql.push('(');
    for (index, child) in children.iter().enumerate() {
        if index > 0 {
            sql.push_str(joiner);
        }
        child.render(sql, binds);
    }
    sql.push(')');
}

/// Fluent accumulator for one query's filter, ordering and paging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    conditions: Vec<Predicate>,
    order_by: Vec<(&'static str, Direction)>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality condition.
    pub fn where_eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push(Predicate::Eq(column, value.into()));
        self
    }

    /// Adds a substring condition.
    pub fn where_like(mut self, column: &'static str, needle: impl Into<String>) -> Self {
        self.conditions.push(Predicate::Like(column, needle.into()));
        self
    }

    /// Adds a lower-bound condition.
    pub fn where_ge(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push(Predicate::Ge(column, value.into()));
        self
    }

    /// Adds an upper-bound condition.
    pub fn where_le(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push(Predicate::Le(column, value.into()));
        self
    }

    /// Adds a value-in-set condition as an OR of equalities.
    ///
    /// An empty set adds nothing, leaving the conjunction unchanged.
    pub fn where_in<V: Into<Value>>(
        mut self,
        column: &'static str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let alternatives: Vec<Predicate> = values
            .into_iter()
            .map(|value| Predicate::Eq(column, value.into()))
            .collect();
        if !alternatives.is_empty() {
            self.conditions.push(Predicate::AnyOf(alternatives));
        }
        self
    }

    /// Adds a substring search across several columns, OR-combined.
    ///
    /// A blank needle adds nothing.
    pub fn search(mut self, columns: &[&'static str], needle: &str) -> Self {
        let needle = needle.trim();
        if needle.is_empty() {
            return self;
        }
        let alternatives: Vec<Predicate> = columns
            .iter()
            .map(|&column| Predicate::Like(column, needle.to_string()))
            .collect();
        if !alternatives.is_empty() {
            self.conditions.push(Predicate::AnyOf(alternatives));
        }
        self
    }

    /// Adds an `ORDER BY` term; terms apply in insertion order.
    pub fn order_by(mut self, column: &'static str, direction: Direction) -> Self {
        self.order_by.push((column, direction));
        self
    }

    pub fn limit(mut self, count: u32) -> Self {
        self.limit = Some(count);
        self
    }

    pub fn offset(mut self, count: u32) -> Self {
        self.offset = Some(count);
        self
    }

    /// Clears all accumulated state, returning the builder to empty.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Renders the accumulated clauses for appending after a SELECT.
    ///
    /// Returns the SQL tail (starting with a leading space when non-empty)
    /// and the bind values in placeholder order.
    pub fn render(&self) -> (String, Vec<Value>) {
        let mut sql = String::new();
        let mut binds = Vec::new();

        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            for (index, condition) in self.conditions.iter().enumerate() {
                if index > 0 {
                    sql.push_str(" AND ");
                }
                condition.render(&mut sql, &mut binds);
            }
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            for (index, (column, direction)) in self.order_by.iter().enumerate() {
                if index > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(column);
                sql.push(' ');
                sql.push_str(direction.as_sql());
            }
        }

        match (self.limit, self.offset) {
            (Some(limit), offset) => {
                sql.push_str(" LIMIT ?");
                binds.push(Value::Integer(i64::from(limit)));
                if let Some(offset) = offset {
                    sql.push_str(" OFFSET ?");
                    binds.push(Value::Integer(i64::from(offset)));
                }
            }
            (None, Some(offset)) => {
                sql.push_str(" LIMIT -1 OFFSET ?");
                binds.push(Value::Integer(i64::from(offset)));
            }
            (None, None) => {}
        }

        (sql, binds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_renders_nothing() {
        let (sql, binds) = QueryBuilder::new().render();
        assert_eq!(sql, "");
        assert!(binds.is_empty());
    }

    #[test]
    fn conditions_join_with_and() {
        let (sql, binds) = QueryBuilder::new()
            .where_eq("company_id", "abc".to_string())
            .where_like("notes", "rust")
            .render();
        assert_eq!(sql, " WHERE company_id = ? AND notes LIKE ?");
        assert_eq!(binds.len(), 2);
        assert_eq!(binds[1], Value::Text("%rust%".to_string()));
    }

    #[test]
    fn where_in_renders_or_group() {
        let (sql, binds) = QueryBuilder::new()
            .where_in("status", ["saved".to_string(), "applied".to_string()])
            .render();
        assert_eq!(sql, " WHERE (status = ? OR status = ?)");
        assert_eq!(binds.len(), 2);
    }

    #[test]
    fn empty_in_set_is_a_no_op() {
        let (sql, _) = QueryBuilder::new()
            .where_in("status", Vec::<String>::new())
            .where_eq("location", "Remote".to_string())
            .render();
        assert_eq!(sql, " WHERE location = ?");
    }

    #[test]
    fn multi_column_search_groups_likes() {
        let (sql, binds) = QueryBuilder::new()
            .search(&["name", "industry"], "tech")
            .render();
        assert_eq!(sql, " WHERE (name LIKE ? OR industry LIKE ?)");
        assert_eq!(binds[0], Value::Text("%tech%".to_string()));
    }

    #[test]
    fn blank_search_is_a_no_op() {
        let (sql, _) = QueryBuilder::new().search(&["name"], "   ").render();
        assert_eq!(sql, "");
    }

    #[test]
    fn order_limit_offset_render_in_order() {
        let (sql, binds) = QueryBuilder::new()
            .where_ge("salary_min", 50_000i64)
            .order_by("date_saved", Direction::Desc)
            .order_by("id", Direction::Asc)
            .limit(10)
            .offset(20)
            .render();
        assert_eq!(
            sql,
            " WHERE salary_min >= ? ORDER BY date_saved DESC, id ASC LIMIT ? OFFSET ?"
        );
        assert_eq!(binds.len(), 3);
    }

    #[test]
    fn offset_without_limit_uses_negative_limit() {
        let (sql, _) = QueryBuilder::new().offset(5).render();
        assert_eq!(sql, " LIMIT -1 OFFSET ?");
    }

    #[test]
    fn reset_returns_builder_to_empty() {
        let mut builder = QueryBuilder::new().where_eq("status", "saved".to_string()).limit(1);
        builder.reset();
        assert_eq!(builder, QueryBuilder::new());
    }
}
