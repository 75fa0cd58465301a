//! Specification-to-SQL translation
//!
//! Rewrites a [`Specification`] tree into a composable where-expression
//! ([`FilterExpr`]) plus a parameter table ([`ParamMap`]). The expression is
//! an immutable value, so evaluating an Or/Not child "in isolation" is just
//! translating the sub-tree; no builder cloning or parameter merging is
//! needed. Parameter names are derived from the node's path in the tree and
//! are therefore unique across the whole translation by construction.
//!
//! Rendering turns a [`FilterExpr`] into a SQL fragment with `$n`
//! placeholders and the bind values in placeholder order.

use chrono::{DateTime, Utc};
use dms_models::DocumentStatus;
use uuid::Uuid;

use crate::spec::Specification;

/// A value bound to a query parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Uuid(Uuid),
    Text(String),
    TextArray(Vec<String>),
    Timestamp(DateTime<Utc>),
}

/// Comparison operators used by leaf clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }
}

/// A composable where-expression over document columns
///
/// Leaf clauses reference parameters by name; the values live in the
/// accompanying [`ParamMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// `d.column <op> :param`
    Compare {
        column: &'static str,
        op: CompareOp,
        param: String,
    },
    /// `d.column && :param` (array overlap; match-any for tags)
    Overlaps {
        column: &'static str,
        param: String,
    },
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
    Not(Box<FilterExpr>),
}

/// Ordered parameter table, name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap {
    params: Vec<(String, SqlValue)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a parameter. Names are unique by construction; a duplicate is a
    /// translation bug.
    fn bind(&mut self, name: String, value: SqlValue) {
        debug_assert!(
            self.get(&name).is_none(),
            "duplicate parameter name: {name}"
        );
        self.params.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.params.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// The result of translating a specification tree
#[derive(Debug, Clone, Default)]
pub struct TranslatedFilter {
    /// The where-expression, or `None` when the tree produced no clause
    pub expr: Option<FilterExpr>,
    /// All parameters bound during translation
    pub params: ParamMap,
}

impl TranslatedFilter {
    /// Render to a SQL fragment with `$n` placeholders (starting at
    /// `first_placeholder`) and the bind values in placeholder order.
    ///
    /// Returns `None` when there is no expression to render.
    pub fn render(&self, first_placeholder: usize) -> Option<(String, Vec<SqlValue>)> {
        let expr = self.expr.as_ref()?;
        let mut binds = Vec::with_capacity(self.params.len());
        let sql = render_expr(expr, &self.params, first_placeholder, &mut binds);
        Some((sql, binds))
    }
}

/// Translate a specification tree into a where-expression and parameter table.
///
/// Composition rules:
/// - `And` children combine into one conjunction; children that produce no
///   clause are dropped.
/// - `Or` children are each translated as an isolated sub-expression and
///   combined into one disjunction appended as a single clause; no-op
///   children are dropped, and an empty disjunction produces no clause.
/// - `Not` wraps its child's sub-expression in a negation. A child that
///   produces no clause yields no clause at all: negating "match everything"
///   is left undefined here rather than silently selecting nothing, and the
///   filter builder never constructs that shape.
pub fn translate(spec: &Specification) -> TranslatedFilter {
    let mut params = ParamMap::new();
    let expr = translate_node(spec, &mut Vec::new(), &mut params);
    TranslatedFilter { expr, params }
}

fn translate_node(
    spec: &Specification,
    path: &mut Vec<usize>,
    params: &mut ParamMap,
) -> Option<FilterExpr> {
    match spec {
        Specification::Author(id) => Some(leaf(
            "author_id",
            CompareOp::Eq,
            SqlValue::Uuid(*id),
            path,
            params,
        )),
        Specification::Status(status) => Some(leaf(
            "status",
            CompareOp::Eq,
            status_value(*status),
            path,
            params,
        )),
        Specification::Tags(tags) => {
            let param = param_name("tags", path);
            params.bind(param.clone(), SqlValue::TextArray(tags.clone()));
            Some(FilterExpr::Overlaps {
                column: "tags",
                param,
            })
        }
        Specification::FileType(file_type) => Some(leaf(
            "file_type",
            CompareOp::Eq,
            SqlValue::Text(file_type.clone()),
            path,
            params,
        )),
        Specification::CreatedAfter(date) => Some(leaf(
            "created_at",
            CompareOp::Gte,
            SqlValue::Timestamp(*date),
            path,
            params,
        )),
        Specification::CreatedBefore(date) => Some(leaf(
            "created_at",
            CompareOp::Lte,
            SqlValue::Timestamp(*date),
            path,
            params,
        )),
        Specification::And(children) => {
            combine(children, path, params, FilterExpr::And)
        }
        Specification::Or(children) => {
            combine(children, path, params, FilterExpr::Or)
        }
        Specification::Not(child) => {
            path.push(0);
            let inner = translate_node(child, path, params);
            path.pop();
            inner.map(|e| FilterExpr::Not(Box::new(e)))
        }
    }
}

fn combine(
    children: &[Specification],
    path: &mut Vec<usize>,
    params: &mut ParamMap,
    wrap: fn(Vec<FilterExpr>) -> FilterExpr,
) -> Option<FilterExpr> {
    let mut parts = Vec::with_capacity(children.len());
    for (i, child) in children.iter().enumerate() {
        path.push(i);
        if let Some(expr) = translate_node(child, path, params) {
            parts.push(expr);
        }
        path.pop();
    }
    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(wrap(parts)),
    }
}

fn leaf(
    column: &'static str,
    op: CompareOp,
    value: SqlValue,
    path: &[usize],
    params: &mut ParamMap,
) -> FilterExpr {
    let param = param_name(column, path);
    params.bind(param.clone(), value);
    FilterExpr::Compare { column, op, param }
}

/// Parameter names encode the node's path in the tree ("status_1_0"), so two
/// leaves can never collide, including across nested Or/Not sub-trees.
fn param_name(prefix: &str, path: &[usize]) -> String {
    if path.is_empty() {
        prefix.to_string()
    } else {
        let suffix: Vec<String> = path.iter().map(|i| i.to_string()).collect();
        format!("{}_{}", prefix, suffix.join("_"))
    }
}

fn status_value(status: DocumentStatus) -> SqlValue {
    SqlValue::Text(status.as_str().to_string())
}

fn render_expr(
    expr: &FilterExpr,
    params: &ParamMap,
    first_placeholder: usize,
    binds: &mut Vec<SqlValue>,
) -> String {
    match expr {
        FilterExpr::Compare { column, op, param } => {
            let n = push_bind(params, param, first_placeholder, binds);
            format!("d.{} {} ${}", column, op.as_sql(), n)
        }
        FilterExpr::Overlaps { column, param } => {
            let n = push_bind(params, param, first_placeholder, binds);
            format!("d.{} && ${}", column, n)
        }
        FilterExpr::And(parts) => {
            let rendered: Vec<String> = parts
                .iter()
                .map(|p| render_expr(p, params, first_placeholder, binds))
                .collect();
            format!("({})", rendered.join(" AND "))
        }
        FilterExpr::Or(parts) => {
            let rendered: Vec<String> = parts
                .iter()
                .map(|p| render_expr(p, params, first_placeholder, binds))
                .collect();
            format!("({})", rendered.join(" OR "))
        }
        FilterExpr::Not(inner) => {
            format!("NOT {}", render_expr(inner, params, first_placeholder, binds))
        }
    }
}

fn push_bind(
    params: &ParamMap,
    param: &str,
    first_placeholder: usize,
    binds: &mut Vec<SqlValue>,
) -> usize {
    // Expressions only reference parameters bound during their own
    // translation; a miss here is a translation bug, not an input error.
    let value = params
        .get(param)
        .cloned()
        .expect("expression references unbound parameter");
    binds.push(value);
    first_placeholder + binds.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dms_models::{Document, User};

    fn document(status: DocumentStatus, file_type: &str, tags: &[&str]) -> Document {
        Document::new(
            "Report",
            User::new("Alice", "alice@example.com"),
            status,
            file_type,
            512,
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    /// Interpret a rendered expression directly against a document, matching
    /// the store's boolean/comparison/inclusion semantics. Used to check that
    /// translation agrees with `is_satisfied_by`.
    fn eval(expr: &FilterExpr, params: &ParamMap, doc: &Document) -> bool {
        match expr {
            FilterExpr::Compare { column, op, param } => {
                let value = params.get(param).expect("unbound parameter");
                match (*column, value) {
                    ("author_id", SqlValue::Uuid(id)) => doc.author.id == *id,
                    ("status", SqlValue::Text(s)) => doc.status.as_str() == s,
                    ("file_type", SqlValue::Text(s)) => doc.file_type == *s,
                    ("created_at", SqlValue::Timestamp(ts)) => match op {
                        CompareOp::Gte => doc.created_at >= *ts,
                        CompareOp::Lte => doc.created_at <= *ts,
                        CompareOp::Eq => doc.created_at == *ts,
                    },
                    _ => panic!("unexpected column/value pairing: {column}"),
                }
            }
            FilterExpr::Overlaps { column, param } => {
                let value = params.get(param).expect("unbound parameter");
                match (*column, value) {
                    ("tags", SqlValue::TextArray(tags)) => doc.has_any_tag(tags),
                    _ => panic!("unexpected column/value pairing: {column}"),
                }
            }
            FilterExpr::And(parts) => parts.iter().all(|p| eval(p, params, doc)),
            FilterExpr::Or(parts) => parts.iter().any(|p| eval(p, params, doc)),
            FilterExpr::Not(inner) => !eval(inner, params, doc),
        }
    }

    fn assert_equivalent(spec: &Specification, docs: &[Document]) {
        let filter = translate(spec);
        for doc in docs {
            let direct = spec.is_satisfied_by(doc);
            let translated = match &filter.expr {
                Some(expr) => eval(expr, &filter.params, doc),
                None => true, // no clause means match everything
            };
            assert_eq!(direct, translated, "divergence on {:?}", doc.id);
        }
    }

    fn corpus() -> Vec<Document> {
        vec![
            document(DocumentStatus::Approved, "pdf", &["finance"]),
            document(DocumentStatus::Approved, "docx", &["finance", "Q4"]),
            document(DocumentStatus::Draft, "pdf", &["hr"]),
            document(DocumentStatus::Archived, "xlsx", &[]),
            document(DocumentStatus::Pending, "pdf", &["legal", "finance"]),
        ]
    }

    #[test]
    fn test_leaf_renders_parameterized_clause() {
        let spec = Specification::status(DocumentStatus::Approved);
        let filter = translate(&spec);
        let (sql, binds) = filter.render(1).unwrap();
        assert_eq!(sql, "d.status = $1");
        assert_eq!(binds, vec![SqlValue::Text("approved".into())]);
    }

    #[test]
    fn test_and_children_share_the_conjunction() {
        let spec = Specification::status(DocumentStatus::Approved)
            .and(Specification::file_type("pdf"));
        let filter = translate(&spec);
        let (sql, binds) = filter.render(1).unwrap();
        assert_eq!(sql, "(d.status = $1 AND d.file_type = $2)");
        assert_eq!(binds.len(), 2);
    }

    #[test]
    fn test_or_of_nested_ands_has_no_parameter_collisions() {
        // (status=approved AND fileType=pdf) OR (status=draft AND fileType=docx)
        let left = Specification::status(DocumentStatus::Approved)
            .and(Specification::file_type("pdf"));
        let right = Specification::status(DocumentStatus::Draft)
            .and(Specification::file_type("docx"));
        let spec = Specification::Or(vec![left, right]);

        let filter = translate(&spec);
        assert_eq!(filter.params.len(), 4);

        // Every parameter name is distinct
        let names: Vec<&str> = filter.params.iter().map(|(n, _)| n).collect();
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());

        let (sql, binds) = filter.render(1).unwrap();
        assert_eq!(
            sql,
            "((d.status = $1 AND d.file_type = $2) OR (d.status = $3 AND d.file_type = $4))"
        );
        assert_eq!(binds.len(), 4);

        assert_equivalent(&spec, &corpus());
    }

    #[test]
    fn test_not_wraps_child_expression() {
        let spec = Specification::file_type("pdf").negate();
        let filter = translate(&spec);
        let (sql, _) = filter.render(1).unwrap();
        assert_eq!(sql, "NOT d.file_type = $1");
        assert_equivalent(&spec, &corpus());
    }

    #[test]
    fn test_not_of_empty_and_produces_no_clause() {
        // Negating "match everything" yields no clause; documented policy.
        let spec = Specification::And(vec![]).negate();
        let filter = translate(&spec);
        assert!(filter.expr.is_none());
        assert!(filter.params.is_empty());
        assert!(filter.render(1).is_none());
    }

    #[test]
    fn test_empty_and_or_produce_no_clause() {
        assert!(translate(&Specification::And(vec![])).expr.is_none());
        assert!(translate(&Specification::Or(vec![])).expr.is_none());
    }

    #[test]
    fn test_or_drops_no_op_children() {
        let spec = Specification::Or(vec![
            Specification::And(vec![]),
            Specification::file_type("pdf"),
        ]);
        let filter = translate(&spec);
        // The no-op child is dropped and the single survivor is unwrapped
        let (sql, _) = filter.render(1).unwrap();
        assert_eq!(sql, "d.file_type = $1");
    }

    #[test]
    fn test_single_child_or_is_unwrapped() {
        let spec = Specification::Or(vec![Specification::file_type("pdf")]);
        let filter = translate(&spec);
        assert!(matches!(filter.expr, Some(FilterExpr::Compare { .. })));
    }

    #[test]
    fn test_tags_translate_to_overlap() {
        let spec = Specification::tags(vec!["finance".into(), "legal".into()]);
        let filter = translate(&spec);
        let (sql, binds) = filter.render(1).unwrap();
        assert_eq!(sql, "d.tags && $1");
        assert_eq!(
            binds,
            vec![SqlValue::TextArray(vec!["finance".into(), "legal".into()])]
        );
        assert_equivalent(&spec, &corpus());
    }

    #[test]
    fn test_created_bounds_operators() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let after = translate(&Specification::created_after(at));
        assert_eq!(after.render(1).unwrap().0, "d.created_at >= $1");

        let before = translate(&Specification::created_before(at));
        assert_eq!(before.render(1).unwrap().0, "d.created_at <= $1");
    }

    #[test]
    fn test_render_respects_first_placeholder_offset() {
        let spec = Specification::status(DocumentStatus::Draft)
            .and(Specification::file_type("pdf"));
        let filter = translate(&spec);
        let (sql, _) = filter.render(3).unwrap();
        assert_eq!(sql, "(d.status = $3 AND d.file_type = $4)");
    }

    #[test]
    fn test_equivalence_across_operator_mix() {
        let at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let specs = vec![
            Specification::status(DocumentStatus::Approved),
            Specification::tags(vec!["finance".into()]),
            Specification::status(DocumentStatus::Approved)
                .and(Specification::tags(vec!["finance".into()])),
            Specification::status(DocumentStatus::Draft)
                .or(Specification::status(DocumentStatus::Archived)),
            Specification::tags(vec!["finance".into()]).negate(),
            Specification::Or(vec![
                Specification::file_type("pdf").negate(),
                Specification::created_after(at),
            ]),
            Specification::Not(Box::new(Specification::Or(vec![
                Specification::status(DocumentStatus::Draft),
                Specification::file_type("xlsx"),
            ]))),
        ];
        let docs = corpus();
        for spec in &specs {
            assert_equivalent(spec, &docs);
        }
    }

    #[test]
    #[should_panic(expected = "unbound parameter")]
    fn test_rendering_an_unbound_parameter_panics() {
        // A hand-built filter whose expression references a name the table
        // never bound; rendering must fail loudly instead of binding a blank.
        let filter = TranslatedFilter {
            expr: Some(FilterExpr::Compare {
                column: "status",
                op: CompareOp::Eq,
                param: "ghost".into(),
            }),
            params: ParamMap::new(),
        };
        let _ = filter.render(1);
    }

    #[test]
    fn test_deeply_nested_paths_stay_unique() {
        let spec = Specification::Or(vec![
            Specification::Or(vec![
                Specification::file_type("pdf"),
                Specification::file_type("docx"),
            ]),
            Specification::Not(Box::new(Specification::file_type("xlsx"))),
            Specification::file_type("txt"),
        ]);
        let filter = translate(&spec);
        assert_eq!(filter.params.len(), 4);
        assert!(filter.params.get("file_type_0_0").is_some());
        assert!(filter.params.get("file_type_0_1").is_some());
        assert!(filter.params.get("file_type_1_0").is_some());
        assert!(filter.params.get("file_type_2").is_some());
    }
}
