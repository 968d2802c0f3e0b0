//! Boolean predicates and the filter a query applies.

use super::expr::Expr;
use super::select::QueryDescription;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `<>`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
}

impl CompareOp {
    /// SQL operator.
    pub fn sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }
}

/// A boolean condition over a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `lhs op rhs`
    Compare {
        /// Left operand.
        lhs: Expr,
        /// Comparison.
        op: CompareOp,
        /// Right operand.
        rhs: Expr,
    },
    /// `expr BETWEEN low AND high`
    Between {
        /// Tested expression.
        expr: Expr,
        /// Inclusive lower bound.
        low: Expr,
        /// Inclusive upper bound.
        high: Expr,
    },
    /// `expr IN (values...)`
    InList {
        /// Tested expression.
        expr: Expr,
        /// Candidate values.
        values: Vec<Expr>,
    },
    /// `expr IN (SELECT ...)`
    InSubquery {
        /// Tested expression.
        expr: Expr,
        /// Single-column subquery.
        query: Box<QueryDescription>,
    },
    /// `expr IS NULL`
    IsNull(Expr),
    /// `expr IS NOT NULL`
    IsNotNull(Expr),
    /// `expr LIKE pattern`
    Like {
        /// Tested expression.
        expr: Expr,
        /// Pattern with `%` and `_` wildcards.
        pattern: Expr,
    },
    /// Conjunction. Empty means true.
    And(Vec<Predicate>),
    /// Disjunction. Empty means false.
    Or(Vec<Predicate>),
    /// Negation.
    Not(Box<Predicate>),
}

impl Predicate {
    /// `self AND other`, flattening nested conjunctions.
    pub fn and(self, other: Predicate) -> Predicate {
        let mut parts = match self {
            Predicate::And(parts) => parts,
            single => vec![single],
        };
        match other {
            Predicate::And(more) => parts.extend(more),
            single => parts.push(single),
        }
        Predicate::And(parts)
    }

    /// `self OR other`, flattening nested disjunctions.
    pub fn or(self, other: Predicate) -> Predicate {
        let mut parts = match self {
            Predicate::Or(parts) => parts,
            single => vec![single],
        };
        match other {
            Predicate::Or(more) => parts.extend(more),
            single => parts.push(single),
        }
        Predicate::Or(parts)
    }

    /// `NOT self`
    pub fn not(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }

    /// Number of leaf conditions in this predicate.
    pub fn atom_count(&self) -> usize {
        match self {
            Predicate::And(parts) | Predicate::Or(parts) => {
                parts.iter().map(Predicate::atom_count).sum()
            }
            Predicate::Not(inner) => inner.atom_count(),
            _ => 1,
        }
    }
}

/// The row filter of a query.
///
/// `MatchAll` applies no restriction at all; it is distinct from a predicate
/// that happens to be always true and renders no `WHERE` clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    /// Every row matches.
    #[default]
    MatchAll,
    /// Rows satisfying the predicate match.
    Where(Predicate),
}

impl Filter {
    /// The unrestricted filter.
    pub fn all() -> Self {
        Filter::MatchAll
    }

    /// Conjunction of the present parts. Absent parts are skipped; with
    /// nothing present the result is [`Filter::MatchAll`].
    ///
    /// ```
    /// use roster_persistence::query::{Filter, QMember};
    ///
    /// let member = QMember::member();
    /// let filter = Filter::all_of([None, Some(member.age.goe(10)), None]);
    /// assert_eq!(filter.atoms(), 1);
    ///
    /// assert_eq!(Filter::all_of([None, None]), Filter::MatchAll);
    /// ```
    pub fn all_of<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Option<Predicate>>,
    {
        parts.into_iter().flatten().fold(Filter::MatchAll, Filter::and)
    }

    /// Adds a conjunct.
    pub fn and(self, predicate: Predicate) -> Self {
        match self {
            Filter::MatchAll => Filter::Where(predicate),
            Filter::Where(existing) => Filter::Where(existing.and(predicate)),
        }
    }

    /// Adds a conjunct when one is present.
    pub fn and_maybe(self, predicate: Option<Predicate>) -> Self {
        match predicate {
            Some(predicate) => self.and(predicate),
            None => self,
        }
    }

    /// Returns true for the unrestricted filter.
    pub fn is_match_all(&self) -> bool {
        matches!(self, Filter::MatchAll)
    }

    /// The predicate, if any.
    pub fn predicate(&self) -> Option<&Predicate> {
        match self {
            Filter::MatchAll => None,
            Filter::Where(predicate) => Some(predicate),
        }
    }

    /// Number of leaf conditions.
    pub fn atoms(&self) -> usize {
        self.predicate().map_or(0, Predicate::atom_count)
    }
}

impl From<Predicate> for Filter {
    fn from(predicate: Predicate) -> Self {
        Filter::Where(predicate)
    }
}

impl From<Option<Predicate>> for Filter {
    fn from(predicate: Option<Predicate>) -> Self {
        Filter::MatchAll.and_maybe(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::expr::Column;

    fn age() -> Column {
        Column::new("member", "member", "age")
    }

    #[test]
    fn test_and_flattens() {
        let p = age().goe(10).and(age().loe(30)).and(age().ne(20));
        match &p {
            Predicate::And(parts) => assert_eq!(parts.len(), 3),
            other => panic!("expected and, got {:?}", other),
        }
        assert_eq!(p.atom_count(), 3);
    }

    #[test]
    fn test_or_inside_and_is_kept() {
        let p = age().eq(10).or(age().eq(20)).and(age().is_not_null());
        assert_eq!(p.atom_count(), 3);
        match p {
            Predicate::And(parts) => assert!(matches!(parts[0], Predicate::Or(_))),
            other => panic!("expected and, got {:?}", other),
        }
    }

    #[test]
    fn test_all_of_no_parts_is_match_all() {
        assert_eq!(Filter::all_of(std::iter::empty()), Filter::MatchAll);
        assert_eq!(Filter::all_of([None, None, None, None]), Filter::MatchAll);
    }

    #[test]
    fn test_all_of_single_part_is_unwrapped() {
        let filter = Filter::all_of([None, Some(age().goe(10))]);
        assert_eq!(filter, Filter::Where(age().goe(10)));
    }

    #[test]
    fn test_all_of_counts_only_present_parts() {
        let filter = Filter::all_of([Some(age().goe(10)), None, Some(age().loe(30))]);
        assert_eq!(filter.atoms(), 2);
        assert!(!filter.is_match_all());
    }

    #[test]
    fn test_and_maybe() {
        let filter = Filter::all().and_maybe(None);
        assert!(filter.is_match_all());
        let filter = filter.and_maybe(Some(age().eq(10)));
        assert_eq!(filter.atoms(), 1);
    }
}
