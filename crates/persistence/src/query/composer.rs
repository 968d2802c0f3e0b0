//! Composes member search queries.

use crate::types::Pagination;

use super::expr::Expr;
use super::predicate::Filter;
use super::schema::{QMember, QTeam};
use super::select::{OrderSpecifier, QueryDescription};

/// Turns a search filter into complete query descriptions.
///
/// Every query selects the [`MemberTeamDto`](crate::types::MemberTeamDto)
/// projection from `member LEFT JOIN team ON member.team_id = team.id`. The
/// join is present even when no predicate touches the team, so team-less
/// members always appear with null team columns.
#[derive(Debug, Clone)]
pub struct MemberQueryComposer {
    member: QMember,
    team: QTeam,
}

impl Default for MemberQueryComposer {
    fn default() -> Self {
        Self::new(QMember::member(), QTeam::team())
    }
}

impl MemberQueryComposer {
    /// Composes over the given paths.
    pub fn new(member: QMember, team: QTeam) -> Self {
        Self { member, team }
    }

    /// The member path.
    pub fn member(&self) -> &QMember {
        &self.member
    }

    /// The team path.
    pub fn team(&self) -> &QTeam {
        &self.team
    }

    fn projection(&self) -> Vec<Expr> {
        vec![
            self.member.id.as_alias("member_id"),
            self.member.username.expr().clone(),
            self.member.age.expr().clone(),
            self.team.id.as_alias("team_id"),
            self.team.name.as_alias("team_name"),
        ]
    }

    fn base(&self, filter: Filter) -> QueryDescription {
        QueryDescription::select(self.projection())
            .from(&self.member)
            .left_join(&self.team, self.member.team_fk(&self.team))
            .with_filter(filter)
    }

    /// The content query. Without ordering no `ORDER BY` is emitted.
    pub fn compose(
        &self,
        filter: Filter,
        order: Vec<OrderSpecifier>,
        pagination: Pagination,
    ) -> QueryDescription {
        self.base(filter).order_by_all(order).paginate(pagination)
    }

    /// The count query: same filter and join, no ordering or pagination.
    pub fn compose_count(&self, filter: Filter) -> QueryDescription {
        self.base(filter)
    }
}
