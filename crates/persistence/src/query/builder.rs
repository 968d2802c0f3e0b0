//! Builds the row filter of a member search from optional criteria.
//!
//! Each criteria field maps to at most one atomic predicate:
//!
//! | Field       | Predicate                  |
//! |-------------|----------------------------|
//! | `username`  | `member.username = ?`      |
//! | `team_name` | `team.name = ?`            |
//! | `age_goe`   | `member.age >= ?`          |
//! | `age_loe`   | `member.age <= ?`          |
//!
//! Absent fields contribute nothing, and a criteria with no fields set
//! yields [`Filter::MatchAll`].

use crate::types::MemberSearchCondition;

use super::predicate::{Filter, Predicate};
use super::schema::{QMember, QTeam};

/// Per-field predicate factories bound to the member and team paths of a
/// query.
#[derive(Debug, Clone)]
pub struct MemberSearchPredicates {
    member: QMember,
    team: QTeam,
}

impl Default for MemberSearchPredicates {
    fn default() -> Self {
        Self::new(QMember::member(), QTeam::team())
    }
}

impl MemberSearchPredicates {
    /// Binds the factories to the given paths.
    pub fn new(member: QMember, team: QTeam) -> Self {
        Self { member, team }
    }

    /// `member.username = username`
    pub fn username_eq(&self, username: Option<&str>) -> Option<Predicate> {
        username.map(|username| self.member.username.eq(username))
    }

    /// `team.name = team_name`
    pub fn team_name_eq(&self, team_name: Option<&str>) -> Option<Predicate> {
        team_name.map(|team_name| self.team.name.eq(team_name))
    }

    /// `member.age >= age`
    pub fn age_goe(&self, age: Option<i32>) -> Option<Predicate> {
        age.map(|age| self.member.age.goe(age))
    }

    /// `member.age <= age`
    pub fn age_loe(&self, age: Option<i32>) -> Option<Predicate> {
        age.map(|age| self.member.age.loe(age))
    }

    /// Conjunction of the predicates for every present field.
    pub fn filter(&self, condition: &MemberSearchCondition) -> Filter {
        Filter::all_of([
            self.username_eq(condition.username()),
            self.team_name_eq(condition.team_name()),
            self.age_goe(condition.age_goe()),
            self.age_loe(condition.age_loe()),
        ])
    }
}

/// Filter for `condition` over the default `member` and `team` aliases.
///
/// ```
/// use roster_persistence::query::{member_search_filter, Filter};
/// use roster_persistence::types::MemberSearchCondition;
///
/// assert_eq!(member_search_filter(&MemberSearchCondition::new()), Filter::MatchAll);
///
/// let condition = MemberSearchCondition::new().with_team_name("teamB").with_age_goe(35);
/// assert_eq!(member_search_filter(&condition).atoms(), 2);
/// ```
pub fn member_search_filter(condition: &MemberSearchCondition) -> Filter {
    MemberSearchPredicates::default().filter(condition)
}
