//! Member search criteria.

use serde::{Deserialize, Serialize};

/// Optional filters for a member search.
///
/// Every field is independently optional; no field implies another. The value
/// is immutable once built: fields are only reachable through accessors and
/// the `with_*` builders consume `self`.
///
/// ```
/// use roster_persistence::types::MemberSearchCondition;
///
/// let condition = MemberSearchCondition::new()
///     .with_team_name("teamB")
///     .with_age_goe(35)
///     .with_age_loe(40);
///
/// assert_eq!(condition.team_name(), Some("teamB"));
/// assert_eq!(condition.username(), None);
/// assert_eq!(condition.present_fields(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearchCondition {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    team_name: Option<String>,
    #[serde(default)]
    age_goe: Option<i32>,
    #[serde(default)]
    age_loe: Option<i32>,
}

impl MemberSearchCondition {
    /// Creates a condition with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters on an exact username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Filters on an exact team name.
    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    /// Lower age bound, inclusive.
    pub fn with_age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    /// Upper age bound, inclusive.
    pub fn with_age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    /// Username filter, if set.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Team name filter, if set.
    pub fn team_name(&self) -> Option<&str> {
        self.team_name.as_deref()
    }

    /// Lower age bound, if set.
    pub fn age_goe(&self) -> Option<i32> {
        self.age_goe
    }

    /// Upper age bound, if set.
    pub fn age_loe(&self) -> Option<i32> {
        self.age_loe
    }

    /// Number of fields that are set.
    pub fn present_fields(&self) -> usize {
        [
            self.username.is_some(),
            self.team_name.is_some(),
            self.age_goe.is_some(),
            self.age_loe.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.present_fields() == 0
    }
}
