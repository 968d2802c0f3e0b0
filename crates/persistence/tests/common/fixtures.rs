//! Test fixtures for persistence layer testing.
//!
//! Teams and members described by name, seeded into a backend in order. Team
//! membership is resolved by team name at seed time.

use std::collections::HashMap;

use roster_persistence::types::{Member, NewMember, Team};

/// A team fixture.
#[derive(Debug, Clone)]
pub struct TeamFixture {
    /// Team name.
    pub name: String,
}

impl TeamFixture {
    /// Creates a team fixture.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A member fixture.
#[derive(Debug, Clone)]
pub struct MemberFixture {
    /// Login name, if any.
    pub username: Option<String>,
    /// Age in years.
    pub age: i32,
    /// Name of the team the member joins, if any.
    pub team: Option<String>,
}

impl MemberFixture {
    /// Creates a team-less member fixture.
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            username: Some(username.into()),
            age,
            team: None,
        }
    }

    /// Creates a member fixture without a username.
    pub fn anonymous(age: i32) -> Self {
        Self {
            username: None,
            age,
            team: None,
        }
    }

    /// Places the member in the named team.
    pub fn in_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Converts to an insertable member, resolving the team by name.
    pub fn to_new_member(&self, teams: &HashMap<String, Team>) -> NewMember {
        NewMember {
            username: self.username.clone(),
            age: self.age,
            team_id: self
                .team
                .as_ref()
                .and_then(|name| teams.get(name))
                .map(|team| team.id),
        }
    }
}

/// Collection of test fixtures.
#[derive(Debug, Clone, Default)]
pub struct TestFixtures {
    /// Team fixtures, seeded first.
    pub teams: Vec<TeamFixture>,
    /// Member fixtures, seeded in order.
    pub members: Vec<MemberFixture>,
}

impl TestFixtures {
    /// Creates empty fixtures.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard roster:
    /// - `teamA` with `member1` (10) and `member2` (20)
    /// - `teamB` with `member3` (30) and `member4` (40)
    pub fn roster() -> Self {
        Self {
            teams: vec![TeamFixture::new("teamA"), TeamFixture::new("teamB")],
            members: vec![
                MemberFixture::new("member1", 10).in_team("teamA"),
                MemberFixture::new("member2", 20).in_team("teamA"),
                MemberFixture::new("member3", 30).in_team("teamB"),
                MemberFixture::new("member4", 40).in_team("teamB"),
            ],
        }
    }

    /// Members for sort tests, all aged 100 and without a team: two with no
    /// username followed by `member5` and `member6`.
    pub fn sorting() -> Self {
        Self {
            teams: vec![],
            members: vec![
                MemberFixture::anonymous(100),
                MemberFixture::anonymous(100),
                MemberFixture::new("member5", 100),
                MemberFixture::new("member6", 100),
            ],
        }
    }

    /// The standard roster followed by the sorting members.
    pub fn roster_with_sorting() -> Self {
        Self::roster().merge(Self::sorting())
    }

    /// Appends another fixture set.
    pub fn merge(mut self, other: TestFixtures) -> Self {
        self.teams.extend(other.teams);
        self.members.extend(other.members);
        self
    }

    /// Adds a team.
    pub fn with_team(mut self, team: TeamFixture) -> Self {
        self.teams.push(team);
        self
    }

    /// Adds a member.
    pub fn with_member(mut self, member: MemberFixture) -> Self {
        self.members.push(member);
        self
    }
}

/// What seeding stored, in fixture order.
#[derive(Debug, Clone, Default)]
pub struct SeededRoster {
    /// Saved teams by name.
    pub teams: HashMap<String, Team>,
    /// Saved members.
    pub members: Vec<Member>,
}

impl SeededRoster {
    /// The saved team with the given name.
    pub fn team(&self, name: &str) -> &Team {
        self.teams
            .get(name)
            .unwrap_or_else(|| panic!("team {} was not seeded", name))
    }

    /// The saved member with the given username.
    pub fn member(&self, username: &str) -> &Member {
        self.members
            .iter()
            .find(|m| m.username.as_deref() == Some(username))
            .unwrap_or_else(|| panic!("member {} was not seeded", username))
    }

    /// Ids of all saved members.
    pub fn member_ids(&self) -> Vec<i64> {
        self.members.iter().map(|m| m.id).collect()
    }
}
