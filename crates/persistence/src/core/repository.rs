//! Member repository: persistence plus the dynamic member search.

use tracing::{debug, instrument};

use crate::error::StorageResult;
use crate::query::{
    MemberQueryComposer, MemberSearchPredicates, OrderSpecifier, QMember, QTeam, QueryDescription,
};
use crate::types::{
    Member, MemberSearchCondition, MemberTeamDto, NewMember, NewTeam, Pagination, QueryResults,
    Team,
};

use super::factory::{QueryFactory, decode};
use super::{EntityStorage, QueryExecutor};

/// Member persistence and search over an executor.
///
/// Searches turn a [`MemberSearchCondition`] into a filter, compose it into a
/// member/team query and hand that to the executor exactly once per query:
/// [`search`](Self::search) issues one fetch, [`search_count`](Self::search_count)
/// one count.
///
/// ```ignore
/// let repository = MemberRepository::new(backend);
///
/// let condition = MemberSearchCondition::new()
///     .with_team_name("teamB")
///     .with_age_goe(35)
///     .with_age_loe(40);
///
/// let found = repository.search(&condition, Pagination::unbounded()).await?;
/// let total = repository.search_count(&condition).await?;
/// ```
#[derive(Debug)]
pub struct MemberRepository<E> {
    executor: E,
    member: QMember,
    team: QTeam,
}

impl<E> MemberRepository<E> {
    /// Creates a repository over `executor` with the default `member` and
    /// `team` aliases.
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            member: QMember::member(),
            team: QTeam::team(),
        }
    }

    /// The underlying executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// The member path searches are built on.
    pub fn member(&self) -> &QMember {
        &self.member
    }

    /// The team path searches are built on.
    pub fn team(&self) -> &QTeam {
        &self.team
    }

    fn predicates(&self) -> MemberSearchPredicates {
        MemberSearchPredicates::new(self.member.clone(), self.team.clone())
    }

    fn composer(&self) -> MemberQueryComposer {
        MemberQueryComposer::new(self.member.clone(), self.team.clone())
    }
}

impl<E: EntityStorage> MemberRepository<E> {
    /// Persists a team.
    #[instrument(skip(self))]
    pub async fn save_team(&self, team: NewTeam) -> StorageResult<Team> {
        self.executor.save_team(team).await
    }

    /// Persists a member.
    #[instrument(skip(self))]
    pub async fn save_member(&self, member: NewMember) -> StorageResult<Member> {
        self.executor.save_member(member).await
    }
}

impl<E: QueryExecutor> MemberRepository<E> {
    fn factory(&self) -> QueryFactory<'_, E> {
        QueryFactory::new(&self.executor)
    }

    /// Reads a member by id through the query layer.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> StorageResult<Option<Member>> {
        let query =
            QueryDescription::select_from(&self.member).with_filter(self.member.id.eq(id));
        self.factory().fetch_one(&query).await
    }

    /// Every member, in id order.
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> StorageResult<Vec<Member>> {
        let query = QueryDescription::select_from(&self.member).order_by(self.member.id.asc());
        self.factory().fetch(&query).await
    }

    /// Members with exactly this username, in id order.
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> StorageResult<Vec<Member>> {
        let query = QueryDescription::select_from(&self.member)
            .with_filter(self.member.username.eq(username))
            .order_by(self.member.id.asc());
        self.factory().fetch(&query).await
    }

    /// Members matching `condition`, joined with their team. No ordering is
    /// applied.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        condition: &MemberSearchCondition,
        pagination: Pagination,
    ) -> StorageResult<Vec<MemberTeamDto>> {
        self.search_sorted(condition, Vec::new(), pagination).await
    }

    /// Members matching `condition` in the given order.
    #[instrument(skip(self))]
    pub async fn search_sorted(
        &self,
        condition: &MemberSearchCondition,
        order: Vec<OrderSpecifier>,
        pagination: Pagination,
    ) -> StorageResult<Vec<MemberTeamDto>> {
        let filter = self.predicates().filter(condition);
        debug!(atoms = filter.atoms(), "Built member search filter");

        let query = self.composer().compose(filter, order, pagination);
        let rows = self.executor.fetch(&query).await?;
        decode(&rows)
    }

    /// Number of members matching `condition`, ignoring pagination.
    #[instrument(skip(self))]
    pub async fn search_count(&self, condition: &MemberSearchCondition) -> StorageResult<u64> {
        let filter = self.predicates().filter(condition);
        let query = self.composer().compose_count(filter);
        self.executor.count(&query).await
    }

    /// One page of matches plus the total number of matches, computed by a
    /// separate count query.
    #[instrument(skip(self))]
    pub async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        pagination: Pagination,
    ) -> StorageResult<QueryResults<MemberTeamDto>> {
        let results = self.search(condition, pagination).await?;
        let total = self.search_count(condition).await?;
        Ok(QueryResults::new(results, total, pagination))
    }
}
