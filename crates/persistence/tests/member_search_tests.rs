//! Dynamic member search integration tests.
//!
//! Optional criteria are turned into a filter, composed into a member/team
//! query and executed against SQLite seeded with two teams of two members.

#![cfg(feature = "sqlite")]

mod common;

use std::collections::HashSet;

use roster_persistence::error::{StorageError, ValidationError};
use roster_persistence::query::{
    Filter, MemberQueryComposer, MemberSearchPredicates, Predicate, member_search_filter,
};
use roster_persistence::types::{MemberSearchCondition, MemberTeamDto, Pagination};

use common::{TestFixtures, roster_context, seeded_context};

fn usernames(rows: &[MemberTeamDto]) -> Vec<Option<String>> {
    rows.iter().map(|row| row.username.clone()).collect()
}

fn id_set(rows: &[MemberTeamDto]) -> HashSet<i64> {
    rows.iter().map(|row| row.member_id).collect()
}

// ============================================================================
// Filter Construction
// ============================================================================

#[test]
fn test_absent_criteria_build_match_all() {
    assert_eq!(
        member_search_filter(&MemberSearchCondition::new()),
        Filter::MatchAll
    );
}

#[test]
fn test_single_field_builds_single_atom() {
    let conditions = [
        MemberSearchCondition::new().with_username("member1"),
        MemberSearchCondition::new().with_team_name("teamA"),
        MemberSearchCondition::new().with_age_goe(20),
        MemberSearchCondition::new().with_age_loe(20),
    ];

    for condition in &conditions {
        let filter = member_search_filter(condition);
        assert_eq!(filter.atoms(), 1, "{:?}", condition);
        assert!(matches!(filter.predicate(), Some(Predicate::Compare { .. })));
    }
}

#[test]
fn test_atoms_track_present_fields() {
    let condition = MemberSearchCondition::new()
        .with_username("member4")
        .with_team_name("teamB")
        .with_age_goe(35)
        .with_age_loe(40);

    assert_eq!(
        member_search_filter(&condition).atoms(),
        condition.present_fields()
    );
}

// ============================================================================
// Search Results
// ============================================================================

#[tokio::test]
async fn test_absent_criteria_return_every_member() {
    let ctx = roster_context().await;

    let rows = ctx
        .repository()
        .search(&MemberSearchCondition::new(), Pagination::unbounded())
        .await
        .unwrap();

    let expected: HashSet<i64> = ctx.seeded.member_ids().into_iter().collect();
    assert_eq!(id_set(&rows), expected);
}

#[tokio::test]
async fn test_age_range_selects_oldest_member() {
    let ctx = roster_context().await;
    let condition = MemberSearchCondition::new()
        .with_age_goe(35)
        .with_age_loe(40);

    let rows = ctx
        .repository()
        .search(&condition, Pagination::unbounded())
        .await
        .unwrap();

    assert_eq!(usernames(&rows), vec![Some("member4".to_string())]);
}

#[tokio::test]
async fn test_team_and_age_range() {
    let ctx = roster_context().await;
    let team_b = ctx.seeded.team("teamB");
    let condition = MemberSearchCondition::new()
        .with_team_name("teamB")
        .with_age_goe(35)
        .with_age_loe(40);

    let rows = ctx
        .repository()
        .search(&condition, Pagination::unbounded())
        .await
        .unwrap();

    assert_eq!(
        rows,
        vec![MemberTeamDto {
            member_id: ctx.seeded.member("member4").id,
            username: Some("member4".to_string()),
            age: 40,
            team_id: Some(team_b.id),
            team_name: Some("teamB".to_string()),
        }]
    );
}

#[tokio::test]
async fn test_username_match() {
    let ctx = roster_context().await;
    let condition = MemberSearchCondition::new().with_username("member2");

    let rows = ctx
        .repository()
        .search(&condition, Pagination::unbounded())
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].team_name.as_deref(), Some("teamA"));
}

#[tokio::test]
async fn test_unknown_team_matches_nothing() {
    let ctx = roster_context().await;
    let condition = MemberSearchCondition::new().with_team_name("teamC");

    let repository = ctx.repository();
    let rows = repository
        .search(&condition, Pagination::unbounded())
        .await
        .unwrap();

    assert!(rows.is_empty());
    assert_eq!(repository.search_count(&condition).await.unwrap(), 0);
}

#[tokio::test]
async fn test_teamless_members_found_without_team_criteria() {
    let ctx = seeded_context(TestFixtures::roster_with_sorting()).await;
    let condition = MemberSearchCondition::new().with_age_goe(100);

    let rows = ctx
        .repository()
        .search(&condition, Pagination::unbounded())
        .await
        .unwrap();

    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|row| row.team_id.is_none() && row.team_name.is_none()));
}

#[tokio::test]
async fn test_predicate_order_does_not_change_results() {
    let ctx = roster_context().await;
    let predicates = MemberSearchPredicates::default();
    let composer = MemberQueryComposer::default();

    let forward = Filter::all_of([
        predicates.team_name_eq(Some("teamB")),
        predicates.age_goe(Some(25)),
        predicates.age_loe(Some(40)),
    ]);
    let reversed = Filter::all_of([
        predicates.age_loe(Some(40)),
        predicates.age_goe(Some(25)),
        predicates.team_name_eq(Some("teamB")),
    ]);

    let factory = ctx.factory();
    let forward_rows: Vec<MemberTeamDto> = factory
        .fetch(&composer.compose(forward, Vec::new(), Pagination::unbounded()))
        .await
        .unwrap();
    let reversed_rows: Vec<MemberTeamDto> = factory
        .fetch(&composer.compose(reversed, Vec::new(), Pagination::unbounded()))
        .await
        .unwrap();

    assert_eq!(forward_rows.len(), 2);
    assert_eq!(id_set(&forward_rows), id_set(&reversed_rows));
}

#[tokio::test]
async fn test_builder_call_order_does_not_change_results() {
    let ctx = roster_context().await;
    let repository = ctx.repository();

    let a = MemberSearchCondition::new()
        .with_age_loe(30)
        .with_team_name("teamA");
    let b = MemberSearchCondition::new()
        .with_team_name("teamA")
        .with_age_loe(30);

    let rows_a = repository.search(&a, Pagination::unbounded()).await.unwrap();
    let rows_b = repository.search(&b, Pagination::unbounded()).await.unwrap();

    assert_eq!(id_set(&rows_a), id_set(&rows_b));
    assert_eq!(rows_a.len(), 2);
}

// ============================================================================
// Ordering
// ============================================================================

#[tokio::test]
async fn test_nulls_last_ordering() {
    let ctx = seeded_context(TestFixtures::sorting()).await;
    let repository = ctx.repository();
    let member = repository.member().clone();

    let rows = repository
        .search_sorted(
            &MemberSearchCondition::new().with_age_goe(100),
            vec![member.age.desc(), member.username.asc().nulls_last()],
            Pagination::unbounded(),
        )
        .await
        .unwrap();

    assert_eq!(
        usernames(&rows),
        vec![
            Some("member5".to_string()),
            Some("member6".to_string()),
            None,
            None
        ]
    );
}

#[tokio::test]
async fn test_nulls_first_ordering() {
    let ctx = seeded_context(TestFixtures::sorting()).await;
    let repository = ctx.repository();
    let member = repository.member().clone();

    let rows = repository
        .search_sorted(
            &MemberSearchCondition::new(),
            vec![member.username.desc().nulls_first()],
            Pagination::unbounded(),
        )
        .await
        .unwrap();

    assert_eq!(
        usernames(&rows),
        vec![
            None,
            None,
            Some("member6".to_string()),
            Some("member5".to_string())
        ]
    );
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_offset_and_limit() {
    let ctx = roster_context().await;
    let repository = ctx.repository();
    let member = repository.member().clone();

    let rows = repository
        .search_sorted(
            &MemberSearchCondition::new(),
            vec![member.age.asc()],
            Pagination::page(1, 2),
        )
        .await
        .unwrap();

    assert_eq!(
        usernames(&rows),
        vec![Some("member2".to_string()), Some("member3".to_string())]
    );
}

#[tokio::test]
async fn test_offset_without_limit() {
    let ctx = roster_context().await;
    let repository = ctx.repository();
    let member = repository.member().clone();

    let rows = repository
        .search_sorted(
            &MemberSearchCondition::new(),
            vec![member.age.asc()],
            Pagination::unbounded().with_offset(3),
        )
        .await
        .unwrap();

    assert_eq!(usernames(&rows), vec![Some("member4".to_string())]);
}

#[tokio::test]
async fn test_count_ignores_pagination() {
    let ctx = roster_context().await;
    let condition = MemberSearchCondition::new().with_age_goe(15);

    let repository = ctx.repository();
    let page = repository
        .search(&condition, Pagination::page(0, 1))
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(repository.search_count(&condition).await.unwrap(), 3);
}

#[tokio::test]
async fn test_search_page_reports_total() {
    let ctx = roster_context().await;
    let condition = MemberSearchCondition::new().with_team_name("teamA");

    let page = ctx
        .repository()
        .search_page(&condition, Pagination::page(0, 1))
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page.total, 2);
    assert_eq!(page.offset, 0);
    assert_eq!(page.limit, Some(1));
    assert!(page.has_next());
}

#[test]
fn test_negative_pagination_rejected() {
    let result = Pagination::new(-1, Some(2));
    assert!(matches!(
        result,
        Err(ValidationError::InvalidPagination {
            field: "offset",
            value: -1
        })
    ));

    let error: StorageError = Pagination::new(0, Some(-5)).unwrap_err().into();
    assert!(matches!(error, StorageError::Validation(_)));
}

#[tokio::test]
async fn test_maximum_pagination_bounds() {
    let ctx = roster_context().await;
    let repository = ctx.repository();
    let condition = MemberSearchCondition::new();

    let all = repository
        .search(&condition, Pagination::page(0, u64::MAX))
        .await
        .unwrap();
    assert_eq!(all.len(), 4);

    let past_end = repository
        .search(&condition, Pagination::unbounded().with_offset(u64::MAX))
        .await
        .unwrap();
    assert!(past_end.is_empty());

    let page = repository
        .search_page(&condition, Pagination::page(u64::MAX, u64::MAX))
        .await
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total, 4);
    assert!(!page.has_next());
}
