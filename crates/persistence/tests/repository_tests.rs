//! Member repository integration tests.

#![cfg(feature = "sqlite")]

mod common;

use std::sync::Arc;

use roster_persistence::core::{EntityStorage, MemberRepository};
use roster_persistence::types::{MemberSearchCondition, NewMember, NewTeam, Pagination};

use common::{TestContext, TestFixtures, create_backend, roster_context};

#[tokio::test]
async fn test_save_then_search() {
    let repository = MemberRepository::new(create_backend());

    let team_a = repository.save_team(NewTeam::new("teamA")).await.unwrap();
    let team_b = repository.save_team(NewTeam::new("teamB")).await.unwrap();
    for (name, age, team) in [
        ("member1", 10, &team_a),
        ("member2", 20, &team_a),
        ("member3", 30, &team_b),
        ("member4", 40, &team_b),
    ] {
        repository
            .save_member(NewMember::new(name, age).with_team(team))
            .await
            .unwrap();
    }

    let condition = MemberSearchCondition::new()
        .with_team_name("teamB")
        .with_age_goe(35)
        .with_age_loe(40);
    let found = repository
        .search(&condition, Pagination::unbounded())
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].username.as_deref(), Some("member4"));
    assert_eq!(found[0].team_id, Some(team_b.id));
}

#[tokio::test]
async fn test_find_by_id() {
    let ctx = roster_context().await;
    let saved = ctx.seeded.member("member3");

    let found = ctx.repository().find_by_id(saved.id).await.unwrap();
    assert_eq!(found.as_ref(), Some(saved));

    assert!(ctx.repository().find_by_id(-1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_all_in_id_order() {
    let ctx = roster_context().await;

    let members = ctx.repository().find_all().await.unwrap();

    assert_eq!(members, ctx.seeded.members);
}

#[tokio::test]
async fn test_find_by_username() {
    let fixtures = TestFixtures::roster()
        .with_member(common::MemberFixture::new("member1", 50));
    let ctx = common::seeded_context(fixtures).await;

    let found = ctx.repository().find_by_username("member1").await.unwrap();

    assert_eq!(
        found.iter().map(|m| m.age).collect::<Vec<_>>(),
        vec![10, 50]
    );
    assert!(
        ctx.repository()
            .find_by_username("nobody")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_search_sees_storage_changes() {
    let ctx = roster_context().await;
    let repository = ctx.repository();
    let member1 = ctx.seeded.member("member1");
    let team_b = ctx.seeded.team("teamB");
    let condition = MemberSearchCondition::new().with_team_name("teamB");

    assert_eq!(repository.search_count(&condition).await.unwrap(), 2);

    ctx.backend
        .change_team(member1.id, Some(team_b.id))
        .await
        .unwrap();

    assert_eq!(repository.search_count(&condition).await.unwrap(), 3);
}

#[tokio::test]
async fn test_reset_and_reseed() {
    let mut ctx = roster_context().await;
    ctx.repository()
        .save_member(NewMember::new("extra", 99))
        .await
        .unwrap();

    ctx.reset_and_seed().await.unwrap();

    let members = ctx.repository().find_all().await.unwrap();
    assert_eq!(members.len(), 4);
    assert_eq!(members, ctx.seeded.members);
}

#[tokio::test]
async fn test_concurrent_searches_share_backend() {
    let ctx: TestContext<_> = roster_context().await;
    let repository = Arc::new(ctx.repository());

    let mut handles = Vec::new();
    for age in [10, 20, 30, 40] {
        let repository = Arc::clone(&repository);
        handles.push(tokio::spawn(async move {
            let condition = MemberSearchCondition::new().with_age_goe(age);
            repository.search_count(&condition).await
        }));
    }

    let mut counts = Vec::new();
    for handle in handles {
        counts.push(handle.await.unwrap().unwrap());
    }
    assert_eq!(counts, vec![4, 3, 2, 1]);
}
