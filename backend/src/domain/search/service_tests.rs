//! Tests for the user search service.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{FollowFacts, MockFollowGraph, MockUserDirectory};
use crate::domain::search::SearchText;
use pagination::PageRequest;
use rstest::{fixture, rstest};

const REQUESTER: i64 = 999;

fn id(raw: i64) -> UserId {
    UserId::new(raw).expect("valid id")
}

fn account(raw_id: i64, username: &str) -> UserAccount {
    UserAccount::try_from_parts(raw_id, username, username).expect("valid account")
}

fn numbered_accounts(count: i64) -> Vec<UserAccount> {
    (1..=count).map(|n| account(n, &format!("user{n:03}"))).collect()
}

/// Directory double that filters like a storage adapter would.
fn directory_of(accounts: Vec<UserAccount>) -> MockUserDirectory {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_match_users()
        .returning(move |text: &SearchText| {
            Ok(accounts
                .iter()
                .filter(|account| text.matches(account))
                .cloned()
                .collect())
        });
    directory
}

#[derive(Default)]
struct Graph {
    followed_by_requester: HashSet<i64>,
    follower_counts: HashMap<i64, u64>,
}

impl Graph {
    fn following(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.followed_by_requester.extend(ids);
        self
    }

    fn counts(mut self, counts: impl IntoIterator<Item = (i64, u64)>) -> Self {
        self.follower_counts.extend(counts);
        self
    }

    fn into_mock(self) -> MockFollowGraph {
        let Graph {
            followed_by_requester,
            follower_counts,
        } = self;
        let mut graph = MockFollowGraph::new();
        graph
            .expect_follow_facts()
            .times(..=1)
            .returning(move |requester, users| {
                Ok(users
                    .iter()
                    .map(|user| FollowFacts {
                        followed: requester.get() == REQUESTER
                            && followed_by_requester.contains(&user.get()),
                        follower_count: follower_counts.get(&user.get()).copied().unwrap_or(0),
                    })
                    .collect())
            });
        graph.expect_is_following().never();
        graph.expect_follower_count().never();
        graph
    }
}

fn service(
    directory: MockUserDirectory,
    graph: MockFollowGraph,
    policy: SearchPolicy,
) -> UserSearchService<MockUserDirectory, MockFollowGraph> {
    UserSearchService::new(Arc::new(directory), Arc::new(graph), policy)
}

async fn run(
    service: &UserSearchService<MockUserDirectory, MockFollowGraph>,
    query: &str,
    offset: i64,
    row_count: Option<i64>,
) -> Result<RankedResultSet, Error> {
    let request = SearchRequest::new(query, PageRequest::new(offset, row_count));
    service.search(id(REQUESTER), &request).await
}

fn names(page: &RankedResultSet) -> Vec<&str> {
    page.usernames().iter().map(AsRef::as_ref).collect()
}

#[fixture]
fn policy() -> SearchPolicy {
    SearchPolicy::default()
}

#[rstest]
#[tokio::test]
async fn empty_query_without_edges_returns_identifier_order(policy: SearchPolicy) {
    let accounts = numbered_accounts(10);
    let expected: Vec<String> = accounts
        .iter()
        .map(|a| a.username().as_ref().to_owned())
        .collect();
    let service = service(directory_of(accounts), Graph::default().into_mock(), policy);

    let page = run(&service, "", 0, Some(100)).await.expect("search succeeds");

    assert_eq!(names(&page), expected);
}

#[rstest]
#[tokio::test]
async fn oversized_page_is_capped_at_one_hundred(policy: SearchPolicy) {
    let service = service(
        directory_of(numbered_accounts(150)),
        Graph::default().into_mock(),
        policy,
    );

    let page = run(&service, "", 0, Some(200)).await.expect("search succeeds");

    assert_eq!(page.len(), 100);
}

#[rstest]
#[tokio::test]
async fn followed_accounts_come_first_in_identifier_order(policy: SearchPolicy) {
    let mut accounts: Vec<UserAccount> = (1..=4).map(|n| account(n, &format!("other{n}"))).collect();
    accounts.extend(
        ["atrick", "btruck", "ctrack", "dtrock"]
            .into_iter()
            .zip(5..)
            .map(|(name, n)| account(n, name)),
    );
    let graph = Graph::default().following(5..=8).into_mock();
    let service = service(directory_of(accounts), graph, policy);

    let page = run(&service, "", 0, Some(100)).await.expect("search succeeds");

    assert_eq!(
        names(&page),
        vec![
            "atrick", "btruck", "ctrack", "dtrock", "other1", "other2", "other3", "other4"
        ]
    );
}

#[rstest]
#[tokio::test]
async fn unfollowed_accounts_sort_by_follower_count(policy: SearchPolicy) {
    let accounts = vec![
        account(1, "test4"),
        account(2, "test3"),
        account(3, "test2"),
        account(4, "test1"),
    ];
    let graph = Graph::default()
        .counts([(4, 4), (3, 3), (2, 2), (1, 1)])
        .into_mock();
    let service = service(directory_of(accounts), graph, policy);

    let page = run(&service, "", 0, Some(100)).await.expect("search succeeds");

    assert_eq!(names(&page), vec!["test1", "test2", "test3", "test4"]);
}

#[rstest]
#[tokio::test]
async fn followed_group_sorts_by_popularity_before_unfollowed(policy: SearchPolicy) {
    let accounts = vec![
        account(1, "frenchfries"),
        account(2, "belgiumfries"),
        account(3, "test4"),
        account(4, "test3"),
        account(5, "test2"),
        account(6, "test1"),
    ];
    let graph = Graph::default()
        .following(3..=6)
        .counts([(6, 5), (5, 4), (4, 3), (3, 2), (1, 1)])
        .into_mock();
    let service = service(directory_of(accounts), graph, policy);

    let page = run(&service, "", 0, Some(100)).await.expect("search succeeds");

    assert_eq!(
        names(&page),
        vec!["test1", "test2", "test3", "test4", "frenchfries", "belgiumfries"]
    );
}

#[rstest]
#[tokio::test]
async fn only_substring_matches_are_returned(policy: SearchPolicy) {
    let accounts = ["ABRACADABRA", "abcpopo", "_ab_c_", "cba", "nonmatching", "XABCX"]
        .into_iter()
        .zip(1..)
        .map(|(name, n)| account(n, name))
        .collect();
    let service = service(directory_of(accounts), Graph::default().into_mock(), policy);

    let page = run(&service, "abc", 0, Some(100)).await.expect("search succeeds");

    assert_eq!(names(&page), vec!["abcpopo", "XABCX"]);
}

#[rstest]
#[tokio::test]
async fn negative_offset_behaves_like_zero(policy: SearchPolicy) {
    let service = service(
        directory_of(numbered_accounts(10)),
        Graph::default().into_mock(),
        policy,
    );

    let shifted = run(&service, "", -20, Some(100)).await.expect("search succeeds");
    let origin = run(&service, "", 0, Some(100)).await.expect("search succeeds");

    assert_eq!(shifted, origin);
    assert_eq!(shifted.len(), 10);
}

#[rstest]
#[case(Some(7), 7)]
#[case(None, 10)]
#[tokio::test]
async fn row_count_limits_page_length(
    policy: SearchPolicy,
    #[case] row_count: Option<i64>,
    #[case] expected: usize,
) {
    let service = service(
        directory_of(numbered_accounts(10)),
        Graph::default().into_mock(),
        policy,
    );

    let page = run(&service, "", 0, row_count).await.expect("search succeeds");

    assert_eq!(page.len(), expected);
}

#[rstest]
#[case(0, Some(0))]
#[case(0, Some(-5))]
#[case(10, Some(10))]
#[case(500, None)]
#[tokio::test]
async fn empty_windows_skip_follow_lookups(
    policy: SearchPolicy,
    #[case] offset: i64,
    #[case] row_count: Option<i64>,
) {
    let mut graph = MockFollowGraph::new();
    graph.expect_follow_facts().never();
    graph.expect_is_following().never();
    graph.expect_follower_count().never();
    let service = service(directory_of(numbered_accounts(10)), graph, policy);

    let page = run(&service, "", offset, row_count)
        .await
        .expect("search succeeds");

    assert!(page.is_empty());
}

#[rstest]
#[tokio::test]
async fn empty_directory_yields_empty_page(policy: SearchPolicy) {
    let service = service(directory_of(Vec::new()), Graph::default().into_mock(), policy);

    let page = run(&service, "", 0, Some(100)).await.expect("search succeeds");

    assert!(page.is_empty());
}

#[rstest]
#[case(false, 3)]
#[case(true, 2)]
#[tokio::test]
async fn requester_exclusion_follows_policy(#[case] exclude: bool, #[case] expected: usize) {
    let accounts = vec![account(1, "ada"), account(2, "grace"), account(REQUESTER, "me")];
    let policy = SearchPolicy::new(PageLimits::default(), exclude);
    let service = service(directory_of(accounts), Graph::default().into_mock(), policy);

    let page = run(&service, "", 0, Some(100)).await.expect("search succeeds");

    assert_eq!(page.len(), expected);
    assert_eq!(names(&page).contains(&"me"), !exclude);
}

#[rstest]
#[tokio::test]
async fn configured_default_page_size_applies_when_row_count_missing() {
    let limits = PageLimits::new(3, 50).expect("consistent limits");
    let service = service(
        directory_of(numbered_accounts(10)),
        Graph::default().into_mock(),
        SearchPolicy::new(limits, false),
    );

    let page = run(&service, "", 0, None).await.expect("search succeeds");

    assert_eq!(page.len(), 3);
}

#[rstest]
#[tokio::test]
async fn duplicate_directory_rows_are_collapsed(policy: SearchPolicy) {
    let ada = account(1, "ada");
    let mut directory = MockUserDirectory::new();
    directory
        .expect_match_users()
        .return_once(move |_| Ok(vec![ada.clone(), ada]));
    let service = service(directory, Graph::default().into_mock(), policy);

    let page = run(&service, "", 0, Some(100)).await.expect("search succeeds");

    assert_eq!(names(&page), vec!["ada"]);
}

#[rstest]
#[case(UserDirectoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserDirectoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn directory_failures_map_to_domain_errors(
    policy: SearchPolicy,
    #[case] failure: UserDirectoryError,
    #[case] expected: ErrorCode,
) {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_match_users()
        .return_once(move |_| Err(failure));
    let service = service(directory, MockFollowGraph::new(), policy);

    let error = run(&service, "", 0, Some(100))
        .await
        .expect_err("search fails");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn follow_graph_failures_propagate(policy: SearchPolicy) {
    let mut graph = MockFollowGraph::new();
    graph
        .expect_follow_facts()
        .returning(|_, _| Err(UserDirectoryError::connection("graph offline")));
    let service = service(directory_of(numbered_accounts(3)), graph, policy);

    let error = run(&service, "", 0, Some(100))
        .await
        .expect_err("search fails");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert!(error.message().contains("graph offline"));
}

#[rstest]
#[tokio::test]
async fn follow_facts_are_fetched_in_one_batch(policy: SearchPolicy) {
    let mut graph = MockFollowGraph::new();
    graph
        .expect_follow_facts()
        .times(1)
        .withf(|requester, users| requester.get() == REQUESTER && users.len() == 40)
        .returning(|_, users| Ok(vec![FollowFacts::default(); users.len()]));
    graph.expect_is_following().never();
    graph.expect_follower_count().never();
    let service = service(directory_of(numbered_accounts(40)), graph, policy);

    let page = run(&service, "", 0, Some(100)).await.expect("search succeeds");

    assert_eq!(page.len(), 40);
}

#[rstest]
#[tokio::test]
async fn short_follow_fact_batches_are_query_errors(policy: SearchPolicy) {
    let mut graph = MockFollowGraph::new();
    graph
        .expect_follow_facts()
        .returning(|_, _| Ok(vec![FollowFacts::default()]));
    let service = service(directory_of(numbered_accounts(3)), graph, policy);

    let error = run(&service, "", 0, Some(100))
        .await
        .expect_err("search fails");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
