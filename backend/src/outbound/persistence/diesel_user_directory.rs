//! PostgreSQL-backed user directory and follow graph.
//!
//! Matching runs in the database with `ILIKE`, so the query text is escaped
//! before being wrapped in `%` wildcards. Follow facts for a whole candidate
//! list come from two grouped queries on a single pooled connection.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use diesel::dsl::{count_star, exists};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::UserAccount;
use crate::domain::UserId;
use crate::domain::ports::{FollowFacts, FollowGraph, UserDirectory, UserDirectoryError};
use crate::domain::search::SearchText;

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::{follows, users};

/// PostgreSQL's default `LIKE` escape character.
const LIKE_ESCAPE: char = '\\';

/// Diesel-backed implementation of the directory and follow graph ports.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a new adapter with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserDirectoryError {
    map_basic_pool_error(error, UserDirectoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserDirectoryError {
    map_basic_diesel_error(
        error,
        UserDirectoryError::query,
        UserDirectoryError::connection,
    )
}

/// Wrap `text` in wildcards, escaping characters `LIKE` treats specially.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn count_from_row(user: i64, count: i64) -> Result<u64, UserDirectoryError> {
    u64::try_from(count).map_err(|_| {
        UserDirectoryError::query(format!("negative follower count {count} for user {user}"))
    })
}

/// Line up grouped query results with the requested ids.
fn assemble_facts(
    users: &[UserId],
    followed: &HashSet<i64>,
    counts: &HashMap<i64, u64>,
) -> Vec<FollowFacts> {
    users
        .iter()
        .map(|user| FollowFacts {
            followed: followed.contains(&user.get()),
            follower_count: counts.get(&user.get()).copied().unwrap_or(0),
        })
        .collect()
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserDirectoryError> {
    let id = row.id;
    UserAccount::try_from_parts(row.id, row.username, row.display_name)
        .map_err(|err| UserDirectoryError::query(format!("invalid user row {id}: {err}")))
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn match_users(&self, text: &SearchText) -> Result<Vec<UserAccount>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = users::table
            .select(UserRow::as_select())
            .order(users::id.asc())
            .into_boxed();
        if !text.is_empty() {
            let pattern = contains_pattern(text.as_str());
            query = query.filter(
                users::username
                    .ilike(pattern.clone())
                    .or(users::display_name.ilike(pattern)),
            );
        }

        let rows: Vec<UserRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_account).collect()
    }
}

#[async_trait]
impl FollowGraph for DieselUserDirectory {
    async fn is_following(
        &self,
        follower: UserId,
        followed: UserId,
    ) -> Result<bool, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(
            follows::table
                .filter(follows::follower_id.eq(follower.get()))
                .filter(follows::followed_id.eq(followed.get())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn follower_count(&self, user: UserId) -> Result<u64, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = follows::table
            .filter(follows::followed_id.eq(user.get()))
            .select(count_star())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        count_from_row(user.get(), count)
    }

    async fn follow_facts(
        &self,
        requester: UserId,
        users: &[UserId],
    ) -> Result<Vec<FollowFacts>, UserDirectoryError> {
        if users.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = users.iter().map(|user| user.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let followed: Vec<i64> = follows::table
            .filter(follows::follower_id.eq(requester.get()))
            .filter(follows::followed_id.eq_any(ids.clone()))
            .select(follows::followed_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let count_rows: Vec<(i64, i64)> = follows::table
            .filter(follows::followed_id.eq_any(ids))
            .group_by(follows::followed_id)
            .select((follows::followed_id, count_star()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let counts = count_rows
            .into_iter()
            .map(|(user, count)| Ok((user, count_from_row(user, count)?)))
            .collect::<Result<HashMap<_, _>, UserDirectoryError>>()?;

        let followed: HashSet<i64> = followed.into_iter().collect();
        Ok(assemble_facts(users, &followed, &counts))
    }
}

#[cfg(test)]
mod tests {
    //! Pattern escaping and row conversion; queries are covered against a
    //! live database outside unit tests.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "%%")]
    #[case("abc", "%abc%")]
    #[case("50%", "%50\\%%")]
    #[case("_ab_c_", "%\\_ab\\_c\\_%")]
    #[case("back\\slash", "%back\\\\slash%")]
    fn contains_pattern_escapes_wildcards(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(text), expected);
    }

    #[rstest]
    fn grouped_rows_line_up_with_requested_ids() {
        let users: Vec<UserId> = [3, 1, 2]
            .into_iter()
            .map(|raw| UserId::new(raw).expect("valid id"))
            .collect();
        let followed = HashSet::from([2]);
        let counts = HashMap::from([(3, 5), (2, 1)]);

        let facts = assemble_facts(&users, &followed, &counts);

        let pairs: Vec<(bool, u64)> = facts
            .iter()
            .map(|fact| (fact.followed, fact.follower_count))
            .collect();
        assert_eq!(pairs, vec![(false, 5), (false, 0), (true, 1)]);
    }

    #[rstest]
    fn negative_counts_are_query_errors() {
        let error = count_from_row(7, -1).expect_err("negative count rejected");
        assert!(matches!(error, UserDirectoryError::Query { .. }));
    }

    #[rstest]
    fn valid_rows_become_accounts() {
        let account = row_to_account(UserRow {
            id: 4,
            username: "ada".to_owned(),
            display_name: "Ada Lovelace".to_owned(),
        })
        .expect("valid row");
        assert_eq!(account.id().get(), 4);
        assert_eq!(account.username().as_ref(), "ada");
    }

    #[rstest]
    fn invalid_rows_are_query_errors() {
        let error = row_to_account(UserRow {
            id: 0,
            username: "ghost".to_owned(),
            display_name: "Ghost".to_owned(),
        })
        .expect_err("non-positive id rejected");
        assert!(matches!(error, UserDirectoryError::Query { .. }));
    }
}
