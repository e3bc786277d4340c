//! Resolve Member Use Case
//!
//! Turns a presented session token into the account behind it.

use chrono::Utc;
use platform::token::SessionTokens;
use std::sync::Arc;

use crate::domain::entities::Member;
use crate::domain::repository::MemberDirectory;
use crate::error::{ReportError, ReportResult};

pub struct ResolveMemberUseCase<D>
where
    D: MemberDirectory,
{
    directory: Arc<D>,
    tokens: Arc<SessionTokens>,
}

impl<D> ResolveMemberUseCase<D>
where
    D: MemberDirectory,
{
    pub fn new(directory: Arc<D>, tokens: Arc<SessionTokens>) -> Self {
        Self { directory, tokens }
    }

    /// `Unauthenticated` for a missing or bad token, `UserNotFound` when
    /// the account is gone
    pub async fn execute(&self, token: Option<&str>) -> ReportResult<Member> {
        let token = token.ok_or(ReportError::Unauthenticated)?;
        let claims = self.tokens.verify(token, Utc::now()).map_err(|e| {
            tracing::warn!(reason = %e, "Rejected session token");
            ReportError::Unauthenticated
        })?;

        let member = self
            .directory
            .find_member(&claims.sub)
            .await?
            .ok_or(ReportError::UserNotFound)?;

        // Role in the token is only a hint; the stored role wins
        if member.role != claims.role {
            tracing::warn!(user_id = %member.user_id, "Session role differs from stored role");
        }

        Ok(member)
    }
}
