//! Domain Services
//!
//! Pure access-gate decision for page requests. No I/O: the caller
//! verifies the token and passes in the outcome.

use kernel::role::Role;

pub const SIGN_IN_PATH: &str = "/signin";

/// What the caller learned about the request's session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// No cookie and no bearer header
    Missing,
    /// Present but malformed, forged or expired
    Invalid,
    Valid(Role),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(String),
}

/// The role that owns `path`, if the path lies in a protected area
///
/// Matches whole segments: `/workers` and `/workers/x` are protected,
/// `/workersx` is not.
pub fn protected_area(path: &str) -> Option<Role> {
    [Role::Worker, Role::Leader].into_iter().find(|role| {
        path.strip_prefix(role.area_path())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// Decide whether a request for `path` may proceed
pub fn decide(path: &str, token: TokenState) -> GateDecision {
    let Some(owner) = protected_area(path) else {
        return GateDecision::Allow;
    };

    match token {
        TokenState::Missing => GateDecision::Redirect(format!(
            "{}?redirect={}",
            SIGN_IN_PATH,
            urlencoding::encode(path)
        )),
        TokenState::Invalid => GateDecision::Redirect(SIGN_IN_PATH.to_string()),
        TokenState::Valid(role) if role == owner => GateDecision::Allow,
        TokenState::Valid(role) => GateDecision::Redirect(role.area_path().to_string()),
    }
}
