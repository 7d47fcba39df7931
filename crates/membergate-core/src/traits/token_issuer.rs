//! Session credential issuance contract.

use std::collections::BTreeMap;

use membergate_entity::member::Member;

use crate::result::AppResult;

/// Issues a signed, time-bounded bearer token for an authenticated
/// member.
///
/// The issuer is treated as a pure function: no visible side effects
/// beyond returning the credential. Custom claims are boolean action
/// markers (e.g. `"resetPassword": true`) carried for audit purposes.
pub trait TokenIssuer: Send + Sync {
    /// Mint a session credential for the member with the given custom
    /// claims.
    fn issue(&self, member: &Member, custom_claims: &BTreeMap<String, bool>) -> AppResult<String>;
}
