//! Wire DTOs for the identity provider's `accounts:lookup` endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::ports::{AuthenticatedUser, IdTokenVerifierError};
use crate::domain::UserId;

/// Request body for a token lookup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LookupRequestDto<'a> {
    pub id_token: &'a str,
}

/// Successful lookup response: the users matching the presented token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LookupResponseDto {
    #[serde(default)]
    pub users: Vec<LookupUserDto>,
}

/// One user entry in a lookup response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LookupUserDto {
    pub local_id: String,
}

/// Error envelope returned by the provider on rejection.
#[derive(Debug, Deserialize)]
pub(super) struct LookupErrorDto {
    pub error: LookupErrorBodyDto,
}

/// Error body carrying the provider's rejection code.
#[derive(Debug, Deserialize)]
pub(super) struct LookupErrorBodyDto {
    pub message: String,
}

impl LookupResponseDto {
    /// Extract the verified subject from the response.
    pub(super) fn into_authenticated_user(
        self,
    ) -> Result<AuthenticatedUser, IdTokenVerifierError> {
        let user = self
            .users
            .into_iter()
            .next()
            .ok_or_else(|| IdTokenVerifierError::decode("lookup response contained no users"))?;
        let user_id = UserId::new(user.local_id)
            .map_err(|err| IdTokenVerifierError::decode(format!("invalid subject id: {err}")))?;
        Ok(AuthenticatedUser { user_id })
    }
}
