//! Account endpoints: sign-up, login, nickname check.
//!
//! Login and sign-up are the only writers of the session. Login accepts the
//! token pair on 200, sign-up on 201 (created); both hand back whatever
//! identity the access token carries.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use session::{SessionClaims, decode_claims};

use crate::client::{ApiClient, RequestConfig};
use crate::error::ApiError;
use crate::transport::{HttpResponse, Part, Upload};
use crate::types::{AccessTokenResponse, NicknameCheck, SignUpRequest};

const LOGIN_SUCCESS_STATUS: u16 = 200;
const SIGN_UP_SUCCESS_STATUS: u16 = 201;

fn sign_up_parts(request: &SignUpRequest, profile_image: Option<Upload>) -> Result<Vec<Part>, ApiError> {
    let mut parts = vec![Part::json("signUpRequest", request)?];
    if let Some(upload) = profile_image {
        parts.push(Part::file("profileImage", upload));
    }
    Ok(parts)
}

impl ApiClient {
    /// `POST /api/v1/users` (multipart).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the server's message on a non-201
    /// status, plus any transport or interception error.
    pub async fn sign_up(
        &self,
        request: &SignUpRequest,
        profile_image: Option<Upload>,
    ) -> Result<Option<SessionClaims>, ApiError> {
        let parts = sign_up_parts(request, profile_image)?;
        let response = self.request(RequestConfig::post("/api/v1/users").multipart(parts)).await?;
        self.accept_tokens(response, SIGN_UP_SUCCESS_STATUS)
    }

    /// `GET /api/v1/users/nickname-duplicate?nickname=`.
    ///
    /// # Errors
    ///
    /// Returns any transport, interception, or decode error.
    pub async fn check_nickname_duplicate(&self, nickname: &str) -> Result<bool, ApiError> {
        let config = RequestConfig::get("/api/v1/users/nickname-duplicate").query("nickname", nickname);
        let check: NicknameCheck = self.request(config).await?.into_data()?;
        Ok(check.is_duplicate)
    }

    /// `POST /api/v1/users/login`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the server's message on a non-200
    /// status, plus any transport or interception error.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<SessionClaims>, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self.request(RequestConfig::post("/api/v1/users/login").json(body)).await?;
        self.accept_tokens(response, LOGIN_SUCCESS_STATUS)
    }

    /// Forget the stored tokens. There is no server-side logout.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session().clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Identity carried by the stored token, `None` when logged out.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the token is malformed.
    pub fn current_user(&self) -> Result<Option<SessionClaims>, ApiError> {
        Ok(self.session().claims()?)
    }

    fn accept_tokens(&self, response: HttpResponse, expected: u16) -> Result<Option<SessionClaims>, ApiError> {
        if response.status != expected {
            return Err(response.into_error());
        }
        let tokens: AccessTokenResponse = response.json()?;
        self.session().store_tokens(&tokens.access_token, &tokens.refresh_token)?;

        match decode_claims(&tokens.access_token) {
            Ok(claims) => {
                tracing::info!(user_id = %claims.user_id, nickname = %claims.nickname, "session established");
                Ok(Some(claims))
            }
            Err(e) => {
                tracing::warn!(error = %e, "session established with an undecodable token payload");
                Ok(None)
            }
        }
    }
}
