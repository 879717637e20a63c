use std::time::SystemTime;

use gostop_backend::auth::jwt::mint_access_token;
use gostop_backend::state::app_state::AppState;

/// `Authorization` header value with a fresh admin access token.
pub fn bearer(state: &AppState) -> String {
    let token = mint_access_token("admin", SystemTime::now(), &state.security)
        .expect("mint access token");
    format!("Bearer {token}")
}
