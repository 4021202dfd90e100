use serde::Deserialize;
use validator::Validate;

/// Request payload for account deletion.
#[must_use]
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountRequest {
    /// Must be the authenticated account.
    #[validate(length(max = 64))]
    pub username: String,
}

/// Request payload for a password change.
///
/// Multi-word fields are also accepted in snake_case.
#[must_use]
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Must be the authenticated account.
    #[validate(length(max = 64))]
    pub username: String,
    #[validate(length(max = 128))]
    #[serde(alias = "current_password")]
    pub current_password: String,
    #[validate(length(max = 128))]
    #[serde(alias = "new_password")]
    pub new_password: String,
}

/// Request payload for a username change.
#[must_use]
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangeUsernameRequest {
    /// Must be the authenticated account.
    #[validate(length(max = 64))]
    pub username: String,
    #[validate(length(max = 64))]
    #[serde(alias = "new_username")]
    pub new_username: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn password_change_accepts_both_spellings() -> anyhow::Result<()> {
        let camel: ChangePasswordRequest = serde_json::from_value(json!({
            "username": "alice",
            "currentPassword": "password1",
            "newPassword": "password2",
        }))?;
        let snake: ChangePasswordRequest = serde_json::from_value(json!({
            "username": "alice",
            "current_password": "password1",
            "new_password": "password2",
        }))?;

        assert_eq!(camel.current_password, snake.current_password);
        assert_eq!(camel.new_password, snake.new_password);
        assert_eq!(snake.new_password, "password2");

        Ok(())
    }

    #[test]
    fn username_change_accepts_both_spellings() -> anyhow::Result<()> {
        let camel: ChangeUsernameRequest =
            serde_json::from_value(json!({ "username": "alice", "newUsername": "carol" }))?;
        let snake: ChangeUsernameRequest =
            serde_json::from_value(json!({ "username": "alice", "new_username": "carol" }))?;

        assert_eq!(camel.new_username, "carol");
        assert_eq!(snake.new_username, "carol");

        Ok(())
    }
}
