use hub_core::entities::VerificationToken;
use hub_core::value_objects::Snowflake;

use crate::models::VerificationTokenModel;

impl From<VerificationTokenModel> for VerificationToken {
    fn from(model: VerificationTokenModel) -> Self {
        VerificationToken {
            token: model.token,
            user_id: Snowflake::new(model.user_id),
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}
