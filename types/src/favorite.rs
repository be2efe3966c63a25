use crate::{CarId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved listing. The pair (user, car) is unique on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub user_id: UserId,
    pub car_id: CarId,
    pub created_at: DateTime<Utc>,
}
