use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PathId {
    #[validate(range(min = 1, message = "id must be positive"))]
    pub id: i32,
}
