use thiserror::Error;

use crate::domain::OrderField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid input in {field}")]
pub struct InvalidInput {
    pub field: OrderField,
}
