pub mod price;
pub mod query;
pub mod search;
pub mod validation;
