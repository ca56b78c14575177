pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod record;
pub mod store;
pub mod tools;

pub use errors::FeedbackError;
pub use record::FeedbackRecord;
pub use store::FeedbackStore;
