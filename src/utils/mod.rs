pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod validate;

pub use extractor::{
    NOT_FOUND_MESSAGE, SafeHomeworkIdI64, SafeIDI64, SafeNewsIdI64, SafeSubjectIdI64,
    SafeUserIdI64,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
