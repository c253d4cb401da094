use crate::error::ApiError;

/// Process exit code for a failed request or command
pub fn exit_code_for_error(err: &ApiError) -> i32 {
    match err {
        ApiError::InvalidUrl(_) => 3,
        ApiError::Config(_) => 2,
        ApiError::Status { .. } => 22,
        ApiError::Decode(_) | ApiError::Json(_) => 26,
        ApiError::Schema(_) => 65,
        ApiError::PermissionDenied(_) | ApiError::FileNotFound(_) => 37,
        ApiError::Io(_) => 23,
        ApiError::Cookie(_) => 1,
        ApiError::Http(err) => http_exit_code(err),
    }
}

fn http_exit_code(err: &reqwest::Error) -> i32 {
    if err.is_timeout() {
        return 28;
    }
    if err.is_connect() {
        return 7;
    }
    if err.is_request() || err.is_builder() {
        return 2;
    }
    43
}
