use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route pattern '{pattern}' is invalid: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("the route contains invalid paths: {detail}")]
    InvalidPaths { detail: String },
    #[error("named parameter token '{{{token}}}' contains invalid characters")]
    InvalidParamToken { token: String },
    #[error("pattern '{pattern}' has an unterminated '{{' parameter")]
    UnterminatedBrace { pattern: String },
    #[error("unknown HTTP method '{method}'")]
    UnknownMethod { method: String },
    #[error("compiled pattern '{pattern}' is not a valid regular expression")]
    InvalidCompiledRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type RouterResult<T> = Result<T, RouteError>;
