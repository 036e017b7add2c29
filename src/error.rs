pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("chart template is missing the {placeholder} placeholder")]
    MissingTemplatePlaceholder { placeholder: &'static str },

    #[error("chart template contains the {placeholder} placeholder {count} times (expected once)")]
    DuplicateTemplatePlaceholder {
        placeholder: &'static str,
        count: usize,
    },

    #[error("invalid input delimiters: {message}")]
    InvalidDelimiters { message: String },

    #[error("record {record} ({path:?}) overflows the total weight")]
    WeightOverflow { path: String, record: usize },

    #[error("invalid layout: {message}")]
    InvalidLayout { message: String },
}
