use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A status or type column holds a value no domain enum variant matches.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Unknown value '{value}' stored in column {column}")]
    UnknownColumnValue {
        /// Table and column, e.g. `community.approval_mode`
        column: &'static str,
        /// The stored value
        value: String,
    },

    /// A row referenced by another row was missing while assembling a result.
    #[error("Row {id} of {table} referenced but not found")]
    MissingRelation {
        /// The referenced table
        table: &'static str,
        /// The referenced id
        id: i32,
    },
}
