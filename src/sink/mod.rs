//! Output sinks for the assembled table.

mod csv;
mod postgres;

pub use self::csv::write_csv;
pub use self::postgres::PostgresSink;
pub(crate) use self::postgres::is_plain_identifier;
