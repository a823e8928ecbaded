//! Fixed table layout for the auth log table.
//!
//! Every partition registered by this service must describe the same columns
//! and storage format as the table it belongs to, otherwise the query engine
//! rejects or misreads the partition.

/// Column definition within the partition storage descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub data_type: &'static str,
}

const fn string_column(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        data_type: "string",
    }
}

/// Columns of the log table, in table order
pub static COLUMNS: [ColumnDef; 15] = [
    string_column("log_id"),
    string_column("timestamp"),
    string_column("connection"),
    string_column("connection_id"),
    string_column("client_id"),
    string_column("ip"),
    string_column("user_id"),
    string_column("user_name"),
    string_column("description"),
    string_column("user_agent"),
    string_column("type"),
    string_column("strategy"),
    string_column("strategy_type"),
    string_column("hostname"),
    string_column("details"),
];

/// Physical storage format shared by every partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageFormat {
    pub input_format: &'static str,
    pub output_format: &'static str,
    pub serialization_library: &'static str,
    /// Value of the `serialization.format` SerDe parameter
    pub serialization_format: &'static str,
    pub compressed: bool,
    /// -1 marks the table as unbucketed
    pub number_of_buckets: i32,
    pub stored_as_sub_directories: bool,
}

/// Newline-delimited JSON text, uncompressed, no bucketing
pub const JSON_TEXT_FORMAT: StorageFormat = StorageFormat {
    input_format: "org.apache.hadoop.mapred.TextInputFormat",
    output_format: "org.apache.hadoop.hive.ql.io.HiveIgnoreKeyTextOutputFormat",
    serialization_library: "org.openx.data.jsonserde.JsonSerDe",
    serialization_format: "1",
    compressed: false,
    number_of_buckets: -1,
    stored_as_sub_directories: false,
};
