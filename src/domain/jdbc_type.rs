//! SQL column types understood by type handlers

use super::types::{symbol_enum, UnknownSymbol};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

symbol_enum! {
    /// Column type of a statement parameter or result column
    pub enum JdbcType {
        Array => "ARRAY",
        Bit => "BIT",
        TinyInt => "TINYINT",
        SmallInt => "SMALLINT",
        Integer => "INTEGER",
        BigInt => "BIGINT",
        Float => "FLOAT",
        Real => "REAL",
        Double => "DOUBLE",
        Numeric => "NUMERIC",
        Decimal => "DECIMAL",
        Char => "CHAR",
        Varchar => "VARCHAR",
        LongVarchar => "LONGVARCHAR",
        Date => "DATE",
        Time => "TIME",
        Timestamp => "TIMESTAMP",
        Binary => "BINARY",
        VarBinary => "VARBINARY",
        LongVarBinary => "LONGVARBINARY",
        Null => "NULL",
        Other => "OTHER",
        Blob => "BLOB",
        Clob => "CLOB",
        Boolean => "BOOLEAN",
        Cursor => "CURSOR",
        Undefined => "UNDEFINED",
        NVarchar => "NVARCHAR",
        NChar => "NCHAR",
        NClob => "NCLOB",
        Struct => "STRUCT",
        JavaObject => "JAVA_OBJECT",
        Distinct => "DISTINCT",
        Ref => "REF",
        DataLink => "DATALINK",
        RowId => "ROWID",
        LongNVarchar => "LONGNVARCHAR",
        SqlXml => "SQLXML",
        DateTimeOffset => "DATETIMEOFFSET",
        TimeWithTimezone => "TIME_WITH_TIMEZONE",
        TimestampWithTimezone => "TIMESTAMP_WITH_TIMEZONE",
    }
}
