//! PostgreSQL index operator classes, keyed by index method and native type.

use super::Provider;

/// Escape hatch accepted wherever an operator class is.
pub const RAW: &str = "raw";

const INET_OPS: &[&str] = &["InetOps"];
const JSONB_OPS: &[&str] = &["JsonbOps", "JsonbPathOps"];
const ARRAY_OPS: &[&str] = &["ArrayOps"];
const TEXT_OPS: &[&str] = &["TextOps"];

fn brin(native: &str) -> &'static [&'static str] {
    match native {
        "Bit" => &["BitMinMaxOps"],
        "VarBit" => &["VarBitMinMaxOps"],
        "Char" => &["BpcharBloomOps", "BpcharMinMaxOps"],
        "Date" => &["DateBloomOps", "DateMinMaxOps", "DateMinMaxMultiOps"],
        "Real" => &["Float4BloomOps", "Float4MinMaxOps", "Float4MinMaxMultiOps"],
        "DoublePrecision" => &["Float8BloomOps", "Float8MinMaxOps", "Float8MinMaxMultiOps"],
        "Inet" => &[
            "InetBloomOps",
            "InetInclusionOps",
            "InetMinMaxOps",
            "InetMinMaxMultiOps",
        ],
        "SmallInt" => &["Int2BloomOps", "Int2MinMaxOps", "Int2MinMaxMultiOps"],
        "Integer" => &["Int4BloomOps", "Int4MinMaxOps", "Int4MinMaxMultiOps"],
        "BigInt" => &["Int8BloomOps", "Int8MinMaxOps", "Int8MinMaxMultiOps"],
        "Decimal" | "Money" => &["NumericBloomOps", "NumericMinMaxOps", "NumericMinMaxMultiOps"],
        "Oid" => &["OidBloomOps", "OidMinMaxOps", "OidMinMaxMultiOps"],
        "Text" | "VarChar" => &["TextBloomOps", "TextMinMaxOps"],
        "Timestamp" => &[
            "TimestampBloomOps",
            "TimestampMinMaxOps",
            "TimestampMinMaxMultiOps",
        ],
        "Timestamptz" => &[
            "TimestampTzBloomOps",
            "TimestampTzMinMaxOps",
            "TimestampTzMinMaxMultiOps",
        ],
        "Time" => &["TimeBloomOps", "TimeMinMaxOps", "TimeMinMaxMultiOps"],
        "Timetz" => &["TimeTzBloomOps", "TimeTzMinMaxOps", "TimeTzMinMaxMultiOps"],
        "Uuid" => &["UuidBloomOps", "UuidMinMaxOps", "UuidMinMaxMultiOps"],
        _ => &[],
    }
}

/// Operator classes for a field indexed with `index_type`.
///
/// `native` is the field's native type without arguments (`VarChar`, not
/// `VarChar(30)`). A missing index type means the default B-tree, which has
/// no operator classes to choose from.
#[must_use]
pub fn operator_classes(
    provider: Provider,
    index_type: Option<&str>,
    native: &str,
    is_list: bool,
) -> &'static [&'static str] {
    if provider != Provider::Postgresql {
        return &[];
    }
    match index_type {
        Some("Gist") if native == "Inet" => INET_OPS,
        Some("Gin") if is_list => ARRAY_OPS,
        Some("Gin") if matches!(native, "Json" | "JsonB") => JSONB_OPS,
        Some("SpGist") if native == "Inet" => INET_OPS,
        Some("SpGist") if matches!(native, "Text" | "VarChar") => TEXT_OPS,
        Some("Brin") => brin(native),
        _ => &[],
    }
}
