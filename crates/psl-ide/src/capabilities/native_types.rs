//! Native database type catalog, keyed by connector and scalar type.
//!
//! Parameterised native types carry a `()` suffix so the editor can place
//! the cursor between the parentheses.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use super::{Provider, ScalarType};

type Catalog = &'static [(ScalarType, &'static [&'static str])];

const POSTGRESQL: Catalog = &[
    (
        ScalarType::String,
        &["Text", "Char()", "VarChar()", "Bit()", "VarBit()", "Uuid", "Xml", "Inet", "Citext"],
    ),
    (ScalarType::Boolean, &["Boolean"]),
    (ScalarType::Int, &["Integer", "SmallInt", "Oid"]),
    (ScalarType::BigInt, &["BigInt"]),
    (ScalarType::Float, &["DoublePrecision", "Real"]),
    (ScalarType::Decimal, &["Decimal()", "Money"]),
    (
        ScalarType::DateTime,
        &["Timestamp()", "Timestamptz()", "Date", "Time()", "Timetz()"],
    ),
    (ScalarType::Json, &["Json", "JsonB"]),
    (ScalarType::Bytes, &["ByteA"]),
];

const COCKROACHDB: Catalog = &[
    (
        ScalarType::String,
        &["Bit()", "Char()", "Inet", "CatalogSingleChar", "String()", "Uuid", "VarBit()"],
    ),
    (ScalarType::Boolean, &["Bool"]),
    (ScalarType::Int, &["Int2", "Int4", "Oid"]),
    (ScalarType::Float, &["Float4", "Float8"]),
    (
        ScalarType::DateTime,
        &["Date", "Time()", "Timestamp()", "Timestamptz()", "Timetz()"],
    ),
    (ScalarType::Json, &["JsonB"]),
    (ScalarType::Bytes, &["Bytes"]),
    (ScalarType::Decimal, &["Decimal()"]),
    (ScalarType::BigInt, &["Int8"]),
];

const MYSQL: Catalog = &[
    (
        ScalarType::String,
        &["VarChar()", "Text", "Char()", "TinyText", "MediumText", "LongText"],
    ),
    (ScalarType::Boolean, &["TinyInt()", "Bit()"]),
    (
        ScalarType::Int,
        &[
            "Int",
            "UnsignedInt",
            "SmallInt",
            "UnsignedSmallInt",
            "MediumInt",
            "UnsignedMediumInt",
            "TinyInt()",
            "UnsignedTinyInt",
            "Year",
        ],
    ),
    (ScalarType::BigInt, &["BigInt", "UnsignedBigInt"]),
    (ScalarType::Float, &["Float", "Double"]),
    (ScalarType::Decimal, &["Decimal()"]),
    (
        ScalarType::DateTime,
        &["DateTime()", "Date", "Time()", "Timestamp()"],
    ),
    (ScalarType::Json, &["Json"]),
    (
        ScalarType::Bytes,
        &[
            "LongBlob",
            "Binary()",
            "VarBinary()",
            "TinyBlob",
            "Blob",
            "MediumBlob",
            "Bit()",
        ],
    ),
];

const SQLSERVER: Catalog = &[
    (
        ScalarType::String,
        &[
            "Char()",
            "NChar()",
            "VarChar()",
            "NVarChar()",
            "Text",
            "NText",
            "Xml",
            "UniqueIdentifier",
        ],
    ),
    (ScalarType::Boolean, &["Bit"]),
    (ScalarType::Int, &["Int", "SmallInt", "TinyInt", "Bit"]),
    (ScalarType::BigInt, &["BigInt"]),
    (ScalarType::Float, &["Float()", "Real"]),
    (ScalarType::Decimal, &["Decimal()", "Money", "SmallMoney"]),
    (
        ScalarType::DateTime,
        &[
            "Date",
            "Time()",
            "DateTime",
            "DateTime2",
            "SmallDateTime",
            "DateTimeOffset",
        ],
    ),
    (ScalarType::Bytes, &["Binary()", "VarBinary()", "Image"]),
];

const MONGODB: Catalog = &[
    (ScalarType::String, &["String", "ObjectId"]),
    (ScalarType::Boolean, &["Bool"]),
    (ScalarType::Int, &["Int", "Long"]),
    (ScalarType::BigInt, &["Long"]),
    (ScalarType::Float, &["Double"]),
    (ScalarType::DateTime, &["Date", "Timestamp"]),
    (ScalarType::Json, &["Json"]),
    (ScalarType::Bytes, &["BinData", "ObjectId"]),
];

static NATIVE_TYPES: Lazy<FxHashMap<(Provider, ScalarType), &'static [&'static str]>> =
    Lazy::new(|| {
        let catalogs: [(Provider, Catalog); 5] = [
            (Provider::Postgresql, POSTGRESQL),
            (Provider::Cockroachdb, COCKROACHDB),
            (Provider::Mysql, MYSQL),
            (Provider::Sqlserver, SQLSERVER),
            (Provider::Mongodb, MONGODB),
        ];
        let mut map = FxHashMap::default();
        for (provider, catalog) in catalogs {
            for &(scalar, names) in catalog {
                map.insert((provider, scalar), names);
            }
        }
        map
    });

/// Native types valid for a scalar field on a connector.
#[must_use]
pub fn native_types(provider: Provider, scalar: ScalarType) -> &'static [&'static str] {
    NATIVE_TYPES
        .get(&(provider, scalar))
        .copied()
        .unwrap_or_default()
}

/// Native type a connector uses when a field declares none.
#[must_use]
pub fn default_native_type(provider: Provider, scalar: ScalarType) -> Option<&'static str> {
    match provider {
        Provider::Postgresql => Some(match scalar {
            ScalarType::String => "Text",
            ScalarType::Boolean => "Boolean",
            ScalarType::Int => "Integer",
            ScalarType::BigInt => "BigInt",
            ScalarType::Float => "DoublePrecision",
            ScalarType::Decimal => "Decimal",
            ScalarType::DateTime => "Timestamp",
            ScalarType::Json => "JsonB",
            ScalarType::Bytes => "ByteA",
        }),
        Provider::Cockroachdb => Some(match scalar {
            ScalarType::String => "String",
            ScalarType::Boolean => "Bool",
            ScalarType::Int => "Int4",
            ScalarType::BigInt => "Int8",
            ScalarType::Float => "Float8",
            ScalarType::Decimal => "Decimal",
            ScalarType::DateTime => "Timestamp",
            ScalarType::Json => "JsonB",
            ScalarType::Bytes => "Bytes",
        }),
        _ => None,
    }
}
