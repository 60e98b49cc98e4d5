//! Attribute, argument and literal tables.

use super::{Capabilities, Entry, Gate, PreviewFeature, Provider, ScalarType};

const NATIVE_TYPE_CONNECTORS: &[Provider] = &[
    Provider::Postgresql,
    Provider::Mysql,
    Provider::Sqlserver,
    Provider::Mongodb,
    Provider::Cockroachdb,
];

const MULTI_SCHEMA_CONNECTORS: &[Provider] = &[
    Provider::Postgresql,
    Provider::Cockroachdb,
    Provider::Sqlserver,
];

/// Field attributes of models and views.
pub const FIELD_ATTRIBUTES: &[Entry] = &[
    Entry::gated("@db", Gate::Providers(NATIVE_TYPE_CONNECTORS)),
    Entry::always("@id"),
    Entry::always("@unique"),
    Entry::always("@map"),
    Entry::always("@default"),
    Entry::always("@relation"),
    Entry::always("@updatedAt"),
    Entry::always("@ignore"),
    Entry::gated(
        "@shardKey",
        Gate::ProvidersWithFeature(&[Provider::Mysql], PreviewFeature::ShardKeys),
    ),
];

/// Field attributes of composite types.
pub const COMPOSITE_FIELD_ATTRIBUTES: &[Entry] = &[
    Entry::gated("@db", Gate::Providers(NATIVE_TYPE_CONNECTORS)),
    Entry::always("@map"),
    Entry::always("@default"),
];

/// Attributes of enum values.
pub const ENUM_VALUE_ATTRIBUTES: &[Entry] = &[Entry::always("@map")];

/// Block attributes of models and views.
pub const BLOCK_ATTRIBUTES: &[Entry] = &[
    Entry::always("@@map"),
    Entry::always("@@id"),
    Entry::always("@@unique"),
    Entry::always("@@index"),
    Entry::gated(
        "@@fulltext",
        Gate::ProvidersWithFeature(
            &[Provider::Mysql, Provider::Mongodb],
            PreviewFeature::FullTextIndex,
        ),
    ),
    Entry::always("@@ignore"),
    Entry::gated("@@schema", Gate::Providers(MULTI_SCHEMA_CONNECTORS)),
    Entry::gated(
        "@@shardKey",
        Gate::ProvidersWithFeature(&[Provider::Mysql], PreviewFeature::ShardKeys),
    ),
];

/// Block attributes of enums.
pub const ENUM_BLOCK_ATTRIBUTES: &[Entry] = &[
    Entry::always("@@map"),
    Entry::gated("@@schema", Gate::Providers(MULTI_SCHEMA_CONNECTORS)),
];

/// Block attributes that may appear at most once per block.
pub const ONCE_PER_BLOCK: &[&str] = &["@@id", "@@map", "@@ignore", "@@schema", "@@shardKey"];

/// Attributes whose first positional argument is a value to complete
/// rather than an argument name.
pub const VALUE_FIRST_ATTRIBUTES: &[&str] = &["@default", "@map", "@@map", "@@schema"];

/// Label offered for an unnamed string argument.
pub const EMPTY_STRING: &str = "\"\"";

const SQLSERVER: &[Provider] = &[Provider::Sqlserver];
const MYSQL: &[Provider] = &[Provider::Mysql];

const ID_ARGUMENTS: &[Entry] = &[
    Entry::always("map"),
    Entry::gated("length", Gate::Providers(MYSQL)),
    Entry::gated("sort", Gate::Providers(SQLSERVER)),
    Entry::gated("clustered", Gate::Providers(SQLSERVER)),
];

const UNIQUE_ARGUMENTS: &[Entry] = &[
    Entry::always("map"),
    Entry::gated("length", Gate::Providers(MYSQL)),
    Entry::always("sort"),
    Entry::gated("clustered", Gate::Providers(SQLSERVER)),
];

const COMPOUND_ID_ARGUMENTS: &[Entry] = &[
    Entry::always("fields"),
    Entry::always("name"),
    Entry::always("map"),
    Entry::gated("clustered", Gate::Providers(SQLSERVER)),
];

const INDEX_ARGUMENTS: &[Entry] = &[
    Entry::always("fields"),
    Entry::always("map"),
    Entry::gated(
        "type",
        Gate::Providers(&[Provider::Postgresql, Provider::Cockroachdb]),
    ),
    Entry::gated("clustered", Gate::Providers(SQLSERVER)),
];

const FULLTEXT_ARGUMENTS: &[Entry] = &[Entry::always("fields"), Entry::always("map")];

const RELATION_ARGUMENTS: &[Entry] = &[
    Entry::always("references"),
    Entry::always("fields"),
    Entry::always("onDelete"),
    Entry::always("onUpdate"),
    Entry::always(EMPTY_STRING),
    Entry::always("name"),
    Entry::always("map"),
];

const DEFAULT_ARGUMENTS: &[Entry] = &[Entry::always("map")];

/// Named arguments of an attribute, `@` or `@@` prefixed.
#[must_use]
pub fn argument_names(attribute: &str) -> &'static [Entry] {
    match attribute {
        "@id" => ID_ARGUMENTS,
        "@unique" => UNIQUE_ARGUMENTS,
        "@@id" | "@@unique" => COMPOUND_ID_ARGUMENTS,
        "@@index" => INDEX_ARGUMENTS,
        "@@fulltext" => FULLTEXT_ARGUMENTS,
        "@relation" => RELATION_ARGUMENTS,
        "@default" => DEFAULT_ARGUMENTS,
        _ => &[],
    }
}

/// The named argument an unnamed first argument stands for.
#[must_use]
pub fn positional_argument(attribute: &str) -> Option<&'static str> {
    match attribute {
        "@@id" | "@@unique" | "@@index" | "@@fulltext" | "@@shardKey" => Some("fields"),
        "@relation" | "@map" | "@@map" | "@@schema" => Some("name"),
        _ => None,
    }
}

/// The argument a suggestion label binds. `""` is the unnamed relation name.
#[must_use]
pub fn bound_argument(label: &str) -> &str {
    if label == EMPTY_STRING {
        "name"
    } else {
        label
    }
}

/// Referential actions for `onDelete` and `onUpdate`.
pub const REFERENTIAL_ACTIONS: &[Entry] = &[
    Entry::always("Cascade"),
    Entry::gated("Restrict", Gate::ExceptProviders(SQLSERVER)),
    Entry::always("NoAction"),
    Entry::always("SetNull"),
    Entry::always("SetDefault"),
];

/// Sort directions.
pub const SORT_ORDERS: &[Entry] = &[Entry::always("Asc"), Entry::always("Desc")];

/// Index methods for `type:`.
pub const INDEX_TYPES: &[Entry] = &[
    Entry::gated(
        "BTree",
        Gate::Providers(&[Provider::Postgresql, Provider::Cockroachdb]),
    ),
    Entry::gated("Hash", Gate::Providers(&[Provider::Postgresql])),
    Entry::gated("Gist", Gate::Providers(&[Provider::Postgresql])),
    Entry::gated(
        "Gin",
        Gate::Providers(&[Provider::Postgresql, Provider::Cockroachdb]),
    ),
    Entry::gated("SpGist", Gate::Providers(&[Provider::Postgresql])),
    Entry::gated("Brin", Gate::Providers(&[Provider::Postgresql])),
];

/// Boolean literals.
pub const BOOLEANS: &[Entry] = &[Entry::always("true"), Entry::always("false")];

/// Shape of a closed literal set for an argument value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralSet {
    /// Enum-like identifiers.
    Members(&'static [Entry]),
    /// `true` / `false`.
    Booleans,
    /// A quoted string is expected.
    String,
    /// A field reference array is expected.
    Array,
}

/// Literal set of a named argument, if it has one.
#[must_use]
pub fn argument_literals(argument: &str) -> Option<LiteralSet> {
    match argument {
        "onDelete" | "onUpdate" => Some(LiteralSet::Members(REFERENTIAL_ACTIONS)),
        "sort" => Some(LiteralSet::Members(SORT_ORDERS)),
        "type" => Some(LiteralSet::Members(INDEX_TYPES)),
        "clustered" => Some(LiteralSet::Booleans),
        "map" | "name" => Some(LiteralSet::String),
        "fields" | "references" => Some(LiteralSet::Array),
        _ => None,
    }
}

const INDEX_FIELD_OPTIONS: &[Entry] = &[
    Entry::gated(
        "ops",
        Gate::Providers(&[Provider::Postgresql, Provider::Cockroachdb]),
    ),
    Entry::always("sort"),
    Entry::gated("length", Gate::Providers(MYSQL)),
];

const UNIQUE_FIELD_OPTIONS: &[Entry] = &[
    Entry::always("sort"),
    Entry::gated("length", Gate::Providers(MYSQL)),
];

const ID_FIELD_OPTIONS: &[Entry] = &[
    Entry::gated("length", Gate::Providers(MYSQL)),
    Entry::gated("sort", Gate::Providers(SQLSERVER)),
];

const FULLTEXT_FIELD_OPTIONS: &[Entry] =
    &[Entry::gated("sort", Gate::Providers(&[Provider::Mongodb]))];

/// Options of a per-field call such as `title(sort: Desc)` inside the
/// field list of a block attribute.
///
/// `length` only applies to `String` and `Bytes` fields.
pub fn per_field_options<'c>(
    attribute: &str,
    scalar: Option<ScalarType>,
    caps: &'c Capabilities,
) -> impl Iterator<Item = &'static str> + 'c {
    let table: &'static [Entry] = match attribute {
        "@@index" => INDEX_FIELD_OPTIONS,
        "@@unique" => UNIQUE_FIELD_OPTIONS,
        "@@id" => ID_FIELD_OPTIONS,
        "@@fulltext" => FULLTEXT_FIELD_OPTIONS,
        _ => &[],
    };
    let sized = matches!(scalar, Some(ScalarType::String | ScalarType::Bytes));
    caps.select(table)
        .filter(move |option| *option != "length" || sized)
}
