//! Static capability tables.
//!
//! Every table is authored in the order it is presented to the user and is
//! filtered, never sorted, at request time. Rows carry a [`Gate`] describing
//! which connector and preview-feature combination enables them, so the
//! generator never branches on providers itself.

pub mod attributes;
pub mod blocks;
pub mod defaults;
pub mod native_types;
pub mod operator_classes;

use psl_syntax::{Expr, Schema};
use smol_str::SmolStr;

/// The connector a datasource targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Provider {
    /// `postgresql`
    Postgresql,
    /// `mysql`
    Mysql,
    /// `sqlite`
    Sqlite,
    /// `sqlserver`
    Sqlserver,
    /// `mongodb`
    Mongodb,
    /// `cockroachdb`
    Cockroachdb,
}

impl Provider {
    /// Connector identifiers in the order they are suggested.
    pub const ALL: [Provider; 6] = [
        Provider::Mysql,
        Provider::Postgresql,
        Provider::Sqlite,
        Provider::Sqlserver,
        Provider::Mongodb,
        Provider::Cockroachdb,
    ];

    /// Parses a `provider` value.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "postgresql" | "postgres" => Some(Self::Postgresql),
            "mysql" => Some(Self::Mysql),
            "sqlite" => Some(Self::Sqlite),
            "sqlserver" => Some(Self::Sqlserver),
            "mongodb" => Some(Self::Mongodb),
            "cockroachdb" => Some(Self::Cockroachdb),
            _ => None,
        }
    }

    /// The identifier written in a schema.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Postgresql => "postgresql",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
            Self::Sqlserver => "sqlserver",
            Self::Mongodb => "mongodb",
            Self::Cockroachdb => "cockroachdb",
        }
    }
}

/// An opt-in preview feature of the schema language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PreviewFeature {
    /// `driverAdapters`
    DriverAdapters,
    /// `fullTextIndex`
    FullTextIndex,
    /// `fullTextSearchPostgres`
    FullTextSearchPostgres,
    /// `metrics`
    Metrics,
    /// `multiSchema`
    MultiSchema,
    /// `nativeDistinct`
    NativeDistinct,
    /// `postgresqlExtensions`
    PostgresqlExtensions,
    /// `relationJoins`
    RelationJoins,
    /// `shardKeys`
    ShardKeys,
    /// `strictUndefinedChecks`
    StrictUndefinedChecks,
    /// `typedSql`
    TypedSql,
    /// `views`
    Views,
}

impl PreviewFeature {
    /// Every known feature in the order they are suggested.
    pub const ALL: [PreviewFeature; 12] = [
        PreviewFeature::DriverAdapters,
        PreviewFeature::FullTextIndex,
        PreviewFeature::FullTextSearchPostgres,
        PreviewFeature::Metrics,
        PreviewFeature::MultiSchema,
        PreviewFeature::NativeDistinct,
        PreviewFeature::PostgresqlExtensions,
        PreviewFeature::RelationJoins,
        PreviewFeature::ShardKeys,
        PreviewFeature::StrictUndefinedChecks,
        PreviewFeature::TypedSql,
        PreviewFeature::Views,
    ];

    /// The identifier written in `previewFeatures`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DriverAdapters => "driverAdapters",
            Self::FullTextIndex => "fullTextIndex",
            Self::FullTextSearchPostgres => "fullTextSearchPostgres",
            Self::Metrics => "metrics",
            Self::MultiSchema => "multiSchema",
            Self::NativeDistinct => "nativeDistinct",
            Self::PostgresqlExtensions => "postgresqlExtensions",
            Self::RelationJoins => "relationJoins",
            Self::ShardKeys => "shardKeys",
            Self::StrictUndefinedChecks => "strictUndefinedChecks",
            Self::TypedSql => "typedSql",
            Self::Views => "views",
        }
    }

    /// Parses a feature name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|feature| feature.name().eq_ignore_ascii_case(name))
    }

    fn bit(self) -> u32 {
        1 << (self as u8)
    }
}

/// A set of enabled preview features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreviewFeatures(u32);

impl PreviewFeatures {
    /// No features enabled.
    #[must_use]
    pub const fn none() -> Self {
        Self(0)
    }

    /// Enables a feature.
    pub fn insert(&mut self, feature: PreviewFeature) {
        self.0 |= feature.bit();
    }

    /// Returns `true` if the feature is enabled.
    #[must_use]
    pub fn contains(self, feature: PreviewFeature) -> bool {
        self.0 & feature.bit() != 0
    }

    /// Builds a set from feature names; unknown names are ignored.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut features = Self::none();
        for feature in names.into_iter().filter_map(PreviewFeature::from_name) {
            features.insert(feature);
        }
        features
    }
}

impl FromIterator<PreviewFeature> for PreviewFeatures {
    fn from_iter<T: IntoIterator<Item = PreviewFeature>>(iter: T) -> Self {
        let mut features = Self::none();
        for feature in iter {
            features.insert(feature);
        }
        features
    }
}

/// Condition under which a table row applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Always available.
    Always,
    /// Only for the listed connectors.
    Providers(&'static [Provider]),
    /// For every configuration except the listed connectors.
    ExceptProviders(&'static [Provider]),
    /// Only with the preview feature enabled.
    Feature(PreviewFeature),
    /// Only for the listed connectors with the preview feature enabled.
    ProvidersWithFeature(&'static [Provider], PreviewFeature),
}

/// One row of a capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Text offered to the user.
    pub label: &'static str,
    /// When the row applies.
    pub gate: Gate,
}

impl Entry {
    /// A row that always applies.
    #[must_use]
    pub const fn always(label: &'static str) -> Self {
        Self {
            label,
            gate: Gate::Always,
        }
    }

    /// A gated row.
    #[must_use]
    pub const fn gated(label: &'static str, gate: Gate) -> Self {
        Self { label, gate }
    }
}

/// The resolved configuration every table lookup is keyed by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Connector of the first datasource, if recognised.
    pub provider: Option<Provider>,
    /// Union of the preview features of every generator.
    pub preview_features: PreviewFeatures,
    /// Namespaces declared in the datasource `schemas` array.
    pub schemas: Vec<SmolStr>,
}

impl Capabilities {
    /// Capabilities for an explicit provider and feature set.
    #[must_use]
    pub fn new(provider: Option<Provider>, preview_features: PreviewFeatures) -> Self {
        Self {
            provider,
            preview_features,
            schemas: Vec::new(),
        }
    }

    /// Resolves provider, preview features and schemas from the schema's
    /// datasource and generator blocks.
    ///
    /// Unknown providers and feature names fall back to the empty subset.
    #[must_use]
    pub fn from_schema(schema: &Schema) -> Self {
        let datasource = schema.datasource();
        let provider = datasource
            .and_then(|block| block.string_property("provider"))
            .and_then(Provider::from_name);
        let schemas = datasource
            .and_then(|block| block.property("schemas"))
            .and_then(|property| property.value.as_ref())
            .map(|value| value.string_items().map(SmolStr::new).collect())
            .unwrap_or_default();

        let preview_features = PreviewFeatures::from_names(
            schema
                .generators()
                .filter_map(|block| block.property("previewFeatures"))
                .filter_map(|property| property.value.as_ref())
                .flat_map(Expr::string_items),
        );

        Self {
            provider,
            preview_features,
            schemas,
        }
    }

    /// Returns `true` if the configured connector is `provider`.
    #[must_use]
    pub fn is(&self, provider: Provider) -> bool {
        self.provider == Some(provider)
    }

    /// Returns `true` if the configured connector is one of `providers`.
    #[must_use]
    pub fn is_any(&self, providers: &[Provider]) -> bool {
        self.provider.is_some_and(|p| providers.contains(&p))
    }

    /// Returns `true` if `feature` is enabled.
    #[must_use]
    pub fn has_feature(&self, feature: PreviewFeature) -> bool {
        self.preview_features.contains(feature)
    }

    /// Evaluates a row gate.
    #[must_use]
    pub fn allows(&self, gate: Gate) -> bool {
        match gate {
            Gate::Always => true,
            Gate::Providers(providers) => self.is_any(providers),
            Gate::ExceptProviders(providers) => !self.is_any(providers),
            Gate::Feature(feature) => self.has_feature(feature),
            Gate::ProvidersWithFeature(providers, feature) => {
                self.is_any(providers) && self.has_feature(feature)
            }
        }
    }

    /// Labels of the rows of `table` enabled for this configuration.
    pub fn select<'t>(&'t self, table: &'t [Entry]) -> impl Iterator<Item = &'static str> + 't {
        table
            .iter()
            .filter(|entry| self.allows(entry.gate))
            .map(|entry| entry.label)
    }
}

/// Built-in scalar field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// `String`
    String,
    /// `Boolean`
    Boolean,
    /// `Int`
    Int,
    /// `Float`
    Float,
    /// `DateTime`
    DateTime,
    /// `Json`
    Json,
    /// `Bytes`
    Bytes,
    /// `Decimal`
    Decimal,
    /// `BigInt`
    BigInt,
}

impl ScalarType {
    /// Parses a scalar type name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "String" => Some(Self::String),
            "Boolean" => Some(Self::Boolean),
            "Int" => Some(Self::Int),
            "Float" => Some(Self::Float),
            "DateTime" => Some(Self::DateTime),
            "Json" => Some(Self::Json),
            "Bytes" => Some(Self::Bytes),
            "Decimal" => Some(Self::Decimal),
            "BigInt" => Some(Self::BigInt),
            _ => None,
        }
    }
}

const SCALAR_TYPES: &[Entry] = &[
    Entry::always("String"),
    Entry::always("Boolean"),
    Entry::always("Int"),
    Entry::always("Float"),
    Entry::always("DateTime"),
    Entry::gated("Json", Gate::ExceptProviders(&[Provider::Sqlite])),
    Entry::always("Bytes"),
    Entry::gated("Decimal", Gate::ExceptProviders(&[Provider::Mongodb])),
    Entry::always("BigInt"),
    Entry::always("Unsupported"),
];

/// Scalar type names usable in a field type position.
pub fn scalar_types(caps: &Capabilities) -> impl Iterator<Item = &'static str> + '_ {
    caps.select(SCALAR_TYPES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(source: &str) -> Capabilities {
        Capabilities::from_schema(&Schema::single_file("file:///s.prisma", source))
    }

    #[test]
    fn provider_and_features_are_read_from_schema() {
        let caps = caps(
            r#"datasource db {
  provider = "postgresql"
  schemas  = ["base", "audit"]
}
generator client {
  provider        = "prisma-client-js"
  previewFeatures = ["views", "fullTextIndex", "unknownThing"]
}
"#,
        );
        assert_eq!(caps.provider, Some(Provider::Postgresql));
        assert!(caps.has_feature(PreviewFeature::Views));
        assert!(caps.has_feature(PreviewFeature::FullTextIndex));
        assert!(!caps.has_feature(PreviewFeature::ShardKeys));
        assert_eq!(caps.schemas, vec![SmolStr::new("base"), SmolStr::new("audit")]);
    }

    #[test]
    fn commented_features_are_ignored() {
        let caps = caps(
            r#"generator client {
  provider = "prisma-client-js"
  // previewFeatures = ["views"]
}
"#,
        );
        assert!(!caps.has_feature(PreviewFeature::Views));
    }

    #[test]
    fn unknown_provider_falls_back_to_no_provider() {
        let caps = caps("datasource db {\n  provider = \"oracle\"\n}\n");
        assert_eq!(caps.provider, None);
        assert!(caps.allows(Gate::ExceptProviders(&[Provider::Sqlite])));
        assert!(!caps.allows(Gate::Providers(&[Provider::Mysql])));
    }

    #[test]
    fn scalar_types_are_gated_by_connector() {
        let sqlite = Capabilities::new(Some(Provider::Sqlite), PreviewFeatures::none());
        assert!(!scalar_types(&sqlite).any(|name| name == "Json"));
        let mongo = Capabilities::new(Some(Provider::Mongodb), PreviewFeatures::none());
        assert!(!scalar_types(&mongo).any(|name| name == "Decimal"));
        assert_eq!(scalar_types(&Capabilities::default()).count(), 10);
    }

    #[test]
    fn feature_names_ignore_case() {
        let features = PreviewFeatures::from_names(["FullTextIndex", "views"]);
        assert!(features.contains(PreviewFeature::FullTextIndex));
        assert!(features.contains(PreviewFeature::Views));
        assert!(!features.contains(PreviewFeature::Metrics));
    }
}
