//! Tables for top-level blocks and the bodies of datasources and generators.

use super::{Entry, Gate, PreviewFeature, Provider};

/// Top-level block keywords.
pub const BLOCK_TYPES: &[Entry] = &[
    Entry::always("datasource"),
    Entry::always("generator"),
    Entry::always("model"),
    Entry::gated("enum", Gate::ExceptProviders(&[Provider::Sqlite])),
    Entry::gated("type", Gate::Providers(&[Provider::Mongodb])),
    Entry::gated("view", Gate::Feature(PreviewFeature::Views)),
];

/// Keys of a datasource block.
pub const DATASOURCE_FIELDS: &[Entry] = &[
    Entry::always("provider"),
    Entry::always("url"),
    Entry::always("shadowDatabaseUrl"),
    Entry::always("directUrl"),
    Entry::always("relationMode"),
    Entry::gated(
        "extensions",
        Gate::ProvidersWithFeature(&[Provider::Postgresql], PreviewFeature::PostgresqlExtensions),
    ),
    Entry::gated(
        "schemas",
        Gate::Providers(&[
            Provider::Postgresql,
            Provider::Cockroachdb,
            Provider::Sqlserver,
        ]),
    ),
];

/// Keys of a datasource holding a connection string, with the environment
/// variable conventionally used for each.
pub const URL_FIELDS: &[(&str, &str)] = &[
    ("url", "DATABASE_URL"),
    ("shadowDatabaseUrl", "SHADOW_DATABASE_URL"),
    ("directUrl", "DIRECT_URL"),
];

/// Values of `relationMode`.
pub const RELATION_MODES: &[&str] = &["foreignKeys", "prisma"];

/// Generator providers known to this build.
pub const GENERATOR_PROVIDERS: &[&str] = &["prisma-client-js", "prisma-client"];

/// The generator provider a key set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorFlavor {
    /// No `provider` yet.
    Unset,
    /// `prisma-client-js`
    ClientJs,
    /// `prisma-client`
    Client,
    /// Any third-party generator.
    Other,
}

impl GeneratorFlavor {
    /// Classifies a generator by its provider value.
    #[must_use]
    pub fn from_provider(provider: Option<&str>) -> Self {
        match provider {
            None => Self::Unset,
            Some("prisma-client-js") => Self::ClientJs,
            Some("prisma-client") => Self::Client,
            Some(_) => Self::Other,
        }
    }

    /// Keys valid in a generator of this flavor, in suggestion order.
    #[must_use]
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Unset => &["provider"],
            Self::ClientJs => &["previewFeatures", "output", "engineType", "binaryTargets"],
            Self::Client => &[
                "previewFeatures",
                "output",
                "runtime",
                "moduleFormat",
                "generatedFileExtension",
                "importFileExtension",
            ],
            Self::Other => &["previewFeatures", "output"],
        }
    }

    /// Closed literal set of a generator key, if the key has one for this flavor.
    #[must_use]
    pub fn literals(self, key: &str) -> Option<&'static [&'static str]> {
        match (self, key) {
            (_, "provider") => Some(GENERATOR_PROVIDERS),
            (Self::ClientJs, "engineType") => Some(ENGINE_TYPES),
            (Self::Client, "runtime") => Some(RUNTIMES),
            (Self::Client, "moduleFormat") => Some(MODULE_FORMATS),
            (Self::Client, "generatedFileExtension") => Some(GENERATED_FILE_EXTENSIONS),
            (Self::Client, "importFileExtension") => Some(IMPORT_FILE_EXTENSIONS),
            _ => None,
        }
    }
}

/// Values of `engineType`.
pub const ENGINE_TYPES: &[&str] = &["library", "binary", "client"];

/// Values of `runtime`.
pub const RUNTIMES: &[&str] = &[
    "nodejs",
    "node",
    "deno",
    "bun",
    "deno-deploy",
    "workerd",
    "cloudflare",
    "edge-light",
    "vercel",
    "react-native",
];

/// Values of `moduleFormat`.
pub const MODULE_FORMATS: &[&str] = &["esm", "cjs"];

/// Values of `generatedFileExtension`.
pub const GENERATED_FILE_EXTENSIONS: &[&str] = &["ts", "mts", "cts"];

/// Values of `importFileExtension`; the empty string means "no extension".
pub const IMPORT_FILE_EXTENSIONS: &[&str] = &["ts", "mts", "cts", "js", "mjs", "cjs", ""];

/// Platforms accepted by `binaryTargets`.
pub const BINARY_TARGETS: &[&str] = &[
    "native",
    "darwin",
    "darwin-arm64",
    "windows",
    "debian-openssl-1.0.x",
    "debian-openssl-1.1.x",
    "debian-openssl-3.0.x",
    "rhel-openssl-1.0.x",
    "rhel-openssl-1.1.x",
    "rhel-openssl-3.0.x",
    "linux-musl",
    "linux-musl-openssl-3.0.x",
    "linux-musl-arm64-openssl-1.1.x",
    "linux-musl-arm64-openssl-3.0.x",
    "linux-arm64-openssl-1.0.x",
    "linux-arm64-openssl-1.1.x",
    "linux-arm64-openssl-3.0.x",
    "linux-arm-openssl-1.0.x",
    "linux-arm-openssl-1.1.x",
    "linux-arm-openssl-3.0.x",
    "linux-nixos",
    "openbsd",
    "netbsd",
    "freebsd11",
    "freebsd12",
    "freebsd13",
    "freebsd14",
    "freebsd15",
];

#[cfg(test)]
mod tests {
    use super::super::{Capabilities, PreviewFeatures};
    use super::*;

    #[test]
    fn block_types_follow_connector_and_views() {
        let mongo = Capabilities::new(Some(Provider::Mongodb), PreviewFeatures::none());
        assert_eq!(
            mongo.select(BLOCK_TYPES).collect::<Vec<_>>(),
            vec!["datasource", "generator", "model", "enum", "type"]
        );

        let sqlite_views = Capabilities::new(
            Some(Provider::Sqlite),
            [PreviewFeature::Views].into_iter().collect(),
        );
        assert_eq!(
            sqlite_views.select(BLOCK_TYPES).collect::<Vec<_>>(),
            vec!["datasource", "generator", "model", "view"]
        );
    }

    #[test]
    fn extensions_need_postgres_and_feature() {
        let plain = Capabilities::new(Some(Provider::Postgresql), PreviewFeatures::none());
        assert!(!plain.select(DATASOURCE_FIELDS).any(|f| f == "extensions"));
        let enabled = Capabilities::new(
            Some(Provider::Postgresql),
            [PreviewFeature::PostgresqlExtensions].into_iter().collect(),
        );
        assert!(enabled.select(DATASOURCE_FIELDS).any(|f| f == "extensions"));
    }

    #[test]
    fn generator_literals_depend_on_flavor() {
        assert_eq!(GeneratorFlavor::Client.literals("runtime"), Some(RUNTIMES));
        assert_eq!(GeneratorFlavor::ClientJs.literals("runtime"), None);
        assert_eq!(GeneratorFlavor::ClientJs.literals("engineType"), Some(ENGINE_TYPES));
        assert_eq!(
            GeneratorFlavor::Other.literals("provider"),
            Some(GENERATOR_PROVIDERS)
        );
    }
}
