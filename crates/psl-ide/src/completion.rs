//! Code completion for Prisma schemas.
//!
//! [`complete`] locates the cursor, classifies what is being typed and emits
//! candidates from the capability tables and the schema itself. Candidates
//! are never filtered by the typed prefix; editors do that.

use psl_syntax::{Block, BlockKind, Field, Position, Schema};
use smol_str::SmolStr;
use tracing::debug;

use crate::capabilities::attributes::{
    argument_names, argument_literals, bound_argument, per_field_options, LiteralSet,
    BLOCK_ATTRIBUTES, BOOLEANS, COMPOSITE_FIELD_ATTRIBUTES, EMPTY_STRING, ENUM_BLOCK_ATTRIBUTES,
    ENUM_VALUE_ATTRIBUTES, FIELD_ATTRIBUTES, ONCE_PER_BLOCK, SORT_ORDERS,
};
use crate::capabilities::blocks::{
    GeneratorFlavor, BINARY_TARGETS, BLOCK_TYPES, DATASOURCE_FIELDS, RELATION_MODES, URL_FIELDS,
};
use crate::capabilities::defaults::{default_values, function_arguments, DefaultValue};
use crate::capabilities::native_types::{default_native_type, native_types};
use crate::capabilities::operator_classes::{operator_classes, RAW};
use crate::capabilities::{scalar_types, Capabilities, PreviewFeature, Provider, ScalarType};
use crate::context::{classify, CompletionContext, FieldLine};
use crate::locator::locate;
use crate::resolve::{resolve_path, ResolvedType};

/// The kind of completion item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    /// A block keyword.
    Class,
    /// A field or configuration key.
    Field,
    /// An attribute, argument name or placeholder string.
    Property,
    /// A literal value.
    Value,
    /// A fixed identifier such as a connector name.
    Constant,
    /// A generator function.
    Function,
    /// A member of a literal set such as a referential action.
    EnumMember,
    /// A declared block used as a type.
    Reference,
    /// A scalar or native type.
    TypeParameter,
}

/// A completion item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    /// The label shown in the completion list.
    pub label: SmolStr,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Additional detail.
    pub detail: Option<SmolStr>,
    /// Text to insert (if different from label).
    pub insert_text: Option<SmolStr>,
}

impl CompletionItem {
    /// Creates a new completion item.
    pub fn new(label: impl Into<SmolStr>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            insert_text: None,
        }
    }

    /// Sets the detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<SmolStr>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the insert text.
    #[must_use]
    pub fn with_insert_text(mut self, text: impl Into<SmolStr>) -> Self {
        self.insert_text = Some(text.into());
        self
    }
}

/// Items for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionList {
    /// `true` when the items come from an open set that a newer schema
    /// version may extend.
    pub is_incomplete: bool,
    /// Items in presentation order.
    pub items: Vec<CompletionItem>,
}

impl CompletionList {
    fn closed(items: Vec<CompletionItem>) -> Self {
        Self {
            is_incomplete: false,
            items,
        }
    }

    fn open(items: Vec<CompletionItem>) -> Self {
        Self {
            is_incomplete: true,
            items,
        }
    }

    /// Labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.label.as_str())
    }
}

/// How the request was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trigger {
    /// Explicit invocation or typing an identifier.
    #[default]
    Invoked,
    /// Typing one of the advertised trigger characters.
    Character(char),
}

/// Computes completions at the given position.
#[must_use]
pub fn complete(schema: &Schema, uri: &str, position: Position) -> Option<CompletionList> {
    complete_with_trigger(schema, uri, position, Trigger::Invoked)
}

/// Computes completions for a request started by `trigger`.
///
/// Returns `None` for an unknown document, a position outside it, or a
/// position where nothing can be completed. A `"` trigger only answers
/// inside strings.
#[must_use]
pub fn complete_with_trigger(
    schema: &Schema,
    uri: &str,
    position: Position,
    trigger: Trigger,
) -> Option<CompletionList> {
    let document = schema.document(uri)?;
    let offset = document.offset(position)?;
    let location = locate(document, offset);
    let context = classify(schema, &location)?;

    if trigger == Trigger::Character('"') && !is_string_context(&context) {
        debug!(context = context_name(&context), "ignoring quote trigger");
        return None;
    }

    let caps = Capabilities::from_schema(schema);
    let list = generate(schema, &caps, &context);
    debug!(
        context = context_name(&context),
        items = list.items.len(),
        is_incomplete = list.is_incomplete,
        "computed completions"
    );
    Some(list)
}

/// Classifies the position without generating candidates.
#[must_use]
pub fn completion_context<'s>(
    schema: &'s Schema,
    uri: &str,
    position: Position,
) -> Option<CompletionContext<'s>> {
    let document = schema.document(uri)?;
    let offset = document.offset(position)?;
    classify(schema, &locate(document, offset))
}

fn is_string_context(context: &CompletionContext<'_>) -> bool {
    matches!(
        context,
        CompletionContext::ConfigValueString { .. }
            | CompletionContext::ConfigValueList { .. }
            | CompletionContext::EnvVariable { .. }
            | CompletionContext::AttributeArgumentValueString { .. }
    )
}

fn context_name(context: &CompletionContext<'_>) -> &'static str {
    match context {
        CompletionContext::TopLevelBlockType => "top-level",
        CompletionContext::DatasourceOrGeneratorField { .. } => "config-key",
        CompletionContext::ConfigValue { .. } => "config-value",
        CompletionContext::ConfigValueString { .. } => "config-string",
        CompletionContext::ConfigValueList { .. } => "config-list",
        CompletionContext::EnvVariable { .. } => "env",
        CompletionContext::ModelBodyField { .. } => "body-field",
        CompletionContext::FieldTypeName { .. } => "field-type",
        CompletionContext::FieldAttribute { .. } => "field-attribute",
        CompletionContext::NativeType { .. } => "native-type",
        CompletionContext::BlockAttribute { .. } => "block-attribute",
        CompletionContext::AttributeArgumentName { .. } => "argument-name",
        CompletionContext::AttributeArgumentValue { .. } => "argument-value",
        CompletionContext::AttributeArgumentValueString { .. } => "argument-string",
        CompletionContext::FieldReferenceList { .. } => "field-references",
        CompletionContext::PerFieldOptionArgument { .. } => "field-option",
        CompletionContext::PerFieldOptionValue { .. } => "field-option-value",
        CompletionContext::DefaultFunctionArgument { .. } => "function-argument",
    }
}

fn generate(
    schema: &Schema,
    caps: &Capabilities,
    context: &CompletionContext<'_>,
) -> CompletionList {
    match context {
        CompletionContext::TopLevelBlockType => {
            CompletionList::closed(items(caps.select(BLOCK_TYPES), CompletionKind::Class))
        }
        CompletionContext::DatasourceOrGeneratorField { block } => configuration_keys(caps, block),
        CompletionContext::ConfigValue { block, key } => configuration_value(block, key),
        CompletionContext::ConfigValueString { block, key, .. } => {
            configuration_string(block, key)
        }
        CompletionContext::ConfigValueList { block, key, listed } => {
            configuration_list(block, key, listed)
        }
        CompletionContext::EnvVariable { block, key } => {
            let variable = URL_FIELDS
                .iter()
                .find(|(field, _)| block.kind == BlockKind::Datasource && *field == key.as_str())
                .map(|(_, variable)| *variable);
            CompletionList::closed(items(variable, CompletionKind::Constant))
        }
        CompletionContext::ModelBodyField { .. } => CompletionList::closed(Vec::new()),
        CompletionContext::FieldTypeName { .. } => {
            let mut list = items(scalar_types(caps), CompletionKind::TypeParameter);
            list.extend(
                schema
                    .blocks()
                    .filter(|block| block.kind.declares_type())
                    .map(|block| {
                        CompletionItem::new(block.name.clone(), CompletionKind::Reference)
                    }),
            );
            CompletionList::open(list)
        }
        CompletionContext::FieldAttribute { block, field } => match field {
            FieldLine::Field(field) => field_attributes(schema, caps, block, field),
            FieldLine::Value(value) => CompletionList::closed(items(
                caps.select(ENUM_VALUE_ATTRIBUTES)
                    .filter(|label| !value.has_attribute(&label[1..])),
                CompletionKind::Property,
            )),
        },
        CompletionContext::NativeType { field, .. } => {
            let scalar = ResolvedType::of_field(schema, field).scalar();
            let labels = caps
                .provider
                .zip(scalar)
                .map_or(&[][..], |(provider, scalar)| native_types(provider, scalar));
            CompletionList::closed(items(labels.iter().copied(), CompletionKind::TypeParameter))
        }
        CompletionContext::BlockAttribute { block } => block_attributes(caps, block),
        CompletionContext::AttributeArgumentName {
            attribute, used, ..
        } => {
            let names = caps
                .select(argument_names(attribute))
                .filter(|label| !used.iter().any(|bound| bound == bound_argument(label)));
            CompletionList::closed(
                names
                    .map(|label| {
                        let item = CompletionItem::new(label, CompletionKind::Property);
                        if label == EMPTY_STRING {
                            item
                        } else {
                            item.with_insert_text(format!("{label}: "))
                        }
                    })
                    .collect(),
            )
        }
        CompletionContext::AttributeArgumentValue {
            field,
            attribute,
            argument,
            ..
        } => match argument {
            None => leading_value(schema, caps, attribute, *field),
            Some(argument) => argument_value(caps, argument),
        },
        CompletionContext::AttributeArgumentValueString {
            attribute, argument, ..
        } => {
            let schemas = attribute == "@@schema" && argument.is_none();
            let labels = caps.schemas.iter().filter(|_| schemas).cloned();
            CompletionList::closed(items(labels, CompletionKind::Property))
        }
        CompletionContext::FieldReferenceList {
            block,
            listed,
            path,
            partial,
            relations,
        } => field_references(schema, *block, listed, path, partial, *relations),
        CompletionContext::PerFieldOptionArgument {
            attribute,
            field_type,
        } => {
            let scalar = field_type.as_deref().and_then(ScalarType::from_name);
            CompletionList::closed(items(
                per_field_options(attribute, scalar, caps),
                CompletionKind::Property,
            ))
        }
        CompletionContext::PerFieldOptionValue {
            argument,
            field,
            index_type,
            ..
        } => per_field_value(schema, caps, argument, *field, index_type.as_deref()),
        CompletionContext::DefaultFunctionArgument { function, used } => {
            let used: Vec<&str> = used.iter().map(SmolStr::as_str).collect();
            CompletionList::closed(items(
                function_arguments(function, &used),
                CompletionKind::Property,
            ))
        }
    }
}

fn items<L>(labels: impl IntoIterator<Item = L>, kind: CompletionKind) -> Vec<CompletionItem>
where
    L: Into<SmolStr>,
{
    labels
        .into_iter()
        .map(|label| CompletionItem::new(label, kind))
        .collect()
}

fn configuration_keys(caps: &Capabilities, block: &Block) -> CompletionList {
    let declared = |key: &&str| block.property(key).is_none();
    let keys: Vec<&str> = if block.kind == BlockKind::Datasource {
        caps.select(DATASOURCE_FIELDS).filter(declared).collect()
    } else {
        let flavor = GeneratorFlavor::from_provider(block.string_property("provider"));
        flavor.fields().iter().copied().filter(declared).collect()
    };
    CompletionList::closed(items(keys, CompletionKind::Field))
}

fn configuration_value(block: &Block, key: &str) -> CompletionList {
    let string = || CompletionItem::new(EMPTY_STRING, CompletionKind::Property);
    match (block.kind, key) {
        (BlockKind::Datasource, "provider") => CompletionList::open(vec![string()]),
        (BlockKind::Datasource, "relationMode") => CompletionList::closed(items(
            RELATION_MODES.iter().map(|mode| format!("\"{mode}\"")),
            CompletionKind::Field,
        )),
        (BlockKind::Datasource, key) if URL_FIELDS.iter().any(|(field, _)| *field == key) => {
            CompletionList::closed(vec![
                CompletionItem::new("env()", CompletionKind::Property)
                    .with_detail("Read the connection string from an environment variable"),
                string(),
            ])
        }
        (BlockKind::Generator, "previewFeatures" | "binaryTargets") => {
            CompletionList::closed(vec![CompletionItem::new("[]", CompletionKind::Value)])
        }
        (BlockKind::Generator, "output") => CompletionList::closed(vec![string()]),
        (BlockKind::Generator, key) => {
            let flavor = GeneratorFlavor::from_provider(block.string_property("provider"));
            match flavor.literals(key) {
                Some(_) => CompletionList::open(vec![string()]),
                None => CompletionList::closed(Vec::new()),
            }
        }
        _ => CompletionList::closed(Vec::new()),
    }
}

fn configuration_string(block: &Block, key: &str) -> CompletionList {
    match (block.kind, key) {
        (BlockKind::Datasource, "provider") => CompletionList::open(items(
            Provider::ALL.map(Provider::name),
            CompletionKind::Constant,
        )),
        (BlockKind::Datasource, "relationMode") => {
            CompletionList::closed(items(RELATION_MODES.iter().copied(), CompletionKind::Field))
        }
        (BlockKind::Generator, key) => {
            let flavor = GeneratorFlavor::from_provider(block.string_property("provider"));
            match flavor.literals(key) {
                Some(literals) => {
                    CompletionList::open(items(literals.iter().copied(), CompletionKind::Constant))
                }
                None => CompletionList::closed(Vec::new()),
            }
        }
        _ => CompletionList::closed(Vec::new()),
    }
}

fn configuration_list(block: &Block, key: &str, listed: &[SmolStr]) -> CompletionList {
    let unlisted = |label: &&str| !listed.iter().any(|item| item.eq_ignore_ascii_case(label));
    match (block.kind, key) {
        (BlockKind::Generator, "previewFeatures") => CompletionList::open(items(
            PreviewFeature::ALL.map(PreviewFeature::name).into_iter().filter(unlisted),
            CompletionKind::Constant,
        )),
        (BlockKind::Generator, "binaryTargets") => CompletionList::open(items(
            BINARY_TARGETS.iter().copied().filter(unlisted),
            CompletionKind::Constant,
        )),
        _ => CompletionList::closed(Vec::new()),
    }
}

/// Fields named by the `fields` argument (or the leading list) of every
/// `@@name` attribute on `block`.
fn fields_in_block_attribute<'b>(
    block: &'b Block,
    name: &'b str,
) -> impl Iterator<Item = &'b str> {
    block
        .attributes_named(name)
        .filter_map(|attribute| {
            attribute
                .argument("fields")
                .or_else(|| attribute.positional())
                .and_then(|argument| argument.value.as_array())
        })
        .flatten()
        .filter_map(psl_syntax::Expr::reference_name)
}

fn field_attributes(
    schema: &Schema,
    caps: &Capabilities,
    block: &Block,
    field: &Field,
) -> CompletionList {
    let resolved = ResolvedType::of_field(schema, field);
    let candidates: Vec<&str> = if block.kind == BlockKind::CompositeType {
        caps.select(COMPOSITE_FIELD_ATTRIBUTES)
            .filter(|label| !field_carries(field, label))
            .collect()
    } else {
        caps.select(FIELD_ATTRIBUTES)
            .filter(|label| !field_carries(field, label))
            .filter(|label| match *label {
                "@id" => {
                    !resolved.is_relation()
                        && !resolved.is_composite()
                        && !block.has_attribute("id")
                        && !block
                            .fields
                            .iter()
                            .any(|other| other.name != field.name && other.has_attribute("id"))
                }
                "@unique" => {
                    !fields_in_block_attribute(block, "unique").any(|name| field.name == name)
                }
                "@default" | "@relation" => !resolved.is_composite(),
                "@updatedAt" => resolved.scalar() == Some(ScalarType::DateTime),
                "@ignore" => !block.has_attribute("ignore"),
                _ => true,
            })
            .collect()
    };
    CompletionList::closed(items(candidates, CompletionKind::Property))
}

/// Returns `true` if `field` already has the attribute `label`; `@db` counts
/// as present once any native type is set.
fn field_carries(field: &Field, label: &str) -> bool {
    match label {
        "@db" => field.native_type().is_some(),
        _ => field.has_attribute(&label[1..]),
    }
}

fn block_attributes(caps: &Capabilities, block: &Block) -> CompletionList {
    let table = match block.kind {
        BlockKind::Model | BlockKind::View => BLOCK_ATTRIBUTES,
        BlockKind::Enum => ENUM_BLOCK_ATTRIBUTES,
        _ => &[],
    };
    let field_id = block.fields.iter().any(|field| field.has_attribute("id"));
    let labels = caps
        .select(table)
        .filter(|label| !(ONCE_PER_BLOCK.contains(label) && block.has_attribute(&label[2..])))
        .filter(|label| !(*label == "@@id" && field_id));
    CompletionList::closed(items(labels, CompletionKind::Property))
}

fn leading_value(
    schema: &Schema,
    caps: &Capabilities,
    attribute: &str,
    field: Option<&Field>,
) -> CompletionList {
    match attribute {
        "@default" => {
            let resolved = field.map_or(ResolvedType::Unknown, |field| {
                ResolvedType::of_field(schema, field)
            });
            let defaults = default_values(resolved.scalar(), caps);
            let mut list = Vec::new();
            if field.is_some_and(Field::is_list) {
                list.push(CompletionItem::new("[]", CompletionKind::Value));
                list.extend(defaults.into_iter().take(1).map(default_item));
                return CompletionList::closed(list);
            }
            list.extend(defaults.into_iter().map(default_item));
            if let ResolvedType::Enum(declared) = resolved {
                list.extend(
                    declared
                        .values
                        .iter()
                        .map(|value| {
                            CompletionItem::new(value.name.clone(), CompletionKind::Value)
                        }),
                );
            }
            CompletionList::closed(list)
        }
        "@@schema" => CompletionList::closed(items(
            caps.schemas.iter().map(|name| format!("\"{name}\"")),
            CompletionKind::Property,
        )),
        _ => CompletionList::closed(vec![CompletionItem::new(
            EMPTY_STRING,
            CompletionKind::Property,
        )]),
    }
}

fn default_item(value: DefaultValue) -> CompletionItem {
    match value {
        DefaultValue::Function(label) => CompletionItem::new(label, CompletionKind::Function),
        DefaultValue::Literal(label) => CompletionItem::new(label, CompletionKind::Value),
    }
}

fn argument_value(caps: &Capabilities, argument: &str) -> CompletionList {
    let list = match argument_literals(argument) {
        Some(LiteralSet::Members(table)) => items(caps.select(table), CompletionKind::EnumMember),
        Some(LiteralSet::Booleans) => items(caps.select(BOOLEANS), CompletionKind::Value),
        Some(LiteralSet::String) => {
            vec![CompletionItem::new(EMPTY_STRING, CompletionKind::Property)]
        }
        Some(LiteralSet::Array) => vec![CompletionItem::new("[]", CompletionKind::Value)],
        None => Vec::new(),
    };
    CompletionList::closed(list)
}

fn field_references(
    schema: &Schema,
    block: Option<&Block>,
    listed: &[SmolStr],
    path: &[SmolStr],
    partial: &str,
    relations: bool,
) -> CompletionList {
    let Some(block) = block else {
        return CompletionList::closed(Vec::new());
    };
    let target = if path.is_empty() {
        Some(block)
    } else if partial.is_empty() {
        resolve_path(schema, block, path)
    } else {
        None
    };
    let Some(target) = target else {
        return CompletionList::closed(Vec::new());
    };

    let prefix = path.join(".");
    let labels = target
        .fields
        .iter()
        .filter(|field| {
            if prefix.is_empty() {
                !listed.contains(&field.name)
            } else {
                let full = format!("{prefix}.{}", field.name);
                !listed.iter().any(|item| *item == full)
            }
        })
        .filter(|field| relations || !ResolvedType::of_field(schema, field).is_relation())
        .map(|field| field.name.clone());
    CompletionList::closed(items(labels, CompletionKind::Field))
}

fn per_field_value(
    schema: &Schema,
    caps: &Capabilities,
    argument: &str,
    field: Option<&Field>,
    index_type: Option<&str>,
) -> CompletionList {
    match argument {
        "sort" => CompletionList::closed(items(
            caps.select(SORT_ORDERS),
            CompletionKind::EnumMember,
        )),
        "ops" => {
            let Some(provider) = caps.provider else {
                return CompletionList::closed(Vec::new());
            };
            let native = field.and_then(|field| {
                field.native_type().or_else(|| {
                    let scalar = ResolvedType::of_field(schema, field).scalar()?;
                    default_native_type(provider, scalar)
                })
            });
            let is_list = field.is_some_and(Field::is_list);
            let classes = native.map_or(&[][..], |native| {
                operator_classes(provider, index_type, native, is_list)
            });
            let mut list = items(classes.iter().copied(), CompletionKind::EnumMember);
            list.push(CompletionItem::new(RAW, CompletionKind::Function));
            CompletionList::closed(list)
        }
        _ => CompletionList::closed(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(source: &str) -> (Schema, Position) {
        let cursor = source.find('|').expect("cursor marker");
        let mut text = source.to_string();
        text.remove(cursor);
        let schema = Schema::single_file("file:///schema.prisma", text);
        let position = schema.documents()[0].position(psl_syntax::TextSize::from(cursor as u32));
        (schema, position)
    }

    #[test]
    fn unknown_document_has_no_completions() {
        let (schema, position) = at("|");
        assert!(complete(&schema, "file:///other.prisma", position).is_none());
    }

    #[test]
    fn position_past_the_document_has_no_completions() {
        let (schema, _) = at("model A {\n}\n|");
        assert!(complete(&schema, "file:///schema.prisma", Position::new(40, 0)).is_none());
    }

    #[test]
    fn quote_trigger_only_answers_inside_strings() {
        let (schema, position) = at("model A {\n  id Int |\n}\n");
        let uri = "file:///schema.prisma";
        assert!(complete_with_trigger(&schema, uri, position, Trigger::Character('"')).is_none());
        assert!(complete_with_trigger(&schema, uri, position, Trigger::Character('@')).is_some());

        let (schema, position) = at("datasource db {\n  provider = \"|\"\n}\n");
        let list = complete_with_trigger(&schema, uri, position, Trigger::Character('"')).unwrap();
        assert!(list.is_incomplete);
        assert_eq!(list.labels().next(), Some("mysql"));
    }

    #[test]
    fn argument_names_insert_a_colon() {
        let (schema, position) = at("model A {\n  id Int @id(|)\n}\n");
        let list = complete(&schema, "file:///schema.prisma", position).unwrap();
        assert_eq!(list.items[0].label, "map");
        assert_eq!(list.items[0].insert_text.as_deref(), Some("map: "));
    }
}
