//! `textDocument/completion` conversion between `lsp-types` and the engine.

use lsp_types::{
    CompletionItem, CompletionItemKind, CompletionList, CompletionOptions, CompletionParams,
    CompletionTriggerKind, Position,
};
use psl_ide::{CompletionKind, Trigger};
use psl_syntax::Schema;
use tracing::debug;

use crate::config::ProjectConfig;

/// Answers a completion request against `schema`.
///
/// Returns `None` when the document is unknown or no completion context
/// applies at the requested position.
pub fn handle_completion_request(
    schema: &Schema,
    params: &CompletionParams,
) -> Option<CompletionList> {
    let text_document_position = &params.text_document_position;
    let uri = text_document_position.text_document.uri.to_string();
    let trigger = params
        .context
        .as_ref()
        .filter(|context| context.trigger_kind == CompletionTriggerKind::TRIGGER_CHARACTER)
        .and_then(|context| context.trigger_character.as_deref());
    completion_response(schema, &uri, text_document_position.position, trigger)
}

/// Computes the completion list for a document URI and position.
pub fn completion_response(
    schema: &Schema,
    uri: &str,
    position: Position,
    trigger_character: Option<&str>,
) -> Option<CompletionList> {
    let trigger = trigger_character
        .and_then(|text| text.chars().next())
        .map_or(Trigger::Invoked, Trigger::Character);
    let position = psl_syntax::Position::new(position.line, position.character);
    let list = psl_ide::complete_with_trigger(schema, uri, position, trigger)?;
    debug!(
        uri,
        line = position.line,
        character = position.character,
        items = list.items.len(),
        "completion response"
    );

    // Candidate order is meaningful, so pin it with sort text.
    let items = list
        .items
        .into_iter()
        .enumerate()
        .map(|(index, item)| CompletionItem {
            label: item.label.to_string(),
            kind: Some(completion_kind(item.kind)),
            detail: item.detail.map(|detail| detail.to_string()),
            insert_text: item.insert_text.map(|text| text.to_string()),
            sort_text: Some(format!("{index:05}")),
            ..Default::default()
        })
        .collect();

    Some(CompletionList {
        is_incomplete: list.is_incomplete,
        items,
    })
}

/// Maps an engine completion kind onto the protocol's item kind.
#[must_use]
pub fn completion_kind(kind: CompletionKind) -> CompletionItemKind {
    match kind {
        CompletionKind::Class => CompletionItemKind::CLASS,
        CompletionKind::Field => CompletionItemKind::FIELD,
        CompletionKind::Property => CompletionItemKind::PROPERTY,
        CompletionKind::Value => CompletionItemKind::VALUE,
        CompletionKind::Constant => CompletionItemKind::CONSTANT,
        CompletionKind::Function => CompletionItemKind::FUNCTION,
        CompletionKind::EnumMember => CompletionItemKind::ENUM_MEMBER,
        CompletionKind::Reference => CompletionItemKind::REFERENCE,
        CompletionKind::TypeParameter => CompletionItemKind::TYPE_PARAMETER,
    }
}

/// Completion capabilities advertised to the client.
#[must_use]
pub fn completion_options(config: &ProjectConfig) -> CompletionOptions {
    CompletionOptions {
        trigger_characters: Some(config.trigger_characters.clone()),
        resolve_provider: Some(false),
        ..Default::default()
    }
}
