//! LSP server for phpaccess IDE integration
//!
//! Offers the three generation actions as code actions on PHP documents.
//! Choosing an action is the confirmation: every candidate class is included.
//!
//! Usage:
//!   phpaccess lsp
//!
//! Configure in VS Code settings.json:
//! ```json
//! {
//!   "phpaccess.enable": true,
//!   "phpaccess.path": "/path/to/phpaccess"
//! }
//! ```

use std::collections::HashMap;

use phpaccess_core::{SourceText, TextPosition};
use phpaccess_gen::{generate, AcceptAll, Action, GenerateOptions, Generation, ParserConfig, PlannedEdit, Visibility};
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::debug;

/// Settings the server applies to every request
#[derive(Debug, Clone, Copy)]
pub struct LspSettings {
    pub visibility: Visibility,
    pub tab_size: usize,
}

/// phpaccess LSP server backend
pub struct PhpAccessLsp {
    client: Client,
    settings: LspSettings,
    documents: RwLock<HashMap<Url, String>>,
}

impl PhpAccessLsp {
    pub fn new(client: Client, settings: LspSettings) -> Self {
        Self {
            client,
            settings,
            documents: RwLock::new(HashMap::new()),
        }
    }

    async fn document_text(&self, uri: &Url) -> Option<String> {
        self.documents.read().await.get(uri).cloned()
    }
}

/// Run one action against a document and turn the result into a code action
async fn action_for(
    action: Action,
    uri: &Url,
    text: &str,
    settings: LspSettings,
) -> Option<CodeAction> {
    let options = GenerateOptions::new(action.kinds())
        .with_visibility(settings.visibility)
        .with_tab_size(settings.tab_size)
        .with_parser(ParserConfig::new(uri.path()));

    let planned = match generate(text, &options, &mut AcceptAll).await {
        Ok(Generation::Edited { planned, .. }) => planned,
        Ok(Generation::Cancelled) => return None,
        Err(error) => {
            debug!(action = action.name(), %error, "action not offered");
            return None;
        }
    };

    let edits = to_text_edits(&planned, text);
    let mut changes = HashMap::new();
    changes.insert(uri.clone(), edits);

    Some(CodeAction {
        title: action.description().to_string(),
        kind: Some(CodeActionKind::REFACTOR),
        diagnostics: None,
        edit: Some(WorkspaceEdit {
            changes: Some(changes),
            document_changes: None,
            change_annotations: None,
        }),
        command: None,
        is_preferred: None,
        disabled: None,
        data: None,
    })
}

fn to_text_edits(planned: &[PlannedEdit], text: &str) -> Vec<TextEdit> {
    let source = SourceText::new(text);
    planned
        .iter()
        .map(|edit| {
            let range = edit.insert_at.range();
            TextEdit {
                range: Range {
                    start: to_lsp_position(&source, range.start),
                    end: to_lsp_position(&source, range.end),
                },
                new_text: edit.text.clone(),
            }
        })
        .collect()
}

/// Clamp a position to the document and count its column in UTF-16 units
fn to_lsp_position(source: &SourceText<'_>, position: TextPosition) -> Position {
    let offset = source.offset_at(position);
    let clamped = source.position_at(offset);
    let line_start = source.offset_at(TextPosition::new(clamped.line, 0));
    let character = source.text()[line_start..offset].encode_utf16().count();

    Position {
        line: clamped.line as u32,
        character: character as u32,
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for PhpAccessLsp {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "phpaccess".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "phpaccess LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;

        if uri.path().ends_with(".php") {
            self.documents
                .write()
                .await
                .insert(uri, params.text_document.text);
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;

        if uri.path().ends_with(".php") {
            if let Some(change) = params.content_changes.into_iter().next() {
                self.documents.write().await.insert(uri, change.text);
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents
            .write()
            .await
            .remove(&params.text_document.uri);
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let uri = params.text_document.uri;

        if !uri.path().ends_with(".php") {
            return Ok(None);
        }

        let Some(text) = self.document_text(&uri).await else {
            self.client
                .show_message(MessageType::ERROR, "There is no active editor!")
                .await;
            return Ok(None);
        };

        let mut actions = Vec::new();
        for action in Action::ALL {
            if let Some(code_action) = action_for(action, &uri, &text, self.settings).await {
                actions.push(CodeActionOrCommand::CodeAction(code_action));
            }
        }

        if actions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(actions))
        }
    }
}

/// Run the LSP server
pub async fn run_lsp_server(settings: LspSettings) {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| PhpAccessLsp::new(client, settings));
    Server::new(stdin, stdout, socket).serve(service).await;
}
