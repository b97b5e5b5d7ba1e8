use tower_lsp::lsp_types::*;

use crate::lsp::backend::Backend;
use crate::lsp::document::DocumentState;
use crate::markup;
use crate::validation::engine::Severity;

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    async fn create_document_state(&self, content: String) -> DocumentState;
    async fn publish_diagnostics(&self, uri: Url);
    fn create_lsp_diagnostic(
        &self,
        content: &str,
        validation_diagnostic: crate::validation::engine::Diagnostic,
    ) -> tower_lsp::lsp_types::Diagnostic;
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Create a new document state, checking the content once
    async fn create_document_state(&self, content: String) -> DocumentState {
        let profile_registry = self.profile_registry.lock().await;
        DocumentState::new(content, &profile_registry)
    }

    /// Publish the stored diagnostics for a document
    async fn publish_diagnostics(&self, uri: Url) {
        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return,
        };

        log::debug!(
            "{}: {} diagnostic(s) with profile {:?}",
            uri,
            doc_state.validation.diagnostics.len(),
            doc_state.validation.profile
        );

        let diagnostics = doc_state
            .validation
            .diagnostics
            .iter()
            .cloned()
            .map(|d| self.create_lsp_diagnostic(&doc_state.content, d))
            .collect();
        drop(docs);

        self.client
            .publish_diagnostics(uri, diagnostics, None)
            .await;
    }

    fn create_lsp_diagnostic(
        &self,
        content: &str,
        validation_diagnostic: crate::validation::engine::Diagnostic,
    ) -> tower_lsp::lsp_types::Diagnostic {
        to_lsp_diagnostic(content, validation_diagnostic)
    }
}

/// Convert a validation diagnostic into its LSP form
pub fn to_lsp_diagnostic(
    content: &str,
    validation_diagnostic: crate::validation::engine::Diagnostic,
) -> tower_lsp::lsp_types::Diagnostic {
    let severity = match validation_diagnostic.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
    };

    tower_lsp::lsp_types::Diagnostic::new(
        diagnostic_range(content, validation_diagnostic.position),
        Some(severity),
        validation_diagnostic
            .code
            .map(|code| NumberOrString::String(code.to_string())),
        Some("tagbalance".to_string()),
        validation_diagnostic.message,
        None,
        None,
    )
}

/// Range covering `position` up to the end of its line.
///
/// Issues without a position (unclosed tags) are placed at the end of
/// the document.
pub fn diagnostic_range(content: &str, position: Option<markup::Position>) -> Range {
    let Some(position) = position else {
        let end = end_of_document(content);
        return Range::new(end, end);
    };

    let line_idx = position.line.saturating_sub(1);
    let line = content.lines().nth(line_idx).unwrap_or("");

    let start = utf16_len(line.chars().take(position.column.saturating_sub(1)));
    let end = utf16_len(line.chars());

    Range::new(
        Position::new(line_idx as u32, start),
        Position::new(line_idx as u32, end.max(start)),
    )
}

/// LSP position just past the last character of `content`
pub fn end_of_document(content: &str) -> Position {
    let line = content.matches('\n').count();
    let last_line = content.rsplit('\n').next().unwrap_or("");
    Position::new(line as u32, utf16_len(last_line.chars()))
}

fn utf16_len(chars: impl Iterator<Item = char>) -> u32 {
    chars.map(|c| c.len_utf16() as u32).sum()
}
