pub mod pdf;

pub use pdf::PdfTokenSource;

use std::path::Path;

use crate::error::ExtractError;

/// A positioned fragment of page text with its bounding box, as emitted by
/// layout-aware extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageToken {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    pub text: String,
}

/// Positioned tokens for one page plus a plain-text fallback rendering.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub tokens: Vec<PageToken>,
    pub plain_text: String,
}

/// Layout-aware text extraction for the first page of a document.
pub trait TokenSource: Send + Sync {
    fn first_page(&self, path: &Path) -> Result<PageContent, ExtractError>;
}

/// Renders the token sequence in its literal textual form, a list of
/// five-element groups: `[[left, top, right, bottom, 'text'], ...]`.
/// This is the exact payload shape the interpretation prompt documents.
pub fn render_token_list(tokens: &[PageToken]) -> String {
    let mut out = String::from("[");
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let text = token.text.replace('\\', "\\\\").replace('\'', "\\'");
        out.push_str(&format!(
            "[{}, {}, {}, {}, '{}']",
            token.left, token.top, token.right, token.bottom, text
        ));
    }
    out.push(']');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(left: i64, top: i64, right: i64, bottom: i64, text: &str) -> PageToken {
        PageToken {
            left,
            top,
            right,
            bottom,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_render_empty_token_list() {
        assert_eq!(render_token_list(&[]), "[]");
    }

    #[test]
    fn test_render_matches_prompt_payload_shape() {
        let tokens = vec![
            token(161, 22, 422, 42, "电子发票（增值税专用发票）"),
            token(438, 31, 571, 41, "发票号码：24322000000479248343"),
        ];
        assert_eq!(
            render_token_list(&tokens),
            "[[161, 22, 422, 42, '电子发票（增值税专用发票）'], \
             [438, 31, 571, 41, '发票号码：24322000000479248343']]"
        );
    }

    #[test]
    fn test_render_escapes_quotes_and_backslashes() {
        let tokens = vec![token(0, 0, 1, 1, r"it's a\b")];
        assert_eq!(render_token_list(&tokens), r"[[0, 0, 1, 1, 'it\'s a\\b']]");
    }
}
