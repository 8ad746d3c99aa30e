//! Presentation formats for completion candidates.
//!
//! The candidate set is computed once; the format only decides how it is
//! serialized for the calling editor integration.

use serde::{Serialize, Serializer};

use crate::types::{CompletionCandidate, ExtendedCompletionItem, PlainCompletionItem};

/// Which serialization a [`CompletionList`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionFormat {
    /// Rich editor-widget shape (numeric kind, `sortText`).
    Extended,
    /// Plain string-keyed shape (`type`, `apply`, `boost`).
    #[default]
    Plain,
}

impl CompletionFormat {
    pub fn from_extended_flag(use_extended_format: bool) -> Self {
        if use_extended_format {
            Self::Extended
        } else {
            Self::Plain
        }
    }
}

impl From<&CompletionCandidate> for ExtendedCompletionItem {
    fn from(candidate: &CompletionCandidate) -> Self {
        Self {
            label: candidate.label.clone(),
            kind: candidate.kind.editor_kind(),
            detail: candidate.detail.clone(),
            documentation: candidate.documentation.clone(),
            insert_text: candidate.insert_text.clone(),
            sort_text: candidate.sort_rank.clone(),
        }
    }
}

/// Boost for the candidate at `position`: first is highest.
fn boost(position: usize) -> i32 {
    let position = i32::try_from(position).unwrap_or(i32::MAX);
    99_i32.saturating_sub(position).max(-99)
}

fn plain_item(position: usize, candidate: &CompletionCandidate) -> PlainCompletionItem {
    PlainCompletionItem {
        label: candidate.label.clone(),
        kind: candidate.kind.as_str().to_string(),
        detail: candidate.detail.clone(),
        info: candidate.documentation.clone(),
        apply: candidate.insert_text.clone(),
        boost: boost(position),
    }
}

/// A rendered candidate in either format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CompletionItem {
    Extended(ExtendedCompletionItem),
    Plain(PlainCompletionItem),
}

/// Result of a completion request.
///
/// Serializes as a JSON array of items in the requested format.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionList {
    format: CompletionFormat,
    candidates: Vec<CompletionCandidate>,
}

impl CompletionList {
    pub fn new(format: CompletionFormat, candidates: Vec<CompletionCandidate>) -> Self {
        Self { format, candidates }
    }

    pub fn format(&self) -> CompletionFormat {
        self.format
    }

    /// The ranked candidates, independent of format.
    pub fn candidates(&self) -> &[CompletionCandidate] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<CompletionCandidate> {
        self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn items(&self) -> Vec<CompletionItem> {
        self.candidates
            .iter()
            .enumerate()
            .map(|(position, candidate)| match self.format {
                CompletionFormat::Extended => CompletionItem::Extended(candidate.into()),
                CompletionFormat::Plain => CompletionItem::Plain(plain_item(position, candidate)),
            })
            .collect()
    }
}

impl Serialize for CompletionList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CandidateKind;

    fn candidate(label: &str, kind: CandidateKind) -> CompletionCandidate {
        CompletionCandidate {
            label: label.to_string(),
            kind,
            detail: "text".to_string(),
            documentation: "doc".to_string(),
            insert_text: label.to_string(),
            sort_rank: "2000000".to_string(),
        }
    }

    #[test]
    fn test_extended_shape() {
        let list = CompletionList::new(
            CompletionFormat::Extended,
            vec![candidate("name", CandidateKind::Field)],
        );
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json[0]["kind"], 3);
        assert_eq!(json[0]["insertText"], "name");
        assert_eq!(json[0]["sortText"], "2000000");
    }

    #[test]
    fn test_plain_shape() {
        let list = CompletionList::new(
            CompletionFormat::Plain,
            vec![
                candidate("name", CandidateKind::Field),
                candidate("region", CandidateKind::Field),
            ],
        );
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json[0]["type"], "field");
        assert_eq!(json[0]["apply"], "name");
        assert_eq!(json[0]["boost"], 99);
        assert_eq!(json[1]["boost"], 98);
    }

    #[test]
    fn test_boost_floor() {
        assert_eq!(boost(0), 99);
        assert_eq!(boost(500), -99);
        assert_eq!(boost(usize::MAX), -99);
    }

    #[test]
    fn test_format_does_not_change_candidates() {
        let candidates = vec![candidate("name", CandidateKind::Field)];
        let a = CompletionList::new(CompletionFormat::Extended, candidates.clone());
        let b = CompletionList::new(CompletionFormat::Plain, candidates);
        assert_eq!(a.candidates(), b.candidates());
    }
}
