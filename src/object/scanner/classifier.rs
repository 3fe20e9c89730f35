use log::trace;

use crate::object::types::{CaseMatching, ObjectKind};

/// Maps file names to object kinds by their type token
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectClassifier {
    case_matching: CaseMatching,
}

impl ObjectClassifier {
    pub fn new(case_matching: CaseMatching) -> Self {
        Self { case_matching }
    }

    /// First kind whose token occurs in the file name, in [`ObjectKind::ALL`] order
    pub fn classify(&self, file_name: &str) -> Option<ObjectKind> {
        let lowered = file_name.to_lowercase();

        let kind = ObjectKind::ALL.into_iter().find(|kind| {
            let token = kind.file_token();
            match self.case_matching {
                CaseMatching::Legacy => lowered.contains(token),
                CaseMatching::Insensitive => lowered.contains(&token.to_lowercase()),
            }
        });

        trace!("Classified {} as {:?}", file_name, kind);
        kind
    }
}

/// Classify with the legacy case rules
pub fn classify(file_name: &str) -> Option<ObjectKind> {
    ObjectClassifier::default().classify(file_name)
}
