use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::{bail, Result};
use essaydesk::assistant::{GenerationRequest, SuggestionEngine};

/// Engine stub that returns canned responses in order, so tests can drive
/// the accept/reject flow with exact replacement text.
pub struct ScriptedEngine {
    responses: RefCell<VecDeque<String>>,
}

impl ScriptedEngine {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: RefCell::new(responses.into_iter().map(Into::into).collect()),
        }
    }

    pub fn boxed<I, S>(responses: I) -> Box<dyn SuggestionEngine>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Box::new(Self::new(responses))
    }
}

impl SuggestionEngine for ScriptedEngine {
    fn label(&self) -> &str {
        "scripted"
    }

    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        match self.responses.borrow_mut().pop_front() {
            Some(response) => Ok(response),
            None => bail!("Scripted engine exhausted on {:?}", request.kind),
        }
    }
}
