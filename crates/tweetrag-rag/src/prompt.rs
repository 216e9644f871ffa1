//! Prompt composition for grounded answers

use tweetrag_core::Document;

const INSTRUCTION: &str = "Given these documents, answer the question.";

const NOTE: &str = "Note: Each document is a tweet record uniquely identified by its Id and Author metadata, with the tweet text as its content.
The total number of documents corresponds to the number of tweets retrieved for this question.
The AI should base its answers on the information contained in these document/tweet units.";

/// Renders ranked documents and a question into a single generation prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer;

impl PromptComposer {
    pub fn new() -> Self {
        Self
    }

    /// Render the prompt. Documents appear in the order given, numbered from 1.
    pub fn compose(&self, question: &str, documents: &[Document]) -> String {
        let mut prompt = String::from(INSTRUCTION);
        prompt.push_str("\nDocuments:\n");

        for (i, doc) in documents.iter().enumerate() {
            prompt.push_str(&format!("Document {}:\n", i + 1));
            prompt.push_str(&format!("Document metadata: {}\n", doc.meta()));
            prompt.push_str(&doc.content);
            prompt.push('\n');
        }

        prompt.push_str(&format!("\nQuestion: {}\nAnswer:\n\n", question));
        prompt.push_str(NOTE);
        prompt
    }
}
