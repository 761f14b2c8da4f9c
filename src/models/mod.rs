pub mod gemini;
pub mod recommendation;
pub mod suggestion;
