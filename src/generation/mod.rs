// Generation module
// Handles the Ollama text-generation backend

pub mod ollama;

pub use ollama::OllamaClient;
