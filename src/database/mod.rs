// Database module
// Handles the dual backend system (PostgreSQL for maintenance records, Qdrant for vectors)

pub mod postgres;
pub mod qdrant;
