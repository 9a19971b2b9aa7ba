pub mod canonical_json;
pub mod redact;
pub mod suggest;
pub mod text;
