//! LLM domain: prompt building and the Gemini call.
//!
//! External code should only use the items exported here.

mod gemini;
pub mod prompts;
pub mod types;

pub use gemini::{generate_comment, CommentRequest};
pub use prompts::{build_system_instruction, build_user_prompt, Persona, DEFAULT_PERSONA};
