//! Skeleton extraction
//!
//! Collapses executable bodies to a placeholder while keeping declarations.
//! Everything here is heuristic text transformation: no AST, no scoping.
//!
//! ## Key Components
//!
//! - [`LiteralScanner`]: single-pass quote tracking
//! - [`hollow_out_bodies`]: brace-depth body collapsing
//! - [`Skeletonizer`]: per-language dispatch (indentation walk for Python)
//!
//! ## Example
//!
//! ```rust
//! use code_collector::core::skeleton::hollow_out_bodies;
//!
//! let skeleton = hollow_out_bodies("int add(int a,int b){ return a+b; }");
//! assert_eq!(skeleton, "int add(int a,int b){ /* ... */ }");
//! ```

mod hollow;
mod parser;
mod scanner;
mod types;


pub use hollow::{hollow_out_bodies, BODY_PLACEHOLDER};
pub use parser::{extract_code_skeleton, Skeletonizer};
pub use scanner::{CharClass, LiteralScanner};
pub use types::SkeletonResult;
