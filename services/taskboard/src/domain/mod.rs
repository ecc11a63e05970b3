//! 领域层
//!
//! Todo（物理删除）、Tag 与 Category（软删除）

mod category;
mod tag;
mod todo;

pub use category::*;
pub use tag::*;
pub use todo::*;
