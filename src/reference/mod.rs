/// Reference parsing.
///
/// Turns free-form references such as `"1 Corinthians 13:4-7"` into a
/// [`Locator`](crate::types::Locator). Book tokens are left as typed; see
/// [`crate::resolution`] for canonicalization.
mod parser;

pub use parser::parse_reference;
