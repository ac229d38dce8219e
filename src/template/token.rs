pub use logos::Logos;

/// Tokens found between a pair of placeholder delimiters.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(
    error = (),
    skip r"[ \t]+"
)]
pub enum Token<'i> {
    #[regex("[A-Za-z_][A-Za-z0-9_]*")]
    Ident(&'i str),

    #[regex(r"[^ \tA-Za-z_]+", priority = 0)]
    Other(&'i str),
}
