mod token;

use anyhow::{anyhow, bail, Result};
use std::{borrow::Cow, fmt::Write};

use crate::{delimit::PLACEHOLDER, request::GenerationRequest, sanitize};
use token::{Logos, Token};

/// Format of the `{{ timestamp }}` placeholder.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A named, fixed piece of template text compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct Asset {
    pub name: &'static str,
    pub source: &'static str,
}

/// Shebang and metadata comment block.
pub const HEADER: Asset = Asset {
    name: "header",
    source: include_str!("../../templates/header.sh"),
};

/// Script skeleton with its own logging, trap and validation helpers.
pub const BODY: Asset = Asset {
    name: "body",
    source: include_str!("../../templates/body.sh"),
};

/// Assets making up a generated script, in output order.
pub const ASSETS: [Asset; 2] = [HEADER, BODY];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    QuotedDescription,
    Author,
    Timestamp,
}

impl Field {
    fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "name" => Some(Field::Name),
            "description" => Some(Field::Description),
            "quoted_description" => Some(Field::QuotedDescription),
            "author" => Some(Field::Author),
            "timestamp" => Some(Field::Timestamp),
            _ => None,
        }
    }
}

/// Values substituted into the placeholders.
#[derive(Debug, Clone)]
pub struct Fields {
    pub name: String,
    pub description: String,
    /// The description as one single-quoted shell word.
    pub quoted_description: String,
    pub author: String,
    pub timestamp: String,
}

impl Fields {
    #[must_use]
    pub fn new(request: &GenerationRequest, timestamp: impl Into<String>) -> Self {
        let description = request.description_text();

        Fields {
            name: request.name.clone(),
            quoted_description: sanitize::shell_quote(&description),
            description,
            author: request.author_text(),
            timestamp: timestamp.into(),
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Description => &self.description,
            Field::QuotedDescription => &self.quoted_description,
            Field::Author => &self.author,
            Field::Timestamp => &self.timestamp,
        }
    }
}

pub struct Replaced<'a>(Vec<Cow<'a, str>>);

impl Replaced<'_> {
    pub fn extend_str(&self, t: &mut String) -> Result<()> {
        for r in &self.0 {
            t.write_str(r)?;
        }
        Ok(())
    }
}

/// 1-based line of the byte offset `at` in `contents`.
fn line_of(contents: &str, at: usize) -> usize {
    contents[..at].matches('\n').count() + 1
}

/// Parses the text between two delimiters into the field it names.
fn parse_placeholder(inner: &str) -> Option<Field> {
    let mut lexer = Token::lexer(inner);

    match (lexer.next(), lexer.next()) {
        (Some(Ok(Token::Ident(ident))), None) => Field::from_ident(ident),
        _ => None,
    }
}

impl Asset {
    /// Substitutes every placeholder of this asset, borrowing the verbatim
    /// text in between.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] on an unclosed delimiter or a placeholder that
    /// does not name a known field
    pub fn replace<'a>(&'a self, fields: &'a Fields) -> Result<Replaced<'a>> {
        let delimiters = PLACEHOLDER;
        let contents = self.source;
        let (open_len, close_len) = delimiters.sizes();
        let mut result = Vec::with_capacity(32);
        let mut last_i = 0;

        while let Some(start) = delimiters.find_start(contents, last_i) {
            let Some(end) = delimiters.find_end(contents, start + open_len) else {
                bail!(
                    "Unclosed delimiter {} in template {} at line {}",
                    delimiters.open(),
                    self.name,
                    line_of(contents, start)
                );
            };

            let inner = &contents[start + open_len..end];
            let field = parse_placeholder(inner).ok_or_else(|| {
                anyhow!(
                    "Unknown placeholder '{}' in template {} at line {}",
                    inner.trim(),
                    self.name,
                    line_of(contents, start)
                )
            })?;

            result.push(Cow::Borrowed(&contents[last_i..start]));
            result.push(Cow::Borrowed(fields.get(field)));

            last_i = end + close_len;
        }

        result.push(Cow::Borrowed(&contents[last_i..]));

        Ok(Replaced(result))
    }
}

/// Renders every asset, in order, into one script text.
///
/// The output only depends on `request` and `timestamp`.
///
/// # Errors
///
/// Returns an [`Err`] if an asset contains an invalid placeholder
pub fn render(request: &GenerationRequest, timestamp: &str) -> Result<String> {
    let fields = Fields::new(request, timestamp);
    let mut script = String::new();

    for asset in &ASSETS {
        asset.replace(&fields)?.extend_str(&mut script)?;
    }

    crate::trace!(
        "Rendered {} lines for '{}'",
        script.lines().count(),
        request.name
    );

    Ok(script)
}

/// Current local time in [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
