//! Table and column references.
//!
//! An [`Ident`] is either a name the grammar quotes (`users.id`, `users AS u`)
//! or a raw [`Expression`] inserted as-is. Names are not validated against any
//! schema.

use crate::value::Expression;
use std::fmt;

/// A table or column reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ident {
    /// Quoted by the grammar: dotted parts and `AS` aliases are handled.
    Name(String),
    /// Inserted verbatim.
    Raw(Expression),
}

impl Ident {
    pub fn name(name: impl Into<String>) -> Self {
        Ident::Name(name.into())
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Ident::Raw(_))
    }

    /// The unquoted name, or `None` for raw expressions.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Ident::Name(name) => Some(name),
            Ident::Raw(_) => None,
        }
    }

    /// Whether this is the `*` wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.as_name() == Some("*")
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ident::Name(name) => f.write_str(name),
            Ident::Raw(expr) => write!(f, "{expr}"),
        }
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::Name(name.to_string())
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Ident::Name(name)
    }
}

impl From<&String> for Ident {
    fn from(name: &String) -> Self {
        Ident::Name(name.clone())
    }
}

impl From<Expression> for Ident {
    fn from(expr: Expression) -> Self {
        Ident::Raw(expr)
    }
}

impl From<&Ident> for Ident {
    fn from(ident: &Ident) -> Self {
        ident.clone()
    }
}
