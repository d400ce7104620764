//! In-memory model of the straps XML document.

use serde::Deserialize;

use crate::StrapsError;

/// A single `<strap key="..." value="..."/>` element.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Setting {
    #[serde(rename = "@key")]
    pub key: String,
    #[serde(rename = "@value")]
    pub value: String,
}

/// An `<env name="...">` element and its settings. May be empty.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Environment {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(default, rename = "strap")]
    pub straps: Vec<Setting>,
}

/// The `<straps>` root: an ordered sequence of environments.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Document {
    #[serde(default, rename = "env")]
    pub environments: Vec<Environment>,
}

impl Document {
    /// Parses a straps document from XML text.
    ///
    /// No validation is performed beyond structural well-formedness.
    pub fn parse(xml: &str) -> Result<Self, StrapsError> {
        quick_xml::de::from_str(xml).map_err(StrapsError::ParseError)
    }

    /// Returns the first environment with the given name, if any.
    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.environments.iter().find(|env| env.name == name)
    }
}
