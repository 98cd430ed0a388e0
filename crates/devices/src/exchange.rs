use serde::{Deserialize, Serialize};

use blueprint_core::{AggregateRoot, SurrogateId};

/// Short code identifying an exchange (e.g. `exch1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeCode(String);

impl ExchangeCode {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ExchangeCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A telephone exchange housing access devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    #[serde(skip)]
    surrogate_id: Option<SurrogateId>,
    code: ExchangeCode,
    name: String,
    postcode: String,
}

impl Exchange {
    pub fn new(code: ExchangeCode, name: impl Into<String>, postcode: impl Into<String>) -> Self {
        Self {
            surrogate_id: None,
            code,
            name: name.into(),
            postcode: postcode.into(),
        }
    }

    pub fn code(&self) -> &ExchangeCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn postcode(&self) -> &str {
        &self.postcode
    }
}

impl AggregateRoot for Exchange {
    type Id = ExchangeCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }

    fn surrogate_id(&self) -> Option<SurrogateId> {
        self.surrogate_id
    }

    fn assign_surrogate_id(&mut self, id: SurrogateId) {
        self.surrogate_id = Some(id);
    }
}
