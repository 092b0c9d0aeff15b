use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Customer gender, stored and serialized in lowercase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(()),
        }
    }
}

/// A stored customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub gender: Gender,
}

/// Request body for POST and PUT on customers
///
/// Every field is optional so that PUT can carry a partial update. A JSON
/// `null` deserializes to `None` and is treated the same as an omitted field.
/// Unknown keys, including `id`, are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CustomerPayload {
    #[schema(min_length = 1, max_length = 50)]
    pub name: Option<String>,
    #[schema(example = "john@example.com")]
    pub email: Option<String>,
    #[schema(min_length = 10, max_length = 10, pattern = "^[0-9]{10}$")]
    pub phone: Option<String>,
    #[schema(min_length = 10)]
    pub address: Option<String>,
    #[schema(example = "male")]
    pub gender: Option<String>,
}

/// Field values that passed validation, ready to merge into a record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<Gender>,
}

impl CustomerChanges {
    pub fn is_empty(&self) -> bool {
        *self == CustomerChanges::default()
    }
}

impl Customer {
    /// Overwrite the fields present in `changes`, keeping the rest
    pub fn merge(&mut self, changes: CustomerChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        if let Some(address) = changes.address {
            self.address = address;
        }
        if let Some(gender) = changes.gender {
            self.gender = gender;
        }
    }
}

#[cfg(test)]
pub(crate) fn john_doe() -> Customer {
    Customer {
        id: Uuid::new_v4(),
        name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
        phone: "1234567890".to_string(),
        address: "123 Main St".to_string(),
        gender: Gender::Male,
    }
}
