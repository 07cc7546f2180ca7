//! Client Model (the company behind one or more businesses)

use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::common::{Address, Contact};
use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Client {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    #[graphql(skip)]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub siret: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default)]
    pub modules: ClientModules,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Which business kinds the client has enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, SimpleObject, InputObject)]
#[graphql(input_name = "ClientModulesInput")]
pub struct ClientModules {
    #[serde(default)]
    pub rooms: bool,
    #[serde(default)]
    pub services: bool,
    #[serde(default)]
    pub restaurant: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, InputObject)]
pub struct ClientInput {
    pub name: String,
    pub siret: Option<String>,
    pub address: Option<Address>,
    pub contact: Option<Contact>,
    pub modules: Option<ClientModules>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub siret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<ClientModules>,
}

impl Client {
    pub fn from_input(input: ClientInput, now: i64) -> Self {
        Self {
            id: None,
            name: input.name,
            siret: input.siret,
            address: input.address,
            contact: input.contact,
            modules: input.modules.unwrap_or_default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
